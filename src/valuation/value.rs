// Per-player value rates.
//
// Normalizes rater production against salary, projected salary, and games
// played so bargain contracts stand out. Categories the league wants to
// punt can be subtracted from the aggregate before the rates are computed.

use std::collections::BTreeMap;

use crate::roster::categories::RaterCategory;
use crate::roster::model::{Player, Team};
use crate::valuation::totals::TeamDetailsData;

/// One player's value rates, ready to rank.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerValueMetrics {
    pub player_id: i64,
    pub full_name: String,
    /// Abbreviation of the owning team.
    pub team: String,
    /// Aggregate rater after punted categories are removed.
    pub current_rater: f64,
    pub previous_rater: f64,
    pub salary: i64,
    pub projected_salary: i64,
    pub games_played: u32,
    pub rater_by_salary: f64,
    /// Previous-season rater (unadjusted) against the current salary.
    pub old_rater_by_salary: f64,
    pub rater_by_projected_salary: f64,
    /// Rater per game, scaled back up by the league-average games played so
    /// low-volume players stay comparable.
    pub rater_by_games: f64,
}

/// Mean games played across every rostered player in the league.
pub fn league_average_games(teams: &[Team]) -> f64 {
    let mut games = 0u64;
    let mut players = 0u64;
    for team in teams {
        for player in &team.roster {
            games += u64::from(player.games_played);
            players += 1;
        }
    }
    if players == 0 {
        return 0.0;
    }
    games as f64 / players as f64
}

/// Value rates for a single player.
pub fn player_value_metrics(
    player: &Player,
    team_abbreviation: &str,
    projected_salaries: &BTreeMap<i64, i64>,
    omitted: &[RaterCategory],
    average_games: f64,
) -> PlayerValueMetrics {
    let mut current_rater = player.current_rater;
    let mut previous_rater = player.previous_rater;
    for category in omitted {
        current_rater -= player.categories_raters.get(*category);
        previous_rater -= player.previous_categories_raters.get(*category);
    }

    let projected_salary = projected_salaries.get(&player.id).copied().unwrap_or(0);
    let rater_by_projected_salary = if projected_salary != 0 {
        current_rater / projected_salary as f64
    } else {
        0.0
    };
    let rater_by_games = if player.games_played != 0 {
        current_rater / f64::from(player.games_played) * average_games
    } else {
        0.0
    };

    PlayerValueMetrics {
        player_id: player.id,
        full_name: player.full_name.clone(),
        team: team_abbreviation.to_string(),
        current_rater,
        previous_rater,
        salary: player.salary,
        projected_salary,
        games_played: player.games_played,
        rater_by_salary: current_rater / player.salary as f64,
        old_rater_by_salary: player.previous_rater / player.salary as f64,
        rater_by_projected_salary,
        rater_by_games,
    }
}

/// Value rates for every rostered player in the league.
pub fn league_value_metrics(
    data: &BTreeMap<i64, TeamDetailsData>,
    omitted: &[RaterCategory],
) -> Vec<PlayerValueMetrics> {
    let teams: Vec<Team> = data.values().map(|d| d.team.clone()).collect();
    let average_games = league_average_games(&teams);

    let mut metrics = Vec::new();
    for details in data.values() {
        for player in &details.team.roster {
            metrics.push(player_value_metrics(
                player,
                &details.team.abbreviation,
                &details.projected_salaries,
                omitted,
                average_games,
            ));
        }
    }
    metrics
}
