// Roster reconciliation.
//
// Merges the fresh ESPN rosters into the stored league state. Players who
// stayed put keep their contract fields and get fresh production numbers;
// traded players carry their whole stored record to the new team; everyone
// else enters as a fresh contract at the feed's keeper value. Teams the
// store has never seen are skipped, as are entries with an acquisition tag
// the engine does not know.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::espn::codes::SeasonCodes;
use crate::espn::types::{AcquisitionType, PlayerRatings, RatedPlayer, RawPlayerEntry, RawTeam};
use crate::roster::categories::StatLine;
use crate::roster::model::{Player, Team};
use crate::roster::normalize;

/// Reconciles the stored rosters against the feed rosters.
///
/// `last_season_raters` and `current_raters` are the two rater feeds; both
/// are indexed by player id up front. The result is sorted by team name.
pub fn reconcile_rosters(
    previous_teams: &[Team],
    raw_teams: &[RawTeam],
    last_season_raters: &[RatedPlayer],
    current_raters: &[RatedPlayer],
    codes: &SeasonCodes,
    current_season: u16,
) -> Vec<Team> {
    let current_by_id: HashMap<i64, &RatedPlayer> =
        current_raters.iter().map(|r| (r.id, r)).collect();
    let last_by_id: HashMap<i64, &RatedPlayer> =
        last_season_raters.iter().map(|r| (r.id, r)).collect();
    // League-wide pool of stored players, for trades across teams.
    let stored_pool: HashMap<i64, &Player> = previous_teams
        .iter()
        .flat_map(|team| &team.roster)
        .map(|player| (player.id, player))
        .collect();

    let mut teams = Vec::with_capacity(raw_teams.len());

    for raw_team in raw_teams {
        let Some(old_team) = previous_teams.iter().find(|t| t.id == raw_team.id) else {
            warn!(
                "no stored team matches feed team {} ({}), skipping it",
                raw_team.id, raw_team.name
            );
            continue;
        };

        let mut roster = Vec::with_capacity(raw_team.roster.entries.len());

        for entry in &raw_team.roster.entries {
            let current_ratings = current_by_id
                .get(&entry.player_id)
                .and_then(|r| r.primary_ratings());
            let last_ratings = last_by_id
                .get(&entry.player_id)
                .and_then(|r| r.primary_ratings());
            let feed_player = &entry.player_pool_entry.player;
            let games_played = normalize::games_played(feed_player, current_season, codes);
            let detailed_stats = normalize::stat_line(feed_player, current_season, codes);

            if let Some(stored) = old_team.roster.iter().find(|p| p.id == entry.player_id) {
                debug!("kept player {} ({})", stored.id, stored.full_name);
                roster.push(refreshed_keeper(
                    stored,
                    entry,
                    current_ratings,
                    last_ratings,
                    games_played,
                    detailed_stats,
                    codes,
                ));
                continue;
            }

            match entry.acquisition_type {
                AcquisitionType::Add | AcquisitionType::Draft => {
                    debug!(
                        "fresh contract for {} ({})",
                        entry.player_id, feed_player.full_name
                    );
                    roster.push(fresh_player(
                        entry,
                        current_ratings,
                        last_ratings,
                        games_played,
                        detailed_stats,
                        codes,
                    ));
                }
                AcquisitionType::Trade => {
                    if let Some(stored) = stored_pool.get(&entry.player_id) {
                        debug!(
                            "traded player {} ({}) moved to team {}",
                            stored.id, stored.full_name, raw_team.id
                        );
                        roster.push(refreshed_trade(
                            stored,
                            entry,
                            current_ratings,
                            games_played,
                            detailed_stats,
                            codes,
                        ));
                    } else {
                        // Traded in from outside the stored pool, so there is
                        // no contract to carry over.
                        roster.push(fresh_player(
                            entry,
                            current_ratings,
                            last_ratings,
                            games_played,
                            detailed_stats,
                            codes,
                        ));
                    }
                }
                AcquisitionType::Unknown => {
                    warn!(
                        "unknown acquisition type for player {} ({}), dropping the entry",
                        entry.player_id, feed_player.full_name
                    );
                }
            }
        }

        teams.push(Team {
            id: old_team.id,
            name: old_team.name.clone(),
            abbreviation: old_team.abbreviation.clone(),
            roster,
        });
    }

    teams.sort_by(|a, b| a.name.cmp(&b.name));
    teams
}

// A player who never left the team. Contract fields stay, production fields
// refresh, and the previous-season category line is re-read from the feed.
fn refreshed_keeper(
    stored: &Player,
    entry: &RawPlayerEntry,
    current_ratings: Option<&PlayerRatings>,
    last_ratings: Option<&PlayerRatings>,
    games_played: u32,
    detailed_stats: StatLine,
    codes: &SeasonCodes,
) -> Player {
    Player {
        injured_spot: entry.injured_spot(),
        current_rater: normalize::total_rating(current_ratings),
        games_played,
        categories_raters: normalize::rater_line(current_ratings, codes),
        previous_categories_raters: normalize::rater_line(last_ratings, codes),
        detailed_stats,
        ..stored.clone()
    }
}

// A player traded inside the league. The stored record moves wholesale,
// previous-season lines included; only current production refreshes.
fn refreshed_trade(
    stored: &Player,
    entry: &RawPlayerEntry,
    current_ratings: Option<&PlayerRatings>,
    games_played: u32,
    detailed_stats: StatLine,
    codes: &SeasonCodes,
) -> Player {
    Player {
        injured_spot: entry.injured_spot(),
        current_rater: normalize::total_rating(current_ratings),
        games_played,
        categories_raters: normalize::rater_line(current_ratings, codes),
        detailed_stats,
        ..stored.clone()
    }
}

// A player with no stored record. The salary comes from the feed's keeper
// value and the keeper history starts empty.
fn fresh_player(
    entry: &RawPlayerEntry,
    current_ratings: Option<&PlayerRatings>,
    last_ratings: Option<&PlayerRatings>,
    games_played: u32,
    detailed_stats: StatLine,
    codes: &SeasonCodes,
) -> Player {
    Player {
        id: entry.player_id,
        full_name: entry.player_pool_entry.player.full_name.clone(),
        salary: entry.player_pool_entry.keeper_value_future,
        keeper_history: Vec::new(),
        previous_rater: normalize::total_rating(last_ratings),
        current_rater: normalize::total_rating(current_ratings),
        games_played,
        injured_spot: entry.injured_spot(),
        has_not_played_last_season: last_ratings.is_none(),
        categories_raters: normalize::rater_line(current_ratings, codes),
        previous_categories_raters: normalize::rater_line(last_ratings, codes),
        detailed_stats,
    }
}
