// Team-level aggregation.
//
// Rolls a reconciled roster up into the numbers the league report prints:
// rater sums for both seasons, payroll, projected payroll, the keeper bill,
// and a combined counting-stat line.

use std::collections::BTreeMap;

use crate::roster::categories::StatLine;
use crate::roster::model::Team;
use crate::valuation::salary;

/// Aggregated numbers for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamTotals {
    pub current_rater: f64,
    pub previous_rater: f64,
    /// Payroll on the books. Injured-reserve slots do not count against it.
    pub current_salary: i64,
    /// Sum of next-season salary projections across the whole roster.
    pub projected_salary: i64,
    /// Next-season cost of the currently selected keepers.
    pub projected_keepers_salaries: i64,
    /// Counting stats summed over every rostered player, injured included.
    pub stats: StatLine,
}

/// Everything the report needs for one team.
#[derive(Debug, Clone)]
pub struct TeamDetailsData {
    pub team: Team,
    pub projected_salaries: BTreeMap<i64, i64>,
    pub totals: TeamTotals,
}

/// Totals for a single team given its projected salaries.
pub fn team_totals(
    team: &Team,
    projected_salaries: &BTreeMap<i64, i64>,
    keepers: &[i64],
) -> TeamTotals {
    let previous_rater = team.roster.iter().map(|p| p.previous_rater).sum();
    let current_rater = team.roster.iter().map(|p| p.current_rater).sum();
    let current_salary = team
        .roster
        .iter()
        .filter(|p| !p.injured_spot)
        .map(|p| p.salary)
        .sum();

    let mut stats = StatLine::default();
    for player in &team.roster {
        stats = stats.add(&player.detailed_stats);
    }

    let projected_salary = projected_salaries.values().sum();
    let projected_keepers_salaries = keepers
        .iter()
        .filter_map(|id| projected_salaries.get(id))
        .sum();

    TeamTotals {
        current_rater,
        previous_rater,
        current_salary,
        projected_salary,
        projected_keepers_salaries,
        stats,
    }
}

/// Projects and aggregates every team, keyed by team id. The keeper list is
/// league-wide; ids simply fail to match on the other teams.
pub fn data_by_team_id(
    teams: &[Team],
    keepers: &[i64],
    salary_floor: i64,
) -> BTreeMap<i64, TeamDetailsData> {
    let mut data = BTreeMap::new();
    for team in teams {
        let projected_salaries = salary::projected_salaries(team, salary_floor);
        let totals = team_totals(team, &projected_salaries, keepers);
        data.insert(
            team.id,
            TeamDetailsData {
                team: team.clone(),
                projected_salaries,
                totals,
            },
        );
    }
    data
}
