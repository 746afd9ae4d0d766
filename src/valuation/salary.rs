// Keeper salary projection.
//
// Next season's salary is this season's salary plus a keep surcharge and a
// rater-delta adjustment read off a fixed bucket ladder. The ladder uses
// strict upper bounds, so a delta sitting exactly on a threshold falls into
// the bucket above it.

use std::collections::BTreeMap;

use crate::roster::model::Team;

/// Projects a single salary for next season.
///
/// `keeper_seasons` is how many seasons the player has already been kept; a
/// second keep starts costing an extra 5 per season. When the delta is zero,
/// not a number, or flagged as not applicable, only the keep surcharge
/// applies.
pub fn project_salary(
    salary: i64,
    keeper_seasons: usize,
    delta_not_applicable: bool,
    rater_delta: f64,
) -> i64 {
    let with_keeps = if keeper_seasons >= 2 {
        salary + (keeper_seasons as i64 - 1) * 5
    } else {
        salary
    };
    if rater_delta == 0.0 || rater_delta.is_nan() || delta_not_applicable {
        return with_keeps;
    }
    if rater_delta < -3.0 {
        with_keeps - 5
    } else if rater_delta < -2.5 {
        with_keeps - 4
    } else if rater_delta < -2.0 {
        with_keeps - 3
    } else if rater_delta < -1.5 {
        with_keeps - 2
    } else if rater_delta < -1.0 {
        with_keeps - 1
    } else if rater_delta < -0.5 {
        with_keeps
    } else if rater_delta < 0.5 {
        with_keeps + 1
    } else if rater_delta < 1.5 {
        with_keeps + 2
    } else if rater_delta < 2.0 {
        with_keeps + 3
    } else if rater_delta < 3.0 {
        with_keeps + 4
    } else {
        with_keeps + 5
    }
}

/// Clamps a projected salary to the league floor.
pub fn floor_at(value: i64, floor: i64) -> i64 {
    if value < floor {
        floor
    } else {
        value
    }
}

/// Projected salaries for a whole roster, keyed by player id.
pub fn projected_salaries(team: &Team, floor: i64) -> BTreeMap<i64, i64> {
    let mut salaries = BTreeMap::new();
    for player in &team.roster {
        let projected = project_salary(
            player.salary,
            player.keeper_seasons(),
            player.delta_not_applicable(),
            player.rater_delta(),
        );
        salaries.insert(player.id, floor_at(projected, floor));
    }
    salaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::categories::{RaterLine, StatLine};
    use crate::roster::model::Player;

    fn roster_player(id: i64, salary: i64, previous: f64, current: f64) -> Player {
        Player {
            id,
            full_name: format!("Player {id}"),
            salary,
            keeper_history: Vec::new(),
            previous_rater: previous,
            current_rater: current,
            games_played: 50,
            injured_spot: false,
            has_not_played_last_season: false,
            categories_raters: RaterLine::default(),
            previous_categories_raters: RaterLine::default(),
            detailed_stats: StatLine::default(),
        }
    }

    // =======================================================================
    // project_salary
    // =======================================================================

    #[test]
    fn zero_delta_returns_base_salary() {
        assert_eq!(project_salary(100, 0, false, 0.0), 100);
        assert_eq!(project_salary(100, 0, false, -0.0), 100);
    }

    #[test]
    fn nan_delta_returns_base_salary() {
        assert_eq!(project_salary(40, 0, false, f64::NAN), 40);
    }

    #[test]
    fn not_applicable_flag_skips_the_ladder() {
        assert_eq!(project_salary(50, 0, true, 4.0), 50);
    }

    #[test]
    fn keep_surcharge_starts_at_two_seasons() {
        assert_eq!(project_salary(100, 1, false, 0.0), 100);
        assert_eq!(project_salary(100, 2, false, 0.0), 105);
        assert_eq!(project_salary(100, 3, false, 0.0), 110);
        assert_eq!(project_salary(100, 5, false, 0.0), 120);
    }

    #[test]
    fn delta_ladder_covers_the_documented_cases() {
        assert_eq!(project_salary(50, 0, false, -3.2), 45);
        assert_eq!(project_salary(50, 0, false, 4.0), 55);
    }

    #[test]
    fn delta_ladder_thresholds_are_strict() {
        // Exactly -3 lands in the -4 bucket, not -5.
        assert_eq!(project_salary(50, 0, false, -3.0), 46);
        assert_eq!(project_salary(50, 0, false, -2.5), 47);
        assert_eq!(project_salary(50, 0, false, -2.0), 48);
        assert_eq!(project_salary(50, 0, false, -1.5), 49);
        assert_eq!(project_salary(50, 0, false, -1.0), 50);
        assert_eq!(project_salary(50, 0, false, -0.7), 50);
        assert_eq!(project_salary(50, 0, false, -0.5), 51);
        assert_eq!(project_salary(50, 0, false, 0.3), 51);
        assert_eq!(project_salary(50, 0, false, 0.5), 52);
        assert_eq!(project_salary(50, 0, false, 1.5), 53);
        assert_eq!(project_salary(50, 0, false, 2.0), 54);
        assert_eq!(project_salary(50, 0, false, 3.0), 55);
    }

    #[test]
    fn surcharge_and_ladder_stack() {
        assert_eq!(project_salary(30, 3, false, 2.5), 44);
    }

    // =======================================================================
    // projected_salaries
    // =======================================================================

    #[test]
    fn roster_projection_applies_the_floor() {
        let team = Team {
            id: 1,
            name: "Floor Test".to_string(),
            abbreviation: "FLT".to_string(),
            roster: vec![roster_player(7, 0, 2.0, -9.0)],
        };

        // 0 - 5 clamps up to the floor.
        let salaries = projected_salaries(&team, 1);
        assert_eq!(salaries.get(&7), Some(&1));
    }

    #[test]
    fn roster_projection_skips_delta_for_zero_previous_rater() {
        let team = Team {
            id: 1,
            name: "Rookies".to_string(),
            abbreviation: "RKS".to_string(),
            roster: vec![roster_player(1, 10, 0.0, 5.0)],
        };

        let salaries = projected_salaries(&team, 1);
        assert_eq!(salaries.get(&1), Some(&10));
    }

    #[test]
    fn roster_projection_clamps_negative_previous_before_the_delta() {
        // Previous -4 counts as 0, so the delta is the raw current value,
        // but the skip flag stays off because previous is not exactly zero.
        let team = Team {
            id: 1,
            name: "Rebounds".to_string(),
            abbreviation: "RBD".to_string(),
            roster: vec![roster_player(2, 20, -4.0, 1.0)],
        };

        let salaries = projected_salaries(&team, 1);
        assert_eq!(salaries.get(&2), Some(&22));
    }
}
