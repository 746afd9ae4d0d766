// Domain model for league rosters.
//
// These are the reconciled, store-backed shapes the valuation layer works
// on. Raw feed entries (`espn::types`) are converted into these exactly once
// per update cycle.

use crate::roster::categories::{RaterLine, StatLine};

/// A rostered player carried across seasons.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub full_name: String,
    /// Auction salary currently on the books.
    pub salary: i64,
    /// Seasons this player has already been kept, oldest first.
    pub keeper_history: Vec<u16>,
    /// Aggregate rater value over the previous season.
    pub previous_rater: f64,
    /// Aggregate rater value over the current season so far.
    pub current_rater: f64,
    pub games_played: u32,
    /// Sitting in the injured-reserve lineup slot.
    pub injured_spot: bool,
    /// No previous-season rater existed when the player first appeared.
    pub has_not_played_last_season: bool,
    pub categories_raters: RaterLine,
    pub previous_categories_raters: RaterLine,
    pub detailed_stats: StatLine,
}

impl Player {
    /// Number of seasons already spent as a keeper.
    pub fn keeper_seasons(&self) -> usize {
        self.keeper_history.len()
    }

    /// Year-over-year rater swing. Negative previous values count as zero so
    /// a bad season does not inflate the rebound.
    pub fn rater_delta(&self) -> f64 {
        self.current_rater - self.previous_rater.max(0.0)
    }

    /// Whether the salary projection should skip the delta adjustment
    /// entirely (no meaningful previous-season baseline).
    pub fn delta_not_applicable(&self) -> bool {
        self.previous_rater == 0.0
    }
}

/// A league team and its reconciled roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub roster: Vec<Player>,
}

/// A player flagged as not worth drafting, usually because of injury.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpickablePlayer {
    pub id: i64,
    pub name: String,
    /// Injury is season-ending; these entries survive healing checks.
    pub out_for_season: bool,
}
