// Numeric code tables for the ESPN fantasy basketball feed.
//
// The feed identifies rating categories and raw stats by numeric ids whose
// meanings are an external contract that can shift between seasons. Each
// `SeasonCodes` set pins the mapping for the seasons it covers; a feed-side
// change in a future season gets a new set instead of an edit to an old one.

use crate::roster::categories::{RaterCategory, StatCategory};

// ---------------------------------------------------------------------------
// SeasonCodes
// ---------------------------------------------------------------------------

/// Bidirectional code tables for one range of feed seasons.
#[derive(Debug)]
pub struct SeasonCodes {
    /// First feed season this set is known to apply to.
    first_season: u16,
    rater: &'static [(u32, RaterCategory)],
    stats: &'static [(&'static str, StatCategory)],
    games_played: &'static str,
}

impl SeasonCodes {
    /// Rating category for a `forStat` code from the rater feed, if known.
    pub fn rater_category(&self, code: u32) -> Option<RaterCategory> {
        self.rater
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, category)| *category)
    }

    /// Feed code for a rating category, if this set carries one.
    pub fn rater_code(&self, category: RaterCategory) -> Option<u32> {
        self.rater
            .iter()
            .find(|(_, cat)| *cat == category)
            .map(|(code, _)| *code)
    }

    /// Stat category for a stat-code key from a player's season totals.
    pub fn stat_category(&self, code: &str) -> Option<StatCategory> {
        self.stats
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, category)| *category)
    }

    /// Feed code for a stat category, if this set carries one.
    pub fn stat_code(&self, category: StatCategory) -> Option<&'static str> {
        self.stats
            .iter()
            .find(|(_, cat)| *cat == category)
            .map(|(code, _)| *code)
    }

    /// Stat-code key holding games played.
    pub fn games_played_code(&self) -> &'static str {
        self.games_played
    }

    /// Id of the season-totals entry in a player's stats list
    /// (`"00"` split prefix + season, e.g. `"002026"`).
    pub fn season_totals_id(&self, season: u16) -> String {
        format!("00{season}")
    }
}

// ---------------------------------------------------------------------------
// Known code sets (newest first)
// ---------------------------------------------------------------------------

const CODES_2026: SeasonCodes = SeasonCodes {
    first_season: 2026,
    rater: &[
        (19, RaterCategory::Fg),
        (20, RaterCategory::Ft),
        (17, RaterCategory::ThreePm),
        (6, RaterCategory::Reb),
        (3, RaterCategory::Ast),
        (2, RaterCategory::Stl),
        (1, RaterCategory::Blk),
        (11, RaterCategory::Turnovers),
        (0, RaterCategory::Pts),
    ],
    stats: &[
        ("13", StatCategory::Fgm),
        ("14", StatCategory::Fga),
        ("15", StatCategory::Ftm),
        ("16", StatCategory::Fta),
        ("33", StatCategory::ThreePm),
        ("30", StatCategory::Reb),
        ("26", StatCategory::Ast),
        ("31", StatCategory::Stl),
        ("27", StatCategory::Blk),
        ("32", StatCategory::Turnovers),
        ("29", StatCategory::Pts),
    ],
    games_played: "42",
};

const CODE_SETS: &[SeasonCodes] = &[CODES_2026];

/// Code set for a feed season: the newest set whose first season is not
/// after `season`. Seasons older than every set reuse the oldest one.
pub fn for_season(season: u16) -> &'static SeasonCodes {
    for set in CODE_SETS {
        if season >= set.first_season {
            return set;
        }
    }
    &CODE_SETS[CODE_SETS.len() - 1]
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
