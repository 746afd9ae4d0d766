// Feed-to-domain normalization.
//
// The rater and stat payloads arrive as sparse maps keyed by numeric codes.
// These helpers turn them into dense category lines, dropping codes the
// season's code table does not know about.

use std::collections::HashMap;

use crate::espn::codes::SeasonCodes;
use crate::espn::types::{FeedPlayer, PlayerRatings};
use crate::roster::categories::{RaterLine, StatLine};

/// Dense per-category rater line from a `statRankings` block.
pub fn rater_line(ratings: Option<&PlayerRatings>, codes: &SeasonCodes) -> RaterLine {
    let mut line = RaterLine::default();
    if let Some(ratings) = ratings {
        for ranking in &ratings.stat_rankings {
            if let Some(category) = codes.rater_category(ranking.for_stat) {
                line.set(category, ranking.rating);
            }
        }
    }
    line
}

/// Aggregate rater value, zero when the feed carries no rating context.
pub fn total_rating(ratings: Option<&PlayerRatings>) -> f64 {
    ratings.map(|r| r.total_rating).unwrap_or(0.0)
}

/// Dense counting-stat line from the season-totals split.
pub fn stat_line(player: &FeedPlayer, season: u16, codes: &SeasonCodes) -> StatLine {
    let mut line = StatLine::default();
    if let Some(stats) = season_totals(player, season, codes) {
        for (code, value) in stats {
            if let Some(category) = codes.stat_category(code) {
                line.set(category, *value);
            }
        }
    }
    line
}

/// Games played so far this season, zero when the split is missing.
pub fn games_played(player: &FeedPlayer, season: u16, codes: &SeasonCodes) -> u32 {
    season_totals(player, season, codes)
        .and_then(|stats| stats.get(codes.games_played_code()))
        .map(|games| *games as u32)
        .unwrap_or(0)
}

// The feed mixes several splits (projections, last-7, per-scoring-period)
// into one array; only the season-totals entry is interesting here.
fn season_totals<'a>(
    player: &'a FeedPlayer,
    season: u16,
    codes: &SeasonCodes,
) -> Option<&'a HashMap<String, f64>> {
    let wanted = codes.season_totals_id(season);
    player
        .stats
        .iter()
        .find(|entry| entry.id == wanted)
        .map(|entry| &entry.stats)
}
