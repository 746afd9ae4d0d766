// Wire types for the ESPN fantasy v3 JSON payloads.
//
// These deserialize only the fields the engine consumes; everything else in
// the (very large) feed objects is ignored. Domain types live in
// `roster::model`; the reconciler is the only place raw entries cross over.

use std::collections::HashMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rater feed (view=kona_player_info / kona_playercard)
// ---------------------------------------------------------------------------

/// One entry of the `players` array in the rater feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedPlayer {
    pub id: i64,
    /// Rating contexts keyed by scoring-context id; `"0"` is the primary one.
    #[serde(default)]
    pub ratings: HashMap<String, PlayerRatings>,
    pub player: FeedPlayer,
}

impl RatedPlayer {
    /// Ratings for the primary scoring context (feed key `"0"`).
    pub fn primary_ratings(&self) -> Option<&PlayerRatings> {
        self.ratings.get("0")
    }
}

/// Aggregate rating plus the per-category breakdown.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRatings {
    #[serde(default)]
    pub total_rating: f64,
    #[serde(default)]
    pub stat_rankings: Vec<StatRanking>,
}

/// One (category code, rating) pair from `statRankings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRanking {
    pub for_stat: u32,
    #[serde(default)]
    pub rating: f64,
}

/// The nested `player` object shared by both feeds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlayer {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub injured: bool,
    /// Per-split stat entries; the season-totals entry has id `"00" + season`.
    #[serde(default)]
    pub stats: Vec<SeasonStatsEntry>,
}

/// One stat split: an id plus a sparse map from stat-code strings to values.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonStatsEntry {
    pub id: String,
    #[serde(default)]
    pub stats: HashMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Roster feed (view=mRoster&view=mTeam)
// ---------------------------------------------------------------------------

/// One entry of the `teams` array in the roster feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeam {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roster: RawRoster,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoster {
    #[serde(default)]
    pub entries: Vec<RawPlayerEntry>,
}

/// The injured-reserve lineup slot.
pub const INJURED_LINEUP_SLOT: u32 = 13;

/// One roster slot entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerEntry {
    pub player_id: i64,
    #[serde(default)]
    pub lineup_slot_id: u32,
    #[serde(default)]
    pub acquisition_type: AcquisitionType,
    pub player_pool_entry: PlayerPoolEntry,
}

impl RawPlayerEntry {
    /// Whether the entry currently sits in the injured-reserve slot.
    pub fn injured_spot(&self) -> bool {
        self.lineup_slot_id == INJURED_LINEUP_SLOT
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoolEntry {
    /// Next-season keeper cost; fresh roster entries take their salary from it.
    #[serde(default)]
    pub keeper_value_future: i64,
    pub player: FeedPlayer,
}

/// How a player landed on the roster. Tags outside the three known ones
/// deserialize to `Unknown` and are dropped by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcquisitionType {
    Draft,
    Add,
    Trade,
    #[default]
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlayersResponse {
    #[serde(default)]
    pub players: Vec<RatedPlayer>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<RawTeam>,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
