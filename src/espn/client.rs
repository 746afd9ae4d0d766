// HTTP client for the ESPN fantasy basketball API.
//
// Three read-only views are used: `kona_player_info` for the rater feed,
// `mRoster`/`mTeam` for the league rosters, and `kona_playercard` for a
// single player's injury status. The rater views are shaped server-side by
// the `X-Fantasy-Filter` header.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::espn::types::{PlayersResponse, RatedPlayer, RawTeam, TeamsResponse};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const FANTASY_FILTER_HEADER: &str = "X-Fantasy-Filter";

/// Lineup slots the rater feed is restricted to (active roster spots).
const ACTIVE_SLOT_IDS: [u32; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

// ---------------------------------------------------------------------------
// EspnClient
// ---------------------------------------------------------------------------

/// Read-only client for one league's ESPN fantasy endpoints.
pub struct EspnClient {
    http: reqwest::Client,
    base_url: String,
    league_id: u32,
    scoring_period_id: u32,
    player_limit: u32,
    /// `espn_s2`/`SWID` cookie pair, needed for private leagues only.
    cookie: Option<String>,
}

impl EspnClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let cookie = match (&config.credentials.espn_s2, &config.credentials.swid) {
            (Some(s2), Some(swid)) if !s2.is_empty() && !swid.is_empty() => {
                Some(format!("espn_s2={s2}; SWID={swid}"))
            }
            _ => None,
        };

        Self {
            http: reqwest::Client::new(),
            base_url: config.espn.base_url.clone(),
            league_id: config.league.id,
            scoring_period_id: config.espn.scoring_period_id,
            player_limit: config.espn.player_limit,
            cookie,
        }
    }

    /// Fetch the rated-player feed for `season`, sorted by total rating.
    pub async fn fetch_player_raters(&self, season: u16) -> Result<Vec<RatedPlayer>> {
        let url = format!(
            "{}?scoringPeriodId={}&view=kona_player_info",
            self.league_url(season),
            self.scoring_period_id
        );
        let filter = self.rater_filter(season);

        debug!("fetching player raters for season {season}");
        let response = self
            .get(&url)
            .header(FANTASY_FILTER_HEADER, filter.to_string())
            .send()
            .await
            .with_context(|| format!("failed to fetch season {season} raters"))?
            .error_for_status()
            .with_context(|| format!("season {season} rater request rejected"))?;
        let body: PlayersResponse = response
            .json()
            .await
            .context("failed to decode rater response")?;
        Ok(body.players)
    }

    /// Fetch every team's current roster for `season`.
    pub async fn fetch_rosters(&self, season: u16) -> Result<Vec<RawTeam>> {
        let url = format!("{}?view=mRoster&view=mTeam", self.league_url(season));

        debug!("fetching rosters for season {season}");
        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch season {season} rosters"))?
            .error_for_status()
            .with_context(|| format!("season {season} roster request rejected"))?;
        let body: TeamsResponse = response
            .json()
            .await
            .context("failed to decode roster response")?;
        Ok(body.teams)
    }

    /// Fetch the player card for one player, or `None` if the feed returns
    /// nothing for that id.
    pub async fn fetch_player_card(
        &self,
        season: u16,
        player_id: i64,
    ) -> Result<Option<RatedPlayer>> {
        let url = format!(
            "{}?scoringPeriodId={}&view=kona_playercard",
            self.league_url(season),
            self.scoring_period_id
        );
        let filter = card_filter(player_id, season);

        debug!("fetching player card for {player_id}");
        let response = self
            .get(&url)
            .header(FANTASY_FILTER_HEADER, filter.to_string())
            .send()
            .await
            .with_context(|| format!("failed to fetch player card for {player_id}"))?
            .error_for_status()
            .with_context(|| format!("player card request for {player_id} rejected"))?;
        let body: PlayersResponse = response
            .json()
            .await
            .context("failed to decode player card response")?;
        Ok(body.players.into_iter().next())
    }

    fn league_url(&self, season: u16) -> String {
        format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, self.league_id
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url);
        if let Some(cookie) = &self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request
    }

    /// Filter header for the rater feed: active slots only, rating sort,
    /// and the stat splits for `season` and the season before it.
    fn rater_filter(&self, season: u16) -> serde_json::Value {
        json!({
            "players": {
                "filterSlotIds": { "value": ACTIVE_SLOT_IDS },
                "limit": self.player_limit,
                "offset": 0,
                "sortRating": {
                    "additionalValue": null,
                    "sortAsc": false,
                    "sortPriority": 1,
                    "value": 0
                },
                "filterRanksForScoringPeriodIds": { "value": [self.scoring_period_id] },
                "filterRanksForRankTypes": { "value": ["STANDARD"] },
                "filterStatsForTopScoringPeriodIds": {
                    "value": 5,
                    "additionalValue": stat_split_ids(season)
                }
            }
        })
    }
}

/// Filter header for a single player card.
fn card_filter(player_id: i64, season: u16) -> serde_json::Value {
    json!({
        "players": {
            "filterIds": { "value": [player_id] },
            "filterStatsForTopScoringPeriodIds": {
                "value": 82,
                "additionalValue": stat_split_ids(season)
            }
        }
    })
}

/// Stat split ids requested from the feed: totals and projections for
/// `season`, the prior season's totals, and the rolling-window splits.
fn stat_split_ids(season: u16) -> Vec<String> {
    let last = season - 1;
    vec![
        format!("00{season}"),
        format!("10{season}"),
        format!("00{last}"),
        format!("01{season}"),
        format!("02{season}"),
        format!("03{season}"),
        format!("04{season}"),
    ]
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
