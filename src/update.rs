// Update cycle: pull fresh league data and persist the reconciled snapshot.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::SnapshotStore;
use crate::espn::client::EspnClient;
use crate::espn::codes;
use crate::espn::types::RatedPlayer;
use crate::roster::model::{Team, UnpickablePlayer};
use crate::roster::reconcile;

/// What one completed update cycle produced.
#[derive(Debug)]
pub struct UpdateOutcome {
    pub teams: Vec<Team>,
    pub unpickables: Vec<UnpickablePlayer>,
    pub completed_at: DateTime<Utc>,
}

/// Run one full update cycle against the live feed.
///
/// A failed feed fetch aborts the whole cycle; failures on individual
/// players inside the later steps are logged and skipped.
pub async fn run_update(
    config: &Config,
    store: &SnapshotStore,
    client: &EspnClient,
) -> Result<UpdateOutcome> {
    let current_season = config.league.current_season;
    let last_season = config.league.last_season();
    let codes = codes::for_season(current_season);

    // 1. Previous snapshot
    let previous_teams = store
        .load_teams(current_season, last_season)
        .context("failed to load stored teams")?;
    let stored_unpickables = store
        .load_unpickable_players()
        .context("failed to load stored unpickable players")?;
    info!(
        "loaded {} stored teams, {} unpickable players",
        previous_teams.len(),
        stored_unpickables.len()
    );

    // 2. Live feeds; the two current-season fetches are independent
    let (raters, rosters) = tokio::join!(
        client.fetch_player_raters(current_season),
        client.fetch_rosters(current_season)
    );
    let current_raters = raters.context("current-season rater fetch failed")?;
    let raw_teams = rosters.context("roster fetch failed")?;
    let last_season_raters = client
        .fetch_player_raters(last_season)
        .await
        .context("last-season rater fetch failed")?;
    info!(
        "fetched {} current raters, {} last-season raters, {} feed teams",
        current_raters.len(),
        last_season_raters.len(),
        raw_teams.len()
    );

    // 3. Reconcile
    let teams = reconcile::reconcile_rosters(
        &previous_teams,
        &raw_teams,
        &last_season_raters,
        &current_raters,
        codes,
        current_season,
    );
    let player_count: usize = teams.iter().map(|t| t.roster.len()).sum();
    info!(
        "reconciled {} teams covering {} players",
        teams.len(),
        player_count
    );

    // 4. Unpickable re-check
    let unpickables = check_unpickable_players(client, current_season, &stored_unpickables).await;
    info!("{} unpickable players after re-check", unpickables.len());

    // 5. Persist
    store
        .save_snapshot(&teams, &unpickables, current_season, last_season)
        .context("failed to persist snapshot")?;

    // 6. Stamp
    let completed_at = Utc::now();
    store
        .record_last_update(completed_at)
        .context("failed to record update time")?;
    info!("update cycle completed");

    Ok(UpdateOutcome {
        teams,
        unpickables,
        completed_at,
    })
}

/// Re-check the unpickable list against live player cards. Out-for-season
/// entries are kept without a fetch. The result is sorted by name.
pub async fn check_unpickable_players(
    client: &EspnClient,
    season: u16,
    stored: &[UnpickablePlayer],
) -> Vec<UnpickablePlayer> {
    let mut kept = Vec::with_capacity(stored.len());
    for player in stored {
        if player.out_for_season {
            debug!("skipping {} (out for season)", player.name);
            kept.push(player.clone());
            continue;
        }
        let check = client.fetch_player_card(season, player.id).await;
        if keep_after_check(player, check) {
            kept.push(player.clone());
        }
    }
    kept.sort_by(|a, b| a.name.cmp(&b.name));
    kept
}

/// Whether a checked player stays on the unpickable list. Healed players
/// drop; an empty card or a failed fetch keeps the entry.
fn keep_after_check(player: &UnpickablePlayer, check: Result<Option<RatedPlayer>>) -> bool {
    match check {
        Ok(Some(card)) => {
            if card.player.injured {
                debug!("{} is still injured", player.name);
                true
            } else {
                info!(
                    "{} is no longer injured, dropping from the unpickable list",
                    player.name
                );
                false
            }
        }
        Ok(None) => {
            warn!(
                "empty player card for {} ({}), keeping the entry",
                player.id, player.name
            );
            true
        }
        Err(e) => {
            warn!("failed to check {} ({}): {}", player.id, player.name, e);
            true
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
