// Courtkeeper entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to stderr; stdout carries the report)
// 2. Load config (config/ is seeded from defaults/ on first run)
// 3. Open the snapshot store
// 4. Build the ESPN client
// 5. Run the update cycle
// 6. Print the league report

use std::path::Path;

use courtkeeper::config;
use courtkeeper::db::SnapshotStore;
use courtkeeper::espn::client::EspnClient;
use courtkeeper::roster::history;
use courtkeeper::update::{self, UpdateOutcome};
use courtkeeper::valuation::totals;
use courtkeeper::valuation::value;

use anyhow::Context;
use tracing::{info, warn};

/// How many bargain contracts the report lists.
const TOP_VALUE_COUNT: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (stderr, so the report stays clean on stdout)
    init_tracing()?;
    info!("courtkeeper starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "config loaded: league {}, season {}",
        config.league.id, config.league.current_season
    );

    // 3. Open the snapshot store
    let store = SnapshotStore::open(&config.db_path).context("failed to open snapshot store")?;
    info!("snapshot store opened at {}", config.db_path);

    // 4. Build the ESPN client
    let client = EspnClient::new(&config);

    // 5. Run the update cycle
    let outcome = update::run_update(&config, &store, &client)
        .await
        .context("update cycle failed")?;

    // 6. Print the league report
    print_report(&config, &outcome);

    Ok(())
}

/// Print the per-team totals, the best value contracts, and the all-time
/// standings to stdout.
fn print_report(config: &config::Config, outcome: &UpdateOutcome) {
    let data = totals::data_by_team_id(
        &outcome.teams,
        &config.keepers.selected,
        config.projection.salary_floor,
    );

    println!(
        "League {}, season {} (updated {})",
        config.league.id,
        config.league.current_season,
        outcome.completed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    println!(
        "{:<24} {:>7} {:>7} {:>8} {:>10} {:>12}",
        "TEAM", "RATER", "PREV", "PAYROLL", "PROJECTED", "KEEPER BILL"
    );
    for details in data.values() {
        let totals = &details.totals;
        println!(
            "{:<24} {:>7.2} {:>7.2} {:>8} {:>10} {:>12}",
            details.team.name,
            totals.current_rater,
            totals.previous_rater,
            totals.current_salary,
            totals.projected_salary,
            totals.projected_keepers_salaries
        );
    }
    println!();

    let mut metrics = value::league_value_metrics(&data, &[]);
    metrics.sort_by(|a, b| {
        b.rater_by_salary
            .partial_cmp(&a.rater_by_salary)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("Best value contracts (rater per salary unit):");
    for (index, entry) in metrics.iter().take(TOP_VALUE_COUNT).enumerate() {
        println!(
            "{:>3}. {:<24} {:<4} ${:<4} rater {:>6.2}  value {:>6.3}",
            index + 1,
            entry.full_name,
            entry.team,
            entry.salary,
            entry.current_rater,
            entry.rater_by_salary
        );
    }
    println!();

    print_history_standings(config);

    if !outcome.unpickables.is_empty() {
        println!();
        println!("Unpickable players:");
        for player in &outcome.unpickables {
            let status = if player.out_for_season {
                "out for season"
            } else {
                "injured"
            };
            println!("  {} ({status})", player.name);
        }
    }
}

/// All-time standings from the archived history file. A missing or broken
/// file costs the section, not the run.
fn print_history_standings(config: &config::Config) {
    let seasons = match history::load_history(Path::new(&config.data_paths.history)) {
        Ok(seasons) => seasons,
        Err(e) => {
            warn!("skipping history standings: {e}");
            return;
        }
    };

    let rankings = history::build_history_rankings(&seasons, &config.owners);
    let mut standings: Vec<_> = rankings.values().collect();
    standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    println!("All-time standings:");
    for (index, record) in standings.iter().enumerate() {
        let best = record
            .seasons_rankings
            .iter()
            .min_by_key(|s| s.ranking)
            .map(|s| format!("best {} in {}", history::rank_label(s.ranking), s.season))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<16} {:>4} pts  ({} seasons, {})",
            index + 1,
            record.owner_name,
            record.total_points,
            record.seasons_rankings.len(),
            best
        );
    }
}

/// Initialize tracing to stderr. The report itself goes to stdout.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("courtkeeper=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
