// SQLite persistence layer for league snapshots.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use tracing::warn;

use crate::roster::categories::{RaterLine, StatLine};
use crate::roster::model::{Player, Team, UnpickablePlayer};

/// SQLite-backed persistence for teams, rostered players, keeper history,
/// stat and rater lines, and the unpickable list.
pub struct SnapshotStore {
    conn: Mutex<Connection>,
}

impl SnapshotStore {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                id           INTEGER PRIMARY KEY,
                name         TEXT NOT NULL,
                abbreviation TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS players (
                id                         INTEGER PRIMARY KEY,
                team_id                    INTEGER REFERENCES teams(id),
                full_name                  TEXT NOT NULL,
                salary                     INTEGER NOT NULL,
                games_played               INTEGER NOT NULL DEFAULT 0,
                injured_spot               INTEGER NOT NULL DEFAULT 0,
                out_for_season             INTEGER NOT NULL DEFAULT 0,
                has_not_played_last_season INTEGER NOT NULL DEFAULT 0,
                is_unpickable              INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS keeper_history (
                player_id INTEGER NOT NULL REFERENCES players(id),
                season    INTEGER NOT NULL,
                PRIMARY KEY (player_id, season)
            );

            CREATE TABLE IF NOT EXISTS player_stats (
                player_id INTEGER PRIMARY KEY REFERENCES players(id),
                fgm       REAL NOT NULL DEFAULT 0,
                fga       REAL NOT NULL DEFAULT 0,
                ftm       REAL NOT NULL DEFAULT 0,
                fta       REAL NOT NULL DEFAULT 0,
                three_pm  REAL NOT NULL DEFAULT 0,
                reb       REAL NOT NULL DEFAULT 0,
                ast       REAL NOT NULL DEFAULT 0,
                stl       REAL NOT NULL DEFAULT 0,
                blk       REAL NOT NULL DEFAULT 0,
                turnovers REAL NOT NULL DEFAULT 0,
                pts       REAL NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS player_raters (
                player_id INTEGER NOT NULL REFERENCES players(id),
                season    INTEGER NOT NULL,
                total     REAL NOT NULL DEFAULT 0,
                fg        REAL NOT NULL DEFAULT 0,
                ft        REAL NOT NULL DEFAULT 0,
                three_pm  REAL NOT NULL DEFAULT 0,
                reb       REAL NOT NULL DEFAULT 0,
                ast       REAL NOT NULL DEFAULT 0,
                stl       REAL NOT NULL DEFAULT 0,
                blk       REAL NOT NULL DEFAULT 0,
                turnovers REAL NOT NULL DEFAULT 0,
                pts       REAL NOT NULL DEFAULT 0,
                PRIMARY KEY (player_id, season)
            );

            CREATE TABLE IF NOT EXISTS meta (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load every stored team with its full roster, ordered by team id.
    ///
    /// Rater lines are read per season: `current_season` fills the current
    /// fields, `last_season` the previous ones. Players with no stats or
    /// rater rows come back zero-defaulted.
    pub fn load_teams(&self, current_season: u16, last_season: u16) -> Result<Vec<Team>> {
        let conn = self.conn();

        let mut stmt = conn
            .prepare("SELECT id, name, abbreviation FROM teams ORDER BY id")
            .context("failed to prepare team query")?;
        let team_rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .context("failed to query teams")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team rows")?;

        let mut teams = Vec::with_capacity(team_rows.len());
        for (id, name, abbreviation) in team_rows {
            let roster = Self::load_roster(&conn, id, current_season, last_season)?;
            teams.push(Team {
                id,
                name,
                abbreviation,
                roster,
            });
        }
        Ok(teams)
    }

    /// Load the players currently marked unpickable, ordered by name.
    pub fn load_unpickable_players(&self) -> Result<Vec<UnpickablePlayer>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id, full_name, out_for_season FROM players
                 WHERE is_unpickable = 1 ORDER BY full_name",
            )
            .context("failed to prepare unpickable query")?;
        let players = stmt
            .query_map([], |row| {
                Ok(UnpickablePlayer {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    out_for_season: row.get(2)?,
                })
            })
            .context("failed to query unpickable players")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map unpickable rows")?;
        Ok(players)
    }

    /// Roster of one team, ordered by player name to match the reconciler's
    /// output ordering.
    fn load_roster(
        conn: &Connection,
        team_id: i64,
        current_season: u16,
        last_season: u16,
    ) -> Result<Vec<Player>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, full_name, salary, games_played, injured_spot,
                        has_not_played_last_season
                 FROM players
                 WHERE team_id = ?1 AND is_unpickable = 0
                 ORDER BY full_name",
            )
            .context("failed to prepare roster query")?;
        let rows = stmt
            .query_map(params![team_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, bool>(5)?,
                ))
            })
            .context("failed to query roster")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map roster rows")?;

        let mut roster = Vec::with_capacity(rows.len());
        for (id, full_name, salary, games_played, injured_spot, has_not_played) in rows {
            let keeper_history = Self::load_keeper_history(conn, id)?;
            let detailed_stats = Self::load_stat_line(conn, id)?;
            let (current_rater, categories_raters) =
                Self::load_rater_line(conn, id, current_season)?;
            let (previous_rater, previous_categories_raters) =
                Self::load_rater_line(conn, id, last_season)?;

            roster.push(Player {
                id,
                full_name,
                salary,
                keeper_history,
                previous_rater,
                current_rater,
                games_played,
                injured_spot,
                has_not_played_last_season: has_not_played,
                categories_raters,
                previous_categories_raters,
                detailed_stats,
            });
        }
        Ok(roster)
    }

    fn load_keeper_history(conn: &Connection, player_id: i64) -> Result<Vec<u16>> {
        let mut stmt = conn
            .prepare("SELECT season FROM keeper_history WHERE player_id = ?1 ORDER BY season")
            .context("failed to prepare keeper history query")?;
        let seasons = stmt
            .query_map(params![player_id], |row| row.get(0))
            .context("failed to query keeper history")?
            .collect::<std::result::Result<Vec<u16>, _>>()
            .context("failed to map keeper history rows")?;
        Ok(seasons)
    }

    fn load_stat_line(conn: &Connection, player_id: i64) -> Result<StatLine> {
        let mut stmt = conn
            .prepare(
                "SELECT fgm, fga, ftm, fta, three_pm, reb, ast, stl, blk, turnovers, pts
                 FROM player_stats WHERE player_id = ?1",
            )
            .context("failed to prepare stats query")?;
        let mut rows = stmt
            .query_map(params![player_id], |row| {
                Ok(StatLine {
                    fgm: row.get(0)?,
                    fga: row.get(1)?,
                    ftm: row.get(2)?,
                    fta: row.get(3)?,
                    three_pm: row.get(4)?,
                    reb: row.get(5)?,
                    ast: row.get(6)?,
                    stl: row.get(7)?,
                    blk: row.get(8)?,
                    turnovers: row.get(9)?,
                    pts: row.get(10)?,
                })
            })
            .context("failed to query player stats")?;

        match rows.next() {
            Some(row) => row.context("failed to read player stats row"),
            None => Ok(StatLine::default()),
        }
    }

    fn load_rater_line(
        conn: &Connection,
        player_id: i64,
        season: u16,
    ) -> Result<(f64, RaterLine)> {
        let mut stmt = conn
            .prepare(
                "SELECT total, fg, ft, three_pm, reb, ast, stl, blk, turnovers, pts
                 FROM player_raters WHERE player_id = ?1 AND season = ?2",
            )
            .context("failed to prepare rater query")?;
        let mut rows = stmt
            .query_map(params![player_id, season], |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    RaterLine {
                        fg: row.get(1)?,
                        ft: row.get(2)?,
                        three_pm: row.get(3)?,
                        reb: row.get(4)?,
                        ast: row.get(5)?,
                        stl: row.get(6)?,
                        blk: row.get(7)?,
                        turnovers: row.get(8)?,
                        pts: row.get(9)?,
                    },
                ))
            })
            .context("failed to query rater line")?;

        match rows.next() {
            Some(row) => row.context("failed to read rater row"),
            None => Ok((0.0, RaterLine::default())),
        }
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Persist a reconciled snapshot in a single transaction.
    ///
    /// Teams and rostered players are upserted; keeper history rows are
    /// insert-or-ignore; current-season rater rows are replaced while
    /// `last_season` rows are only seeded (a finished season is never
    /// rewritten by later runs). The unpickable set is re-marked from
    /// scratch so healed players drop off. A failure on one player is
    /// logged and the rest of the batch still commits.
    pub fn save_snapshot(
        &self,
        teams: &[Team],
        unpickables: &[UnpickablePlayer],
        current_season: u16,
        last_season: u16,
    ) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin snapshot transaction")?;

        for team in teams {
            tx.execute(
                "INSERT INTO teams (id, name, abbreviation) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    name         = excluded.name,
                    abbreviation = excluded.abbreviation",
                params![team.id, team.name, team.abbreviation],
            )
            .context("failed to upsert team")?;

            for player in &team.roster {
                if let Err(e) = Self::save_player(&tx, team.id, player, current_season, last_season)
                {
                    warn!(
                        "failed to persist player {} ({}): {}",
                        player.id, player.full_name, e
                    );
                }
            }
        }

        tx.execute("UPDATE players SET is_unpickable = 0 WHERE is_unpickable = 1", [])
            .context("failed to clear unpickable flags")?;
        for player in unpickables {
            if let Err(e) = Self::save_unpickable(&tx, player) {
                warn!(
                    "failed to persist unpickable {} ({}): {}",
                    player.id, player.name, e
                );
            }
        }

        tx.commit().context("failed to commit snapshot")?;
        Ok(())
    }

    fn save_player(
        tx: &Transaction<'_>,
        team_id: i64,
        player: &Player,
        current_season: u16,
        last_season: u16,
    ) -> Result<()> {
        tx.execute(
            "INSERT INTO players (id, team_id, full_name, salary, games_played,
                                  injured_spot, out_for_season,
                                  has_not_played_last_season, is_unpickable)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, 0)
             ON CONFLICT(id) DO UPDATE SET
                team_id                    = excluded.team_id,
                full_name                  = excluded.full_name,
                salary                     = excluded.salary,
                games_played               = excluded.games_played,
                injured_spot               = excluded.injured_spot,
                out_for_season             = 0,
                has_not_played_last_season = excluded.has_not_played_last_season,
                is_unpickable              = 0",
            params![
                player.id,
                team_id,
                player.full_name,
                player.salary,
                player.games_played,
                player.injured_spot,
                player.has_not_played_last_season,
            ],
        )
        .context("failed to upsert player row")?;

        for season in &player.keeper_history {
            tx.execute(
                "INSERT OR IGNORE INTO keeper_history (player_id, season) VALUES (?1, ?2)",
                params![player.id, season],
            )
            .context("failed to record keeper season")?;
        }

        let stats = &player.detailed_stats;
        tx.execute(
            "INSERT OR REPLACE INTO player_stats
                (player_id, fgm, fga, ftm, fta, three_pm, reb, ast, stl, blk, turnovers, pts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                player.id,
                stats.fgm,
                stats.fga,
                stats.ftm,
                stats.fta,
                stats.three_pm,
                stats.reb,
                stats.ast,
                stats.stl,
                stats.blk,
                stats.turnovers,
                stats.pts,
            ],
        )
        .context("failed to upsert player stats")?;

        let raters = &player.categories_raters;
        tx.execute(
            "INSERT OR REPLACE INTO player_raters
                (player_id, season, total, fg, ft, three_pm, reb, ast, stl, blk, turnovers, pts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                player.id,
                current_season,
                player.current_rater,
                raters.fg,
                raters.ft,
                raters.three_pm,
                raters.reb,
                raters.ast,
                raters.stl,
                raters.blk,
                raters.turnovers,
                raters.pts,
            ],
        )
        .context("failed to upsert current-season rater line")?;

        let previous = &player.previous_categories_raters;
        tx.execute(
            "INSERT OR IGNORE INTO player_raters
                (player_id, season, total, fg, ft, three_pm, reb, ast, stl, blk, turnovers, pts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                player.id,
                last_season,
                player.previous_rater,
                previous.fg,
                previous.ft,
                previous.three_pm,
                previous.reb,
                previous.ast,
                previous.stl,
                previous.blk,
                previous.turnovers,
                previous.pts,
            ],
        )
        .context("failed to seed last-season rater line")?;

        Ok(())
    }

    fn save_unpickable(tx: &Transaction<'_>, player: &UnpickablePlayer) -> Result<()> {
        tx.execute(
            "INSERT INTO players (id, team_id, full_name, salary, games_played,
                                  injured_spot, out_for_season,
                                  has_not_played_last_season, is_unpickable)
             VALUES (?1, NULL, ?2, 1, 0, 1, ?3, 0, 1)
             ON CONFLICT(id) DO UPDATE SET
                team_id        = NULL,
                full_name      = excluded.full_name,
                salary         = 1,
                games_played   = 0,
                injured_spot   = 1,
                out_for_season = excluded.out_for_season,
                is_unpickable  = 1",
            params![player.id, player.name, player.out_for_season],
        )
        .context("failed to upsert unpickable player")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Update stamp
    // ------------------------------------------------------------------

    /// Key in the meta table holding the last successful update time.
    const LAST_UPDATE_KEY: &'static str = "last_update";

    /// Stamp the time the last update cycle completed (stored as RFC 3339).
    pub fn record_last_update(&self, at: DateTime<Utc>) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            params![Self::LAST_UPDATE_KEY, at.to_rfc3339()],
        )
        .context("failed to record last update time")?;
        Ok(())
    }

    /// When the last update cycle completed, if one ever has.
    pub fn last_update(&self) -> Result<Option<DateTime<Utc>>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM meta WHERE key = ?1")
            .context("failed to prepare last update query")?;
        let mut rows = stmt
            .query_map(params![Self::LAST_UPDATE_KEY], |row| {
                row.get::<_, String>(0)
            })
            .context("failed to query last update time")?;

        match rows.next() {
            Some(row) => {
                let raw = row.context("failed to read last update row")?;
                let parsed = DateTime::parse_from_rfc3339(&raw)
                    .with_context(|| format!("invalid last update timestamp '{raw}'"))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }
}
