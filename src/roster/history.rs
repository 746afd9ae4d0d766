// League history rankings.
//
// Reads the archived final standings file and turns it into an all-time
// leaderboard per owner. Finishing high is worth more than the linear rank
// difference: podium finishes get a bonus and a title gets another one.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse history file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid history data: {0}")]
    Validation(String),
}

/// One archived season of final standings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySeason {
    pub season_id: u16,
    pub teams: Vec<HistoryTeam>,
}

/// One team's final result in an archived season.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryTeam {
    pub name: String,
    /// Owner GUIDs as ESPN reports them.
    pub owners: Vec<String>,
    pub rank_calculated_final: u32,
}

/// One season line on an owner's all-time record.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRanking {
    pub season: u16,
    pub ranking: u32,
    pub team_name: String,
    pub points: i32,
}

/// An owner's accumulated all-time record.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRanking {
    pub owner_name: String,
    pub total_points: i32,
    pub seasons_rankings: Vec<SeasonRanking>,
}

/// Points awarded for one season's final rank.
pub fn season_ranking_points(ranking: u32) -> i32 {
    let mut points = 15 - ranking as i32;
    if ranking < 4 {
        points += 3;
    }
    if ranking == 1 {
        points += 5;
    }
    points
}

/// Loads the archived standings from disk.
pub fn load_history(path: &Path) -> Result<Vec<HistorySeason>, HistoryError> {
    let file = File::open(path).map_err(|source| HistoryError::Io {
        path: path.to_owned(),
        source,
    })?;
    load_history_from_reader(BufReader::new(file))
}

fn load_history_from_reader<R: Read>(reader: R) -> Result<Vec<HistorySeason>, HistoryError> {
    let seasons: Vec<HistorySeason> = serde_json::from_reader(reader)?;
    for season in &seasons {
        for team in &season.teams {
            if team.rank_calculated_final < 1 {
                return Err(HistoryError::Validation(format!(
                    "season {}: team {} has final rank 0",
                    season.season_id, team.name
                )));
            }
        }
    }
    Ok(seasons)
}

/// Builds the all-time leaderboard, keyed by owner GUID. Owners missing
/// from the name table are left out entirely.
pub fn build_history_rankings(
    seasons: &[HistorySeason],
    owner_names: &BTreeMap<String, String>,
) -> BTreeMap<String, HistoryRanking> {
    let mut rankings: BTreeMap<String, HistoryRanking> = BTreeMap::new();

    for season in seasons {
        for team in &season.teams {
            for owner in &team.owners {
                let Some(owner_name) = owner_names.get(owner) else {
                    continue;
                };
                let points = season_ranking_points(team.rank_calculated_final);
                let season_line = SeasonRanking {
                    season: season.season_id,
                    ranking: team.rank_calculated_final,
                    team_name: team.name.clone(),
                    points,
                };
                rankings
                    .entry(owner.clone())
                    .and_modify(|record| {
                        record.seasons_rankings.push(season_line.clone());
                        record.total_points += points;
                    })
                    .or_insert_with(|| HistoryRanking {
                        owner_name: owner_name.clone(),
                        total_points: points,
                        seasons_rankings: vec![season_line],
                    });
            }
        }
    }

    rankings
}

/// English ordinal for a final rank, for report output.
pub fn rank_label(ranking: u32) -> String {
    let suffix = match (ranking % 100, ranking % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{ranking}{suffix}")
}
