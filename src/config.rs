// Configuration loading and parsing (league.toml, settings.toml, credentials.toml).

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// League rule: at most this many keepers can be selected at once.
pub const MAX_SELECTED_KEEPERS: usize = 6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    /// Owner GUID to display name, as printed on the history leaderboard.
    pub owners: BTreeMap<String, String>,
    pub espn: EspnConfig,
    pub credentials: CredentialsConfig,
    pub db_path: String,
    pub data_paths: DataPaths,
    pub projection: ProjectionConfig,
    pub keepers: KeepersConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Deserialization target for the whole league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    owners: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// ESPN league id, as it appears in the league URL.
    pub id: u32,
    pub current_season: u16,
}

impl LeagueConfig {
    pub fn last_season(&self) -> u16 {
        self.current_season - 1
    }
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Deserialization target for the whole settings.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    espn: EspnConfig,
    database: DatabaseSection,
    data_paths: DataPaths,
    projection: ProjectionConfig,
    keepers: KeepersConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EspnConfig {
    pub base_url: String,
    pub scoring_period_id: u32,
    /// Page size for the rater feed; the league only needs the top slice.
    pub player_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub history: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    /// Lowest salary a projection may land on.
    pub salary_floor: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeepersConfig {
    /// Player ids currently penciled in as keepers, league-wide.
    #[serde(default)]
    pub selected: Vec<i64>,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

/// ESPN session cookies for private leagues. Public leagues need neither.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml`,
/// `config/settings.toml`, and (optionally) `config/credentials.toml`,
/// all relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- settings.toml (required) ---
    let settings_path = config_dir.join("settings.toml");
    let settings_text = read_file(&settings_path)?;
    let settings_file: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league: league_file.league,
        owners: league_file.owners,
        espn: settings_file.espn,
        credentials,
        db_path: settings_file.database.path,
        data_paths: settings_file.data_paths,
        projection: settings_file.projection,
        keepers: settings_file.keepers,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        // Without defaults/ there is nothing to seed from; that is only a
        // problem when config/ is missing too.
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // .example files are templates, never active config.
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Present in config/ already; leave the user's copy alone.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.id == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.id".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.league.current_season < 2000 {
        return Err(ConfigError::ValidationError {
            field: "league.current_season".into(),
            message: format!(
                "must be a full season year, got {}",
                config.league.current_season
            ),
        });
    }

    if config.espn.base_url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "espn.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.espn.player_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "espn.player_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.projection.salary_floor < 0 {
        return Err(ConfigError::ValidationError {
            field: "projection.salary_floor".into(),
            message: format!("must be >= 0, got {}", config.projection.salary_floor),
        });
    }

    let selected = &config.keepers.selected;
    if selected.len() > MAX_SELECTED_KEEPERS {
        return Err(ConfigError::ValidationError {
            field: "keepers.selected".into(),
            message: format!(
                "at most {MAX_SELECTED_KEEPERS} keepers may be selected, got {}",
                selected.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for id in selected {
        if !seen.insert(id) {
            return Err(ConfigError::ValidationError {
                field: "keepers.selected".into(),
                message: format!("player id {id} is listed twice"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the path to the project root (works whether
    /// `cargo test` runs from the crate root or a parent directory).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("courtkeeper/defaults").exists() {
            cwd.join("courtkeeper")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn temp_config_dir(name: &str) -> (PathBuf, PathBuf) {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        (tmp, config_dir)
    }

    fn copy_defaults(config_dir: &Path) {
        let root = project_root();
        fs::copy(
            root.join("defaults/league.toml"),
            config_dir.join("league.toml"),
        )
        .unwrap();
        fs::copy(
            root.join("defaults/settings.toml"),
            config_dir.join("settings.toml"),
        )
        .unwrap();
    }

    #[test]
    fn load_valid_config_from_project_files() {
        let root = project_root();
        ensure_config_files(&root).expect("should copy default configs");
        let config = load_config_from(&root).expect("should load valid config");

        assert_eq!(config.league.id, 3409);
        assert_eq!(config.league.current_season, 2026);
        assert_eq!(config.league.last_season(), 2025);
        assert!(!config.owners.is_empty());

        assert_eq!(
            config.espn.base_url,
            "https://lm-api-reads.fantasy.espn.com/apis/v3/games/fba"
        );
        assert_eq!(config.espn.scoring_period_id, 12);
        assert_eq!(config.espn.player_limit, 750);

        assert_eq!(config.db_path, "courtkeeper.db");
        assert_eq!(config.data_paths.history, "data/history.json");
        assert_eq!(config.projection.salary_floor, 1);
        assert!(config.keepers.selected.is_empty());
        assert!(config.credentials.espn_s2.is_none());
        assert!(config.credentials.swid.is_none());
    }

    #[test]
    fn missing_credentials_toml_is_ok() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_no_creds");
        copy_defaults(&config_dir);

        let config = load_config_from(&tmp).expect("should load without credentials.toml");
        assert!(config.credentials.espn_s2.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_cookies() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_with_creds");
        copy_defaults(&config_dir);
        fs::write(
            config_dir.join("credentials.toml"),
            "espn_s2 = \"AEB...\"\nswid = \"{ABC-123}\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        assert_eq!(config.credentials.espn_s2.as_deref(), Some("AEB..."));
        assert_eq!(config.credentials.swid.as_deref(), Some("{ABC-123}"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_league_id_zero() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_league_zero");
        copy_defaults(&config_dir);

        let league_text = fs::read_to_string(project_root().join("defaults/league.toml")).unwrap();
        let modified = league_text.replace("id = 3409", "id = 0");
        fs::write(config_dir.join("league.toml"), modified).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.id");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_implausible_season() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_bad_season");
        copy_defaults(&config_dir);

        let league_text = fs::read_to_string(project_root().join("defaults/league.toml")).unwrap();
        let modified = league_text.replace("current_season = 2026", "current_season = 26");
        fs::write(config_dir.join("league.toml"), modified).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.current_season");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_salary_floor() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_neg_floor");
        copy_defaults(&config_dir);

        let settings_text =
            fs::read_to_string(project_root().join("defaults/settings.toml")).unwrap();
        let modified = settings_text.replace("salary_floor = 1", "salary_floor = -2");
        fs::write(config_dir.join("settings.toml"), modified).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "projection.salary_floor");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_too_many_keepers() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_keeper_cap");
        copy_defaults(&config_dir);

        let settings_text =
            fs::read_to_string(project_root().join("defaults/settings.toml")).unwrap();
        let modified = settings_text.replace("selected = []", "selected = [1, 2, 3, 4, 5, 6, 7]");
        fs::write(config_dir.join("settings.toml"), modified).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "keepers.selected");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_duplicate_keeper_ids() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_keeper_dupe");
        copy_defaults(&config_dir);

        let settings_text =
            fs::read_to_string(project_root().join("defaults/settings.toml")).unwrap();
        let modified = settings_text.replace("selected = []", "selected = [42, 42]");
        fs::write(config_dir.join("settings.toml"), modified).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, message } => {
                assert_eq!(field, "keepers.selected");
                assert!(message.contains("42"));
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_missing_league");
        fs::copy(
            project_root().join("defaults/settings.toml"),
            config_dir.join("settings.toml"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_settings_toml() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_missing_settings");
        fs::copy(
            project_root().join("defaults/league.toml"),
            config_dir.join("league.toml"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("settings.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let (tmp, config_dir) = temp_config_dir("courtkeeper_config_invalid_toml");
        fs::write(config_dir.join("league.toml"), "this is not valid [[[ toml").unwrap();
        fs::copy(
            project_root().join("defaults/settings.toml"),
            config_dir.join("settings.toml"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("courtkeeper_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(
            root.join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();
        fs::copy(
            root.join("defaults/settings.toml"),
            defaults_dir.join("settings.toml"),
        )
        .unwrap();
        // Template files must never become active config.
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "espn_s2 = \"...\"\n",
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);

        assert!(tmp.join("config/league.toml").exists());
        assert!(tmp.join("config/settings.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("courtkeeper_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(
            root.join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();
        fs::copy(
            root.join("defaults/settings.toml"),
            defaults_dir.join("settings.toml"),
        )
        .unwrap();

        // Pre-existing user config must be preserved.
        fs::write(config_dir.join("league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(copied[0].ends_with("settings.toml"));

        let content = fs::read_to_string(config_dir.join("league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_no_defaults_dir_is_ok() {
        let tmp = std::env::temp_dir().join("courtkeeper_config_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("courtkeeper_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
