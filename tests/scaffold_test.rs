// Integration tests for the courtkeeper scaffold.

use std::path::Path;

/// Verify that the project scaffold compiles successfully.
#[test]
fn project_compiles() {
    assert!(true);
}

/// Verify that defaults/league.toml is valid TOML.
#[test]
fn league_defaults_are_valid_toml() {
    let content =
        std::fs::read_to_string("defaults/league.toml").expect("defaults/league.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/league.toml is not valid TOML: {:?}", parsed.err());
}

/// Verify that defaults/settings.toml is valid TOML.
#[test]
fn settings_defaults_are_valid_toml() {
    let content = std::fs::read_to_string("defaults/settings.toml")
        .expect("defaults/settings.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/settings.toml is not valid TOML: {:?}", parsed.err());
}

/// Verify that defaults/credentials.toml.example is valid TOML.
#[test]
fn credentials_example_is_valid_toml() {
    let content = std::fs::read_to_string("defaults/credentials.toml.example")
        .expect("defaults/credentials.toml.example should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(
        parsed.is_ok(),
        "defaults/credentials.toml.example is not valid TOML: {:?}",
        parsed.err()
    );
    let value: toml::Value = parsed.unwrap();
    assert!(value.get("espn_s2").is_some(), "example should carry espn_s2");
    assert!(value.get("swid").is_some(), "example should carry swid");
}

/// Verify that data/history.json is valid JSON with one entry per season.
#[test]
fn history_archive_is_valid_json() {
    let content =
        std::fs::read_to_string("data/history.json").expect("data/history.json should exist");
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&content);
    assert!(parsed.is_ok(), "data/history.json is not valid JSON: {:?}", parsed.err());

    let seasons = parsed.unwrap();
    let seasons = seasons.as_array().expect("history archive should be a JSON array");
    assert_eq!(seasons.len(), 3, "archive should cover three seasons");
}

/// Verify that all expected directories exist.
#[test]
fn directory_structure_exists() {
    let expected_dirs = [
        "src",
        "src/espn",
        "src/roster",
        "src/valuation",
        "defaults",
        "data",
        "tests",
    ];
    for dir in expected_dirs {
        assert!(Path::new(dir).is_dir(), "Expected directory '{}' to exist", dir);
    }
}

/// Verify that all expected source files exist.
#[test]
fn source_files_exist() {
    let expected_files = [
        "src/main.rs",
        "src/lib.rs",
        "src/config.rs",
        "src/db.rs",
        "src/update.rs",
        "src/espn/mod.rs",
        "src/espn/client.rs",
        "src/espn/codes.rs",
        "src/espn/types.rs",
        "src/roster/mod.rs",
        "src/roster/categories.rs",
        "src/roster/history.rs",
        "src/roster/model.rs",
        "src/roster/normalize.rs",
        "src/roster/reconcile.rs",
        "src/valuation/mod.rs",
        "src/valuation/salary.rs",
        "src/valuation/totals.rs",
        "src/valuation/trade.rs",
        "src/valuation/value.rs",
    ];
    for file in expected_files {
        assert!(Path::new(file).is_file(), "Expected source file '{}' to exist", file);
    }
}

/// Verify league.toml contains the league identity.
#[test]
fn league_defaults_have_correct_settings() {
    let content = std::fs::read_to_string("defaults/league.toml").unwrap();
    let config: toml::Value = toml::from_str(&content).unwrap();

    let league = config.get("league").expect("league section should exist");
    assert_eq!(league.get("id").unwrap().as_integer().unwrap(), 3409);
    assert_eq!(league.get("current_season").unwrap().as_integer().unwrap(), 2026);

    let owners = config
        .get("owners")
        .expect("owners table should exist")
        .as_table()
        .unwrap();
    assert_eq!(owners.len(), 12, "every franchise owner should be named");
    for (guid, name) in owners {
        assert!(
            guid.starts_with('{') && guid.ends_with('}'),
            "owner key '{}' should be a braced GUID",
            guid
        );
        assert!(name.as_str().is_some(), "owner '{}' should map to a display name", guid);
    }
}

/// Verify settings.toml contains the feed and projection knobs.
#[test]
fn settings_defaults_have_correct_settings() {
    let content = std::fs::read_to_string("defaults/settings.toml").unwrap();
    let config: toml::Value = toml::from_str(&content).unwrap();

    let espn = config.get("espn").expect("espn section should exist");
    assert!(
        espn.get("base_url").unwrap().as_str().unwrap().starts_with("https://"),
        "base_url should be an absolute https URL"
    );
    assert_eq!(espn.get("scoring_period_id").unwrap().as_integer().unwrap(), 12);
    assert_eq!(espn.get("player_limit").unwrap().as_integer().unwrap(), 750);

    let database = config.get("database").expect("database section should exist");
    assert_eq!(database.get("path").unwrap().as_str().unwrap(), "courtkeeper.db");

    let data_paths = config.get("data_paths").expect("data_paths section should exist");
    assert_eq!(
        data_paths.get("history").unwrap().as_str().unwrap(),
        "data/history.json"
    );

    let projection = config.get("projection").expect("projection section should exist");
    assert_eq!(projection.get("salary_floor").unwrap().as_integer().unwrap(), 1);

    let keepers = config.get("keepers").expect("keepers section should exist");
    assert!(
        keepers.get("selected").unwrap().as_array().unwrap().is_empty(),
        "no keepers should be selected out of the box"
    );
}
