//! Table configuration loading.

use std::io::Write;
use tempfile::NamedTempFile;
use wager_games::{OpponentKind, TableConfig};
use wager_tictactoe::Opponent;
use wager_tictactoe::settlement::{DEFAULT_STAKE_PRESETS, DEFAULT_WIN_MULTIPLIER};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
player_name = "bob"
opponent = "first-open"
stake_presets = [0.5, 1.0]
"#,
    );
    let config = TableConfig::from_file(file.path()).unwrap();
    assert_eq!(config.player_name(), "bob");
    assert_eq!(*config.opponent(), OpponentKind::FirstOpen);
    assert_eq!(config.stake_presets(), &vec![0.5, 1.0]);
    assert_eq!(*config.win_multiplier(), DEFAULT_WIN_MULTIPLIER);
    assert_eq!(*config.think_delay_ms(), 1000);
}

#[test]
fn test_explicit_path_wins() {
    let file = write_config("win_multiplier = 2.0\nmin_stake = 0.5\nmax_stake = 2.0\n");
    let config = TableConfig::load(Some(file.path())).unwrap();
    let rules = config.payout_rules().unwrap();
    assert_eq!(rules.win_multiplier, 2.0);
    assert_eq!(rules.limits.min, 0.5);
    assert_eq!(rules.limits.max, 2.0);
}

#[test]
fn test_inverted_limits_rejected() {
    let file = write_config("min_stake = 5.0\nmax_stake = 1.0\n");
    let err = TableConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("exceeds max_stake"));
}

#[test]
fn test_bad_toml_and_missing_file_rejected() {
    let file = write_config("min_stake = \"lots\"\n");
    let err = TableConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));

    let err = TableConfig::from_file("/nonexistent/wager.toml").unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_defaults_and_overrides() {
    let config = TableConfig::default()
        .with_opponent(OpponentKind::FirstOpen)
        .with_think_delay_ms(0);
    assert_eq!(*config.opponent(), OpponentKind::FirstOpen);
    assert_eq!(*config.think_delay_ms(), 0);
    assert_eq!(config.stake_presets(), &DEFAULT_STAKE_PRESETS.to_vec());
    assert_eq!(config.opponent().build().name(), "first-open");
}
