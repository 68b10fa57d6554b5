//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::path::PathBuf;

use flashback_domain::{FlashbackError, SchedulerConfig};
use flashback_infra::config;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("config file written");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "flashback.json",
        r#"{
            "database": { "path": "/tmp/cards.db", "pool_size": 8 },
            "scheduler": {
                "new_batch_size": 5,
                "old_batch_size": 45,
                "limit_padding": 20,
                "new_card_burial_days": 3,
                "max_write_retries": 1
            },
            "logging": { "filter": "flashback_core=debug", "json": true }
        }"#,
    );

    let config = config::load_from_file(Some(path)).expect("config loads");

    assert_eq!(config.database.path, "/tmp/cards.db");
    assert_eq!(config.database.pool_size, 8);
    assert_eq!(config.scheduler.new_batch_size, 5);
    assert_eq!(config.scheduler.old_batch_size, 45);
    assert_eq!(config.scheduler.limit_padding, 20);
    assert_eq!(config.scheduler.new_card_burial(), chrono::Duration::days(3));
    assert_eq!(config.scheduler.max_write_retries, 1);
    assert_eq!(config.logging.filter, "flashback_core=debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "flashback.toml",
        r#"
[database]
path = "cards.db"
pool_size = 2

[scheduler]
old_batch_size = 30
"#,
    );

    let config = config::load_from_file(Some(path)).expect("config loads");

    assert_eq!(config.database.path, "cards.db");
    assert_eq!(config.database.pool_size, 2);
    assert_eq!(config.scheduler.old_batch_size, 30);
    assert_eq!(config.scheduler.new_batch_size, SchedulerConfig::default().new_batch_size);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "config.json", r#"{ "database": { "path": "cards.db" } }"#);

    let config = config::load_from_file(Some(path)).expect("config loads");

    assert_eq!(config.database.pool_size, 4);
    assert_eq!(config.scheduler, SchedulerConfig::default());
    assert!(!config.logging.json);
}

#[test]
fn test_nonexistent_file_is_config_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = config::load_from_file(Some(dir.path().join("missing.json"))).unwrap_err();

    match err {
        FlashbackError::Config(msg) => assert!(msg.contains("not found"), "{msg}"),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_invalid_format_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let broken_json = write_config(&dir, "broken.json", "{ not json");
    let broken_toml = write_config(&dir, "broken.toml", "[database\npath =");
    let yaml = write_config(&dir, "config.yaml", "database: {}");

    for path in [broken_json, broken_toml, yaml] {
        let err = config::load_from_file(Some(path.clone())).unwrap_err();
        assert!(matches!(err, FlashbackError::Config(_)), "{}: {err:?}", path.display());
    }
}

#[test]
fn test_invalid_scheduler_settings_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "config.json",
        r#"{ "database": { "path": "cards.db" }, "scheduler": { "new_card_burial_days": 0 } }"#,
    );

    let err = config::load_from_file(Some(path)).unwrap_err();
    assert!(matches!(err, FlashbackError::Config(msg) if msg.contains("burial")));
}
