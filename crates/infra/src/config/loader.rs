//! Configuration loader
//!
//! Loads scheduler configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FLASHBACK_DB_PATH`: Card database file path (required)
//! - `FLASHBACK_DB_POOL_SIZE`: Connection pool size (required)
//! - `FLASHBACK_NEW_BATCH_SIZE`: Candidates drawn from the new-card queue
//! - `FLASHBACK_OLD_BATCH_SIZE`: Candidates drawn from the review queue
//! - `FLASHBACK_LIMIT_PADDING`: Extra rows requested per page
//! - `FLASHBACK_NEW_CARD_BURIAL_DAYS`: Burial for siblings with no interval
//! - `FLASHBACK_MAX_WRITE_RETRIES`: Retries after a revision conflict
//! - `FLASHBACK_LOG`: Tracing filter directive
//! - `FLASHBACK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./flashback.json` or `./flashback.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use flashback_domain::{
    Config, DatabaseConfig, FlashbackError, LoggingConfig, Result, SchedulerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `FlashbackError::Config` if configuration cannot be loaded from
/// either source, the file format is invalid, or the scheduler settings do
/// not validate.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The database variables are required; everything else falls back to its
/// default.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("FLASHBACK_DB_PATH")?;
    let pool_size = env_var("FLASHBACK_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| FlashbackError::Config(format!("Invalid pool size: {e}")))
    })?;

    let defaults = SchedulerConfig::default();
    let scheduler = SchedulerConfig {
        new_batch_size: env_parse("FLASHBACK_NEW_BATCH_SIZE", defaults.new_batch_size)?,
        old_batch_size: env_parse("FLASHBACK_OLD_BATCH_SIZE", defaults.old_batch_size)?,
        limit_padding: env_parse("FLASHBACK_LIMIT_PADDING", defaults.limit_padding)?,
        new_card_burial_days: env_parse(
            "FLASHBACK_NEW_CARD_BURIAL_DAYS",
            defaults.new_card_burial_days,
        )?,
        max_write_retries: env_parse("FLASHBACK_MAX_WRITE_RETRIES", defaults.max_write_retries)?,
    };
    scheduler.validate()?;

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        filter: std::env::var("FLASHBACK_LOG").unwrap_or(logging_defaults.filter),
        json: env_bool("FLASHBACK_LOG_JSON", logging_defaults.json),
    };

    Ok(Config { database: DatabaseConfig { path, pool_size }, scheduler, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FlashbackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FlashbackError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FlashbackError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.scheduler.validate()?;
    Ok(config)
}

/// Parse configuration from string content, detecting the format by the
/// file extension of `path`.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FlashbackError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FlashbackError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FlashbackError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "flashback.json",
        "flashback.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        FlashbackError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| FlashbackError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
