//! Configuration structures
//!
//! Loading lives in `flashback-infra`; these types only describe the shape
//! and defaults.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::{
    LIMIT_PADDING, MAX_INTERVAL_DAYS, MAX_WRITE_RETRIES, NEW_BATCH_SIZE, NEW_CARD_BURIAL_DAYS,
    OLD_BATCH_SIZE,
};
use crate::errors::{FlashbackError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document store location and pool sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "flashback.db".to_string(), pool_size: default_pool_size() }
    }
}

fn default_pool_size() -> u32 {
    4
}

/// Tunables for candidate fetching and burial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub new_batch_size: usize,
    pub old_batch_size: usize,
    pub limit_padding: usize,
    /// Burial applied to siblings that have never established an interval.
    pub new_card_burial_days: i64,
    pub max_write_retries: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            new_batch_size: NEW_BATCH_SIZE,
            old_batch_size: OLD_BATCH_SIZE,
            limit_padding: LIMIT_PADDING,
            new_card_burial_days: NEW_CARD_BURIAL_DAYS,
            max_write_retries: MAX_WRITE_RETRIES,
        }
    }
}

impl SchedulerConfig {
    /// Reject values the scheduler cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.new_batch_size == 0 || self.old_batch_size == 0 {
            return Err(FlashbackError::Config("batch sizes must be positive".into()));
        }
        if !(1..=MAX_INTERVAL_DAYS).contains(&self.new_card_burial_days) {
            return Err(FlashbackError::Config(format!(
                "new card burial must be between 1 and {MAX_INTERVAL_DAYS} days, got {}",
                self.new_card_burial_days
            )));
        }
        Ok(())
    }

    /// Burial for never-reviewed siblings, clamped to the range `validate`
    /// accepts.
    pub fn new_card_burial(&self) -> Duration {
        Duration::days(self.new_card_burial_days.clamp(1, MAX_INTERVAL_DAYS))
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}
