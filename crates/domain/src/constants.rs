//! Scheduler constants
//!
//! Centralized location for the domain-level constants used by the study
//! scheduler. Values that operators may tune are mirrored as defaults in
//! [`crate::config::SchedulerConfig`].

// Candidate batches
pub const NEW_BATCH_SIZE: usize = 10;
pub const OLD_BATCH_SIZE: usize = 90;
/// Extra rows requested per page, since buried cards can only be filtered
/// client-side.
pub const LIMIT_PADDING: usize = 100;

// Priority
pub const NEW_CARD_PRIORITY: f64 = 0.5;

// Burial factors, in percent of the sibling's own interval
pub const NEW_BURY_PERCENT: i64 = 35;
pub const OLD_BURY_PERCENT: i64 = 20;
pub const NEW_CARD_BURIAL_DAYS: i64 = 7;
/// Longest interval or burial window accepted from documents and config.
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

// Burial persistence
pub const MAX_WRITE_RETRIES: u32 = 5;

// Document layout
pub const CARD_ID_PREFIX: &str = "card-";
/// Upper bound appended to a key prefix to form an inclusive id range.
pub const KEY_RANGE_SENTINEL: char = '\u{fff0}';
