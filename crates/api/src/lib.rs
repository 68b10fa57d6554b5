//! # Flashback API
//!
//! Application layer - commands and main entry point.
//!
//! This crate contains:
//! - Study, session and health commands
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the SQLite store and system services into the study service

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
