//! # Flashback Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - SQLite card document store with revisioned writes
//! - Random source, wall clock and session implementations
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `flashback-core`
//! - Contains all "impure" code (I/O, entropy, wall-clock time)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;
pub mod services;

// Re-export commonly used items
pub use database::{DbManager, SqliteCardStore};
pub use errors::InfraError;
pub use observability::init_tracing;
pub use services::{StaticSession, SystemClock, ThreadSafeRandom};
