//! # Flashback Domain
//!
//! Business domain types for the Flashback study scheduler.
//!
//! This crate contains:
//! - Card documents, identifiers and review intervals
//! - Study queue definitions
//! - Domain error types and Result definitions
//! - Configuration structures and scheduler constants
//!
//! ## Architecture
//! - No dependencies on other Flashback crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
