//! # Flashback Core
//!
//! Pure scheduling logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the card store, randomness, clock and
//!   session
//! - Candidate fetching, priority weighting and weighted selection
//! - Burial of related cards after a review
//!
//! ## Architecture Principles
//! - Only depends on `flashback-domain`
//! - No database or platform code
//! - All external dependencies via traits

pub mod study;
pub mod utils;

pub use study::ports::{
    CardStore, Clock, KeyRange, RandomSource, SessionProvider, ViewPage, ViewQuery, ViewRow,
};
pub use study::StudyService;
pub use utils::cancellable;
