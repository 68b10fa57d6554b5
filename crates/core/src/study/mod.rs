//! Study scheduling
//!
//! Candidate fetching, priority weighting, weighted selection and burial of
//! related cards, composed by [`StudyService`].

pub mod burial;
pub mod fetcher;
pub mod ports;
pub mod priority;
pub mod selector;
pub mod service;

pub use burial::{bury_interval, set_burials, BurialEngine};
pub use fetcher::{CandidateFetcher, Eligibility, Rejection};
pub use priority::{card_priority, priority_of};
pub use selector::WeightedSelector;
pub use service::StudyService;
