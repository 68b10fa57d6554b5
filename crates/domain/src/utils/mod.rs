//! Shared helpers for domain types

pub mod timestamp;
