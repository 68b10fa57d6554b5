//! Shared helpers for command wrappers

pub mod command_helpers;
pub mod health;
pub mod logging;
