//! Error types used throughout the scheduler

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Flashback
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum FlashbackError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("Query failed: {0}")]
    QueryFailure(String),

    #[error("Decode failed: {0}")]
    DecodeFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Revision conflict: {0}")]
    RevisionConflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlashbackError {
    /// Whether the failed operation may succeed if repeated with fresh state.
    ///
    /// Only optimistic-concurrency collisions qualify; store failures are
    /// propagated to the caller unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RevisionConflict(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::QueryFailure(_) => "query_failure",
            Self::DecodeFailure(_) => "decode_failure",
            Self::InvalidInput(_) => "invalid_input",
            Self::RevisionConflict(_) => "revision_conflict",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Cancelled => "cancelled",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for FlashbackError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailure(err.to_string())
    }
}

/// Result type alias for Flashback operations
pub type Result<T> = std::result::Result<T, FlashbackError>;
