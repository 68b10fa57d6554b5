//! Port interfaces for study scheduling
//!
//! These traits define the boundaries between the scheduler and the
//! document store, randomness, wall clock and login session it relies on.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use flashback_domain::Result;
use serde_json::Value;

/// Paging options for a view query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewQuery {
    pub limit: usize,
    pub offset: usize,
    pub include_docs: bool,
}

/// One row of a view or id-range scan
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub id: String,
    /// Present when the query asked for document bodies.
    pub doc: Option<Value>,
}

/// A page of view rows plus the total number of rows the view matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewPage {
    pub rows: Vec<ViewRow>,
    pub total_rows: usize,
}

/// Inclusive document id range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start_key: String,
    pub end_key: String,
    pub include_docs: bool,
}

/// Indexed document store holding the user's cards
///
/// Implementations report store failures as `QueryFailure` and stale writes
/// as `RevisionConflict`.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Query a named view
    async fn query(&self, view: &str, query: ViewQuery) -> Result<ViewPage>;

    /// Scan documents whose ids fall within `range`, ordered by id
    async fn all_docs(&self, range: KeyRange) -> Result<Vec<ViewRow>>;

    /// Fetch a single document, including its `_rev`
    async fn get(&self, id: &str) -> Result<Value>;

    /// Write a document if `previous_rev` is still current; returns the new
    /// revision
    async fn put(&self, id: &str, doc: Value, previous_rev: Option<&str>) -> Result<String>;
}

/// Shared source of uniform random numbers
///
/// Implementations must tolerate concurrent draws.
pub trait RandomSource: Send + Sync {
    /// A value in `[0, 1)`
    fn next_f64(&self) -> f64;
}

/// Wall clock in the user's local offset
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

/// Login state owned by the session layer
pub trait SessionProvider: Send + Sync {
    /// Name of the logged-in user, if any
    fn current_user(&self) -> Option<String>;
}
