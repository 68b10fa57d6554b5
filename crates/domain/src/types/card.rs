//! Card documents
//!
//! A [`Card`] is a value snapshot of one stored document. The store remains
//! the authority; snapshots are never cached across selections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card_id::CardId;
use super::interval::Interval;
use crate::errors::{FlashbackError, Result};
use crate::utils::timestamp::{rfc3339_secs, rfc3339_secs_option};

/// The unit of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: CardId,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "model")]
    pub model_id: String,
    #[serde(with = "rfc3339_secs")]
    pub created: DateTime<Utc>,
    #[serde(with = "rfc3339_secs")]
    pub modified: DateTime<Utc>,
    #[serde(default, with = "rfc3339_secs_option", skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,
    #[serde(default, with = "rfc3339_secs_option", skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub review_count: u32,
    #[serde(default, with = "rfc3339_secs_option", skip_serializing_if = "Option::is_none")]
    pub buried_until: Option<DateTime<Utc>>,
}

fn is_zero(count: &u32) -> bool {
    *count == 0
}

impl Card {
    /// A never-reviewed card.
    pub fn new(id: CardId, model_id: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            rev: None,
            model_id: model_id.into(),
            created,
            modified: created,
            last_review: None,
            due: None,
            interval: None,
            review_count: 0,
            buried_until: None,
        }
    }

    /// Decode a stored document body.
    pub fn from_document(doc: Value) -> Result<Self> {
        serde_json::from_value(doc).map_err(|e| FlashbackError::DecodeFailure(format!("scan doc: {e}")))
    }

    /// Encode for storage. `_rev` is carried along when present.
    pub fn to_document(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| FlashbackError::Internal(format!("encode doc: {e}")))
    }

    /// Never reviewed.
    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }

    /// Burial still in effect at `now`.
    pub fn is_buried_at(&self, now: DateTime<Utc>) -> bool {
        self.buried_until.is_some_and(|until| until > now)
    }
}
