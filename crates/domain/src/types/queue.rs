//! Study queues
//!
//! Each queue is a materialized view in the document store that pre-orders
//! cards of one study category.

use serde::{Deserialize, Serialize};

use crate::constants::{NEW_BATCH_SIZE, OLD_BATCH_SIZE};
use crate::impl_domain_name_conversions;

/// A named study queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Queue {
    /// Never-reviewed cards, oldest first.
    New,
    /// Previously studied cards, earliest due first.
    Old,
}

impl_domain_name_conversions!(Queue {
    New => "NewCardsMap",
    Old => "OldCardsMap",
});

impl Queue {
    pub const ALL: [Queue; 2] = [Queue::New, Queue::Old];

    /// Store view backing this queue.
    pub fn view_name(self) -> &'static str {
        match self {
            Self::New => "NewCardsMap",
            Self::Old => "OldCardsMap",
        }
    }

    /// Default number of candidates drawn from this queue per selection.
    pub fn default_batch_size(self) -> usize {
        match self {
            Self::New => NEW_BATCH_SIZE,
            Self::Old => OLD_BATCH_SIZE,
        }
    }
}
