//! Card identifiers
//!
//! A card id has the form `card-<bundle>.<note>.<template>`. Every card
//! generated from the same note shares the `card-<bundle>.<note>` grouping
//! key; those are the "related" cards buried after a review.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CARD_ID_PREFIX, KEY_RANGE_SENTINEL};
use crate::errors::FlashbackError;

/// Validated card identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `card-<bundle>.<note>`, shared by all sibling cards.
    pub fn group_key(&self) -> &str {
        // Validated on construction, so the separator is always present.
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(group, _)| group)
    }

    /// Template index within the note.
    pub fn template(&self) -> u32 {
        self.0.rsplit_once('.').and_then(|(_, idx)| idx.parse().ok()).unwrap_or_default()
    }

    /// Inclusive id range covering every card in this card's group.
    pub fn sibling_range(&self) -> (String, String) {
        let group = self.group_key();
        (format!("{group}."), format!("{group}.{KEY_RANGE_SENTINEL}"))
    }

    pub fn is_sibling_of(&self, other: &CardId) -> bool {
        self != other && self.group_key() == other.group_key()
    }
}

impl FromStr for CardId {
    type Err = FlashbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| FlashbackError::InvalidInput(format!("card id '{s}': {reason}"));

        let body = s.strip_prefix(CARD_ID_PREFIX).ok_or_else(|| invalid("missing card- prefix"))?;
        let (group, template) =
            body.rsplit_once('.').ok_or_else(|| invalid("missing template index"))?;
        let (bundle, note) = group.split_once('.').ok_or_else(|| invalid("missing note id"))?;
        if bundle.is_empty() || note.is_empty() {
            return Err(invalid("empty bundle or note id"));
        }
        template.parse::<u32>().map_err(|_| invalid("template index is not a number"))?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for CardId {
    type Error = FlashbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
