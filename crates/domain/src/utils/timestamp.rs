//! Serde helpers for document timestamps
//!
//! Documents store timestamps as RFC 3339 strings truncated to whole
//! seconds and normalised to UTC, so that lexical order in the store matches
//! chronological order.
//!
//! # Usage
//! ```rust
//! use chrono::{DateTime, Utc};
//! use flashback_domain::utils::timestamp;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Example {
//!     #[serde(with = "timestamp::rfc3339_secs")]
//!     at: DateTime<Utc>,
//!     #[serde(default, with = "timestamp::rfc3339_secs_option")]
//!     until: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way documents store it.
pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse any RFC 3339 timestamp into UTC.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|at| at.with_timezone(&Utc))
}

/// Required timestamp field
pub mod rfc3339_secs {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw)
            .map_err(|e| serde::de::Error::custom(format!("parsing time {raw:?}: {e}")))
    }
}

/// Optional timestamp field; `null` and a missing key both decode to `None`.
pub mod rfc3339_secs_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => serializer.serialize_str(&super::format(at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|raw| {
            super::parse(&raw)
                .map_err(|e| serde::de::Error::custom(format!("parsing time {raw:?}: {e}")))
        })
        .transpose()
    }
}
