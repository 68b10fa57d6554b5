//! Review spacing interval
//!
//! Stored as a compact string: `"<n>d"` for whole days, `"<n>s"` otherwise.
//! Hour and minute units are accepted on input.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::MAX_INTERVAL_DAYS;
use crate::errors::FlashbackError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Spacing between reviews of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(Duration);

impl Interval {
    pub const ZERO: Self = Self(Duration::zero());

    pub fn days(days: i64) -> Self {
        Self(Duration::days(days))
    }

    pub fn seconds(seconds: i64) -> Self {
        Self(Duration::seconds(seconds))
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Number of whole days, truncating any remainder.
    pub fn whole_days(self) -> i64 {
        self.0.num_days()
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Scale by `percent / 100` using integer millisecond arithmetic so the
    /// day-based burial fixtures come out exact. Saturates instead of
    /// overflowing.
    pub fn percent(self, percent: i64) -> Self {
        let millis = self.0.num_milliseconds();
        let scaled = match millis.checked_mul(percent) {
            Some(product) => product / 100,
            None => (millis / 100).saturating_mul(percent),
        };
        Self(Duration::try_milliseconds(scaled).unwrap_or(Duration::MAX))
    }
}

impl From<Duration> for Interval {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0.num_seconds();
        if seconds % SECONDS_PER_DAY == 0 {
            write!(f, "{}d", seconds / SECONDS_PER_DAY)
        } else {
            write!(f, "{seconds}s")
        }
    }
}

impl FromStr for Interval {
    type Err = FlashbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FlashbackError::DecodeFailure(format!("invalid interval '{s}'"));
        let trimmed = s.trim();
        let unit_at = trimmed.len().checked_sub(1).ok_or_else(invalid)?;
        if !trimmed.is_char_boundary(unit_at) {
            return Err(invalid());
        }
        let (amount, unit) = trimmed.split_at(unit_at);
        let amount: i64 = amount.parse().map_err(|_| invalid())?;
        if amount < 0 {
            return Err(invalid());
        }
        let multiplier = match unit {
            "d" => SECONDS_PER_DAY,
            "h" => 3_600,
            "m" => 60,
            "s" => 1,
            _ => return Err(invalid()),
        };
        let seconds = amount.checked_mul(multiplier).ok_or_else(invalid)?;
        if seconds > MAX_INTERVAL_DAYS * SECONDS_PER_DAY {
            return Err(FlashbackError::DecodeFailure(format!(
                "interval '{s}' exceeds {MAX_INTERVAL_DAYS} days"
            )));
        }
        Duration::try_seconds(seconds).map(Self).ok_or_else(invalid)
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
