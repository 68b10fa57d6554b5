//! Card priority
//!
//! Maps a card's schedule to a continuous weight used by the weighted
//! selector. A card coming due now weighs about 1, a card a full interval
//! early weighs about 0, and overdue cards grow cubically.

use chrono::{DateTime, FixedOffset, Utc};
use flashback_domain::constants::NEW_CARD_PRIORITY;
use flashback_domain::{Card, Interval};

/// Priority of a card with the given schedule at `now`.
///
/// Cards without a due date or with a zero interval get the fixed
/// [`NEW_CARD_PRIORITY`]. `now` is taken in the user's local offset and read
/// as if it were UTC before comparing against `due`, so study sessions in
/// different timezones see the same weights.
pub fn card_priority(
    due: Option<DateTime<Utc>>,
    interval: Option<Interval>,
    now: DateTime<FixedOffset>,
) -> f64 {
    let (Some(due), Some(interval)) = (due, interval) else {
        return NEW_CARD_PRIORITY;
    };
    let interval_ms = interval.as_duration().num_milliseconds();
    if interval_ms <= 0 {
        return NEW_CARD_PRIORITY;
    }

    let local_now = now.naive_local().and_utc();
    let overdue_ratio = (local_now - due).num_milliseconds() as f64 / interval_ms as f64;
    (1.0 + overdue_ratio).max(0.0).powi(3)
}

/// Convenience wrapper over [`card_priority`] for a stored card.
pub fn priority_of(card: &Card, now: DateTime<FixedOffset>) -> f64 {
    card_priority(card.due, card.interval, now)
}
