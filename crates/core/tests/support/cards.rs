//! Card fixtures

use chrono::{DateTime, Duration, Utc};
use flashback_domain::{Card, CardId, Interval};

pub fn id(raw: &str) -> CardId {
    raw.parse().expect("valid card id")
}

/// Never-reviewed card created `age` before `now`.
pub fn new_card(raw_id: &str, now: DateTime<Utc>, age: Duration) -> Card {
    Card::new(id(raw_id), "theme-Zm9v/0", now - age)
}

/// Reviewed card with the given interval, last reviewed well before today.
pub fn reviewed_card(raw_id: &str, interval: Interval, due: DateTime<Utc>) -> Card {
    let created = due - Duration::days(60);
    let mut card = Card::new(id(raw_id), "theme-Zm9v/0", created);
    card.review_count = 3;
    card.interval = Some(interval);
    card.due = Some(due);
    card.last_review = Some(due - interval.as_duration());
    card.modified = due - interval.as_duration();
    card
}

pub fn buried(mut card: Card, until: DateTime<Utc>) -> Card {
    card.buried_until = Some(until);
    card
}
