//! Burial of related cards after a review
//!
//! Cards generated from the same note are buried for a window derived from
//! the reviewed card's new interval, so near-duplicates do not come back in
//! the same session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use flashback_domain::constants::{NEW_BURY_PERCENT, OLD_BURY_PERCENT};
use flashback_domain::{Card, CardId, FlashbackError, Interval, Result, SchedulerConfig};
use tracing::{debug, instrument, warn};

use super::ports::{CardStore, Clock, KeyRange};

/// Burial window for one sibling.
///
/// New cards may be buried for up to the whole `budget`; reviewed cards for
/// at most half of it. The result never drops below one day, or below the
/// card's own interval when that is shorter.
pub fn bury_interval(budget: Interval, card_interval: Interval, is_new: bool) -> Interval {
    let (percent, cap) = if is_new {
        (NEW_BURY_PERCENT, budget)
    } else {
        (OLD_BURY_PERCENT, budget.percent(50))
    };
    let raw = card_interval.percent(percent).min(cap);
    raw.max(card_interval.min(Interval::days(1)))
}

/// Set `buried_until` on every card not already buried at `now`, returning
/// only the cards that changed.
///
/// Cards without an established interval are buried for `new_card_burial`.
/// Windows reaching past the representable range end at the latest instant.
pub fn set_burials(
    budget: Interval,
    cards: Vec<Card>,
    now: DateTime<Utc>,
    new_card_burial: Duration,
) -> Vec<Card> {
    cards
        .into_iter()
        .filter(|card| !card.is_buried_at(now))
        .map(|mut card| {
            let burial = match card.interval {
                Some(interval) if !interval.is_zero() => {
                    bury_interval(budget, interval, card.is_new()).as_duration()
                }
                _ => new_card_burial,
            };
            card.buried_until =
                Some(now.checked_add_signed(burial).unwrap_or(DateTime::<Utc>::MAX_UTC));
            card
        })
        .collect()
}

/// Finds and persists burials for a reviewed card's siblings
pub struct BurialEngine {
    store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
    new_card_burial: Duration,
    max_write_retries: u32,
}

impl BurialEngine {
    pub fn new(store: Arc<dyn CardStore>, clock: Arc<dyn Clock>, config: &SchedulerConfig) -> Self {
        Self {
            store,
            clock,
            new_card_burial: config.new_card_burial(),
            max_write_retries: config.max_write_retries,
        }
    }

    /// Every other card generated from the same note as `id`.
    #[instrument(skip(self), fields(card_id = %id))]
    pub async fn find_related(&self, id: &CardId) -> Result<Vec<Card>> {
        let (start_key, end_key) = id.sibling_range();
        let rows = self.store.all_docs(KeyRange { start_key, end_key, include_docs: true }).await?;

        let mut related = Vec::with_capacity(rows.len());
        for row in rows {
            let doc = row.doc.ok_or_else(|| {
                FlashbackError::DecodeFailure(format!("row '{}' has no document", row.id))
            })?;
            let card = Card::from_document(doc)?;
            if card.id.is_sibling_of(id) {
                related.push(card);
            }
        }
        debug!(found = related.len(), "related cards");
        Ok(related)
    }

    /// Bury `related` against `budget` and write the changes back.
    ///
    /// `related` only narrows the candidates; each one is re-read and
    /// re-checked right before it is written. Returns the number of cards
    /// written.
    pub async fn bury(&self, budget: Interval, related: Vec<Card>) -> Result<usize> {
        let now = self.clock.now_utc();
        let mut written = 0;
        for card in set_burials(budget, related, now, self.new_card_burial) {
            if self.persist(budget, &card.id).await? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Read, recompute and write one burial, starting over on revision
    /// conflicts.
    ///
    /// Returns `false` if the fresh read shows the card is already buried.
    async fn persist(&self, budget: Interval, id: &CardId) -> Result<bool> {
        let mut attempt = 0;
        loop {
            let fresh = Card::from_document(self.store.get(id.as_str()).await?)?;
            let now = self.clock.now_utc();
            let Some(card) = set_burials(budget, vec![fresh], now, self.new_card_burial).pop() else {
                debug!(card_id = %id, "already buried by a concurrent review");
                return Ok(false);
            };

            let doc = card.to_document()?;
            let err = match self.store.put(id.as_str(), doc, card.rev.as_deref()).await {
                Ok(rev) => {
                    debug!(card_id = %id, %rev, buried_until = ?card.buried_until, "card buried");
                    return Ok(true);
                }
                Err(err) => err,
            };
            if !err.is_retryable() || attempt >= self.max_write_retries {
                return Err(err);
            }
            attempt += 1;
            warn!(card_id = %id, attempt, "revision conflict while burying; re-reading");
        }
    }
}
