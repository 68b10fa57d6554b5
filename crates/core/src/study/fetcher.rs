//! Candidate fetching from the study queues
//!
//! Buried and same-day cards cannot be excluded by the store's views, so each
//! page is over-fetched by a fixed padding and filtered here. When filtering
//! leaves a page short, the next page is requested until the limit is met or
//! the view runs out.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use flashback_domain::constants::LIMIT_PADDING;
use flashback_domain::{Card, FlashbackError, Queue, Result};
use tracing::{debug, instrument, trace};

use super::ports::{CardStore, Clock, ViewQuery, ViewRow};

/// Why a fetched card was left out of the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `buried_until` is still in the future
    Buried,
    /// Day-or-longer interval and already reviewed today
    ReviewedToday,
    /// Sub-day interval that has not come due yet
    NotYetDue,
}

/// Eligibility rules evaluated against a single instant
#[derive(Debug, Clone, Copy)]
pub struct Eligibility {
    now: DateTime<Utc>,
    start_of_today: DateTime<Utc>,
}

impl Eligibility {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        let midnight = now.date_naive().and_time(NaiveTime::MIN);
        let start_of_today = now
            .offset()
            .from_local_datetime(&midnight)
            .single()
            .map_or_else(|| now.with_timezone(&Utc), |start| start.with_timezone(&Utc));
        Self { now: now.with_timezone(&Utc), start_of_today }
    }

    /// Reason to skip `card`, or `None` when it may be studied now.
    pub fn rejection(&self, card: &Card) -> Option<Rejection> {
        if card.is_buried_at(self.now) {
            return Some(Rejection::Buried);
        }
        let interval = card.interval?;
        if interval.whole_days() >= 1
            && card.last_review.is_some_and(|reviewed| reviewed >= self.start_of_today)
        {
            return Some(Rejection::ReviewedToday);
        }
        if interval.whole_days() == 0 && card.due.is_some_and(|due| due > self.now) {
            return Some(Rejection::NotYetDue);
        }
        None
    }
}

/// Paginated, filtered reads from a study queue
pub struct CandidateFetcher {
    store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
    limit_padding: usize,
}

impl CandidateFetcher {
    pub fn new(store: Arc<dyn CardStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock, limit_padding: LIMIT_PADDING }
    }

    /// Override the number of extra rows requested per page.
    pub fn with_limit_padding(mut self, limit_padding: usize) -> Self {
        self.limit_padding = limit_padding;
        self
    }

    /// Fetch up to `limit` eligible cards from `queue`, starting at view row
    /// `offset`.
    ///
    /// Returns fewer than `limit` cards only when the queue is exhausted.
    /// Any store or decode failure aborts the whole fetch.
    #[instrument(skip(self), fields(queue = %queue))]
    pub async fn fetch_batch(&self, queue: Queue, limit: usize, offset: usize) -> Result<Vec<Card>> {
        if limit == 0 {
            return Err(FlashbackError::InvalidInput("invalid limit".into()));
        }

        let eligibility = Eligibility::at(self.clock.now());
        let mut cards = Vec::with_capacity(limit);
        let mut offset = offset;

        loop {
            let query = ViewQuery {
                limit: limit - cards.len() + self.limit_padding,
                offset,
                include_docs: true,
            };
            let page = self.store.query(queue.view_name(), query).await?;

            let mut seen = 0;
            for row in page.rows {
                seen += 1;
                let card = decode_row(row)?;
                if let Some(reason) = eligibility.rejection(&card) {
                    trace!(card_id = %card.id, ?reason, "skipping ineligible card");
                    continue;
                }
                cards.push(card);
                if cards.len() == limit {
                    return Ok(cards);
                }
            }

            offset += seen;
            if seen == 0 || page.total_rows <= offset {
                break;
            }
            debug!(offset, have = cards.len(), total_rows = page.total_rows, "page short, fetching next");
        }

        debug!(found = cards.len(), "queue exhausted");
        Ok(cards)
    }
}

fn decode_row(row: ViewRow) -> Result<Card> {
    let doc = row
        .doc
        .ok_or_else(|| FlashbackError::DecodeFailure(format!("row '{}' has no document", row.id)))?;
    Card::from_document(doc)
}
