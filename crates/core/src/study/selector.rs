//! Priority-weighted card selection

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use flashback_domain::Card;
use tracing::{debug, error};

use super::ports::RandomSource;
use super::priority::priority_of;

/// Picks one card with probability proportional to its priority.
pub struct WeightedSelector {
    random: Arc<dyn RandomSource>,
}

impl WeightedSelector {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Select a card from `cards`, or `None` when there are no candidates.
    ///
    /// One uniform draw in `[0, total)` is walked down the candidate list;
    /// the first card that takes the running value below zero wins. When
    /// every candidate weighs zero the draw picks uniformly instead.
    pub fn select(&self, cards: Vec<Card>, now: DateTime<FixedOffset>) -> Option<Card> {
        if cards.len() <= 1 {
            return cards.into_iter().next();
        }

        let priorities: Vec<f64> = cards.iter().map(|card| priority_of(card, now)).collect();
        let total: f64 = priorities.iter().sum();
        if total.is_nan() || total <= 0.0 {
            let index = uniform_index(self.random.next_f64(), cards.len());
            debug!(candidates = cards.len(), index, "no weighted candidates; picking uniformly");
            return cards.into_iter().nth(index);
        }

        let mut remaining = self.random.next_f64() * total;

        let winner = priorities.iter().position(|priority| {
            remaining -= priority;
            remaining < 0.0
        });

        let index = winner.unwrap_or_else(|| {
            error!(
                candidates = cards.len(),
                total_priority = total,
                "weighted scan exhausted without a winner; falling back to last candidate"
            );
            cards.len() - 1
        });
        cards.into_iter().nth(index)
    }
}

fn uniform_index(draw: f64, len: usize) -> usize {
    ((draw * len as f64) as usize).min(len - 1)
}
