//! Study service - choosing the next card and burying after reviews

use std::sync::Arc;

use flashback_domain::{Card, FlashbackError, Interval, Queue, Result, SchedulerConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::burial::BurialEngine;
use super::fetcher::CandidateFetcher;
use super::ports::{CardStore, Clock, RandomSource, SessionProvider};
use super::selector::WeightedSelector;
use crate::utils::cancel::cancellable;

/// Scheduler entry point used by the session layer
pub struct StudyService {
    fetcher: CandidateFetcher,
    selector: WeightedSelector,
    burial: BurialEngine,
    clock: Arc<dyn Clock>,
    session: Arc<dyn SessionProvider>,
    new_batch_size: usize,
    old_batch_size: usize,
}

impl StudyService {
    pub fn new(
        store: Arc<dyn CardStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        session: Arc<dyn SessionProvider>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            fetcher: CandidateFetcher::new(store.clone(), clock.clone())
                .with_limit_padding(config.limit_padding),
            selector: WeightedSelector::new(random),
            burial: BurialEngine::new(store, clock.clone(), config),
            clock,
            session,
            new_batch_size: config.new_batch_size,
            old_batch_size: config.old_batch_size,
        }
    }

    /// Pick the next card to study, or `None` when nothing is eligible.
    ///
    /// Both queues are fetched concurrently; new cards come first in the
    /// candidate list, then old ones.
    #[instrument(skip_all)]
    pub async fn get_card_to_study(&self, cancel: &CancellationToken) -> Result<Option<Card>> {
        let user = self.require_user()?;

        let (mut candidates, old_cards) = cancellable(cancel, async {
            tokio::try_join!(
                self.fetcher.fetch_batch(Queue::New, self.new_batch_size, 0),
                self.fetcher.fetch_batch(Queue::Old, self.old_batch_size, 0),
            )
        })
        .await?;
        debug!(%user, new = candidates.len(), old = old_cards.len(), "candidates fetched");
        candidates.extend(old_cards);

        let selected = self.selector.select(candidates, self.clock.now());
        match &selected {
            Some(card) => debug!(card_id = %card.id, "card selected"),
            None => info!(%user, "no eligible cards"),
        }
        Ok(selected)
    }

    /// Bury every sibling of a just-reviewed card.
    ///
    /// The reviewed card's freshly graded interval is the burial budget.
    #[instrument(skip_all, fields(card_id = %reviewed.id))]
    pub async fn bury_related(&self, reviewed: &Card, cancel: &CancellationToken) -> Result<()> {
        self.require_user()?;
        let budget = reviewed.interval.unwrap_or(Interval::ZERO);

        let written = cancellable(cancel, async {
            let related = self.burial.find_related(&reviewed.id).await?;
            if related.is_empty() {
                return Ok(0);
            }
            self.burial.bury(budget, related).await
        })
        .await?;

        debug!(written, %budget, "related cards buried");
        Ok(())
    }

    fn require_user(&self) -> Result<String> {
        self.session.current_user().ok_or(FlashbackError::NotAuthenticated)
    }
}
