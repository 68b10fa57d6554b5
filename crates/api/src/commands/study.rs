//! Study commands
//!
//! Thin wrappers over [`StudyService`](flashback_core::StudyService) that add
//! command logging and resolve card ids coming from the UI.

use flashback_domain::{Card, CardId, Result};
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Choose the next card to show, or `None` when nothing is due.
pub async fn get_card_to_study(
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Result<Option<Card>> {
    execute_logged("study::get_card_to_study", move || ctx.study.get_card_to_study(cancel)).await
}

/// Bury the siblings of a card the user has just reviewed.
///
/// The card is re-read from the store so its freshly graded interval is the
/// one used as the burial budget.
pub async fn bury_related(ctx: &AppContext, card_id: &str, cancel: &CancellationToken) -> Result<()> {
    execute_logged("study::bury_related", move || async move {
        let id: CardId = card_id.parse()?;
        let reviewed = Card::from_document(ctx.store.get(id.as_str()).await?)?;
        ctx.study.bury_related(&reviewed, cancel).await
    })
    .await
}
