//! Cancellation helpers for store-bound work

use std::future::Future;

use flashback_domain::{FlashbackError, Result};
use tokio_util::sync::CancellationToken;

/// Run `work` unless `cancel` fires first.
///
/// A cancelled operation yields [`FlashbackError::Cancelled`] and whatever
/// `work` had accumulated is dropped.
pub async fn cancellable<T, F>(cancel: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(FlashbackError::Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(FlashbackError::Cancelled),
        result = work => result,
    }
}
