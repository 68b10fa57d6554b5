//! Command execution helpers
//!
//! Wraps command bodies with timing and structured outcome logging.

use std::future::Future;
use std::time::Instant;

use flashback_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command, logging how long it took and whether it succeeded
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext) -> Result<MyResponse> {
///     execute_logged("my_module::my_command", move || async move {
///         ctx.some_service.do_something().await
///     })
///     .await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;
    let elapsed = start.elapsed();

    if let Err(err) = &result {
        tracing::debug!(command = command_name, error_type = error_label(err), error = %err, "command failed");
    }
    log_command_execution(command_name, elapsed, result.is_ok());

    result
}
