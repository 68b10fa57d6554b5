use std::time::Duration;

use flashback_domain::FlashbackError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"study::get_card_to_study"`;
/// callers must not put card content or user names in it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `FlashbackError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &FlashbackError) -> &'static str {
    error.label()
}
