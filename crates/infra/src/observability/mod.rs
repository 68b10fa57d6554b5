//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter directive. Output
//! is human-readable by default and JSON when configured.

use std::sync::Once;

use flashback_domain::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config);
        let registry = tracing_subscriber::registry().with(filter);

        let installed = if config.json {
            registry.with(fmt::layer().json().with_target(true).with_current_span(true)).try_init()
        } else {
            registry.with(fmt::layer().with_target(true).with_thread_ids(true)).try_init()
        };

        if let Err(err) = installed {
            tracing::debug!(error = %err, "tracing subscriber already installed");
        }
    });
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
        tracing::info!("subscriber installed once");
    }
}
