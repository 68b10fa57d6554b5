//! Flashback - spaced-repetition study scheduler
//!
//! Main entry point. Opens the configured card database, logs in the user
//! named by `FLASHBACK_USER` and reports the next card to study.

use anyhow::Context;
use flashback_lib::AppContext;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration so it can supply FLASHBACK_* vars
    let dotenv = dotenvy::dotenv();

    let config = flashback_infra::config::load().context("failed to load configuration")?;
    flashback_infra::init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new_with_config(config).await.context("failed to start")?;

    let health = flashback_lib::get_app_health(&ctx).await;
    if !health.is_healthy {
        let failing: Vec<_> = health.failing().collect();
        anyhow::bail!("unhealthy components: {}", failing.join(", "));
    }

    let user = std::env::var("FLASHBACK_USER").context("FLASHBACK_USER is not set")?;
    flashback_lib::log_in(&ctx, &user)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    match flashback_lib::get_card_to_study(&ctx, &cancel).await? {
        Some(card) => tracing::info!(card_id = %card.id, due = ?card.due, "next card"),
        None => tracing::info!("nothing to study right now"),
    }

    ctx.shutdown().await?;
    Ok(())
}
