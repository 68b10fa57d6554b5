//! Login state commands

use flashback_domain::{FlashbackError, Result};
use tracing::info;

use crate::context::AppContext;

/// Mark `user` as logged in for subsequent study commands.
pub fn log_in(ctx: &AppContext, user: &str) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        return Err(FlashbackError::InvalidInput("user name must not be empty".into()));
    }
    ctx.session.log_in(user);
    info!(command = "session::log_in", "user logged in");
    Ok(())
}

pub fn log_out(ctx: &AppContext) {
    ctx.session.log_out();
    info!(command = "session::log_out", "user logged out");
}
