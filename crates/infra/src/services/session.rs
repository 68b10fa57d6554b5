//! Login session state

use flashback_core::SessionProvider;
use parking_lot::RwLock;

/// Session whose user is set by the embedding application after login.
#[derive(Debug, Default)]
pub struct StaticSession {
    user: RwLock<Option<String>>,
}

impl StaticSession {
    pub fn new(user: Option<String>) -> Self {
        Self { user: RwLock::new(user) }
    }

    pub fn log_in(&self, user: impl Into<String>) {
        *self.user.write() = Some(user.into());
    }

    pub fn log_out(&self) {
        *self.user.write() = None;
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<String> {
        self.user.read().clone()
    }
}
