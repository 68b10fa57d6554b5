//! Wall clock

use chrono::{DateTime, FixedOffset, Local};
use flashback_core::Clock;

/// System time in the machine's local offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
