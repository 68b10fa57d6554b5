//! Shared test helpers for `flashback-core` integration tests.
//!
//! In-memory stand-ins for the store, randomness, clock and session ports so
//! scheduler tests can focus on behaviour instead of storage.

#![allow(dead_code)]

pub mod cards;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use flashback_core::{Clock, RandomSource, SessionProvider};
use parking_lot::Mutex;

/// Replays a fixed list of draws, cycling when exhausted.
pub struct SequenceRandom {
    values: Vec<f64>,
    next: Mutex<usize>,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self { values, next: Mutex::new(0) }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let mut next = self.next.lock();
        let value = self.values[*next % self.values.len()];
        *next += 1;
        value
    }
}

/// Low-discrepancy sequence covering `[0, 1)` evenly, for frequency tests
/// that must not depend on a seeded RNG.
pub struct GoldenRandom {
    state: Mutex<f64>,
}

impl GoldenRandom {
    pub fn new() -> Self {
        Self { state: Mutex::new(0.0) }
    }
}

impl RandomSource for GoldenRandom {
    fn next_f64(&self) -> f64 {
        let mut state = self.state.lock();
        *state = (*state + 0.618_033_988_749_895).fract();
        *state
    }
}

/// Clock frozen at a settable instant.
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}

/// Session with a fixed login state.
pub struct StaticSession(pub Option<String>);

impl StaticSession {
    pub fn logged_in() -> Arc<Self> {
        Arc::new(Self(Some("alice".to_string())))
    }

    pub fn logged_out() -> Arc<Self> {
        Arc::new(Self(None))
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}

/// 2017-06-01T12:00:00 at the given hour offset.
pub fn noon(offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2017, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}
