//! Shared random source

use flashback_core::RandomSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One generator shared by every selection, guarded by a mutex so concurrent
/// draws never observe the same state.
pub struct ThreadSafeRandom {
    rng: Mutex<StdRng>,
}

impl ThreadSafeRandom {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Deterministic sequence, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for ThreadSafeRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadSafeRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}
