//! Pseudo-random sources
//!
//! `ThreadRandom` wraps the `rand` crate's thread-local RNG for visual
//! variety. `SeededRandom` wraps a `StdRng` and produces the same sequence
//! for the same seed.

use crate::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Unseeded random source backed by `rand::thread_rng`
pub struct ThreadRandom {
    _phantom: std::marker::PhantomData<()>,
}

impl ThreadRandom {
    /// Create a new unseeded source
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn float(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    // Override to reuse one RNG handle
    fn floats(&self, n: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen::<f64>()).collect()
    }
}

/// Seeded random source for deterministic synthesis
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a new seeded source
    ///
    /// Using the same seed will produce the same sequence of values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn name(&self) -> &'static str {
        "seeded"
    }

    fn float(&self) -> f64 {
        // A poisoned lock still holds a valid RNG state
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>()
    }

    fn floats(&self, n: usize) -> Vec<f64> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (0..n).map(|_| rng.gen::<f64>()).collect()
    }
}
