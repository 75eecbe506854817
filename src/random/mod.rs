//! Random number sources
//!
//! This module defines the `RandomSource` trait used by track synthesis for
//! coordinate jitter, intensity noise and name selection. Production code
//! uses the unseeded `ThreadRandom`; tests inject `SeededRandom` so that
//! synthesized tracks are reproducible.

pub mod pseudo;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for random number sources
///
/// Implementations must be thread-safe (Send + Sync) so they can be shared
/// with the async data service.
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "thread", "seeded")
    fn name(&self) -> &'static str;

    /// Generate a single random float uniformly distributed in [0.0, 1.0)
    fn float(&self) -> f64;

    /// Generate n random floats, each uniformly distributed in [0.0, 1.0)
    fn floats(&self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.float()).collect()
    }

    /// Uniform value in [low, high)
    fn uniform(&self, low: f64, high: f64) -> f64 {
        low + self.float() * (high - low)
    }

    /// Uniform value in [-amplitude, +amplitude)
    fn jitter(&self, amplitude: f64) -> f64 {
        (self.float() - 0.5) * 2.0 * amplitude
    }

    /// Uniform index in [0, len)
    ///
    /// `len` must be non-zero.
    fn index(&self, len: usize) -> usize {
        let i = (self.float() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Information about a random source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source name
    pub name: String,
    /// Whether output is reproducible
    pub seeded: bool,
}

/// Build a random source, seeded when a seed is given
pub fn get_random(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(pseudo::SeededRandom::new(seed)),
        None => Arc::new(pseudo::ThreadRandom::new()),
    }
}

/// Describe a random source
pub fn describe(rng: &dyn RandomSource) -> SourceInfo {
    SourceInfo {
        name: rng.name().to_string(),
        seeded: rng.name() == "seeded",
    }
}
