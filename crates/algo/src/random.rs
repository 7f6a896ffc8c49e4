//! Randomness sources for schedule noise
//!
//! One pseudo-random stream per algorithm instance. Live runs seed from
//! entropy; backtests use a fixed seed so schedules replay identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tempo_ports::RandomSource;

/// Entropy-seeded source for live trading
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn pacing_jitter(&mut self) -> f64 {
        self.rng.gen_range(-0.01..=0.01)
    }

    fn name(&self) -> &str {
        "ThreadRandom"
    }
}

/// Deterministically-seeded source for backtests and tests
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pacing_jitter(&mut self) -> f64 {
        self.rng.gen_range(-0.01..=0.01)
    }

    fn name(&self) -> &str {
        "SeededRandom"
    }
}
