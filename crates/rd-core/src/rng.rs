//! Deterministic simulation RNG and the quota utility.
//!
//! # Determinism strategy
//!
//! The whole scheduling core draws from one `SmallRng` seeded from the run's
//! master seed; the host owns the seed, this core owns the stream.  Every
//! percentage-driven rule in the configuration goes through
//! [`SimRng::should_occur`] — one Bernoulli draw per decision point, never a
//! comparison against a cached random value — so each decision is
//! re-evaluated independently wherever it appears.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The shared deterministic pseudo-random source consumed by the core.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// giving a test fixture its own stream without disturbing the main one.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// The quota utility: `true` with probability `percent`/100.
    ///
    /// A single uniform draw per call.  Values ≥ 100 always pass, 0 never
    /// does.
    #[inline]
    pub fn should_occur(&mut self, percent: u32) -> bool {
        if percent >= 100 {
            return true;
        }
        self.0.gen_range(0..100u32) < percent
    }

    /// A uniform value in `[0, max)`; 0 when `max == 0`.
    #[inline]
    pub fn random_value(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.0.gen_range(0..max)
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
