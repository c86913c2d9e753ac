//! Injected randomness.
//!
//! The engine never reaches for a global RNG.  Every operation that needs a
//! random value takes a `&mut R where R: RandomSource`, so tests can hand in
//! a scripted source and runs are reproducible from a single seed.
//!
//! [`SimRng`] is the production source: a `SmallRng` seeded from the run's
//! master seed.  The same seed always reproduces the same epidemic.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The two draws the simulation needs.
pub trait RandomSource {
    /// Uniform `f32` in `[low, high)`.  Returns `low` when the range is
    /// empty (`high <= low`).
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    /// Uniform integer in `[0, upper)`.  Returns `0` when `upper == 0`.
    fn below(&mut self, upper: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        (**self).uniform(low, high)
    }

    #[inline]
    fn below(&mut self, upper: u32) -> u32 {
        (**self).below(upper)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level deterministic RNG.
///
/// Used only from the single-threaded tick loop; the optional parallel
/// repulsion phase draws no random numbers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high > low {
            self.0.gen_range(low..high)
        } else {
            low
        }
    }

    #[inline]
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            0
        } else {
            self.0.gen_range(0..upper)
        }
    }
}
