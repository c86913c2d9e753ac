//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! discrete engine step; how often ticks happen in wall-clock terms is the
//! caller's business (an interactive front end typically drives one tick
//! per 60 Hz frame).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and how many resets the run has gone through.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Number of times the population has been rebuilt since the run began.
    pub generation: u32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0 and bump the generation counter.
    pub fn restart(&mut self) {
        self.current_tick = Tick::ZERO;
        self.generation += 1;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (generation {})", self.current_tick, self.generation)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// How long to run and how often to report.
///
/// Separate from [`Configuration`](crate::Configuration): this drives the
/// runner, not the epidemic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Total ticks to simulate.  At 60 ticks per second, 3600 is one minute.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an agent snapshot every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,
}

impl RunConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// `true` if a snapshot is due at `tick`.
    #[inline]
    pub fn snapshot_due(&self, tick: Tick) -> bool {
        self.output_interval_ticks > 0 && tick.0.is_multiple_of(self.output_interval_ticks)
    }

    /// Construct a fresh `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { total_ticks: 3_600, seed: 42, output_interval_ticks: 60 }
    }
}
