//! Simulation observer trait for progress reporting and data collection.

use sir_core::Tick;

use crate::{AgentView, Census};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — epidemic curve printer
///
/// ```rust,ignore
/// struct CurvePrinter { interval: u64 }
///
/// impl SimObserver for CurvePrinter {
///     fn on_tick_end(&mut self, tick: Tick, census: &Census) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {census}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's three phases have completed.
    fn on_tick_end(&mut self, _tick: Tick, _census: &Census) {}

    /// Called after `on_tick_end` every `output_interval_ticks` ticks with
    /// the render view of every agent.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentView]) {}

    /// Called after the population has been rebuilt by
    /// [`Sim::restart`][crate::Sim::restart].
    fn on_reset(&mut self, _generation: u32, _census: &Census) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick, _census: &Census) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
