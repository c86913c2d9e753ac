//! The `Sim` struct and its run loop.

use sir_core::{Configuration, RandomSource, RunConfig, SimClock, Tick};
use tracing::{debug, info};

use crate::{Census, Population, SimObserver, SimResult};

/// Drives a [`Population`] tick by tick and reports to an observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RandomSource> {
    /// How long to run and how often to snapshot.
    pub run: RunConfig,

    /// Current tick and reset generation.
    pub clock: SimClock,

    /// The agents and their live configuration.
    pub population: Population,

    /// The single random stream every draw comes from.
    pub rng: R,
}

impl<R: RandomSource> Sim<R> {
    /// Run from the current tick to `run.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.run.end_tick() {
            self.step(observer);
        }
        let census = self.population.census();
        info!(tick = %self.clock.current_tick, %census, "run complete");
        observer.on_sim_end(self.clock.current_tick, &census);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Run until nobody is infected or `run.end_tick()` is reached,
    /// whichever comes first.  Returns the tick the run stopped at.
    pub fn run_until_settled<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        while self.clock.current_tick < self.run.end_tick() && !self.population.census().is_settled() {
            self.step(observer);
        }
        let census = self.population.census();
        info!(tick = %self.clock.current_tick, %census, "run settled");
        observer.on_sim_end(self.clock.current_tick, &census);
        Ok(self.clock.current_tick)
    }

    /// Rebuild the population from `config` and rewind the clock.
    ///
    /// An invalid `config` is rejected and nothing changes.
    pub fn restart<O: SimObserver>(&mut self, config: Configuration, observer: &mut O) -> SimResult<()> {
        self.population.reset(config, &mut self.rng)?;
        self.clock.restart();
        let census = self.population.census();
        debug!(generation = self.clock.generation, %census, "simulation restarted");
        observer.on_reset(self.clock.generation, &census);
        Ok(())
    }

    /// Change live parameters between ticks.
    pub fn update_config(&mut self, config: Configuration) -> SimResult<()> {
        self.population.set_config(config)
    }

    /// Census of the current population.
    pub fn census(&self) -> Census {
        self.population.census()
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.population.tick(&mut self.rng);
        observer.on_tick_end(now, &self.population.census());
        if self.run.snapshot_due(now) {
            observer.on_snapshot(now, &self.population.snapshot());
        }
        self.clock.advance();
    }
}
