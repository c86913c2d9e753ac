//! `sir-sim` — the population engine and run loop.
//!
//! # Tick order
//!
//! ```text
//! Population::tick:
//!   ① Advance   — every living agent moves one step; infected agents
//!                 progress their infection (may die or recover).
//!   ② Distance  — every ordered pair of living agents closer than
//!                 social_distance_radius pushes the first away from the
//!                 second (parallel with the `parallel` feature).
//!   ③ Spread    — every infected agent draws once per susceptible agent
//!                 inside its contagion radius.
//! ```
//!
//! [`Sim`] wraps a [`Population`] with a clock, a [`RunConfig`][sir_core::RunConfig],
//! a random source, and observer callbacks.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the repulsion phase on Rayon's thread pool.       |
//! | `serde`    | Derives `Serialize` on views and census.             |
//!
//! # Quick-start
//!
//! ```rust
//! use sir_core::{Configuration, RunConfig};
//! use sir_sim::{NoopObserver, SimBuilder};
//!
//! let run = RunConfig { total_ticks: 10, seed: 7, output_interval_ticks: 0 };
//! let mut sim = SimBuilder::new(Configuration::default()).run_config(run).build()?;
//! sim.run(&mut NoopObserver)?;
//! assert_eq!(sim.population.len(), 250);
//! # Ok::<(), sir_sim::SimError>(())
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod population;
pub mod sim;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use population::Population;
pub use sim::Sim;
pub use view::{AgentView, Census};
