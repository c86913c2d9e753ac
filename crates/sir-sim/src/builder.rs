//! Fluent builder for constructing a [`Sim`].

use sir_agent::{Agent, AgentBuilder};
use sir_core::{Configuration, Plane, RandomSource, RunConfig, SimRng};

use crate::{Population, Sim, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                  |
/// |---------------------|------------------------------------------|
/// | `.plane(p)`         | `Plane::default()` (900 × 600)           |
/// | `.run_config(r)`    | `RunConfig::default()`                   |
/// | `.spawner(b)`       | `AgentBuilder::new(plane)`               |
/// | `.agents(v)`        | spawned from the configuration           |
///
/// `build()` seeds a [`SimRng`] from `run.seed`; `build_with_rng()` takes
/// any [`RandomSource`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .plane(Plane::new(1_280.0, 720.0))
///     .run_config(run)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:  Configuration,
    plane:   Plane,
    run:     RunConfig,
    spawner: Option<AgentBuilder>,
    agents:  Option<Vec<Agent>>,
}

impl SimBuilder {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            plane:   Plane::default(),
            run:     RunConfig::default(),
            spawner: None,
            agents:  None,
        }
    }

    /// Set the plane agents wander in.  Ignored if a spawner is supplied.
    pub fn plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    pub fn run_config(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Spawn through a customised [`AgentBuilder`] (its plane wins).
    pub fn spawner(mut self, spawner: AgentBuilder) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Start from a hand-built agent list instead of spawning.
    ///
    /// Must be length `population_size` with ids equal to indices; see
    /// [`Population::from_agents`].
    pub fn agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate inputs and build with a [`SimRng`] seeded from `run.seed`.
    pub fn build(self) -> SimResult<Sim<SimRng>> {
        let rng = SimRng::new(self.run.seed);
        self.build_with_rng(rng)
    }

    /// Validate inputs and build around the given random source.
    pub fn build_with_rng<R: RandomSource>(self, mut rng: R) -> SimResult<Sim<R>> {
        let population = match (self.agents, self.spawner) {
            (Some(agents), _) => Population::from_agents(self.plane, self.config, agents)?,
            (None, Some(spawner)) => Population::with_spawner(spawner, self.config, &mut rng)?,
            (None, None) => Population::new(self.plane, self.config, &mut rng)?,
        };

        Ok(Sim {
            clock: self.run.make_clock(),
            run: self.run,
            population,
            rng,
        })
    }
}
