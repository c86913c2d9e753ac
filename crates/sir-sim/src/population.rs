//! The `Population` — an ordered agent collection and the per-tick engine.

use sir_agent::{Agent, AgentBuilder, HealthState};
use sir_core::{Configuration, INFECTION_DRAW_RANGE, Plane, RandomSource, Vec2};
use tracing::{debug, trace};

use crate::{AgentView, Census, SimError, SimResult};

/// All agents of one run plus the configuration they are simulated under.
///
/// Agents live in a `Vec` in creation order; `agents[i].id() == AgentId(i)`
/// always holds.  Every pairwise phase is a brute-force O(n²) scan, which is
/// comfortable at a few hundred agents.  A uniform grid keyed on the larger
/// of the two interaction radii is the place to swap in if populations grow
/// into the thousands.
#[derive(Clone, Debug)]
pub struct Population {
    plane:   Plane,
    config:  Configuration,
    spawner: AgentBuilder,
    agents:  Vec<Agent>,
}

impl Population {
    /// Validate `config` and spawn a fresh population on `plane`.
    pub fn new<R: RandomSource + ?Sized>(
        plane:  Plane,
        config: Configuration,
        rng:    &mut R,
    ) -> SimResult<Self> {
        Self::with_spawner(AgentBuilder::new(plane), config, rng)
    }

    /// Like [`new`](Self::new), spawning through a customised
    /// [`AgentBuilder`] (motion limits, size).
    pub fn with_spawner<R: RandomSource + ?Sized>(
        spawner: AgentBuilder,
        config:  Configuration,
        rng:     &mut R,
    ) -> SimResult<Self> {
        let plane = spawner.plane();
        plane.validate()?;
        config.validate()?;

        let agents = spawn(&spawner, &config, rng);
        debug!(
            agents   = agents.len(),
            infected = config.initial_infected,
            "population spawned"
        );
        Ok(Self { plane, config, spawner, agents })
    }

    /// Adopt a hand-built agent list (scenario setup, tests).
    ///
    /// `agents.len()` must equal `config.population_size` and every agent's
    /// id must equal its index.  Health is taken as given, so
    /// `initial_infected` is not applied.
    pub fn from_agents(plane: Plane, config: Configuration, agents: Vec<Agent>) -> SimResult<Self> {
        plane.validate()?;
        config.validate()?;

        if agents.len() != config.population_size {
            return Err(SimError::AgentCountMismatch {
                expected: config.population_size,
                got:      agents.len(),
                what:     "agent list",
            });
        }
        if let Some((index, agent)) = agents
            .iter()
            .enumerate()
            .find(|(i, a)| a.id().index() != *i)
        {
            return Err(SimError::AgentIdMismatch { index, id: agent.id() });
        }

        Ok(Self { plane, config, spawner: AgentBuilder::new(plane), agents })
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Discard every agent and respawn from `config`.
    ///
    /// On error the current population and configuration are left intact.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, config: Configuration, rng: &mut R) -> SimResult<()> {
        config.validate()?;
        self.agents = spawn(&self.spawner, &config, rng);
        self.config = config;
        debug!(agents = self.agents.len(), "population reset");
        Ok(())
    }

    /// Swap in new live parameters without respawning.
    ///
    /// `population_size` and `initial_infected` only take effect on the next
    /// [`reset`](Self::reset).
    pub fn set_config(&mut self, config: Configuration) -> SimResult<()> {
        config.validate()?;
        debug!(?config, "configuration updated");
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Render view of every agent in creation order.
    pub fn snapshot(&self) -> Vec<AgentView> {
        self.agents.iter().map(AgentView::from).collect()
    }

    pub fn census(&self) -> Census {
        Census::of(&self.agents)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the whole population by one step.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.advance_agents(rng);
        self.social_distance();
        let infections = self.spread_disease(rng);
        trace!(infections, "tick complete");
    }

    /// Phase ①: move every living agent and progress active infections.
    pub fn advance_agents<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let locomotion = self.config.locomotion;
        let mut deaths = 0usize;
        let mut recoveries = 0usize;

        for agent in self.agents.iter_mut().filter(|a| !a.is_dead()) {
            agent.advance_position(&self.plane, locomotion, rng);
            match agent.update_status(&self.config) {
                Some(HealthState::Dead)   => deaths += 1,
                Some(HealthState::Immune) => recoveries += 1,
                _ => {}
            }
        }

        if deaths + recoveries > 0 {
            trace!(deaths, recoveries, "infections resolved");
        }
    }

    /// Phase ②: repulsion between every ordered pair of living agents.
    ///
    /// For agent `a`, the push is the sum over every living `b` (itself
    /// included, contributing zero) with `|a - b| < radius` of
    /// `(a - b) * strength`.  There is no distance falloff.  Positions do
    /// not move during this phase, so each push depends only on the
    /// positions at phase start.
    pub fn social_distance(&mut self) {
        let radius   = self.config.social_distance_radius;
        let strength = self.config.social_distance_strength;

        let positions: Vec<Option<Vec2>> = self
            .agents
            .iter()
            .map(|a| (!a.is_dead()).then(|| a.position()))
            .collect();

        let push_for = |pa: Vec2| -> Vec2 {
            positions.iter().flatten().fold(Vec2::ZERO, |acc, &pb| {
                if pa.distance(pb) < radius {
                    acc + (pa - pb) * strength
                } else {
                    acc
                }
            })
        };

        #[cfg(not(feature = "parallel"))]
        let pushes: Vec<Option<Vec2>> = positions.iter().map(|&p| p.map(push_for)).collect();

        #[cfg(feature = "parallel")]
        let pushes: Vec<Option<Vec2>> = {
            use rayon::prelude::*;
            positions.par_iter().map(|&p| p.map(push_for)).collect()
        };

        for (agent, push) in self.agents.iter_mut().zip(pushes) {
            if let Some(delta) = push {
                agent.push(delta);
            }
        }
    }

    /// Phase ③: directed transmission from every infected agent outward.
    ///
    /// Each (infected, susceptible) pair with `0 < distance < radius` draws
    /// once from `[0, INFECTION_DRAW_RANGE)`; a draw below
    /// `infection_chance` infects.  A susceptible agent near several
    /// infected agents faces several independent draws in the same tick.
    ///
    /// Returns the number of new infections.
    pub fn spread_disease<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let chance = self.config.infection_chance;
        let mut infections = 0;

        for i in 0..self.agents.len() {
            let source = &self.agents[i];
            let Some(radius) = source.contagion_radius() else {
                continue;
            };
            let origin = source.position();

            for j in 0..self.agents.len() {
                if i == j || self.agents[j].state() != HealthState::Susceptible {
                    continue;
                }
                let dist = origin.distance(self.agents[j].position());
                if dist > 0.0
                    && dist < radius
                    && rng.below(INFECTION_DRAW_RANGE) < chance
                    && self.agents[j].infect(&self.config, rng)
                {
                    infections += 1;
                }
            }
        }
        infections
    }
}

/// Spawn `config.population_size` agents and infect the first
/// `config.initial_infected`.
fn spawn<R: RandomSource + ?Sized>(spawner: &AgentBuilder, config: &Configuration, rng: &mut R) -> Vec<Agent> {
    let mut agents = spawner.spawn_many(config.population_size, rng);
    for agent in agents.iter_mut().take(config.initial_infected) {
        agent.infect(config, rng);
    }
    agents
}
