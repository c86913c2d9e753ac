//! Fluent builder for spawning agents onto a plane.
//!
//! # Usage
//!
//! ```rust
//! use sir_agent::{AgentBuilder, HealthState};
//! use sir_core::{Plane, SimRng};
//!
//! let mut rng = SimRng::new(42);
//! let agents = AgentBuilder::new(Plane::default()).size(3.0).spawn_many(100, &mut rng);
//!
//! assert_eq!(agents.len(), 100);
//! assert!(agents.iter().all(|a| a.state() == HealthState::Susceptible));
//! ```

use sir_core::{AgentId, Plane, RandomSource};

use crate::agent::{DEFAULT_SIZE, DESTINATION_MARGIN};
use crate::{Agent, MotionLimits};

/// Spawns susceptible agents at uniformly random positions.
///
/// Each agent draws its position anywhere in the plane, then its first
/// waypoint inset by [`DESTINATION_MARGIN`] (x then y for each point).
#[derive(Clone, Debug)]
pub struct AgentBuilder {
    plane:  Plane,
    limits: MotionLimits,
    size:   f32,
}

impl AgentBuilder {
    pub fn new(plane: Plane) -> Self {
        Self { plane, limits: MotionLimits::default(), size: DEFAULT_SIZE }
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Override the motion constants given to every spawned agent.
    pub fn limits(mut self, limits: MotionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Override the rendered radius.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Spawn one agent with the given id.
    pub fn spawn<R: RandomSource + ?Sized>(&self, id: AgentId, rng: &mut R) -> Agent {
        let position = self.plane.random_point(rng);
        let destination = self.plane.random_point_inset(DESTINATION_MARGIN, rng);
        Agent::new(id, position, destination, self.limits, self.size)
    }

    /// Spawn `count` agents with ids `0..count` in creation order.
    pub fn spawn_many<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Agent> {
        (0..count as u32).map(|i| self.spawn(AgentId(i), rng)).collect()
    }
}
