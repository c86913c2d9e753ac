//! Read-only views handed to renderers and output writers.

use sir_agent::{Agent, HealthState, Rgb};
use sir_core::{AgentId, Vec2};

/// What a renderer needs to draw one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub position: Vec2,
    pub state:    HealthState,
    pub color:    Rgb,
    pub size:     f32,
    /// Outline radius to draw; `None` unless infected.
    pub contagion_radius: Option<f32>,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id:               agent.id(),
            position:         agent.position(),
            state:            agent.state(),
            color:            agent.color(),
            size:             agent.size(),
            contagion_radius: agent.contagion_radius(),
        }
    }
}

/// Agent counts per health state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Census {
    pub susceptible: usize,
    pub infected:    usize,
    pub immune:      usize,
    pub dead:        usize,
}

impl Census {
    /// Tally a slice of agents.
    pub fn of(agents: &[Agent]) -> Self {
        let mut census = Census::default();
        for agent in agents {
            *census.slot_mut(agent.state()) += 1;
        }
        census
    }

    pub fn count(&self, state: HealthState) -> usize {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Infected    => self.infected,
            HealthState::Immune      => self.immune,
            HealthState::Dead        => self.dead,
        }
    }

    fn slot_mut(&mut self, state: HealthState) -> &mut usize {
        match state {
            HealthState::Susceptible => &mut self.susceptible,
            HealthState::Infected    => &mut self.infected,
            HealthState::Immune      => &mut self.immune,
            HealthState::Dead        => &mut self.dead,
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.immune + self.dead
    }

    /// No one is infected any more, so nothing can change health again.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.infected == 0
    }
}

impl std::fmt::Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "S={} I={} R={} D={}",
            self.susceptible, self.infected, self.immune, self.dead
        )
    }
}
