//! Plain data row types written by output backends.

use sir_agent::HealthState;
use sir_core::Tick;
use sir_sim::{AgentView, Census};

/// One agent's position and health at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    /// Restart count of the run the row belongs to.
    pub generation:       u32,
    pub tick:             u64,
    pub agent_id:         u32,
    pub x:                f32,
    pub y:                f32,
    pub state:            HealthState,
    /// `0.0` unless the agent is infected.
    pub contagion_radius: f32,
}

impl AgentSnapshotRow {
    pub fn from_view(generation: u32, tick: Tick, view: &AgentView) -> Self {
        Self {
            generation,
            tick:             tick.0,
            agent_id:         view.id.0,
            x:                view.position.x,
            y:                view.position.y,
            state:            view.state,
            contagion_radius: view.contagion_radius.unwrap_or(0.0),
        }
    }
}

/// The epidemic curve: per-state counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub generation:  u32,
    pub tick:        u64,
    pub susceptible: u64,
    pub infected:    u64,
    pub immune:      u64,
    pub dead:        u64,
}

impl TickSummaryRow {
    pub fn from_census(generation: u32, tick: Tick, census: &Census) -> Self {
        Self {
            generation,
            tick:        tick.0,
            susceptible: census.susceptible as u64,
            infected:    census.infected as u64,
            immune:      census.immune as u64,
            dead:        census.dead as u64,
        }
    }
}
