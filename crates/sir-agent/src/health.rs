//! Health state for a single agent.

use std::fmt;

use sir_core::Configuration;

/// Contagion radius growth per tick while infected.
pub const CONTAGION_GROWTH_PER_TICK: f32 = 0.3;

/// Display color handed to renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The four compartments, without per-state data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HealthState {
    Susceptible,
    Infected,
    Immune,
    Dead,
}

impl HealthState {
    pub const ALL: [HealthState; 4] = [
        HealthState::Susceptible,
        HealthState::Infected,
        HealthState::Immune,
        HealthState::Dead,
    ];

    pub fn color(self) -> Rgb {
        match self {
            HealthState::Susceptible => Rgb(0, 255, 255),
            HealthState::Infected    => Rgb(250, 200, 0),
            HealthState::Immune      => Rgb(0, 100, 200),
            HealthState::Dead        => Rgb(110, 110, 110),
        }
    }

    /// `true` for Immune and Dead.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, HealthState::Immune | HealthState::Dead)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Infected    => "infected",
            HealthState::Immune      => "immune",
            HealthState::Dead        => "dead",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disease progress, present only while an agent is infected.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Infection {
    /// Current transmission radius.  Starts at 0, grows to the cap.
    pub contagion_radius: f32,
    /// Counts down by `cure_rate`; reaching ≤ 0 means recovery.
    pub remaining_timer: f32,
    /// Counts down by `deadliness`; reaching ≤ 0 means death.
    pub remaining_hit_points: f32,
}

impl Infection {
    /// A fresh infection with a zero radius.
    pub fn new(remaining_timer: f32, remaining_hit_points: f32) -> Self {
        Self { contagion_radius: 0.0, remaining_timer, remaining_hit_points }
    }

    /// Advance one tick and report which terminal state (if any) was reached.
    ///
    /// If the cap was lowered below the current radius since last tick, the
    /// radius is pulled down to the new cap.
    pub(crate) fn progress(&mut self, config: &Configuration) -> Option<HealthState> {
        let cap = config.disease_spread_cap;
        if self.contagion_radius < cap {
            self.contagion_radius = (self.contagion_radius + CONTAGION_GROWTH_PER_TICK).min(cap);
        } else {
            self.contagion_radius = cap;
        }

        self.remaining_hit_points -= config.deadliness;
        if self.remaining_hit_points <= 0.0 {
            return Some(HealthState::Dead);
        }

        self.remaining_timer -= config.cure_rate;
        if self.remaining_timer <= 0.0 {
            return Some(HealthState::Immune);
        }
        None
    }
}

/// Health of one agent.  Infection data only exists in the `Infected`
/// variant, so "immune but still contagious" cannot be represented.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Health {
    #[default]
    Susceptible,
    Infected(Infection),
    Immune,
    Dead,
}

impl Health {
    pub fn state(&self) -> HealthState {
        match self {
            Health::Susceptible => HealthState::Susceptible,
            Health::Infected(_) => HealthState::Infected,
            Health::Immune      => HealthState::Immune,
            Health::Dead        => HealthState::Dead,
        }
    }

    pub fn infection(&self) -> Option<&Infection> {
        match self {
            Health::Infected(inf) => Some(inf),
            _ => None,
        }
    }
}
