//! Epidemic configuration.
//!
//! # Ownership
//!
//! The caller (a UI layer, a CLI, a test) owns the only mutable copy of
//! [`Configuration`].  The engine receives it by value on construction and
//! reset, validates it, and never mutates it.  Changing parameters between
//! ticks means handing the engine a fresh, re-validated value.
//!
//! # Defaults
//!
//! `Configuration::default()` matches the stock settings panel:
//! 250 agents, 5 seeded infections, distancing strength 0.1 within 10
//! units, infection chance 5, contagion cap 30, cure rate 10.

use crate::{SirError, SirResult};

/// Upper bound (exclusive) of the per-pair infection draw.  A draw below
/// `infection_chance` transmits, so `infection_chance >= 500` always does.
pub const INFECTION_DRAW_RANGE: u32 = 500;

/// Largest accepted `infection_chance`.
pub const MAX_INFECTION_CHANCE: u32 = 1_000;

/// Movement model used by `Agent::advance_position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Locomotion {
    /// Velocity-based seek toward a waypoint with speed clamp and drag.
    /// Repulsion acts through velocity, so this is the model that lets
    /// social distancing work.
    #[default]
    Seek,

    /// Step a clamped fraction of the way to the waypoint each tick without
    /// keeping velocity.  Repulsion pushes are stored but never applied to
    /// position.
    Direct,
}

/// A half-open `[min, max)` range of `f32` values.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `true` for finite, positive, non-inverted spans.
    fn is_positive(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Parameters read by the engine every tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    /// Number of agents to spawn on build / reset.
    pub population_size: usize,

    /// Agents infected at spawn: the first `initial_infected` in creation
    /// order.
    pub initial_infected: usize,

    /// Scale applied to the separation vector of a too-close pair.
    pub social_distance_strength: f32,

    /// Pairs strictly closer than this repel each other.
    pub social_distance_radius: f32,

    /// Numerator compared against a draw in `[0, INFECTION_DRAW_RANGE)`.
    pub infection_chance: u32,

    /// Maximum radius an infected agent's contagion zone grows to.
    pub disease_spread_cap: f32,

    /// Subtracted from the remaining infection timer every tick.
    pub cure_rate: f32,

    /// Subtracted from the remaining hit points every tick.
    pub deadliness: f32,

    /// Range the infection timer is drawn from when an agent is infected.
    pub infection_time_range: Span,

    /// Range the hit-point budget is drawn from when an agent is infected.
    pub hit_point_range: Span,

    pub locomotion: Locomotion,
}

impl Configuration {
    /// Check every field, returning the first violation found.
    ///
    /// Invalid input is rejected, never clamped.
    pub fn validate(&self) -> SirResult<()> {
        if self.initial_infected > self.population_size {
            return Err(invalid(format!(
                "initial_infected ({}) exceeds population_size ({})",
                self.initial_infected, self.population_size
            )));
        }
        if self.infection_chance > MAX_INFECTION_CHANCE {
            return Err(invalid(format!(
                "infection_chance ({}) exceeds {MAX_INFECTION_CHANCE}",
                self.infection_chance
            )));
        }

        non_negative("social_distance_strength", self.social_distance_strength)?;
        non_negative("social_distance_radius", self.social_distance_radius)?;
        non_negative("disease_spread_cap", self.disease_spread_cap)?;
        non_negative("deadliness", self.deadliness)?;

        if !(self.cure_rate.is_finite() && self.cure_rate > 0.0) {
            return Err(invalid(format!("cure_rate must be positive, got {}", self.cure_rate)));
        }
        if !self.infection_time_range.is_positive() {
            return Err(invalid(format!(
                "infection_time_range {:?} must be positive with min <= max",
                self.infection_time_range
            )));
        }
        if !self.hit_point_range.is_positive() {
            return Err(invalid(format!(
                "hit_point_range {:?} must be positive with min <= max",
                self.hit_point_range
            )));
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            population_size:          250,
            initial_infected:         5,
            social_distance_strength: 0.1,
            social_distance_radius:   10.0,
            infection_chance:         5,
            disease_spread_cap:       30.0,
            cure_rate:                10.0,
            deadliness:               1.0,
            infection_time_range:     Span::new(500.0, 5_000.0),
            hit_point_range:          Span::new(400.0, 4_000.0),
            locomotion:               Locomotion::Seek,
        }
    }
}

fn invalid(msg: String) -> SirError {
    SirError::InvalidConfiguration(msg)
}

fn non_negative(name: &str, value: f32) -> SirResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and non-negative, got {value}")))
    }
}
