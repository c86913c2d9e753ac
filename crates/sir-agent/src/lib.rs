//! `sir-agent` — one simulated individual: kinematics plus health.
//!
//! An [`Agent`] knows its own position, velocity, waypoint, and health.  It
//! knows nothing about other agents; every pairwise interaction (repulsion,
//! transmission) is driven from `sir-sim`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`health`]    | `Health`, `HealthState`, `Infection`, `Rgb`                |
//! | [`agent`]     | `Agent`, `MotionLimits`, locomotion constants              |
//! | [`builder`]   | `AgentBuilder` (fluent spawning)                           |
//!
//! # Health state machine
//!
//! ```text
//! Susceptible ──infect()──▶ Infected ──hit points ≤ 0──▶ Dead
//!                               │
//!                               └────timer ≤ 0─────────▶ Immune
//! ```
//!
//! Immune and Dead are terminal.  The death check runs first, so an agent
//! whose hit points and timer both run out on the same tick dies.

pub mod agent;
pub mod builder;
pub mod health;


pub use agent::{Agent, MotionLimits};
pub use builder::AgentBuilder;
pub use health::{Health, HealthState, Infection, Rgb};
