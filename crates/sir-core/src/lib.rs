//! `sir-core` — foundational types for the SIR(D) plane simulation.
//!
//! This crate is a dependency of every other `sir-*` crate.  It has no
//! `sir-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `Vec2`, `Plane`                                       |
//! | [`time`]        | `Tick`, `SimClock`, `RunConfig`                       |
//! | [`config`]      | `Configuration`, `Locomotion`, `Span`                 |
//! | [`rng`]         | `RandomSource` (injected randomness), `SimRng`        |
//! | [`error`]       | `SirError`, `SirResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Configuration, INFECTION_DRAW_RANGE, Locomotion, MAX_INFECTION_CHANCE, Span};
pub use error::{SirError, SirResult};
pub use geo::{Plane, Vec2};
pub use ids::AgentId;
pub use rng::{RandomSource, SimRng};
pub use time::{RunConfig, SimClock, Tick};
