//! `pt-core` — foundational types for the `patrol_rs` framework.
//!
//! This crate is a dependency of every other `pt-*` crate.  It has no `pt-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PeerId`, `SubscriptionId`                 |
//! | [`geo`]         | `Position`, Euclidean distance, `step_towards`        |
//! | [`time`]        | `SimTime`, `SimClock`                                 |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`config`]      | `WorldConfig`, `PatrolSettings` (JSON loadable)       |
//! | [`error`]       | `PtError`, `PtResult`                                 |
//!
//! Ids, `Position`, and `SimTime` serialize as their bare inner values so
//! they can appear in JSON scenario files.

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PatrolSettings, WorldConfig};
pub use error::{PtError, PtResult};
pub use geo::Position;
pub use ids::{AgentId, PeerId, SubscriptionId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimTime};
