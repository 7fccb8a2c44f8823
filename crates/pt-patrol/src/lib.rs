//! `pt-patrol` — the patrol controller and the seams it plugs into.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`collaborator`] | `Movement`, `DistanceOracle`, `ActionProvider` traits        |
//! | [`route`]        | `Route` — shared, non-empty, circular waypoint sequence      |
//! | [`controller`]   | `PatrolController<M, A>`, `PatrolState`                      |
//! | [`builder`]      | `PatrolBuilder` — validated construction, hub subscription   |
//! | [`loader`]       | `load_route_csv`, `load_route_reader`                        |
//! | [`error`]        | `PatrolError`, `PatrolResult<T>`                             |
//!
//! # Control loop (summary)
//!
//! ```text
//! tick(now, remaining, threshold):
//!   apply queued authority events
//!   if dormant                          → return
//!   if remaining < threshold            → index = (index + 1) % len; move_to(route[index])
//!   if now ≥ last_action + interval     → try_perform(); last_action = now
//! ```
//!
//! Movement and actions are fire-and-forget: the controller never inspects
//! whether a command was carried out.

pub mod builder;
pub mod collaborator;
pub mod controller;
pub mod error;
pub mod loader;
pub mod route;

#[cfg(test)]
mod tests;

pub use builder::PatrolBuilder;
pub use collaborator::{ActionProvider, DistanceOracle, Movement};
pub use controller::{PatrolController, PatrolState};
pub use error::{PatrolError, PatrolResult};
pub use loader::{load_route_csv, load_route_reader};
pub use route::Route;
