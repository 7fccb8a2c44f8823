//! `pt-sim` — headless tick loop for patrol agents.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   now = tick * tick_duration_secs
//!   ① Room      — apply scheduled joins / leaves / master switches due by `now`
//!                 (the hub queues authority events for every subscriber).
//!   ② Decide    — for every agent: update its ability clock, then
//!                 PatrolController::step(now) (applies queued authority first).
//!   ③ Move      — advance every NavAgent by one frame toward its destination.
//!   ④ Observe   — on_tick_end, and on_snapshot every `output_interval_ticks`.
//! ```
//!
//! Deciding before moving means a freshly issued destination is what the
//! distance reading reports on the next frame.
//!
//! # Cargo features
//!
//! | Feature | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Serialize/Deserialize for `RoomEvent` and friends.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pt_authority::AuthorityHub;
//! use pt_core::PeerId;
//! use pt_patrol::load_route_csv;
//! use pt_sim::{NoopObserver, WorldBuilder};
//!
//! let route = load_route_csv(Path::new("route.csv"))?;
//! let hub = AuthorityHub::new(PeerId(1));
//! let mut world = WorldBuilder::new(config, route, hub).agent_count(4).build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod ability;
pub mod builder;
pub mod error;
pub mod nav;
pub mod observer;
pub mod room;
pub mod world;


pub use ability::CooldownAbility;
pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use nav::NavAgent;
pub use observer::{AgentSnapshot, NoopObserver, WorldObserver};
pub use room::{RoomEvent, RoomEventKind};
pub use world::{PatrolAgent, World};
