//! World observer trait for progress reporting and data collection.

use pt_core::{AgentId, Position, SimTime};
use pt_patrol::PatrolState;

use crate::RoomEvent;

/// Read-only view of one agent, handed to [`WorldObserver::on_snapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    pub agent:             AgentId,
    pub position:          Position,
    /// Index of the waypoint currently targeted.
    pub waypoint:          usize,
    pub state:             PatrolState,
    pub move_commands:     u64,
    pub actions_performed: u64,
    pub actions_refused:   u64,
}

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — handoff logger
///
/// ```rust,ignore
/// struct HandoffLogger;
///
/// impl WorldObserver for HandoffLogger {
///     fn on_room_event(&mut self, now: SimTime, event: &RoomEvent) {
///         println!("{now}: {:?}", event.kind);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: u64, _now: SimTime) {}

    /// Called after a scheduled room change has been applied.
    fn on_room_event(&mut self, _now: SimTime, _event: &RoomEvent) {}

    /// Called at the end of each tick.
    ///
    /// `active` is the number of agents whose controller held authority
    /// after this tick's decisions.
    fn on_tick_end(&mut self, _tick: u64, _now: SimTime, _active: usize) {}

    /// Called every `config.output_interval_ticks` ticks, after movement.
    fn on_snapshot(&mut self, _now: SimTime, _agents: &[AgentSnapshot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_time: SimTime) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
