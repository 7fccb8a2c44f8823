//! The `World` struct and its tick loop.

use std::collections::VecDeque;

use pt_authority::AuthorityHub;
use pt_core::{SimClock, SimTime, WorldConfig};
use pt_patrol::{PatrolController, PatrolState};
use tracing::debug;

use crate::{AgentSnapshot, CooldownAbility, NavAgent, RoomEvent, SimResult, WorldObserver};

/// A patrol controller wired to the headless collaborators.
pub type PatrolAgent = PatrolController<NavAgent, CooldownAbility>;

/// The headless simulation runner.
///
/// Holds the clock, the local view of the room, every agent, and the room
/// changes still to come.  Create via [`WorldBuilder`][crate::WorldBuilder].
/// Dropping the world drops every controller, which releases their
/// authority subscriptions.
pub struct World {
    pub config: WorldConfig,

    pub clock: SimClock,

    /// The local process's view of the room.
    pub hub: AuthorityHub,

    /// Indexed by `AgentId`.
    pub agents: Vec<PatrolAgent>,

    /// Scheduled room changes, ascending by time.
    pub(crate) pending: VecDeque<RoomEvent>,
}

impl World {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.tick_count < self.config.total_ticks {
            self.run_one(observer);
        }
        observer.on_sim_end(self.clock.now());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `total_ticks`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_one(observer);
        }
        Ok(())
    }

    /// Room changes not yet applied.
    pub fn pending_room_events(&self) -> usize {
        self.pending.len()
    }

    /// Agents whose controller currently holds authority.
    pub fn active_agents(&self) -> usize {
        self.agents.iter().filter(|a| a.state() == PatrolState::Active).count()
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents
            .iter()
            .map(|a| AgentSnapshot {
                agent:             a.agent(),
                position:          a.movement().position,
                waypoint:          a.index(),
                state:             a.state(),
                move_commands:     a.movement().commands,
                actions_performed: a.actions().performed,
                actions_refused:   a.actions().refused,
            })
            .collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn run_one<O: WorldObserver>(&mut self, observer: &mut O) {
        let tick = self.clock.tick_count;
        let now = self.clock.now();

        observer.on_tick_start(tick, now);
        let active = self.process_tick(now, observer);
        observer.on_tick_end(tick, now, active);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && tick.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.snapshots());
        }
        self.clock.advance();
    }

    fn process_tick<O: WorldObserver>(&mut self, now: SimTime, observer: &mut O) -> usize {
        // ── Phase 1: room changes due by now ──────────────────────────────
        while self.pending.front().is_some_and(|e| e.at <= now) {
            let Some(event) = self.pending.pop_front() else { break };
            debug!(%now, kind = ?event.kind, "applying room event");
            event.apply(&self.hub, now);
            observer.on_room_event(now, &event);
        }

        // ── Phase 2: decisions ────────────────────────────────────────────
        for agent in &mut self.agents {
            agent.actions_mut().update(now);
            agent.step(now);
        }

        // ── Phase 3: movement over this frame ─────────────────────────────
        let dt = self.clock.tick_duration_secs;
        for agent in &mut self.agents {
            agent.movement_mut().advance(dt);
        }

        self.active_agents()
    }
}
