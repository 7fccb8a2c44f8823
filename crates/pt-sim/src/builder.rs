//! Fluent builder for constructing a [`World`].

use std::collections::VecDeque;

use pt_authority::AuthorityHub;
use pt_core::{AgentId, AgentRng, Position, SimTime, WorldConfig};
use pt_patrol::{PatrolBuilder, Route};

use crate::{CooldownAbility, NavAgent, RoomEvent, SimError, SimResult, World};

/// Fluent builder for [`World`].
///
/// # Required inputs
///
/// - [`WorldConfig`] — tick duration, total ticks, seed, patrol tuning
/// - [`Route`] — shared by every agent
/// - [`AuthorityHub`] — the local process's view of the room
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.agent_count(n)`       | 1                                |
/// | `.spawn_positions(v)`   | every agent at the first waypoint |
/// | `.room_events(v)`       | none                             |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config, route, hub)
///     .agent_count(3)
///     .room_events(vec![RoomEvent::new(SimTime(30.0), RoomEventKind::Leave(PeerId(1)))])
///     .build()?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder {
    config:      WorldConfig,
    route:       Route,
    hub:         AuthorityHub,
    agent_count: usize,
    spawns:      Option<Vec<Position>>,
    room_events: Vec<RoomEvent>,
}

impl WorldBuilder {
    pub fn new(config: WorldConfig, route: Route, hub: AuthorityHub) -> Self {
        Self {
            config,
            route,
            hub,
            agent_count: 1,
            spawns:      None,
            room_events: Vec::new(),
        }
    }

    pub fn agent_count(mut self, n: usize) -> Self {
        self.agent_count = n;
        self
    }

    /// Supply the starting position of each agent (must be length `agent_count`).
    pub fn spawn_positions(mut self, positions: Vec<Position>) -> Self {
        self.spawns = Some(positions);
        self
    }

    /// Room changes to apply during the run, in any order.
    pub fn room_events(mut self, events: Vec<RoomEvent>) -> Self {
        self.room_events = events;
        self
    }

    /// Validate inputs, build every agent, and return a ready-to-run [`World`].
    pub fn build(self) -> SimResult<World> {
        self.config.validate()?;

        if u32::try_from(self.agent_count).is_err() {
            return Err(SimError::Config(format!("agent count {} exceeds u32", self.agent_count)));
        }

        let spawns = match self.spawns {
            Some(p) => {
                if p.len() != self.agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: self.agent_count,
                        got:      p.len(),
                        what:     "spawn positions",
                    });
                }
                p
            }
            None => vec![self.route.get(0); self.agent_count],
        };

        let mut room_events = self.room_events;
        if let Some(bad) = room_events.iter().find(|e| !e.at.secs().is_finite()) {
            return Err(SimError::Config(format!("room event {:?} has a non-finite time", bad.kind)));
        }
        room_events.sort_by(|a, b| a.at.secs().total_cmp(&b.at.secs()));

        let patrol = &self.config.patrol;
        let agents = spawns
            .into_iter()
            .enumerate()
            .map(|(i, spawn)| {
                let agent = AgentId(i as u32);
                let nav = NavAgent::new(spawn, patrol.speed, patrol.stopping_distance);
                let ability = CooldownAbility::new(
                    patrol.action_duration_secs,
                    patrol.action_failure_chance,
                    AgentRng::new(self.config.seed, agent),
                );
                PatrolBuilder::new(agent, self.route.clone())
                    .settings(patrol)
                    .authority(&self.hub)
                    .build(SimTime::ZERO, nav, ability)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(World {
            clock:   self.config.make_clock(),
            config:  self.config,
            hub:     self.hub,
            agents,
            pending: VecDeque::from(room_events),
        })
    }
}
