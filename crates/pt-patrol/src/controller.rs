//! The authority-gated patrol control loop.

use pt_authority::Subscription;
use pt_core::{AgentId, Position, SimTime};
use tracing::debug;

use crate::{ActionProvider, DistanceOracle, Movement, PatrolError, PatrolResult, Route};

/// Whether the controller is currently allowed to drive its agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatrolState {
    /// No authority: ticks are no-ops, patrol position is preserved.
    Dormant,
    /// Has authority: advances waypoints and fires periodic actions.
    Active,
}

/// Walks an agent around a circular [`Route`] and requests a periodic
/// action, but only while this process holds authority over the agent.
///
/// The controller owns its two collaborators (`M` for movement, `A` for the
/// action) and, when built through [`PatrolBuilder::authority`][crate::PatrolBuilder::authority],
/// a [`Subscription`] that is released when the controller is dropped.
///
/// # Time
///
/// Nothing here reads a clock.  Every operation takes `now` explicitly, so
/// a controller can be driven deterministically frame by frame.
pub struct PatrolController<M, A> {
    agent:           AgentId,
    route:           Route,
    /// Seconds; positive and finite.
    action_interval: f64,
    /// Current target, always `< route.len()`.
    index:           usize,
    last_action:     SimTime,
    has_authority:   bool,
    movement:        M,
    actions:         A,
    subscription:    Option<Subscription>,
}

impl<M: Movement, A: ActionProvider> PatrolController<M, A> {
    /// Create a controller targeting waypoint 0.
    ///
    /// Fails with [`PatrolError::Config`] if `waypoints` is empty or
    /// `action_interval` is not a positive number of seconds; no movement
    /// command is issued in that case.  On success with `has_authority`, the
    /// agent is immediately sent to the first waypoint.
    pub fn initialize(
        agent:           AgentId,
        waypoints:       impl Into<std::sync::Arc<[Position]>>,
        action_interval: f64,
        has_authority:   bool,
        now:             SimTime,
        movement:        M,
        actions:         A,
    ) -> PatrolResult<Self> {
        let route = Route::new(waypoints)?;
        if !(action_interval.is_finite() && action_interval > 0.0) {
            return Err(PatrolError::Config(format!(
                "action interval must be a positive number of seconds, got {action_interval}"
            )));
        }

        let mut controller = Self {
            agent,
            route,
            action_interval,
            index: 0,
            last_action: now,
            has_authority,
            movement,
            actions,
            subscription: None,
        };
        debug!(%agent, waypoints = controller.route.len(), has_authority, "patrol initialized");
        if has_authority {
            controller.issue_move();
        }
        Ok(controller)
    }

    /// One frame of the control loop.
    ///
    /// `remaining_distance` and `stopping_threshold` are the navigation
    /// readings for this frame.  Queued authority notifications are applied
    /// first; after that the tick is a no-op unless the controller is
    /// [`PatrolState::Active`].
    pub fn tick(&mut self, now: SimTime, remaining_distance: f32, stopping_threshold: f32) {
        self.poll_authority();
        if !self.has_authority {
            return;
        }

        if remaining_distance < stopping_threshold {
            self.index = self.route.next_index(self.index);
            self.issue_move();
        }

        if now >= self.last_action + self.action_interval {
            debug!(agent = %self.agent, %now, "requesting periodic action");
            self.actions.try_perform();
            self.last_action = now;
        }
    }

    /// Authority over the agent may have moved to or from this process.
    ///
    /// Resets the action timer to `now` so that regaining authority does not
    /// fire a backlog of actions.  The waypoint index is kept: a controller
    /// that regains authority continues the patrol where it left off.  No
    /// movement command is issued here.
    pub fn on_authority_changed(&mut self, has_authority: bool, now: SimTime) {
        if has_authority != self.has_authority {
            debug!(
                agent = %self.agent,
                %now,
                index = self.index,
                active = has_authority,
                "patrol authority changed"
            );
        }
        self.has_authority = has_authority;
        self.last_action = now;
    }

    /// Apply every queued authority notification, oldest first.
    ///
    /// Called at the start of [`tick`][Self::tick]; exposed for drivers that
    /// want authority applied without running a frame.  Returns the number
    /// of notifications applied.
    pub fn poll_authority(&mut self) -> usize {
        let Some(subscription) = &self.subscription else {
            return 0;
        };
        let events: Vec<_> = subscription.pending().collect();
        for event in &events {
            self.on_authority_changed(event.has_authority, event.at);
        }
        events.len()
    }

    /// Release the authority subscription and hand back the collaborators.
    pub fn shutdown(self) -> (M, A) {
        let PatrolController { agent, movement, actions, subscription, .. } = self;
        drop(subscription);
        debug!(%agent, "patrol shut down");
        (movement, actions)
    }

    fn issue_move(&mut self) {
        let destination = self.route.get(self.index);
        debug!(agent = %self.agent, index = self.index, %destination, "moving to waypoint");
        self.movement.move_to(destination);
    }
}

impl<M: Movement + DistanceOracle, A: ActionProvider> PatrolController<M, A> {
    /// [`tick`][Self::tick] with readings taken from the movement
    /// collaborator itself.
    pub fn step(&mut self, now: SimTime) {
        let remaining = self.movement.remaining_distance();
        let threshold = self.movement.stopping_distance();
        self.tick(now, remaining, threshold);
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl<M, A> PatrolController<M, A> {
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Index of the waypoint currently being travelled to.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_waypoint(&self) -> Position {
        self.route.get(self.index)
    }

    pub fn action_interval(&self) -> f64 {
        self.action_interval
    }

    pub fn last_action(&self) -> SimTime {
        self.last_action
    }

    pub fn has_authority(&self) -> bool {
        self.has_authority
    }

    pub fn state(&self) -> PatrolState {
        if self.has_authority { PatrolState::Active } else { PatrolState::Dormant }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn movement(&self) -> &M {
        &self.movement
    }

    /// Mutable access for the driver, e.g. to advance a simulated agent.
    pub fn movement_mut(&mut self) -> &mut M {
        &mut self.movement
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub(crate) fn attach(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }
}
