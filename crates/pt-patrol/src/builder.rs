//! Fluent builder for constructing a [`PatrolController`].

use std::sync::Arc;

use pt_authority::AuthorityHub;
use pt_core::{AgentId, PatrolSettings, Position, SimTime};

use crate::{ActionProvider, Movement, PatrolController, PatrolResult};

/// Fluent builder for [`PatrolController<M, A>`].
///
/// # Required inputs
///
/// - `AgentId` and the waypoints (any `Into<Arc<[Position]>>`, including a
///   [`Route`][crate::Route] to share storage with other agents)
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                         |
/// |------------------------|-------------------------------------------------|
/// | `.action_interval(s)`  | 5 s                                             |
/// | `.settings(&p)`        | takes `action_interval_secs` from `PatrolSettings` |
/// | `.authority(hub)`      | none — authority comes from `.has_authority(b)` |
/// | `.has_authority(b)`    | `false`                                         |
///
/// With `.authority(hub)` the initial flag is read from the hub and the
/// controller subscribes to the agent's notifications.
///
/// # Example
///
/// ```rust,ignore
/// let controller = PatrolBuilder::new(AgentId(0), route.clone())
///     .action_interval(5.0)
///     .authority(&hub)
///     .build(clock.now(), nav_agent, ability)?;
/// ```
pub struct PatrolBuilder {
    agent:           AgentId,
    waypoints:       Arc<[Position]>,
    action_interval: f64,
    hub:             Option<AuthorityHub>,
    has_authority:   bool,
}

impl PatrolBuilder {
    pub fn new(agent: AgentId, waypoints: impl Into<Arc<[Position]>>) -> Self {
        Self {
            agent,
            waypoints:       waypoints.into(),
            action_interval: PatrolSettings::default().action_interval_secs,
            hub:             None,
            has_authority:   false,
        }
    }

    /// Minimum seconds between periodic action requests.
    pub fn action_interval(mut self, secs: f64) -> Self {
        self.action_interval = secs;
        self
    }

    /// Take the tuning that applies to the controller from `settings`.
    pub fn settings(self, settings: &PatrolSettings) -> Self {
        self.action_interval(settings.action_interval_secs)
    }

    /// Read authority from `hub` and subscribe to its notifications.
    pub fn authority(mut self, hub: &AuthorityHub) -> Self {
        self.hub = Some(hub.clone());
        self
    }

    /// Fixed initial authority for controllers without a hub.
    ///
    /// Ignored when [`authority`][Self::authority] is set.
    pub fn has_authority(mut self, has_authority: bool) -> Self {
        self.has_authority = has_authority;
        self
    }

    /// Validate inputs and return an initialized controller.
    ///
    /// See [`PatrolController::initialize`] for the failure cases.  A failed
    /// build never leaves a subscription behind.
    pub fn build<M: Movement, A: ActionProvider>(
        self,
        now:      SimTime,
        movement: M,
        actions:  A,
    ) -> PatrolResult<PatrolController<M, A>> {
        let has_authority = match &self.hub {
            Some(hub) => hub.has_authority(),
            None => self.has_authority,
        };
        let mut controller = PatrolController::initialize(
            self.agent,
            self.waypoints,
            self.action_interval,
            has_authority,
            now,
            movement,
            actions,
        )?;
        if let Some(hub) = &self.hub {
            controller.attach(hub.subscribe(self.agent));
        }
        Ok(controller)
    }
}
