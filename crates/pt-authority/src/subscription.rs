//! Scoped registration with an [`AuthorityHub`][crate::AuthorityHub].

use std::sync::{Mutex, PoisonError, Weak};

use crossbeam_channel::Receiver;
use pt_core::{AgentId, SubscriptionId};
use tracing::trace;

use crate::AuthorityEvent;
use crate::hub::HubState;

/// An agent's inbox of authority notifications.
///
/// Dropping the subscription unregisters it from the hub, on every exit
/// path, so no notification can target an agent that no longer exists.  The
/// subscription only holds a weak reference: it never keeps a hub alive, and
/// outliving the hub is harmless.
pub struct Subscription {
    id:       SubscriptionId,
    agent:    AgentId,
    receiver: Receiver<AuthorityEvent>,
    hub:      Weak<Mutex<HubState>>,
}

impl Subscription {
    pub(crate) fn new(
        id:       SubscriptionId,
        agent:    AgentId,
        receiver: Receiver<AuthorityEvent>,
        hub:      Weak<Mutex<HubState>>,
    ) -> Self {
        Self { id, agent, receiver, hub }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Take every event queued since the last call, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = AuthorityEvent> + '_ {
        self.receiver.try_iter()
    }

    /// `true` while the hub this subscription came from still exists.
    pub fn is_attached(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut state = hub.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(regs) = state.subscribers.get_mut(&self.agent) {
            regs.retain(|r| r.id != self.id);
            if regs.is_empty() {
                state.subscribers.remove(&self.agent);
            }
        }
        trace!(agent = %self.agent, subscription = self.id.0, "authority subscription released");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("agent", &self.agent)
            .field("pending", &self.receiver.len())
            .finish()
    }
}
