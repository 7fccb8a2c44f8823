//! The room as seen from the local process.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;
use pt_core::{AgentId, PeerId, SimTime, SubscriptionId};
use tracing::{info, trace, warn};

use crate::{AuthorityCause, AuthorityEvent, Subscription};

#[cfg(feature = "fx-hash")]
pub(crate) type RegistryMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type RegistryMap<K, V> = std::collections::HashMap<K, V>;

pub(crate) struct Registration {
    pub(crate) id:     SubscriptionId,
    pub(crate) sender: Sender<AuthorityEvent>,
}

pub(crate) struct HubState {
    local:             PeerId,
    /// Ordered so the lowest actor number is the fallback master.
    peers:             BTreeSet<PeerId>,
    master:            Option<PeerId>,
    next_subscription: u64,
    pub(crate) subscribers: RegistryMap<AgentId, Vec<Registration>>,
}

impl HubState {
    fn has_authority(&self) -> bool {
        self.master == Some(self.local)
    }

    /// Send `event` to every registration in `regs`, dropping dead senders.
    fn deliver(regs: &mut Vec<Registration>, event: AuthorityEvent) {
        regs.retain(|r| r.sender.send(event).is_ok());
    }

    fn broadcast(&mut self, at: SimTime, cause: AuthorityCause) -> usize {
        let event = AuthorityEvent { has_authority: self.has_authority(), at, cause };
        let mut delivered = 0;
        for regs in self.subscribers.values_mut() {
            Self::deliver(regs, event);
            delivered += regs.len();
        }
        self.subscribers.retain(|_, regs| !regs.is_empty());
        delivered
    }
}

/// Shared handle to the local view of a networked room.
///
/// Cloning is cheap; all clones observe the same room.  The hub tracks which
/// peers are present and which of them is master, and fans authority changes
/// out to per-agent [`Subscription`]s.
///
/// # Master fallback
///
/// When the master leaves, the peer with the lowest [`PeerId`] still in the
/// room takes over, mirroring how relay-based room services migrate the
/// master client.
#[derive(Clone)]
pub struct AuthorityHub {
    state: Arc<Mutex<HubState>>,
}

impl AuthorityHub {
    /// A room containing only `local`, which is therefore master.
    pub fn new(local: PeerId) -> Self {
        let mut peers = BTreeSet::new();
        peers.insert(local);
        Self {
            state: Arc::new(Mutex::new(HubState {
                local,
                peers,
                master: Some(local),
                next_subscription: 0,
                subscribers: RegistryMap::default(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Room membership ───────────────────────────────────────────────────

    pub fn local_peer(&self) -> PeerId {
        self.lock().local
    }

    /// Peers currently in the room, in ascending order.
    pub fn peers(&self) -> Vec<PeerId> {
        self.lock().peers.iter().copied().collect()
    }

    pub fn master(&self) -> Option<PeerId> {
        self.lock().master
    }

    /// `true` when the local process is master and may drive shared agents.
    pub fn has_authority(&self) -> bool {
        self.lock().has_authority()
    }

    /// Add `peer` to the room.  Joining never changes the master unless the
    /// room had none.
    pub fn join(&self, peer: PeerId) {
        let mut state = self.lock();
        if !state.peers.insert(peer) {
            return;
        }
        if state.master.is_none() {
            state.master = Some(peer);
            info!(%peer, "peer joined an empty room and became master");
        } else {
            trace!(%peer, "peer joined");
        }
    }

    /// Remove `peer` from the room and notify every subscriber.
    ///
    /// If `peer` was master, the lowest remaining peer is elected.  Every
    /// subscription receives an event even when the master did not change;
    /// subscribers decide what a repeated verdict means for them.
    ///
    /// Returns the number of subscriptions notified.
    pub fn peer_left(&self, peer: PeerId, now: SimTime) -> usize {
        let mut state = self.lock();
        if !state.peers.remove(&peer) {
            warn!(%peer, "ignoring departure of a peer that is not in the room");
            return 0;
        }
        if state.master == Some(peer) {
            state.master = state.peers.iter().next().copied();
            info!(
                left = %peer,
                master = ?state.master,
                local_has_authority = state.has_authority(),
                "master left the room; elected fallback"
            );
        }
        state.broadcast(now, AuthorityCause::PeerLeft(peer))
    }

    /// Hand the master role to `peer` and notify every subscriber.
    ///
    /// Returns the number of subscriptions notified, or `None` if `peer` is
    /// not in the room (the master is left unchanged).
    pub fn set_master(&self, peer: PeerId, now: SimTime) -> Option<usize> {
        let mut state = self.lock();
        if !state.peers.contains(&peer) {
            warn!(%peer, "cannot hand master to a peer that is not in the room");
            return None;
        }
        state.master = Some(peer);
        info!(master = %peer, local_has_authority = state.has_authority(), "master switched");
        Some(state.broadcast(now, AuthorityCause::MasterSwitched(peer)))
    }

    // ── Subscriptions ─────────────────────────────────────────────────────

    /// Register for authority notifications about `agent`.
    ///
    /// The registration lives exactly as long as the returned
    /// [`Subscription`].
    pub fn subscribe(&self, agent: AgentId) -> Subscription {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut state = self.lock();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.subscribers.entry(agent).or_default().push(Registration { id, sender });
        trace!(%agent, subscription = id.0, "authority subscription registered");
        Subscription::new(id, agent, receiver, Arc::downgrade(&self.state))
    }

    /// Send one event to the subscriptions of `agent` only.
    ///
    /// Returns the number of subscriptions notified.
    pub fn notify(&self, agent: AgentId, has_authority: bool, now: SimTime) -> usize {
        let mut state = self.lock();
        let event = AuthorityEvent { has_authority, at: now, cause: AuthorityCause::Direct };
        let Some(regs) = state.subscribers.get_mut(&agent) else {
            return 0;
        };
        HubState::deliver(regs, event);
        let delivered = regs.len();
        if delivered == 0 {
            state.subscribers.remove(&agent);
        }
        delivered
    }

    /// Total live subscriptions across all agents.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.values().map(Vec::len).sum()
    }
}

impl std::fmt::Debug for AuthorityHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("AuthorityHub")
            .field("local", &state.local)
            .field("peers", &state.peers)
            .field("master", &state.master)
            .finish_non_exhaustive()
    }
}
