//! Scheduled changes to room membership.

use pt_authority::AuthorityHub;
use pt_core::{PeerId, SimTime};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoomEventKind {
    Join(PeerId),
    Leave(PeerId),
    SetMaster(PeerId),
}

/// A room change applied at the first tick whose time is `>= at`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomEvent {
    pub at:   SimTime,
    pub kind: RoomEventKind,
}

impl RoomEvent {
    pub fn new(at: SimTime, kind: RoomEventKind) -> Self {
        Self { at, kind }
    }

    /// Apply to `hub`, stamping notifications with `now`.
    pub(crate) fn apply(&self, hub: &AuthorityHub, now: SimTime) {
        match self.kind {
            RoomEventKind::Join(peer) => hub.join(peer),
            RoomEventKind::Leave(peer) => {
                hub.peer_left(peer, now);
            }
            RoomEventKind::SetMaster(peer) => {
                hub.set_master(peer, now);
            }
        }
    }
}
