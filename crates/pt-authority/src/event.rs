//! Authority-change notifications.

use pt_core::{PeerId, SimTime};

/// Why an [`AuthorityEvent`] was sent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthorityCause {
    /// A peer left the room; the master may have migrated.
    PeerLeft(PeerId),
    /// The master role was handed to this peer explicitly.
    MasterSwitched(PeerId),
    /// Sent to one agent directly through [`AuthorityHub::notify`][crate::AuthorityHub::notify].
    Direct,
}

/// "Control of shared state may have moved" — with the local verdict.
///
/// `has_authority` is evaluated by the hub when the event is sent, so a
/// subscriber never has to query the hub again to react.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AuthorityEvent {
    pub has_authority: bool,
    pub at:            SimTime,
    pub cause:         AuthorityCause,
}
