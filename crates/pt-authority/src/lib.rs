//! `pt-authority` — who is allowed to drive shared agents.
//!
//! In a peer-to-peer room exactly one peer, the *master*, simulates shared
//! agents; every other peer only replicates them.  This crate models that
//! role as an injected object instead of an ambient global query.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`hub`]          | `AuthorityHub` — room membership, master election, fan-out |
//! | [`subscription`] | `Subscription` — per-agent event inbox, unregisters on drop |
//! | [`event`]        | `AuthorityEvent`, `AuthorityCause`                          |
//!
//! # Delivery model
//!
//! Notifications are queued on a per-subscription channel at the moment the
//! room changes and drained by the subscriber on its next tick.  Nothing is
//! invoked re-entrantly, so a subscriber never observes an authority change
//! in the middle of its own update.

pub mod event;
pub mod hub;
pub mod subscription;


pub use event::{AuthorityCause, AuthorityEvent};
pub use hub::AuthorityHub;
pub use subscription::Subscription;
