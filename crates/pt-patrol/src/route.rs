//! Circular waypoint sequence.

use std::sync::Arc;

use pt_core::Position;

use crate::{PatrolError, PatrolResult};

/// An ordered, non-empty, immutable list of waypoints.
///
/// Indices wrap modulo the length.  Cloning shares the underlying storage,
/// so any number of agents can patrol the same route without copying it.
#[derive(Clone, Debug, PartialEq)]
pub struct Route(Arc<[Position]>);

impl Route {
    /// Fails with [`PatrolError::Config`] if `waypoints` is empty.
    pub fn new(waypoints: impl Into<Arc<[Position]>>) -> PatrolResult<Self> {
        let waypoints = waypoints.into();
        if waypoints.is_empty() {
            return Err(PatrolError::Config("waypoint sequence is empty".into()));
        }
        Ok(Self(waypoints))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Waypoint at `index`, wrapping around the end.
    #[inline]
    pub fn get(&self, index: usize) -> Position {
        self.0[index % self.0.len()]
    }

    /// The index that follows `index` in patrol order.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.0.len()
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.0
    }

    /// `true` if both routes point at the same storage.
    pub fn shares_storage(&self, other: &Route) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Route> for Arc<[Position]> {
    fn from(route: Route) -> Self {
        route.0
    }
}
