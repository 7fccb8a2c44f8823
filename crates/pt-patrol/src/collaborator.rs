//! Capabilities the controller consumes but does not implement.
//!
//! Each trait is a narrow seam onto a host system: a navigation agent, the
//! sensors that report its progress, and a character ability.

use pt_core::Position;

/// Issues navigation commands.
///
/// Completion is asynchronous and unobserved: the controller only learns
/// about progress through a [`DistanceOracle`].
pub trait Movement {
    fn move_to(&mut self, destination: Position);
}

/// Read-only progress toward the most recently commanded destination.
///
/// After a new [`Movement::move_to`], implementations must report the
/// distance to the *new* destination.  The controller re-advances on every
/// tick in which `remaining_distance() < stopping_distance()` holds, so a
/// stale reading repeats the advance.
pub trait DistanceOracle {
    fn remaining_distance(&self) -> f32;
    fn stopping_distance(&self) -> f32;
}

/// Performs a one-shot action such as using an equipped item.
///
/// The request may silently fail to start (cooldown, busy animation, …);
/// there is no feedback channel back to the caller.
pub trait ActionProvider {
    fn try_perform(&mut self);
}

// Borrowed collaborators let the caller keep ownership and inspect them.

impl<T: Movement + ?Sized> Movement for &mut T {
    fn move_to(&mut self, destination: Position) {
        (**self).move_to(destination);
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &mut T {
    fn remaining_distance(&self) -> f32 {
        (**self).remaining_distance()
    }

    fn stopping_distance(&self) -> f32 {
        (**self).stopping_distance()
    }
}

impl<T: ActionProvider + ?Sized> ActionProvider for &mut T {
    fn try_perform(&mut self) {
        (**self).try_perform();
    }
}
