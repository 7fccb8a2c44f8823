//! Simulation time model.
//!
//! # Design
//!
//! Controllers reason in continuous seconds (`SimTime`) because action
//! intervals and engine frame times are fractional.  The driver advances a
//! fixed-timestep `SimClock` whose canonical state is an integer tick count:
//!
//!   now = tick_count * tick_duration_secs
//!
//! Deriving `now` from the tick count (instead of summing `dt` every frame)
//! keeps long runs free of accumulated floating-point drift.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A point on the simulation timeline, in seconds since start.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-timestep clock.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    /// Seconds one tick represents (the frame delta).
    pub tick_duration_secs: f64,
    /// Ticks elapsed since start — advanced by `SimClock::advance()`.
    pub tick_count: u64,
}

impl SimClock {
    pub fn new(tick_duration_secs: f64) -> Self {
        Self { tick_duration_secs, tick_count: 0 }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.tick_count += 1;
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> SimTime {
        SimTime(self.tick_count as f64 * self.tick_duration_secs)
    }

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.tick_duration_secs).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {} ({})", self.tick_count, self.now())
    }
}
