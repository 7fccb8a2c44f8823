//! Run configuration.
//!
//! Applications typically keep a JSON file next to the route CSV and load it
//! with [`WorldConfig::from_json_file`].  Every `PatrolSettings` field has a
//! default so a config only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{PtError, PtResult, SimClock, SimTime};

// ── PatrolSettings ────────────────────────────────────────────────────────────

/// Per-agent patrol tuning shared by every agent in a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolSettings {
    /// Minimum seconds between periodic action requests.
    pub action_interval_secs: f64,

    /// Movement speed of the stand-in navigation agent, units per second.
    pub speed: f32,

    /// Distance under which a waypoint counts as reached.
    pub stopping_distance: f32,

    /// How long one action keeps the ability busy, in seconds.
    pub action_duration_secs: f64,

    /// Probability that an action request silently fails to start.
    pub action_failure_chance: f64,
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            action_interval_secs:  5.0,
            speed:                 3.5,
            stopping_distance:     0.5,
            action_duration_secs:  1.0,
            action_failure_chance: 0.0,
        }
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Seconds per tick (the fixed frame delta).
    pub tick_duration_secs: f64,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Snapshot every N ticks.  0 disables snapshots.
    #[serde(default)]
    pub output_interval_ticks: u64,

    #[serde(default)]
    pub patrol: PatrolSettings,
}

impl WorldConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> PtResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_json_file(path: &Path) -> PtResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the tick loop or the controllers cannot run with.
    pub fn validate(&self) -> PtResult<()> {
        if !(self.tick_duration_secs.is_finite() && self.tick_duration_secs > 0.0) {
            return Err(PtError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        let p = &self.patrol;
        if !(p.action_interval_secs.is_finite() && p.action_interval_secs > 0.0) {
            return Err(PtError::Config(format!(
                "action_interval_secs must be positive, got {}",
                p.action_interval_secs
            )));
        }
        if !(p.speed.is_finite() && p.speed >= 0.0) {
            return Err(PtError::Config(format!("speed must be non-negative, got {}", p.speed)));
        }
        if !(p.stopping_distance.is_finite() && p.stopping_distance >= 0.0) {
            return Err(PtError::Config(format!(
                "stopping_distance must be non-negative, got {}",
                p.stopping_distance
            )));
        }
        if !(0.0..=1.0).contains(&p.action_failure_chance) {
            return Err(PtError::Config(format!(
                "action_failure_chance must be within [0, 1], got {}",
                p.action_failure_chance
            )));
        }
        Ok(())
    }

    /// Time at which the run ends (exclusive).
    #[inline]
    pub fn end_time(&self) -> SimTime {
        SimTime(self.total_ticks as f64 * self.tick_duration_secs)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
