//! Straight-line stand-in for a navigation-mesh agent.

use pt_core::Position;
use pt_patrol::{DistanceOracle, Movement};

/// Moves in a straight line toward the last commanded destination.
///
/// There is no path planning and no obstacle avoidance; the agent is just
/// enough of a navigation agent to give the patrol controller realistic
/// distance readings.  With no destination, the remaining distance is 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NavAgent {
    pub position:          Position,
    pub destination:       Option<Position>,
    /// Units per second.
    pub speed:             f32,
    pub stopping_distance: f32,
    /// Number of `move_to` commands received.
    pub commands:          u64,
}

impl NavAgent {
    pub fn new(position: Position, speed: f32, stopping_distance: f32) -> Self {
        Self { position, destination: None, speed, stopping_distance, commands: 0 }
    }

    /// Move for `dt` seconds toward the destination.
    pub fn advance(&mut self, dt: f64) {
        if let Some(dest) = self.destination {
            self.position = self.position.step_towards(dest, self.speed * dt as f32);
        }
    }

    /// `true` once within stopping distance of the destination.
    pub fn has_arrived(&self) -> bool {
        self.remaining_distance() < self.stopping_distance
    }
}

impl Movement for NavAgent {
    fn move_to(&mut self, destination: Position) {
        self.destination = Some(destination);
        self.commands += 1;
    }
}

impl DistanceOracle for NavAgent {
    fn remaining_distance(&self) -> f32 {
        self.destination.map_or(0.0, |d| self.position.distance(d))
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }
}
