//! CSV route loader.
//!
//! # CSV format
//!
//! One row per waypoint, in patrol order.
//!
//! ```csv
//! x,y,z
//! 0.0,0.0,0.0
//! 12.5,0.0,4.0
//! 12.5,0.0,-8.0
//! ```
//!
//! Extra columns are ignored, so a route can be exported straight from a
//! level editor that writes additional metadata.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use pt_core::Position;

use crate::{PatrolError, PatrolResult, Route};

#[derive(Deserialize)]
struct WaypointRecord {
    x: f32,
    y: f32,
    z: f32,
}

/// Load a [`Route`] from a CSV file.
///
/// Fails with [`PatrolError::Config`] if the file holds no waypoints.
pub fn load_route_csv(path: &Path) -> PatrolResult<Route> {
    let file = std::fs::File::open(path)?;
    load_route_reader(file)
}

/// Like [`load_route_csv`] but accepts any `Read` source.
pub fn load_route_reader<R: Read>(reader: R) -> PatrolResult<Route> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let waypoints: Vec<Position> = csv_reader
        .deserialize::<WaypointRecord>()
        .enumerate()
        .map(|(row, result)| {
            let r = result.map_err(|e| PatrolError::Parse(format!("waypoint {row}: {e}")))?;
            if !(r.x.is_finite() && r.y.is_finite() && r.z.is_finite()) {
                return Err(PatrolError::Parse(format!("waypoint {row}: non-finite coordinate")));
            }
            Ok(Position::new(r.x, r.y, r.z))
        })
        .collect::<PatrolResult<_>>()?;

    Route::new(waypoints)
}
