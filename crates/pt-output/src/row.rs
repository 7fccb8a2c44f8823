//! Plain data row types written by output backends.
//!
//! Field order is column order.

use serde::Serialize;

/// One agent's patrol state at a snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentSnapshotRow {
    pub agent_id:  u32,
    pub time_secs: f64,
    pub x:         f32,
    pub y:         f32,
    pub z:         f32,
    /// Index of the waypoint being travelled to.
    pub waypoint:  u32,
    pub active:    bool,
    /// Actions performed so far (refused requests excluded).
    pub actions:   u64,
}

/// Summary for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_secs:     f64,
    pub active_agents: u64,
}
