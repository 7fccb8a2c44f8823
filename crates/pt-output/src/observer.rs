//! `WorldOutputObserver<W>` — bridges `WorldObserver` to an `OutputWriter`.

use pt_core::SimTime;
use pt_patrol::PatrolState;
use pt_sim::{AgentSnapshot, WorldObserver};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`WorldObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Observer callbacks cannot fail, so the first writer error is stored and
/// later writes are still attempted.  After `world.run()` returns, check
/// with [`take_error`][Self::take_error].
pub struct WorldOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> WorldOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> WorldObserver for WorldOutputObserver<W> {
    fn on_tick_end(&mut self, tick: u64, now: SimTime, active: usize) {
        let row = TickSummaryRow {
            tick,
            time_secs:     now.secs(),
            active_agents: active as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, now: SimTime, agents: &[AgentSnapshot]) {
        if agents.is_empty() {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id:  a.agent.0,
                time_secs: now.secs(),
                x:         a.position.x,
                y:         a.position.y,
                z:         a.position.z,
                waypoint:  a.waypoint as u32,
                active:    a.state == PatrolState::Active,
                actions:   a.actions_performed,
            })
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_time: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
