//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! Headers are written up front so a run that produces no rows still leaves
//! well-formed files behind.  Rows are serialized with serde; booleans are
//! written as `true` / `false`.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 8] =
    ["agent_id", "time_secs", "x", "y", "z", "waypoint", "active", "actions"];

pub const SUMMARY_HEADER: [&str; 3] = ["tick", "time_secs", "active_agents"];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

fn open(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    Ok(writer)
}

impl CsvWriter {
    /// Create both files in `dir`, which must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            snapshots: open(&dir.join("agent_snapshots.csv"), &SNAPSHOT_HEADER)?,
            summaries: open(&dir.join("tick_summaries.csv"), &SUMMARY_HEADER)?,
            finished:  false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.serialize(row)?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if std::mem::replace(&mut self.finished, true) {
            return Ok(());
        }
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
