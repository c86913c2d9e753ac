//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// The observer never propagates these errors; it stores the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
