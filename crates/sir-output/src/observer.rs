//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sir_core::Tick;
use sir_sim::{AgentView, Census, SimObserver};
use tracing::warn;

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and the per-tick epidemic
/// curve to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  Rows carry the restart generation, so
/// one writer can record several runs of the same `Sim`.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    generation: u32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, generation: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        let row = TickSummaryRow::from_census(self.generation, tick, census);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentView]) {
        if agents.is_empty() {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|view| AgentSnapshotRow::from_view(self.generation, tick, view))
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_reset(&mut self, generation: u32, _census: &Census) {
        self.generation = generation;
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _census: &Census) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
