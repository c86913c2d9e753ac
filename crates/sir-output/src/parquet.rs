//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float32Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("generation",       DataType::UInt32,  false),
        Field::new("tick",             DataType::UInt64,  false),
        Field::new("agent_id",         DataType::UInt32,  false),
        Field::new("x",                DataType::Float32, false),
        Field::new("y",                DataType::Float32, false),
        Field::new("state",            DataType::Utf8,    false),
        Field::new("contagion_radius", DataType::Float32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("generation",  DataType::UInt32, false),
        Field::new("tick",        DataType::UInt64, false),
        Field::new("susceptible", DataType::UInt64, false),
        Field::new("infected",    DataType::UInt64, false),
        Field::new("immune",      DataType::UInt64, false),
        Field::new("dead",        DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("agent_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(snap_file, Arc::clone(&snap_schema), Some(snappy_props()))?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut generations = UInt32Builder::new();
        let mut ticks       = UInt64Builder::new();
        let mut agent_ids   = UInt32Builder::new();
        let mut xs          = Float32Builder::new();
        let mut ys          = Float32Builder::new();
        let mut states      = StringBuilder::new();
        let mut radii       = Float32Builder::new();

        for row in rows {
            generations.append_value(row.generation);
            ticks.append_value(row.tick);
            agent_ids.append_value(row.agent_id);
            xs.append_value(row.x);
            ys.append_value(row.y);
            states.append_value(row.state.as_str());
            radii.append_value(row.contagion_radius);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(generations.finish()),
                Arc::new(ticks.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(states.finish()),
                Arc::new(radii.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut generations = UInt32Builder::new();
        let mut ticks       = UInt64Builder::new();
        let mut susceptible = UInt64Builder::new();
        let mut infected    = UInt64Builder::new();
        let mut immune      = UInt64Builder::new();
        let mut dead        = UInt64Builder::new();

        generations.append_value(row.generation);
        ticks.append_value(row.tick);
        susceptible.append_value(row.susceptible);
        infected.append_value(row.infected);
        immune.append_value(row.immune);
        dead.append_value(row.dead);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(generations.finish()),
                Arc::new(ticks.finish()),
                Arc::new(susceptible.finish()),
                Arc::new(infected.finish()),
                Arc::new(immune.finish()),
                Arc::new(dead.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
