//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 generation       INTEGER NOT NULL,
                 tick             INTEGER NOT NULL,
                 agent_id         INTEGER NOT NULL,
                 x                REAL    NOT NULL,
                 y                REAL    NOT NULL,
                 state            TEXT    NOT NULL,
                 contagion_radius REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 generation  INTEGER NOT NULL,
                 tick        INTEGER NOT NULL,
                 susceptible INTEGER NOT NULL,
                 infected    INTEGER NOT NULL,
                 immune      INTEGER NOT NULL,
                 dead        INTEGER NOT NULL,
                 PRIMARY KEY (generation, tick)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (generation, tick, agent_id, x, y, state, contagion_radius) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.generation,
                    row.tick,
                    row.agent_id,
                    row.x as f64,
                    row.y as f64,
                    row.state.as_str(),
                    row.contagion_radius as f64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (generation, tick, susceptible, infected, immune, dead) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.generation,
                row.tick,
                row.susceptible,
                row.infected,
                row.immune,
                row.dead,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
