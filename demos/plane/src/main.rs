//! plane — headless run of the SIR(D) plane simulation.
//!
//! Spawns the default 250 agents on a 900 × 600 plane, runs until the
//! epidemic burns out (or the tick budget runs out), and writes the
//! epidemic curve plus periodic agent snapshots to `output/plane/`.
//!
//! ```text
//! cargo run -p plane --release                 # default configuration
//! cargo run -p plane --release -- config.json  # any Configuration fields
//! RUST_LOG=sir_sim=debug cargo run -p plane
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sir_agent::HealthState;
use sir_core::{Configuration, RunConfig, Tick};
use sir_output::{CsvWriter, OutputWriter, SimOutputObserver};
use sir_sim::{AgentView, Census, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_TICKS:           u64 = 20_000;
const OUTPUT_INTERVAL_TICKS: u64 = 60;  // one snapshot per second at 60 fps
const CURVE_PRINT_INTERVAL:  u64 = 500;
const OUTPUT_DIR:            &str = "output/plane";

// ── Observer wrapper that prints the curve ────────────────────────────────────

struct CurvePrinter<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    peak:          (Tick, usize),
}

impl<W: OutputWriter> CurvePrinter<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak: (Tick::ZERO, 0) }
    }
}

impl<W: OutputWriter> SimObserver for CurvePrinter<W> {
    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        self.summary_rows += 1;
        if census.infected > self.peak.1 {
            self.peak = (tick, census.infected);
        }
        if tick.0.is_multiple_of(CURVE_PRINT_INTERVAL) {
            println!("{tick:>8}  {census}");
        }
        self.inner.on_tick_end(tick, census);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentView]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick, census: &Census) {
        self.inner.on_sim_end(final_tick, census);
    }
}

fn load_config(path: Option<String>) -> Result<Configuration> {
    let Some(path) = path else {
        return Ok(Configuration::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let config = load_config(std::env::args().nth(1))?;
    let run = RunConfig {
        total_ticks:           TOTAL_TICKS,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };

    println!("=== plane — SIR(D) agent simulation ===");
    println!(
        "Agents: {}  |  Initially infected: {}  |  Chance: {}/500  |  Seed: {SEED}",
        config.population_size, config.initial_infected, config.infection_chance
    );
    println!();

    let mut sim = SimBuilder::new(config).run_config(run).build()?;
    info!(agents = sim.population.len(), "simulation built");

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CurvePrinter::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let stopped = sim.run_until_settled(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Stopped at {stopped} after {:.3} s", elapsed.as_secs_f64());
    println!("Peak infections: {} at {}", obs.peak.1, obs.peak.0);
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();

    let census = sim.census();
    println!("{:<12} {:>6} {:>7}", "State", "Agents", "Share");
    println!("{}", "-".repeat(27));
    for state in HealthState::ALL {
        let n = census.count(state);
        let share = if census.total() == 0 { 0.0 } else { 100.0 * n as f64 / census.total() as f64 };
        println!("{:<12} {:>6} {:>6.1}%", state.as_str(), n, share);
    }

    Ok(())
}
