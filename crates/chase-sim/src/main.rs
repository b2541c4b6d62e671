use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use chase_sim::config::ScenarioConfig;
use chase_sim::logging::init_logging;
use chase_sim::runner::HuntRunner;

/// Seeded hide-and-seek hunts replayed against the belief tracker.
#[derive(Debug, Parser)]
#[command(
    name = "chase-sim",
    author,
    version,
    about = "Deterministic hide-and-seek hunt harness"
)]
struct Cli {
    /// Path to the YAML scenario file.
    #[arg(short, long, value_name = "FILE", default_value = "scenarios/demo.yaml")]
    config: PathBuf,

    /// Override the RNG seed driving the hider and the seekers.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the turn budget.
    #[arg(long, value_name = "TURNS")]
    turns: Option<usize>,

    /// Override the configured log level.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Exit after validating the scenario (no hunt is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ScenarioConfig::from_path(&cli.config)?;

    if let Some(seed) = cli.seed {
        config.hunt.seed = Some(seed);
    }

    if let Some(turns) = cli.turns {
        config.hunt.turns = turns;
    }

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    config.validate()?;

    if cli.validate_only {
        println!("scenario {} is valid", config.run_id);
        return Ok(());
    }

    init_logging(config.logging.level().unwrap_or(Level::INFO));

    let run_id = config.run_id.clone();
    let runner = HuntRunner::new(config)?;
    let summary = runner.run()?;

    println!("run {run_id}: {} after {} turns", summary.outcome, summary.turns_played);
    println!(
        "frontier {} junction(s), {} tracked in total",
        summary.final_frontier, summary.tracked_locations
    );
    Ok(())
}
