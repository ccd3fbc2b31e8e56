//! # QuadPath
//!
//! Runs a path-planning scenario headless and reports how many agents reached
//! their targets.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quadpath_engine::{populate::populate, Scenario, Simulation};
use quadpath_world::{SimConfig, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Headless region-quadtree path-planning simulation.
#[derive(Parser, Debug)]
#[command(name = "quadpath", version)]
#[command(about = "Simulates agents planning paths over a region quadtree")]
struct Args {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Number of ticks to run (default: from config).
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Scenario to populate.
    #[arg(short, long, value_enum, default_value_t = Scenario::Corridor)]
    scenario: Scenario,

    /// Write the effective configuration back to the config path.
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("quadpath=info".parse()?))
        .init();

    let args = Args::parse();

    info!("QuadPath starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;
    if args.save_config {
        config
            .save_to(&args.config)
            .with_context(|| format!("Failed to save config: {}", args.config.display()))?;
    }

    let ticks = args.ticks.unwrap_or(config.ticks);
    info!(
        "Running {:?} for {} ticks in a {} x {} world (min cell {})",
        args.scenario, ticks, config.world_width, config.world_height, config.min_cell_size
    );

    let setup = populate(args.scenario, &config);
    let mut sim = Simulation::new(config, setup);
    let summary = sim.run(ticks);

    info!("Finished: {summary}");
    Ok(())
}
