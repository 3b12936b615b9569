//! Export a simulation snapshot as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use verdantia::prelude::*;

use crate::config::Config;

pub fn run(output: &str, seconds: Option<f64>) -> Result<()> {
    let config = Config::load()?;
    let seconds = seconds.unwrap_or(config.run.seconds);
    let ticks = config.run.ticks_for(seconds);

    println!(
        "{} Simulating {:.1}s before export...",
        "→".blue(),
        seconds
    );
    let mut sim = config.build_simulation()?;
    sim.run(ticks, config.run.dt())?;

    let json = snapshot_json(&sim).context("Failed to serialize snapshot")?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {output}"))?;

    let stats = sim.stats();
    println!(
        "{} Exported to {} ({} locations, {} edges, tick {})",
        "✓".green().bold(),
        output.cyan(),
        stats.locations,
        stats.edges,
        stats.tick
    );

    Ok(())
}
