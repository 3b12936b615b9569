//! List the configured map.

use anyhow::{Context, Result};
use colored::Colorize;
use verdantia::prelude::*;
use verdantia::runtime::graph_builder::build as build_graph;

use crate::config::{Config, CONFIG_FILE};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let locations = config.map();
    let ends = &config.simulation;

    println!(
        "{} {} locations, route {} → {}",
        "→".blue(),
        locations.len().to_string().cyan(),
        ends.start.to_string().green(),
        ends.goal.to_string().green()
    );
    println!();

    for loc in &locations {
        let marker = if loc.id == ends.start {
            "start".green().to_string()
        } else if loc.id == ends.goal {
            "goal".green().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<6} {:<28} ({:>6.0}, {:>6.0})  {}",
            loc.id.to_string().cyan(),
            loc.name,
            loc.position.x,
            loc.position.y,
            marker
        );
    }

    let graph = build_graph(&locations, config.simulation.edge_mode, &config.simulation.ends())
        .with_context(|| format!("Invalid map in {CONFIG_FILE}"))?;
    if let Some(nearest) = graph.nearest_neighbor(&ends.start) {
        let distance = match (graph.position(&ends.start), graph.position(&nearest)) {
            (Some(a), Some(b)) => a.distance_to(&b),
            _ => 0.0,
        };
        println!();
        println!(
            "  Nearest to start: {} ({:.1} units, {} connections)",
            nearest.to_string().yellow(),
            distance,
            graph.edge_count() / 2
        );
    }

    Ok(())
}
