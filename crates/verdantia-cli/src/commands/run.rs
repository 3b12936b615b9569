//! Run the simulation and report the best route.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use verdantia::prelude::*;

use crate::config::Config;

/// Command-line overrides on top of `verdantia.toml`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub seconds: Option<f64>,
    pub strategy: Option<Strategy>,
    pub seed: Option<u64>,
    pub realtime: bool,
}

pub fn run(opts: RunOptions, verbose: bool) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(strategy) = opts.strategy {
        config.simulation.strategy = strategy;
    }
    if let Some(seed) = opts.seed {
        config.simulation.seed = seed;
    }
    let seconds = opts.seconds.unwrap_or(config.run.seconds);
    let ticks = config.run.ticks_for(seconds);

    println!("{} Building route graph...", "→".blue());
    let mut sim = config.build_simulation()?;
    let initial = sim.stats();
    println!(
        "  Loaded: {} locations, {} edges, {:?}",
        initial.locations.to_string().cyan(),
        initial.edges.to_string().cyan(),
        config.simulation.strategy
    );

    println!(
        "{} Running {} ticks ({:.1}s simulated)...",
        "→".blue(),
        ticks.to_string().cyan(),
        seconds
    );

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let report = |events: &[SimulationEvent]| {
        for event in events {
            if let Some(line) = describe(event, verbose) {
                pb.println(line);
            }
        }
        pb.inc(1);
    };

    if opts.realtime {
        let rate = config.run.ticks_per_second;
        let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
        runtime.block_on(async {
            let mut timer = TickTimer::new(rate);
            timer
                .run_with_callback(&mut sim, ticks, |_, events| {
                    report(events);
                    true
                })
                .await
        })?;
    } else {
        let dt = config.run.dt();
        for _ in 0..ticks {
            let events = sim.tick(dt)?;
            report(&events);
        }
    }
    pb.finish_and_clear();

    let stats = sim.stats();
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!(
        "  Time: {:.2}s over {} ticks, {} rounds",
        stats.elapsed,
        stats.tick.to_string().cyan(),
        stats.rounds.to_string().cyan()
    );

    match sim.best() {
        Some(best) => {
            println!("  Best route: {}", best.path.to_string().green());
            println!(
                "  Length: {:.1} units ({}, round {})",
                best.length,
                describe_score(&best.score),
                best.round
            );
        }
        None => println!("  {} No route reached the goal", "•".yellow()),
    }

    let hero = if stats.hero_arrived {
        "arrived".green()
    } else if stats.hero_released {
        "en route".yellow()
    } else {
        "waiting".yellow()
    };
    println!(
        "  Hero: {} (scouts finished: {}/{})",
        hero, stats.scouts_finished, stats.scouts
    );
    println!(
        "  Trail: min {:.4}, mean {:.4}, max {:.4}",
        stats.trail_min, stats.trail_mean, stats.trail_max
    );

    let top = strongest_trails(&sim, config.run.top_trails);
    if !top.is_empty() {
        println!();
        println!("{} Strongest trails:", "→".blue());
        for (i, edge) in top.iter().enumerate() {
            println!(
                "  {}. {} → {}  {:.4} ({:.0}%)",
                i + 1,
                edge.from.to_string().cyan(),
                edge.to.to_string().cyan(),
                edge.trail,
                edge.intensity * 100.0
            );
        }
    }

    Ok(())
}

/// One progress line per notable event; round details only when verbose.
fn describe(event: &SimulationEvent, verbose: bool) -> Option<String> {
    match event {
        SimulationEvent::BestPathReplaced { round, path, score } => Some(format!(
            "  {} Round {}: new best {} ({})",
            "✓".green(),
            round,
            path,
            describe_score(score)
        )),
        SimulationEvent::HeroReleased { tick } => {
            Some(format!("  {} Hero released at tick {}", "→".blue(), tick))
        }
        SimulationEvent::HeroArrived { tick } => {
            Some(format!("  {} Hero arrived at tick {}", "✓".green(), tick))
        }
        SimulationEvent::NoCandidate { round } if verbose => Some(format!(
            "  {} Round {}: no candidate reached the goal",
            "•".yellow(),
            round
        )),
        SimulationEvent::BestPathKept { round, challenger } if verbose => Some(format!(
            "  {} Round {}: kept best over {}",
            "•".yellow(),
            round,
            describe_score(challenger)
        )),
        SimulationEvent::RoundCompleted { round, built, valid } if verbose => Some(format!(
            "  Round {}: {} built, {} valid",
            round, built, valid
        )),
        _ => None,
    }
}

fn describe_score(score: &PathScore) -> String {
    match score {
        PathScore::Traffic(crossings) => format!("{crossings} scout crossings"),
        PathScore::Length(length) => format!("length {length:.1}"),
    }
}
