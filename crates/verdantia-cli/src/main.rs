//! Verdantia CLI - run pheromone route simulations from the terminal.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use verdantia::prelude::Strategy;

#[derive(Parser)]
#[command(name = "verdantia")]
#[command(author, version, about = "Verdantia - Pheromone route finding over a labelled map", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default verdantia.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List the map's locations
    Locations,

    /// Run the simulation and report the best route
    Run {
        /// Simulated seconds (default: from config)
        #[arg(short, long)]
        seconds: Option<f64>,

        /// Override the construction strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Pace ticks against the wall clock
        #[arg(long)]
        realtime: bool,
    },

    /// Run the simulation and write a JSON snapshot
    Export {
        /// Output file path
        output: String,

        /// Simulated seconds before the snapshot (default: from config)
        #[arg(short, long)]
        seconds: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Random permutations ranked by scout traffic
    Permutation,
    /// Ant colony construction ranked by length
    Ant,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Permutation => Strategy::RandomPermutation,
            StrategyArg::Ant => Strategy::AntColony,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Locations => commands::locations::run(),
        Commands::Run {
            seconds,
            strategy,
            seed,
            realtime,
        } => commands::run::run(
            commands::run::RunOptions {
                seconds,
                strategy: strategy.map(Strategy::from),
                seed,
                realtime,
            },
            cli.verbose,
        ),
        Commands::Export { output, seconds } => commands::export::run(&output, seconds),
    }
}
