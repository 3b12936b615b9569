//! # Verdantia
//!
//! Pheromone-driven route finding over a fixed map of labelled locations,
//! with agents that walk the chosen route in simulated time.
//!
//! Scouts explore candidate routes from a start to a goal. The best route
//! is reinforced with pheromone every tick while all trails evaporate, and
//! a hero walks it once enough scouts have gone ahead.
//!
//! ## Quick Start
//!
//! ```rust
//! use verdantia::prelude::*;
//!
//! // The built-in map, ant colony construction, 60 ticks per second
//! let mut sim = Simulation::verdantia(SimulationConfig::default()).unwrap();
//! sim.run(120, 1.0 / 60.0).unwrap();
//!
//! println!("tick {} after {:.1}s", sim.tick_count(), sim.elapsed_time());
//! if let Some(best) = sim.best_path() {
//!     println!("best route: {best}");
//! }
//! for agent in sim.agent_positions().iter().take(3) {
//!     println!("{:?} at ({:.0}, {:.0})", agent.kind, agent.position.x, agent.position.y);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`verdantia_core`] - Shared types, parameters, errors and the
//!   `RouteGraph` / `PathConstructor` traits
//! - [`verdantia_runtime`] - Graph builder, pheromone field, construction
//!   strategies, selector, stepper and the simulation clock
//!
//! ## Key Concepts
//!
//! | Concept | What It Does |
//! |---------|--------------|
//! | Trail | Pheromone strength on one directed edge |
//! | Evaporation | Every trail shrinks by `rho` each tick |
//! | Deposit | Edges of the best path gain `alpha / distance` each tick |
//! | Round | One pass of building and selecting candidate paths |
//! | Scout | Fast agent walking a candidate path |
//! | Hero | The agent walking the best path once released |
//!
//! ### Construction strategies
//!
//! - **Random permutation** - scouts wander the map in random order; the
//!   most travelled candidate wins
//! - **Ant colony** - each hop is drawn with weight
//!   `trail^alpha * (1/distance)^beta`; the shortest complete tour wins
//!
//! ## Controlling a simulation
//!
//! ```rust
//! use verdantia::prelude::*;
//!
//! let locations = vec![
//!     Location::new("S", "Start", 0.0, 0.0),
//!     Location::new("M", "Middle", 100.0, 0.0),
//!     Location::new("G", "Goal", 150.0, 0.0),
//! ];
//! let mut sim = Simulation::from_config(locations, SimulationConfig::for_route("S", "G")).unwrap();
//!
//! sim.set_rho(0.2).unwrap();
//! assert!(sim.set_rho(1.5).is_err());
//!
//! sim.set_running(false);
//! assert!(sim.tick(0.1).unwrap().is_empty());
//!
//! sim.set_running(true);
//! sim.request_new_round();
//! sim.tick(0.1).unwrap();
//! assert_eq!(sim.rounds(), 2);
//! ```

// Re-export all subcrates
pub use verdantia_core as core;
pub use verdantia_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use verdantia::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use verdantia_core::types::{
        Edge, EdgeKey, Location, LocationId, Path, PheromoneSnapshot, Position, SimulationId,
        Tick,
    };

    // Parameters and policies
    pub use verdantia_core::params::{
        AcoParams, EdgeMode, GatingPolicy, ReplacementPolicy, RoundSchedule, RouteEnds, Strategy,
    };

    // Core traits
    pub use verdantia_core::construct::PathConstructor;
    pub use verdantia_core::topology::RouteGraph;

    // Error types
    pub use verdantia_core::error::{Result, VerdantiaError};

    // Runtime
    pub use verdantia_runtime::export::{snapshot_json, strongest_trails, EdgeTrail};
    pub use verdantia_runtime::map::{verdantia_map, DEFAULT_GOAL, DEFAULT_START};
    pub use verdantia_runtime::selector::{BestPath, PathScore};
    pub use verdantia_runtime::simulation::{
        AgentPosition, Simulation, SimulationConfig, SimulationEvent, SimulationSnapshot,
        SimulationState, SimulationStats,
    };
    pub use verdantia_runtime::stepper::AgentKind;

    // Fixed-rate driver (requires "async" feature)
    #[cfg(feature = "async")]
    pub use verdantia_runtime::async_runtime::TickTimer;
}
