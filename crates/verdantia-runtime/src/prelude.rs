//! Verdantia Runtime Prelude - convenient imports for common usage.
//!
//! ```rust
//! use verdantia_runtime::prelude::*;
//! ```

// Re-export the simulation
pub use crate::simulation::{
    AgentPosition, Simulation, SimulationConfig, SimulationEvent, SimulationSnapshot,
    SimulationState, SimulationStats,
};

// Re-export engine components
pub use crate::construct::{constructor_for, construct_round, AntColony, RandomPermutation};
pub use crate::export::{edge_trails, snapshot_json, strongest_trails, EdgeTrail};
pub use crate::graph_builder::build as build_graph;
pub use crate::pheromone::PheromoneField;
pub use crate::selector::{BestPath, PathScore, PathSelector};
pub use crate::stepper::{Agent, AgentKind};
pub use crate::topology_impl::PetRouteGraph;

// Re-export the built-in map
pub use crate::map::{default_ends, verdantia_map, DEFAULT_GOAL, DEFAULT_START};

// Re-export async runtime when feature is enabled
#[cfg(feature = "async")]
pub use crate::async_runtime::TickTimer;

// Re-export from core
pub use verdantia_core::prelude::*;
