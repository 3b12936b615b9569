//! Verdantia Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use verdantia_core::prelude::*;
//! ```

pub use crate::types::{
    guard_distance, Edge, EdgeKey, Location, LocationId, Path, PheromoneSnapshot, Position,
    SimulationId, Tick, MIN_DISTANCE,
};

pub use crate::params::{
    AcoParams, ConstructionParams, EdgeMode, GatingPolicy, ReplacementPolicy, RouteEnds,
    RoundSchedule, Strategy,
};

pub use crate::topology::RouteGraph;

pub use crate::construct::PathConstructor;

pub use crate::error::{ConfigError, GraphError, Result, VerdantiaError};
