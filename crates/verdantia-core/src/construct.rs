//! Path construction seam.
//!
//! A constructor walks the route graph from the start to the goal and either
//! returns a finished path or gives up. Giving up is an expected outcome on
//! sparse or adversarial graphs and is reported as `None`, never as an error.

use crate::params::ConstructionParams;
use crate::topology::RouteGraph;
use crate::types::{Path, PheromoneSnapshot};
use rand::RngCore;

/// A pluggable strategy that builds one candidate path.
///
/// Implementations must only read the pheromone snapshot they are handed so
/// that every candidate of a round sees the same field, and must terminate
/// within `params.max_steps` steps.
pub trait PathConstructor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Build one candidate path, or `None` if the goal was not reached.
    fn construct(
        &self,
        graph: &dyn RouteGraph,
        pheromones: &PheromoneSnapshot,
        params: &ConstructionParams,
        rng: &mut dyn RngCore,
    ) -> Option<Path>;
}
