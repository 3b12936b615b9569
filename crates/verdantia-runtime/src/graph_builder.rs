//! Graph Builder - turns a location list into a route graph.
//!
//! Two modes:
//! - **Complete**: every unordered pair is connected (both directions).
//! - **Sparse**: a seeded random spanning tree keeps every location,
//!   the goal included, reachable; further random pairs are added until
//!   the requested connection count is met.

use crate::topology_impl::PetRouteGraph;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use verdantia_core::error::{GraphError, Result};
use verdantia_core::params::{EdgeMode, RouteEnds};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Minimum number of undirected connections a sparse graph over
/// `location_count` locations needs to stay connected.
pub fn min_sparse_connections(location_count: usize) -> usize {
    location_count.saturating_sub(1)
}

/// Maximum number of undirected connections over `location_count` locations.
pub fn max_connections(location_count: usize) -> usize {
    location_count * location_count.saturating_sub(1) / 2
}

/// Build the route graph for `locations`.
///
/// Fails if fewer than two locations are given, IDs collide, the start or
/// goal is unknown, start equals goal, or a sparse target is below the
/// connectivity minimum. A sparse target above the number of possible
/// pairs yields the complete graph.
pub fn build(locations: &[Location], mode: EdgeMode, ends: &RouteEnds) -> Result<PetRouteGraph> {
    if locations.len() < 2 {
        return Err(GraphError::TooFewLocations(locations.len()).into());
    }

    let mut graph = PetRouteGraph::new();
    for loc in locations {
        graph.add_location(loc.clone())?;
    }

    for id in [&ends.start, &ends.goal] {
        if !graph.contains(id) {
            return Err(GraphError::LocationNotFound(id.to_string()).into());
        }
    }
    if ends.start == ends.goal {
        return Err(GraphError::StartIsGoal(ends.start.to_string()).into());
    }

    match mode {
        EdgeMode::Complete => {
            for i in 0..locations.len() {
                for j in (i + 1)..locations.len() {
                    graph.connect(&locations[i].id, &locations[j].id)?;
                }
            }
        }
        EdgeMode::Sparse {
            seed,
            target_edge_count,
        } => {
            let required = min_sparse_connections(locations.len());
            if target_edge_count < required {
                return Err(GraphError::InsufficientEdges {
                    requested: target_edge_count,
                    required,
                }
                .into());
            }
            let target = target_edge_count.min(max_connections(locations.len()));
            connect_sparse(&mut graph, locations, seed, target)?;
        }
    }

    if graph.degree(&ends.goal) == 0 {
        return Err(GraphError::GoalUnreachable(ends.goal.to_string()).into());
    }

    debug!(
        locations = graph.location_count(),
        edges = graph.edge_count(),
        ?mode,
        "Route graph built"
    );
    Ok(graph)
}

fn connect_sparse(
    graph: &mut PetRouteGraph,
    locations: &[Location],
    seed: u64,
    target: usize,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Random spanning tree: attach each location to an earlier one.
    let mut order: Vec<usize> = (0..locations.len()).collect();
    order.shuffle(&mut rng);
    let mut connections = 0;
    for k in 1..order.len() {
        let parent = order[rng.gen_range(0..k)];
        if graph.connect(&locations[order[k]].id, &locations[parent].id)? {
            connections += 1;
        }
    }

    let mut extra: Vec<(usize, usize)> = Vec::new();
    for i in 0..locations.len() {
        for j in (i + 1)..locations.len() {
            if !graph.has_edge(&locations[i].id, &locations[j].id) {
                extra.push((i, j));
            }
        }
    }
    extra.shuffle(&mut rng);

    for (i, j) in extra {
        if connections >= target {
            break;
        }
        if graph.connect(&locations[i].id, &locations[j].id)? {
            connections += 1;
        }
    }
    Ok(())
}
