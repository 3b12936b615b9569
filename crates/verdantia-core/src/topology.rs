//! Topology - the route graph over the map's locations.
//!
//! Locations and edges are fixed at setup. Distances are derived from the
//! coordinates once and never change; only pheromone (held elsewhere) moves.

use crate::types::*;

/// Read-only handle to the route graph.
///
/// This is a trait rather than a concrete type so that construction
/// strategies and the agent stepper do not depend on the graph backend.
pub trait RouteGraph: Send + Sync {
    /// Look up a location by ID.
    fn location(&self, id: &LocationId) -> Option<&Location>;

    /// All locations, in insertion order.
    fn locations(&self) -> Vec<&Location>;

    /// Number of locations.
    fn location_count(&self) -> usize;

    /// Length of the directed edge `from -> to`, if the edge exists.
    ///
    /// Never returns zero: coincident locations yield [`MIN_DISTANCE`].
    fn distance(&self, from: &LocationId, to: &LocationId) -> Option<f64>;

    /// Outgoing edges of a location as `(target, distance)` pairs.
    ///
    /// The order is stable for a given graph so seeded constructions
    /// are reproducible.
    fn neighbors(&self, id: &LocationId) -> Vec<(LocationId, f64)>;

    /// All directed edges.
    fn edges(&self) -> Vec<Edge>;

    /// Number of directed edges.
    fn edge_count(&self) -> usize;

    fn contains(&self, id: &LocationId) -> bool {
        self.location(id).is_some()
    }

    fn position(&self, id: &LocationId) -> Option<Position> {
        self.location(id).map(|l| l.position)
    }

    /// Closest other location by straight-line distance, ignoring edges.
    fn nearest_neighbor(&self, id: &LocationId) -> Option<LocationId> {
        let origin = self.position(id)?;
        let mut best: Option<(&Location, f64)> = None;
        for loc in self.locations() {
            if &loc.id == id {
                continue;
            }
            let d = origin.distance_to(&loc.position);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((loc, d));
            }
        }
        best.map(|(loc, _)| loc.id.clone())
    }

    /// Sum of edge distances along a path, or `None` if a hop has no edge.
    fn path_length(&self, path: &Path) -> Option<f64> {
        path.stops()
            .windows(2)
            .map(|pair| self.distance(&pair[0], &pair[1]))
            .sum()
    }
}
