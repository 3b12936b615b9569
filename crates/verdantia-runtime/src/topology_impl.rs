//! Concrete implementation of the RouteGraph trait using petgraph.
//!
//! Locations are petgraph nodes and every connection is stored as two
//! directed edges carrying the (shared) Euclidean distance. A HashMap from
//! `LocationId` to `NodeIndex` gives O(1) lookup by ID.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use verdantia_core::error::{GraphError, Result, VerdantiaError};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Petgraph-backed implementation of the route graph.
#[derive(Debug, Clone)]
pub struct PetRouteGraph {
    graph: DiGraph<Location, f64>,
    /// Map from our LocationId to petgraph's internal index.
    node_index: HashMap<LocationId, NodeIndex>,
}

impl PetRouteGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Add a location. Fails if the ID is already present.
    pub fn add_location(&mut self, location: Location) -> Result<()> {
        if self.node_index.contains_key(&location.id) {
            return Err(GraphError::DuplicateLocation(location.id.to_string()).into());
        }
        let id = location.id.clone();
        let idx = self.graph.add_node(location);
        self.node_index.insert(id, idx);
        Ok(())
    }

    /// Connect two locations in both directions.
    ///
    /// Returns `false` if the connection already existed.
    pub fn connect(&mut self, a: &LocationId, b: &LocationId) -> Result<bool> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        if self.graph.find_edge(a_idx, b_idx).is_some() {
            return Ok(false);
        }
        let distance =
            guard_distance(self.graph[a_idx].position.distance_to(&self.graph[b_idx].position));
        self.graph.add_edge(a_idx, b_idx, distance);
        self.graph.add_edge(b_idx, a_idx, distance);
        Ok(true)
    }

    /// Whether the directed edge `from -> to` exists.
    pub fn has_edge(&self, from: &LocationId, to: &LocationId) -> bool {
        self.distance(from, to).is_some()
    }

    /// Number of outgoing edges of a location.
    pub fn degree(&self, id: &LocationId) -> usize {
        self.node_index
            .get(id)
            .map(|&idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    fn index_of(&self, id: &LocationId) -> Result<NodeIndex> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| VerdantiaError::location_not_found(id.as_str()))
    }
}

impl Default for PetRouteGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGraph for PetRouteGraph {
    fn location(&self, id: &LocationId) -> Option<&Location> {
        self.node_index.get(id).map(|idx| &self.graph[*idx])
    }

    fn locations(&self) -> Vec<&Location> {
        self.graph
            .node_indices()
            .map(|idx| &self.graph[idx])
            .collect()
    }

    fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    fn distance(&self, from: &LocationId, to: &LocationId) -> Option<f64> {
        let from_idx = self.node_index.get(from)?;
        let to_idx = self.node_index.get(to)?;
        let edge_idx = self.graph.find_edge(*from_idx, *to_idx)?;
        Some(self.graph[edge_idx])
    }

    fn neighbors(&self, id: &LocationId) -> Vec<(LocationId, f64)> {
        let Some(&node_idx) = self.node_index.get(id) else {
            return Vec::new();
        };

        // petgraph yields outgoing edges newest-first; sort by target
        // insertion order instead.
        let mut out: Vec<(NodeIndex, f64)> = self
            .graph
            .edges(node_idx)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();
        out.sort_by_key(|(target, _)| target.index());
        out.into_iter()
            .map(|(target, d)| (self.graph[target].id.clone(), d))
            .collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.graph
            .edge_references()
            .map(|edge| Edge {
                from: self.graph[edge.source()].id.clone(),
                to: self.graph[edge.target()].id.clone(),
                distance: *edge.weight(),
            })
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PetRouteGraph {
        let mut graph = PetRouteGraph::new();
        graph.add_location(Location::new("A", "Alpha", 0.0, 0.0)).unwrap();
        graph.add_location(Location::new("B", "Beta", 3.0, 4.0)).unwrap();
        graph.add_location(Location::new("C", "Gamma", 0.0, 10.0)).unwrap();
        graph
    }

    #[test]
    fn connect_adds_both_directions() {
        let mut graph = triangle();
        assert!(graph.connect(&"A".into(), &"B".into()).unwrap());
        assert!(!graph.connect(&"B".into(), &"A".into()).unwrap());

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.distance(&"A".into(), &"B".into()), Some(5.0));
        assert_eq!(graph.distance(&"B".into(), &"A".into()), Some(5.0));
        assert_eq!(graph.distance(&"A".into(), &"C".into()), None);
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let mut graph = triangle();
        let err = graph.add_location(Location::new("A", "Again", 1.0, 1.0)).unwrap_err();
        assert_eq!(err, VerdantiaError::from(GraphError::DuplicateLocation("A".into())));
    }

    #[test]
    fn coincident_locations_get_positive_distance() {
        let mut graph = PetRouteGraph::new();
        graph.add_location(Location::new("A", "Here", 5.0, 5.0)).unwrap();
        graph.add_location(Location::new("B", "Also here", 5.0, 5.0)).unwrap();
        graph.connect(&"A".into(), &"B".into()).unwrap();
        let d = graph.distance(&"A".into(), &"B".into()).unwrap();
        assert_eq!(d, MIN_DISTANCE);
        assert!((1.0 / d).is_finite());
    }

    #[test]
    fn neighbors_are_in_insertion_order() {
        let mut graph = triangle();
        graph.connect(&"A".into(), &"C".into()).unwrap();
        graph.connect(&"A".into(), &"B".into()).unwrap();
        let ids: Vec<LocationId> = graph.neighbors(&"A".into()).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![LocationId::from("B"), LocationId::from("C")]);
    }

    #[test]
    fn nearest_neighbor_ignores_edges() {
        let graph = triangle();
        assert_eq!(graph.nearest_neighbor(&"A".into()), Some("B".into()));
        assert_eq!(graph.nearest_neighbor(&"C".into()), Some("B".into()));
    }

    #[test]
    fn path_length_requires_every_hop() {
        let mut graph = triangle();
        graph.connect(&"A".into(), &"B".into()).unwrap();
        let ok = Path::new(vec!["A".into(), "B".into()]);
        let broken = Path::new(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(graph.path_length(&ok), Some(5.0));
        assert_eq!(graph.path_length(&broken), None);
    }
}
