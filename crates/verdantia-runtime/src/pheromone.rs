//! Pheromone Field - per-directed-edge trail strength.
//!
//! Every edge of the graph has an entry from `init` onward. Trails only
//! change through multiplicative decay (all edges) and additive deposit
//! (reinforced edges), so they can never go negative.

use std::collections::HashMap;
use verdantia_core::error::{Result, VerdantiaError};
use verdantia_core::params::{validate_non_negative, validate_positive, validate_rho};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Trails stop growing at `f64::MAX` rather than overflowing to infinity.
fn saturating_add(trail: f64, amount: f64) -> f64 {
    (trail + amount).min(f64::MAX)
}

/// Mutable trail state keyed by directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    trails: HashMap<EdgeKey, f64>,
    initial: f64,
}

impl PheromoneField {
    /// Set every directed edge of `graph` to `initial_value` (> 0).
    pub fn init(graph: &dyn RouteGraph, initial_value: f64) -> Result<Self> {
        validate_positive("initial_trail", initial_value)?;
        let trails = graph
            .edges()
            .into_iter()
            .map(|edge| (edge.key(), initial_value))
            .collect();
        Ok(Self {
            trails,
            initial: initial_value,
        })
    }

    /// Restore every trail to the initial value.
    pub fn reset(&mut self) {
        for trail in self.trails.values_mut() {
            *trail = self.initial;
        }
    }

    /// Evaporate every trail: `trail *= 1 - rho`.
    ///
    /// `rho = 1` lands exactly on zero.
    pub fn decay(&mut self, rho: f64) -> Result<()> {
        validate_rho(rho)?;
        let keep = 1.0 - rho;
        for trail in self.trails.values_mut() {
            *trail = (*trail * keep).max(0.0);
        }
        Ok(())
    }

    /// Add `amount` (>= 0) to an edge's trail.
    pub fn deposit(&mut self, edge: &EdgeKey, amount: f64) -> Result<()> {
        validate_non_negative("deposit", amount)?;
        match self.trails.get_mut(edge) {
            Some(trail) => {
                *trail = saturating_add(*trail, amount);
                Ok(())
            }
            None => Err(VerdantiaError::edge_not_found(edge.from.as_str(), edge.to.as_str())),
        }
    }

    /// Deposit `alpha / distance` on every edge of `path`.
    ///
    /// All hops are checked before anything is written, so a path with a
    /// missing edge leaves the field untouched.
    pub fn reinforce_path(&mut self, graph: &dyn RouteGraph, path: &Path, alpha: f64) -> Result<()> {
        validate_non_negative("alpha", alpha)?;
        let mut deposits = Vec::with_capacity(path.edge_count());
        for key in path.edges() {
            let distance = graph
                .distance(&key.from, &key.to)
                .filter(|_| self.trails.contains_key(&key))
                .ok_or_else(|| VerdantiaError::edge_not_found(key.from.as_str(), key.to.as_str()))?;
            deposits.push((key, alpha / guard_distance(distance)));
        }
        for (key, amount) in deposits {
            if let Some(trail) = self.trails.get_mut(&key) {
                *trail = saturating_add(*trail, amount);
            }
        }
        Ok(())
    }

    /// Trail on an edge; absent edges read as zero.
    pub fn trail(&self, from: &LocationId, to: &LocationId) -> f64 {
        self.trails
            .get(&EdgeKey::new(from.clone(), to.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn get(&self, edge: &EdgeKey) -> f64 {
        self.trails.get(edge).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn initial_value(&self) -> f64 {
        self.initial
    }

    /// Read-only copy for construction and rendering.
    pub fn snapshot(&self) -> PheromoneSnapshot {
        PheromoneSnapshot::new(self.trails.clone())
    }

    /// `(min, max, mean)` over all trails.
    pub fn summary(&self) -> (f64, f64, f64) {
        if self.trails.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        let mut min = f64::INFINITY;
        let mut max = 0.0f64;
        let mut sum = 0.0;
        for &t in self.trails.values() {
            min = min.min(t);
            max = max.max(t);
            sum += t;
        }
        (min, max, sum / self.trails.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder;
    use verdantia_core::params::{EdgeMode, RouteEnds};

    fn line_graph() -> crate::topology_impl::PetRouteGraph {
        let locations = vec![
            Location::new("S", "Start", 0.0, 0.0),
            Location::new("M", "Middle", 100.0, 0.0),
            Location::new("G", "Goal", 150.0, 0.0),
        ];
        let ends = RouteEnds {
            start: "S".into(),
            goal: "G".into(),
        };
        graph_builder::build(&locations, EdgeMode::Complete, &ends).unwrap()
    }

    #[test]
    fn init_covers_every_edge() {
        let graph = line_graph();
        let field = PheromoneField::init(&graph, 1.0).unwrap();
        assert_eq!(field.len(), graph.edge_count());
        for edge in graph.edges() {
            assert_eq!(field.get(&edge.key()), 1.0);
        }
    }

    #[test]
    fn init_rejects_non_positive_value() {
        let graph = line_graph();
        assert!(PheromoneField::init(&graph, 0.0).is_err());
        assert!(PheromoneField::init(&graph, -1.0).is_err());
    }

    #[test]
    fn decay_is_multiplicative_on_all_edges() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        field.decay(0.5).unwrap();
        field.decay(0.5).unwrap();
        for edge in graph.edges() {
            assert_eq!(field.get(&edge.key()), 0.25);
        }
    }

    #[test]
    fn decay_with_zero_rho_is_identity() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 2.0).unwrap();
        field.decay(0.0).unwrap();
        assert_eq!(field.trail(&"S".into(), &"M".into()), 2.0);
    }

    #[test]
    fn decay_rejects_invalid_rho() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        assert!(field.decay(1.5).is_err());
        assert_eq!(field.trail(&"S".into(), &"M".into()), 1.0);
    }

    #[test]
    fn reinforcement_favours_short_edges() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        let path = Path::new(vec!["S".into(), "M".into(), "G".into()]);
        field.reinforce_path(&graph, &path, 1.0).unwrap();

        assert_eq!(field.trail(&"S".into(), &"M".into()), 1.0 + 1.0 / 100.0);
        assert_eq!(field.trail(&"M".into(), &"G".into()), 1.0 + 1.0 / 50.0);
        // Direction matters.
        assert_eq!(field.trail(&"M".into(), &"S".into()), 1.0);
    }

    #[test]
    fn reinforcement_with_missing_edge_changes_nothing() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        let before = field.clone();
        let path = Path::new(vec!["S".into(), "M".into(), "X".into()]);
        assert!(field.reinforce_path(&graph, &path, 1.0).is_err());
        assert_eq!(field, before);
    }

    #[test]
    fn absent_edge_reads_zero() {
        let graph = line_graph();
        let field = PheromoneField::init(&graph, 1.0).unwrap();
        assert_eq!(field.trail(&"S".into(), &"Nowhere".into()), 0.0);
        assert_eq!(field.snapshot().trail(&"S".into(), &"Nowhere".into()), 0.0);
    }

    #[test]
    fn reset_restores_initial_value() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        field.decay(1.0).unwrap();
        assert_eq!(field.summary(), (0.0, 0.0, 0.0));
        field.reset();
        assert_eq!(field.summary(), (1.0, 1.0, 1.0));
    }

    #[test]
    fn deposits_saturate_instead_of_overflowing() {
        let graph = line_graph();
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        let key = EdgeKey::new("S", "M");
        field.deposit(&key, f64::MAX).unwrap();
        field.deposit(&key, f64::MAX).unwrap();
        assert_eq!(field.get(&key), f64::MAX);
        assert_eq!(field.snapshot().normalized(&key), 1.0);
    }
}
