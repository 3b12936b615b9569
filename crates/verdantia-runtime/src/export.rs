//! Trail exporter - edges with their current pheromone strength.
//!
//! Feeds the rendering layer (edge intensity) and the CLI summary and JSON
//! export.

use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};
use verdantia_core::types::LocationId;

/// One directed edge with its trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTrail {
    pub from: LocationId,
    pub to: LocationId,
    pub distance: f64,
    pub trail: f64,
    /// Trail relative to the strongest trail, in `[0, 1]`.
    pub intensity: f64,
}

/// Every edge with its trail, sorted by edge key.
pub fn edge_trails(sim: &Simulation) -> Vec<EdgeTrail> {
    let trails = sim.pheromone_snapshot();
    sim.edges()
        .into_iter()
        .map(|edge| {
            let key = edge.key();
            EdgeTrail {
                trail: trails.get(&key),
                intensity: trails.normalized(&key),
                from: edge.from,
                to: edge.to,
                distance: edge.distance,
            }
        })
        .collect()
}

/// The `limit` strongest trails, strongest first.
pub fn strongest_trails(sim: &Simulation, limit: usize) -> Vec<EdgeTrail> {
    let mut trails = edge_trails(sim);
    // Stable sort keeps key order among equal trails
    trails.sort_by(|a, b| {
        b.trail
            .partial_cmp(&a.trail)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    trails.truncate(limit);
    trails
}

/// The full snapshot as pretty-printed JSON.
pub fn snapshot_json(sim: &Simulation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sim.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationConfig;
    use verdantia_core::types::Location;

    fn sim() -> Simulation {
        let locations = vec![
            Location::new("S", "Start", 0.0, 0.0),
            Location::new("M", "Middle", 100.0, 0.0),
            Location::new("G", "Goal", 150.0, 0.0),
        ];
        Simulation::from_config(locations, SimulationConfig::for_route("S", "G")).unwrap()
    }

    #[test]
    fn best_path_edges_rank_first() {
        let mut sim = sim();
        sim.run(5, 0.1).unwrap();
        let top = strongest_trails(&sim, 2);
        assert_eq!(top.len(), 2);
        for edge in &top {
            assert!(sim.best_path().unwrap().uses_edge(&edge.from, &edge.to));
        }
        assert_eq!(top[0].intensity, 1.0);
    }

    #[test]
    fn every_edge_is_exported() {
        let sim = sim();
        let trails = edge_trails(&sim);
        assert_eq!(trails.len(), 6);
        assert!(trails.iter().all(|t| t.trail == 1.0 && t.intensity == 1.0));
    }

    #[test]
    fn json_contains_best_path() {
        let sim = sim();
        let json = snapshot_json(&sim).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["best"]["path"], serde_json::json!(["S", "M", "G"]));
    }
}
