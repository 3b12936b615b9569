//! Pheromone field properties
//!
//! 1. Without deposits every trail is non-increasing and fades toward zero
//! 2. Full evaporation lands exactly on zero
//! 3. Reinforcing a constructed path raises every trail on it

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use verdantia_runtime::prelude::*;
use verdantia_runtime::selector::select_by_length;

fn map_graph() -> PetRouteGraph {
    build_graph(&verdantia_map(), EdgeMode::Complete, &default_ends()).unwrap()
}

#[test]
fn trails_never_increase_without_deposits() {
    let graph = map_graph();
    for rho in [0.0, 0.01, 0.1, 0.5, 0.9, 1.0] {
        let mut field = PheromoneField::init(&graph, 1.0).unwrap();
        let mut previous = field.snapshot();
        for tick in 0..500 {
            field.decay(rho).unwrap();
            let current = field.snapshot();
            for edge in graph.edges() {
                let key = edge.key();
                let (before, after) = (previous.get(&key), current.get(&key));
                assert!(after <= before, "rho {rho} tick {tick} {key}: {before} -> {after}");
                assert!(after >= 0.0, "rho {rho} tick {tick} {key}: negative trail");
            }
            previous = current;
        }
        if rho > 0.0 {
            assert!(previous.max_trail() < 0.01, "rho {rho}: {}", previous.max_trail());
        } else {
            assert_eq!(previous.max_trail(), 1.0);
        }
    }
}

#[test]
fn full_evaporation_reaches_zero() {
    let graph = map_graph();
    let mut field = PheromoneField::init(&graph, 1.0).unwrap();
    for edge in graph.edges() {
        field.deposit(&edge.key(), 3.5).unwrap();
    }
    field.decay(0.3).unwrap();
    field.decay(1.0).unwrap();
    for edge in graph.edges() {
        assert_eq!(field.get(&edge.key()), 0.0);
    }
    // Evaporating an empty field again changes nothing.
    field.decay(1.0).unwrap();
    assert_eq!(field.summary(), (0.0, 0.0, 0.0));
}

#[test]
fn reinforcing_a_constructed_path_raises_its_trails() {
    let graph = map_graph();
    let mut field = PheromoneField::init(&graph, 1.0).unwrap();
    let ends = default_ends();
    let params = ConstructionParams {
        ends: ends.clone(),
        alpha: 1.0,
        beta: 2.0,
        visit_limit: 1,
        max_steps: 40,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let candidates: Vec<Path> = (0..50)
        .filter_map(|_| AntColony.construct(&graph, &field.snapshot(), &params, &mut rng))
        .collect();
    let winner = select_by_length(&candidates, &graph, &ends).expect("some ant reached the goal");

    let before = field.snapshot();
    field.reinforce_path(&graph, &winner.path, 1.0).unwrap();
    let after = field.snapshot();

    for key in winner.path.edges() {
        assert!(after.get(&key) > before.get(&key), "{key} not reinforced");
    }
    // Edges off the path are untouched.
    for edge in graph.edges() {
        if !winner.path.uses_edge(&edge.from, &edge.to) {
            assert_eq!(after.get(&edge.key()), before.get(&edge.key()));
        }
    }
}
