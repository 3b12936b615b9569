//! Path construction and selection over the built-in map.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use verdantia_runtime::prelude::*;

fn params(max_steps: usize) -> ConstructionParams {
    ConstructionParams {
        ends: default_ends(),
        alpha: 1.0,
        beta: 2.0,
        visit_limit: 1,
        max_steps,
    }
}

#[test]
fn random_permutation_is_reproducible() {
    let graph = build_graph(&verdantia_map(), EdgeMode::Complete, &default_ends()).unwrap();
    let snapshot = PheromoneSnapshot::default();

    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..3)
            .map(|_| RandomPermutation.construct(&graph, &snapshot, &params(40), &mut rng))
            .collect::<Vec<_>>()
    };

    let first = run(17);
    assert_eq!(first, run(17));
    assert_ne!(first, run(18));
    for path in first {
        let path = path.unwrap();
        assert_eq!(path.len(), 10);
        assert_eq!(path.first(), Some(&DEFAULT_START.into()));
        assert_eq!(path.last(), Some(&DEFAULT_GOAL.into()));
    }
}

#[test]
fn ant_paths_have_fixed_ends_and_no_repeats() {
    let graph = build_graph(&verdantia_map(), EdgeMode::Complete, &default_ends()).unwrap();
    let field = PheromoneField::init(&graph, 1.0).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let round = construct_round(&AntColony, &graph, &field.snapshot(), &params(40), 200, &mut rng);

    let valid: Vec<Path> = round.into_iter().flatten().collect();
    assert!(!valid.is_empty());
    for path in &valid {
        let stops = path.stops();
        assert_eq!(stops[0], LocationId::from(DEFAULT_START));
        assert_eq!(stops[stops.len() - 1], LocationId::from(DEFAULT_GOAL));
        let inner = &stops[1..stops.len() - 1];
        let unique: HashSet<&LocationId> = inner.iter().collect();
        assert_eq!(unique.len(), inner.len(), "{path}");
        assert!(!inner.contains(&DEFAULT_START.into()), "{path}");
        assert!(!inner.contains(&DEFAULT_GOAL.into()), "{path}");
    }
}

#[test]
fn ant_construction_terminates_on_sparse_graphs() {
    for seed in 0..10 {
        let mode = EdgeMode::Sparse {
            seed,
            target_edge_count: 9,
        };
        let graph = build_graph(&verdantia_map(), mode, &default_ends()).unwrap();
        let field = PheromoneField::init(&graph, 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut loose = params(40);
        loose.visit_limit = 3;
        // A spanning tree rarely has a Hamiltonian path; the point is that
        // every attempt returns.
        let round = construct_round(&AntColony, &graph, &field.snapshot(), &loose, 50, &mut rng);
        assert_eq!(round.len(), 50);
        for path in round.into_iter().flatten() {
            assert!(graph.path_length(&path).is_some());
        }
    }
}

/// The round a sequential build would produce: candidate `i` comes from the
/// `i`-th seed drawn off the round RNG.
fn per_seed_round(
    constructor: &dyn PathConstructor,
    graph: &PetRouteGraph,
    snapshot: &PheromoneSnapshot,
    count: usize,
    seed: u64,
) -> Vec<Option<Path>> {
    let mut seeds_rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let candidate_seed: u64 = rand::Rng::gen(&mut seeds_rng);
            let mut rng = ChaCha8Rng::seed_from_u64(candidate_seed);
            constructor.construct(graph, snapshot, &params(40), &mut rng)
        })
        .collect()
}

#[test]
fn rounds_match_per_candidate_seeds() {
    let graph = build_graph(&verdantia_map(), EdgeMode::Complete, &default_ends()).unwrap();
    let snapshot = PheromoneField::init(&graph, 1.0).unwrap().snapshot();

    let mut round_rng = ChaCha8Rng::seed_from_u64(99);
    let round = construct_round(&AntColony, &graph, &snapshot, &params(40), 8, &mut round_rng);
    assert_eq!(round, per_seed_round(&AntColony, &graph, &snapshot, 8, 99));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_rounds_keep_candidate_order() {
    let graph = build_graph(&verdantia_map(), EdgeMode::Complete, &default_ends()).unwrap();
    let snapshot = PheromoneField::init(&graph, 1.0).unwrap().snapshot();

    // Enough candidates to be split across worker threads.
    for seed in [1, 7, 99] {
        let mut round_rng = ChaCha8Rng::seed_from_u64(seed);
        let ants = construct_round(&AntColony, &graph, &snapshot, &params(40), 256, &mut round_rng);
        assert_eq!(ants, per_seed_round(&AntColony, &graph, &snapshot, 256, seed));

        let mut round_rng = ChaCha8Rng::seed_from_u64(seed);
        let scouts =
            construct_round(&RandomPermutation, &graph, &snapshot, &params(40), 256, &mut round_rng);
        assert_eq!(scouts, per_seed_round(&RandomPermutation, &graph, &snapshot, 256, seed));
    }
}

#[test]
fn scouted_rounds_always_pick_a_path_ending_at_the_goal() {
    let config = SimulationConfig {
        strategy: Strategy::RandomPermutation,
        scouts_per_round: 100,
        candidate_paths: 3,
        replacement: ReplacementPolicy::Always,
        seed: 3,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::verdantia(config).unwrap();
    for round in 1..=3 {
        if round > 1 {
            sim.request_new_round();
            sim.tick(1.0 / 60.0).unwrap();
        }
        assert_eq!(sim.rounds(), round);
        assert_eq!(sim.scouts().len(), 100);
        let best = sim.best_path().unwrap();
        assert_eq!(best.last(), Some(&DEFAULT_GOAL.into()), "round {round}: {best}");
        assert!(sim.candidates().contains(best));
    }
}
