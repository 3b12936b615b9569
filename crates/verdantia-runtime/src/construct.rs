//! Path Constructor - the two construction strategies.
//!
//! - [`RandomPermutation`]: scouts wander to uniformly random unvisited
//!   locations, ignoring trail and distance, then head for the goal.
//! - [`AntColony`]: classical stepwise ACO choice, weighting each hop by
//!   `trail^alpha * (1/distance)^beta` and sampling by roulette wheel.
//!
//! A round builds all of its candidates from one pheromone snapshot. Each
//! candidate gets its own RNG seeded from a value drawn off the round RNG,
//! so a round's output does not depend on whether candidates are built
//! sequentially or in parallel.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use verdantia_core::construct::PathConstructor;
use verdantia_core::params::{ConstructionParams, Strategy};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Uniformly random exploration, one visit per location.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPermutation;

impl PathConstructor for RandomPermutation {
    fn name(&self) -> &'static str {
        "random-permutation"
    }

    fn construct(
        &self,
        graph: &dyn RouteGraph,
        _pheromones: &PheromoneSnapshot,
        params: &ConstructionParams,
        rng: &mut dyn RngCore,
    ) -> Option<Path> {
        let start = &params.ends.start;
        let goal = &params.ends.goal;
        if !graph.contains(start) || !graph.contains(goal) {
            return None;
        }

        let mut stops = vec![start.clone()];
        let mut visited: HashSet<LocationId> = HashSet::from([start.clone()]);

        for _ in 0..params.max_steps {
            let current = stops.last()?;
            let options: Vec<LocationId> = graph
                .neighbors(current)
                .into_iter()
                .map(|(id, _)| id)
                .filter(|id| id != goal && !visited.contains(id))
                .collect();
            if options.is_empty() {
                break;
            }
            let next = options[rng.gen_range(0..options.len())].clone();
            visited.insert(next.clone());
            stops.push(next);
        }

        let last = stops.last()?;
        if last != goal {
            graph.distance(last, goal)?;
            stops.push(goal.clone());
        }
        Some(Path::new(stops))
    }
}

/// Stepwise probabilistic construction weighted by trail and proximity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntColony;

impl AntColony {
    /// Desirability of one hop.
    pub fn weight(trail: f64, distance: f64, alpha: f64, beta: f64) -> f64 {
        trail.max(0.0).powf(alpha) * (1.0 / guard_distance(distance)).powf(beta)
    }
}

impl PathConstructor for AntColony {
    fn name(&self) -> &'static str {
        "ant-colony"
    }

    fn construct(
        &self,
        graph: &dyn RouteGraph,
        pheromones: &PheromoneSnapshot,
        params: &ConstructionParams,
        rng: &mut dyn RngCore,
    ) -> Option<Path> {
        let start = &params.ends.start;
        let goal = &params.ends.goal;
        if !graph.contains(start) || !graph.contains(goal) || params.visit_limit == 0 {
            return None;
        }

        let total_locations = graph.location_count();
        let mut visits: HashMap<LocationId, usize> = HashMap::from([(start.clone(), 1)]);
        let mut stops = vec![start.clone()];

        for _ in 0..params.max_steps {
            let current = stops.last()?.clone();
            if &current == goal && visits.len() == total_locations {
                return Some(Path::new(stops));
            }

            let candidates: Vec<(LocationId, f64)> = graph
                .neighbors(&current)
                .into_iter()
                .filter(|(id, _)| visits.get(id).copied().unwrap_or(0) < params.visit_limit)
                .map(|(id, distance)| {
                    let trail = pheromones.trail(&current, &id);
                    let w = AntColony::weight(trail, distance, params.alpha, params.beta);
                    (id, w)
                })
                .collect();

            let next = choose(&candidates, rng)?;
            *visits.entry(next.clone()).or_insert(0) += 1;
            stops.push(next);
        }

        let done = stops.last() == Some(goal) && visits.len() == total_locations;
        done.then(|| Path::new(stops))
    }
}

/// Roulette-wheel selection by cumulative-distribution inversion.
///
/// Infinite weights win outright; an all-zero distribution (fully evaporated
/// trails) falls back to a uniform choice.
fn choose(candidates: &[(LocationId, f64)], rng: &mut dyn RngCore) -> Option<LocationId> {
    if candidates.is_empty() {
        return None;
    }
    if let Some((id, _)) = candidates.iter().find(|(_, w)| w.is_infinite()) {
        return Some(id.clone());
    }

    let total: f64 = candidates.iter().map(|(_, w)| w).sum();
    if total <= 0.0 || !total.is_finite() {
        let idx = rng.gen_range(0..candidates.len());
        return Some(candidates[idx].0.clone());
    }

    let draw = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (id, w) in candidates {
        cumulative += w;
        if draw < cumulative {
            return Some(id.clone());
        }
    }
    candidates.last().map(|(id, _)| id.clone())
}

/// Constructor for a configured strategy.
pub fn constructor_for(strategy: Strategy) -> Box<dyn PathConstructor> {
    match strategy {
        Strategy::RandomPermutation => Box::new(RandomPermutation),
        Strategy::AntColony => Box::new(AntColony),
    }
}

/// Build `count` candidates from one snapshot.
///
/// Slot `i` holds the outcome of candidate `i`; `None` means it never
/// reached the goal.
pub fn construct_round(
    constructor: &dyn PathConstructor,
    graph: &dyn RouteGraph,
    pheromones: &PheromoneSnapshot,
    params: &ConstructionParams,
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Option<Path>> {
    let seeds: Vec<u64> = (0..count).map(|_| rng.gen()).collect();
    let build_one = |seed: u64| {
        let mut candidate_rng = ChaCha8Rng::seed_from_u64(seed);
        constructor.construct(graph, pheromones, params, &mut candidate_rng)
    };

    #[cfg(feature = "parallel")]
    {
        seeds.into_par_iter().map(build_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        seeds.into_iter().map(build_one).collect()
    }
}
