//! Path Selector - scores a round's candidates and commits the best path.
//!
//! Two scoring rules, one per construction strategy:
//! - **Traffic** (random permutation): sum of scout crossings over the
//!   path's edges; the most travelled candidate wins, first seen on ties.
//! - **Length** (ant colony): total distance of a complete tour; shortest
//!   wins, first seen on ties. Incomplete tours do not qualify.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use verdantia_core::params::{ReplacementPolicy, RouteEnds, Strategy};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Score of a path under one of the two rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PathScore {
    /// Scout crossings; higher is better.
    Traffic(u64),
    /// Total distance; lower is better.
    Length(f64),
}

impl PathScore {
    /// Whether `self` is strictly better than `other`.
    ///
    /// Scores of different kinds never beat each other.
    pub fn beats(&self, other: &PathScore) -> bool {
        match (self, other) {
            (PathScore::Traffic(a), PathScore::Traffic(b)) => a > b,
            (PathScore::Length(a), PathScore::Length(b)) => a < b,
            _ => false,
        }
    }
}

/// The path currently believed best, retained across ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPath {
    pub path: Path,
    pub score: PathScore,
    /// Total Euclidean length along the path's stops.
    pub length: f64,
    /// Round in which this path was committed.
    pub round: u64,
}

/// A round's winner before the replacement policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub path: Path,
    pub score: PathScore,
}

/// How many scouts crossed each directed edge.
pub fn scout_counts<'a>(assignments: impl IntoIterator<Item = &'a Path>) -> HashMap<EdgeKey, u64> {
    let mut counts = HashMap::new();
    for path in assignments {
        for key in path.edges() {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Sum of scout crossings over the edges of `path`.
pub fn traffic_score(path: &Path, counts: &HashMap<EdgeKey, u64>) -> u64 {
    path.edges().map(|key| counts.get(&key).copied().unwrap_or(0)).sum()
}

/// Whether `path` runs from start to goal over existing edges and visits
/// every location exactly once.
pub fn is_complete_tour(path: &Path, graph: &dyn RouteGraph, ends: &RouteEnds) -> bool {
    if path.first() != Some(&ends.start) || path.last() != Some(&ends.goal) {
        return false;
    }
    if path.len() != graph.location_count() {
        return false;
    }
    let unique: HashSet<&LocationId> = path.stops().iter().collect();
    unique.len() == path.len()
        && path.stops().iter().all(|id| graph.contains(id))
        && graph.path_length(path).is_some()
}

/// Length along the stops' coordinates. Hops without a graph edge still
/// count their straight-line distance.
pub fn euclidean_length(path: &Path, graph: &dyn RouteGraph) -> f64 {
    path.stops()
        .windows(2)
        .filter_map(|pair| {
            graph
                .distance(&pair[0], &pair[1])
                .or_else(|| Some(graph.position(&pair[0])?.distance_to(&graph.position(&pair[1])?)))
        })
        .sum()
}

/// Most travelled candidate. Ties go to the earliest candidate.
pub fn select_by_traffic(candidates: &[Path], counts: &HashMap<EdgeKey, u64>) -> Option<Selection> {
    let mut best: Option<Selection> = None;
    for (index, path) in candidates.iter().enumerate() {
        let score = PathScore::Traffic(traffic_score(path, counts));
        if best.as_ref().map_or(true, |b| score.beats(&b.score)) {
            best = Some(Selection {
                index,
                path: path.clone(),
                score,
            });
        }
    }
    best
}

/// Shortest complete tour. Ties go to the earliest candidate.
pub fn select_by_length(
    candidates: &[Path],
    graph: &dyn RouteGraph,
    ends: &RouteEnds,
) -> Option<Selection> {
    let mut best: Option<Selection> = None;
    for (index, path) in candidates.iter().enumerate() {
        if !is_complete_tour(path, graph, ends) {
            continue;
        }
        let Some(length) = graph.path_length(path) else {
            continue;
        };
        let score = PathScore::Length(length);
        if best.as_ref().map_or(true, |b| score.beats(&b.score)) {
            best = Some(Selection {
                index,
                path: path.clone(),
                score,
            });
        }
    }
    best
}

/// Applies the replacement policy to a round's winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSelector {
    pub strategy: Strategy,
    pub policy: ReplacementPolicy,
}

impl PathSelector {
    pub fn new(strategy: Strategy, policy: ReplacementPolicy) -> Self {
        Self { strategy, policy }
    }

    /// Pick this round's winner under the strategy's scoring rule.
    pub fn select(
        &self,
        candidates: &[Path],
        counts: &HashMap<EdgeKey, u64>,
        graph: &dyn RouteGraph,
        ends: &RouteEnds,
    ) -> Option<Selection> {
        match self.strategy {
            Strategy::RandomPermutation => select_by_traffic(candidates, counts),
            Strategy::AntColony => select_by_length(candidates, graph, ends),
        }
    }

    /// Whether `challenger` should replace `current`.
    pub fn should_replace(&self, current: Option<&BestPath>, challenger: &PathScore) -> bool {
        match (self.policy, current) {
            (_, None) => true,
            (ReplacementPolicy::Always, Some(_)) => true,
            (ReplacementPolicy::OnImprovement, Some(best)) => challenger.beats(&best.score),
        }
    }
}
