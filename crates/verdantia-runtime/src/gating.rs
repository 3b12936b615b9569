//! Hero release predicates.
//!
//! The hero waits at the start until the configured [`GatingPolicy`]
//! holds. The check is evaluated once per tick after agents moved.

use crate::stepper::Agent;
use verdantia_core::params::GatingPolicy;
use verdantia_core::types::LocationId;

/// Inputs the gating predicates look at.
#[derive(Debug, Clone, Copy)]
pub struct GateView<'a> {
    pub scouts: &'a [Agent],
    /// Simulated seconds since the current round started.
    pub round_elapsed: f64,
    /// Nearest location to the start by straight-line distance.
    pub first_hop: Option<&'a LocationId>,
}

/// Whether the hero may start walking.
pub fn is_ready(policy: &GatingPolicy, view: &GateView<'_>) -> bool {
    match *policy {
        GatingPolicy::ScoutMajority { fraction } => finished_fraction(view.scouts) >= fraction,
        GatingPolicy::TimeAndFirstHop { min_elapsed } => {
            view.round_elapsed > min_elapsed
                && view
                    .first_hop
                    .is_some_and(|hop| view.scouts.iter().any(|s| passed_first_hop(s, hop)))
        }
    }
}

/// Share of scouts standing on their final stop. An empty swarm counts as
/// fully finished.
pub fn finished_fraction(scouts: &[Agent]) -> f64 {
    if scouts.is_empty() {
        return 1.0;
    }
    let done = scouts.iter().filter(|s| s.is_finished()).count();
    done as f64 / scouts.len() as f64
}

fn passed_first_hop(scout: &Agent, hop: &LocationId) -> bool {
    scout.edge_index() >= 1 && scout.path().stops().get(1) == Some(hop)
}
