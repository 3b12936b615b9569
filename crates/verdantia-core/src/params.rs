//! Tunable parameters and named policies.
//!
//! Every knob that changes simulation behaviour lives here as a plain value
//! type so it can be validated once, before it reaches the tick loop.

use crate::error::{Result, VerdantiaError};
use crate::types::LocationId;
use serde::{Deserialize, Serialize};

/// Pheromone parameters adjustable while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcoParams {
    /// Deposit gain, and the trail exponent of stepwise construction (>= 0).
    pub alpha: f64,
    /// Distance-weighting exponent of stepwise construction (>= 0).
    pub beta: f64,
    /// Evaporation rate per tick, in `[0, 1]`.
    pub rho: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
        }
    }
}

impl AcoParams {
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("alpha", self.alpha)?;
        validate_non_negative("beta", self.beta)?;
        validate_rho(self.rho)
    }
}

/// Reject NaN, infinities and negative values.
pub fn validate_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VerdantiaError::out_of_range(field, 0.0, f64::MAX, value))
    }
}

/// Reject values that are not strictly positive and finite.
pub fn validate_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VerdantiaError::invalid_config(
            field,
            value.to_string(),
            "must be a positive finite number",
        ))
    }
}

pub fn validate_rho(rho: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rho) {
        Ok(())
    } else {
        Err(VerdantiaError::out_of_range("rho", 0.0, 1.0, rho))
    }
}

/// How the graph over the locations is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeMode {
    /// Every ordered pair of distinct locations is connected.
    Complete,
    /// A seeded random subset of undirected connections.
    Sparse { seed: u64, target_edge_count: usize },
}

impl Default for EdgeMode {
    fn default() -> Self {
        EdgeMode::Complete
    }
}

/// Which path construction strategy a simulation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Scouts explore independent random permutations; the most travelled
    /// candidate wins.
    RandomPermutation,
    /// Classical ant colony construction weighted by trail and distance;
    /// the shortest complete path wins.
    #[default]
    AntColony,
}

/// When a freshly selected path replaces the current best path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Every round's winner replaces the best path.
    Always,
    /// Only a strictly better winner replaces the best path.
    #[default]
    OnImprovement,
}

/// When the hero starts walking the best path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatingPolicy {
    /// At least `fraction` of the scouts finished their path.
    ScoutMajority { fraction: f64 },
    /// `min_elapsed` seconds passed since the round started and at least one
    /// scout moved past the first hop toward the start's nearest neighbour.
    TimeAndFirstHop { min_elapsed: f64 },
}

impl Default for GatingPolicy {
    fn default() -> Self {
        GatingPolicy::ScoutMajority { fraction: 0.5 }
    }
}

impl GatingPolicy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            GatingPolicy::ScoutMajority { fraction } => {
                if (0.0..=1.0).contains(&fraction) {
                    Ok(())
                } else {
                    Err(VerdantiaError::out_of_range("gating.fraction", 0.0, 1.0, fraction))
                }
            }
            GatingPolicy::TimeAndFirstHop { min_elapsed } => {
                validate_non_negative("gating.min_elapsed", min_elapsed)
            }
        }
    }
}

/// When new construction rounds fire besides explicit requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundSchedule {
    /// Only on `request_new_round`.
    Manual,
    /// Additionally every `seconds` of simulated time.
    Every { seconds: f64 },
}

impl Default for RoundSchedule {
    fn default() -> Self {
        RoundSchedule::Manual
    }
}

impl RoundSchedule {
    pub fn validate(&self) -> Result<()> {
        match *self {
            RoundSchedule::Manual => Ok(()),
            RoundSchedule::Every { seconds } => validate_positive("schedule.seconds", seconds),
        }
    }
}

/// Designated start and goal of every path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEnds {
    pub start: LocationId,
    pub goal: LocationId,
}

/// Parameters handed to a [`PathConstructor`](crate::construct::PathConstructor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionParams {
    pub ends: RouteEnds,
    /// Trail exponent.
    pub alpha: f64,
    /// Distance exponent.
    pub beta: f64,
    /// How many times a location may appear on one path.
    pub visit_limit: usize,
    /// Hard bound on steps taken by one construction.
    pub max_steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(AcoParams::default().validate().is_ok());
        assert!(GatingPolicy::default().validate().is_ok());
        assert!(RoundSchedule::default().validate().is_ok());
    }

    #[test]
    fn rho_outside_unit_interval_is_rejected() {
        let params = AcoParams { rho: 1.01, ..AcoParams::default() };
        assert!(params.validate().is_err());
        let params = AcoParams { rho: -0.1, ..AcoParams::default() };
        assert!(params.validate().is_err());
        let params = AcoParams { rho: f64::NAN, ..AcoParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn negative_alpha_and_beta_are_rejected() {
        assert!(AcoParams { alpha: -1.0, ..AcoParams::default() }.validate().is_err());
        assert!(AcoParams { beta: -0.5, ..AcoParams::default() }.validate().is_err());
        assert!(AcoParams { alpha: 0.0, beta: 0.0, rho: 0.0 }.validate().is_ok());
    }

    #[test]
    fn schedule_interval_must_be_positive() {
        assert!(RoundSchedule::Every { seconds: 0.0 }.validate().is_err());
        assert!(RoundSchedule::Every { seconds: 2.5 }.validate().is_ok());
    }
}
