//! Agent Stepper - moves scouts and the hero along their paths.
//!
//! An agent is tracked as (path, edge index, progress along that edge).
//! Its position is never stored; it is interpolated from the current
//! edge's endpoints whenever asked for, so rendering can sample it at any
//! rate.
//!
//! When progress reaches the edge length the agent moves to the next edge
//! and progress restarts at zero. The overshoot is dropped, so an agent
//! needs `ceil(D / (v * dt))` ticks per edge rather than `D / (v * dt)`.
//!
//! Progress is a running float sum, so after `n` steps it can sit up to
//! `n * EPSILON * D` below the exact total. The arrival check allows that
//! much and no more.

use serde::{Deserialize, Serialize};
use verdantia_core::error::{Result, VerdantiaError};
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Role of an agent on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Scout,
    Hero,
}

/// One moving entity bound to a fixed path.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    kind: AgentKind,
    path: Path,
    /// Coordinates of every stop, resolved once at bind time.
    waypoints: Vec<Position>,
    /// Length of every edge; `legs[i]` joins `waypoints[i]` and `waypoints[i + 1]`.
    legs: Vec<f64>,
    edge_index: usize,
    progress: f64,
    /// Steps taken on the current edge.
    steps: u32,
}

impl Agent {
    /// Bind an agent to `path`, positioned at its first stop.
    ///
    /// Edge lengths come from the graph; a hop the graph has no edge for
    /// uses the straight-line distance between its stops.
    pub fn bind(kind: AgentKind, path: Path, graph: &dyn RouteGraph) -> Result<Self> {
        if path.is_empty() {
            return Err(VerdantiaError::invalid_config(
                "path",
                "[]",
                "an agent needs at least one stop",
            ));
        }
        let waypoints = path
            .stops()
            .iter()
            .map(|id| {
                graph
                    .position(id)
                    .ok_or_else(|| VerdantiaError::location_not_found(id.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;
        let legs = path
            .stops()
            .windows(2)
            .zip(waypoints.windows(2))
            .map(|(ids, points)| {
                let d = graph
                    .distance(&ids[0], &ids[1])
                    .unwrap_or_else(|| points[0].distance_to(&points[1]));
                guard_distance(d)
            })
            .collect();

        Ok(Self {
            kind,
            path,
            waypoints,
            legs,
            edge_index: 0,
            progress: 0.0,
            steps: 0,
        })
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the edge currently being traversed.
    pub fn edge_index(&self) -> usize {
        self.edge_index
    }

    /// Distance covered along the current edge.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Length of the current edge, or `None` once the agent has arrived.
    pub fn current_edge_length(&self) -> Option<f64> {
        self.legs.get(self.edge_index).copied()
    }

    /// Whether the agent stands on the final stop.
    pub fn is_finished(&self) -> bool {
        self.edge_index >= self.legs.len()
    }

    /// Back to the first stop.
    pub fn restart(&mut self) {
        self.edge_index = 0;
        self.progress = 0.0;
        self.steps = 0;
    }

    /// Move `speed * dt` along the current edge and return the new position.
    ///
    /// At most one edge boundary is crossed per call. A finished agent does
    /// not move and reports the final stop.
    pub fn advance(&mut self, speed: f64, dt: f64) -> Position {
        if let Some(leg) = self.current_edge_length() {
            self.progress += (speed * dt).max(0.0);
            self.steps = self.steps.saturating_add(1);
            if self.progress >= leg - rounding_slack(leg, self.steps) {
                self.edge_index += 1;
                self.progress = 0.0;
                self.steps = 0;
            }
        }
        self.position()
    }

    /// Interpolated position on the current edge.
    pub fn position(&self) -> Position {
        match self.current_edge_length() {
            Some(leg) => {
                let from = self.waypoints[self.edge_index];
                let to = self.waypoints[self.edge_index + 1];
                from.lerp(&to, self.progress / leg)
            }
            None => self.waypoints.last().copied().unwrap_or_default(),
        }
    }
}

/// Worst-case rounding error of summing `steps` increments up to `leg`.
fn rounding_slack(leg: f64, steps: u32) -> f64 {
    f64::from(steps) * f64::EPSILON * leg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology_impl::PetRouteGraph;

    fn two_stops(distance: f64) -> PetRouteGraph {
        let mut graph = PetRouteGraph::new();
        graph.add_location(Location::new("S", "Start", 0.0, 0.0)).unwrap();
        graph.add_location(Location::new("G", "Goal", distance, 0.0)).unwrap();
        graph.connect(&"S".into(), &"G".into()).unwrap();
        graph
    }

    fn ticks_to_arrive(agent: &mut Agent, speed: f64, dt: f64) -> usize {
        let mut ticks = 0;
        while !agent.is_finished() {
            agent.advance(speed, dt);
            ticks += 1;
            assert!(ticks < 1_000_000);
        }
        ticks
    }

    #[test]
    fn starts_exactly_on_first_stop() {
        let graph = two_stops(100.0);
        let agent = Agent::bind(AgentKind::Hero, Path::new(vec!["S".into(), "G".into()]), &graph).unwrap();
        assert_eq!(agent.position(), Position::new(0.0, 0.0));
        assert_eq!(agent.edge_index(), 0);
    }

    #[test]
    fn tick_count_is_ceiling_of_distance_over_step() {
        let graph = two_stops(100.0);
        let path = Path::new(vec!["S".into(), "G".into()]);
        let mut agent = Agent::bind(AgentKind::Scout, path.clone(), &graph).unwrap();
        assert_eq!(ticks_to_arrive(&mut agent, 8.0, 0.25), 50);

        let graph = two_stops(10.0);
        let mut agent = Agent::bind(AgentKind::Scout, path, &graph).unwrap();
        assert_eq!(ticks_to_arrive(&mut agent, 3.0, 1.0), 4);
    }

    #[test]
    fn edge_just_past_a_whole_step_count_takes_one_more_tick() {
        let path = Path::new(vec!["S".into(), "G".into()]);
        let graph = two_stops(100.000_000_01);
        let mut agent = Agent::bind(AgentKind::Scout, path.clone(), &graph).unwrap();
        assert_eq!(ticks_to_arrive(&mut agent, 1.0, 1.0), 101);

        let graph = two_stops(100.0);
        let mut agent = Agent::bind(AgentKind::Scout, path, &graph).unwrap();
        assert_eq!(ticks_to_arrive(&mut agent, 1.0, 1.0), 100);
    }

    #[test]
    fn inexact_steps_still_land_on_the_edge_end() {
        // 1/60 s at 10 units/s is not representable; 600 steps must cover 100.
        let path = Path::new(vec!["S".into(), "G".into()]);
        let graph = two_stops(100.0);
        let mut agent = Agent::bind(AgentKind::Hero, path, &graph).unwrap();
        assert_eq!(ticks_to_arrive(&mut agent, 10.0, 1.0 / 60.0), 600);
    }

    #[test]
    fn overshoot_is_dropped() {
        let graph = two_stops(10.0);
        let mut graph3 = graph.clone();
        graph3.add_location(Location::new("H", "Further", 20.0, 0.0)).unwrap();
        graph3.connect(&"G".into(), &"H".into()).unwrap();
        let path = Path::new(vec!["S".into(), "G".into(), "H".into()]);
        let mut agent = Agent::bind(AgentKind::Scout, path, &graph3).unwrap();

        // 6 + 6 = 12 crosses the first edge; the extra 2 is lost.
        agent.advance(6.0, 1.0);
        agent.advance(6.0, 1.0);
        assert_eq!(agent.edge_index(), 1);
        assert_eq!(agent.progress(), 0.0);
        assert_eq!(agent.position(), Position::new(10.0, 0.0));
    }

    #[test]
    fn interpolates_midway() {
        let graph = two_stops(100.0);
        let path = Path::new(vec!["S".into(), "G".into()]);
        let mut agent = Agent::bind(AgentKind::Hero, path, &graph).unwrap();
        let pos = agent.advance(25.0, 1.0);
        assert_eq!(pos, Position::new(25.0, 0.0));
    }

    #[test]
    fn finished_agent_stays_on_goal() {
        let graph = two_stops(10.0);
        let path = Path::new(vec!["S".into(), "G".into()]);
        let mut agent = Agent::bind(AgentKind::Hero, path, &graph).unwrap();
        agent.advance(100.0, 1.0);
        assert!(agent.is_finished());
        assert_eq!(agent.advance(100.0, 1.0), Position::new(10.0, 0.0));
        assert_eq!(agent.edge_index(), 1);
    }

    #[test]
    fn single_stop_path_is_already_finished() {
        let graph = two_stops(10.0);
        let agent = Agent::bind(AgentKind::Scout, Path::new(vec!["G".into()]), &graph).unwrap();
        assert!(agent.is_finished());
        assert_eq!(agent.position(), Position::new(10.0, 0.0));
    }

    #[test]
    fn unknown_stop_is_rejected() {
        let graph = two_stops(10.0);
        let path = Path::new(vec!["S".into(), "Nowhere".into()]);
        assert!(Agent::bind(AgentKind::Scout, path, &graph).is_err());
        assert!(Agent::bind(AgentKind::Scout, Path::default(), &graph).is_err());
    }

    #[test]
    fn restart_returns_to_first_stop() {
        let graph = two_stops(10.0);
        let path = Path::new(vec!["S".into(), "G".into()]);
        let mut agent = Agent::bind(AgentKind::Scout, path, &graph).unwrap();
        agent.advance(20.0, 1.0);
        agent.restart();
        assert_eq!(agent.position(), Position::new(0.0, 0.0));
        assert!(!agent.is_finished());
    }
}
