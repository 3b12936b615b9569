//! Simulation - the clock that drives every component.
//!
//! The simulation owns all mutable state (pheromone field, best path, agent
//! swarm, hero) and mutates it only from [`Simulation::tick`]. Each tick:
//! 1. Evaporate every trail by `rho`
//! 2. Deposit `alpha / distance` along the best path
//! 3. Run a construction round if one was requested or is scheduled
//! 4. Advance scouts, and the hero once released
//! 5. Evaluate the hero's gating predicate
//! 6. Advance the clock
//!
//! Steps 1 and 2 are computed on a staged copy of the field and committed
//! together, so a failed update leaves the field as it was.

use crate::construct::{constructor_for, construct_round};
use crate::export::{self, EdgeTrail};
use crate::gating::{self, GateView};
use crate::graph_builder;
use crate::map;
use crate::pheromone::PheromoneField;
use crate::selector::{euclidean_length, scout_counts, BestPath, PathScore, PathSelector};
use crate::stepper::{Agent, AgentKind};
use crate::topology_impl::PetRouteGraph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use verdantia_core::construct::PathConstructor;
use verdantia_core::error::{Result, VerdantiaError};
use verdantia_core::params::*;
use verdantia_core::topology::RouteGraph;
use verdantia_core::types::*;

/// Everything needed to set up a simulation.
///
/// Defaults target the built-in map: start `BG1`, goal `BST`, complete
/// graph, ant colony construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start: LocationId,
    pub goal: LocationId,
    pub edge_mode: EdgeMode,
    pub strategy: Strategy,
    pub aco: AcoParams,
    /// Trail every edge starts with (default: 1.0).
    pub initial_trail: f64,
    /// Candidates built per round by random permutation (default: 3).
    pub candidate_paths: usize,
    /// Scouts spread over the candidates by random permutation (default: 100).
    pub scouts_per_round: usize,
    /// Ants released per round by ant colony construction (default: 20).
    pub ants_per_round: usize,
    /// How often one location may appear on a path (default: 1).
    pub visit_limit: usize,
    /// Step bound of one construction; 0 means four times the location count.
    pub max_steps: usize,
    /// Scout speed in map units per second (default: 120).
    pub scout_speed: f64,
    /// Hero speed in map units per second (default: 50).
    pub hero_speed: f64,
    pub replacement: ReplacementPolicy,
    pub gating: GatingPolicy,
    pub schedule: RoundSchedule,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: map::DEFAULT_START.into(),
            goal: map::DEFAULT_GOAL.into(),
            edge_mode: EdgeMode::Complete,
            strategy: Strategy::AntColony,
            aco: AcoParams::default(),
            initial_trail: 1.0,
            candidate_paths: 3,
            scouts_per_round: 100,
            ants_per_round: 20,
            visit_limit: 1,
            max_steps: 0,
            scout_speed: 120.0,
            hero_speed: 50.0,
            replacement: ReplacementPolicy::OnImprovement,
            gating: GatingPolicy::ScoutMajority { fraction: 0.5 },
            schedule: RoundSchedule::Manual,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Default configuration for a custom map.
    pub fn for_route(start: impl Into<LocationId>, goal: impl Into<LocationId>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn ends(&self) -> RouteEnds {
        RouteEnds {
            start: self.start.clone(),
            goal: self.goal.clone(),
        }
    }

    /// Reject anything the tick loop could not run with.
    pub fn validate(&self) -> Result<()> {
        self.aco.validate()?;
        validate_positive("initial_trail", self.initial_trail)?;
        validate_positive("scout_speed", self.scout_speed)?;
        validate_positive("hero_speed", self.hero_speed)?;
        for (field, value) in [
            ("candidate_paths", self.candidate_paths),
            ("scouts_per_round", self.scouts_per_round),
            ("ants_per_round", self.ants_per_round),
            ("visit_limit", self.visit_limit),
        ] {
            if value == 0 {
                return Err(VerdantiaError::invalid_config(field, "0", "must be at least 1"));
            }
        }
        self.gating.validate()?;
        self.schedule.validate()
    }
}

/// Event emitted by the simulation during a tick, reset or round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A construction round finished.
    RoundCompleted { round: u64, built: usize, valid: usize },
    /// The round's winner became the best path.
    BestPathReplaced { round: u64, path: Path, score: PathScore },
    /// The round's winner did not beat the best path.
    BestPathKept { round: u64, challenger: PathScore },
    /// No candidate of the round reached the goal.
    NoCandidate { round: u64 },
    /// The hero's gating predicate held.
    HeroReleased { tick: Tick },
    /// The hero reached the goal.
    HeroArrived { tick: Tick },
    /// State was reset to its initial form.
    Reset,
    /// A tick completed.
    TickComplete { tick: Tick, elapsed: f64 },
}

/// Where an agent currently is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentPosition {
    pub kind: AgentKind,
    pub position: Position,
}

/// Statistics about the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub tick: Tick,
    pub elapsed: f64,
    pub rounds: u64,
    pub locations: usize,
    pub edges: usize,
    pub scouts: usize,
    pub scouts_finished: usize,
    pub best_length: Option<f64>,
    pub hero_released: bool,
    pub hero_arrived: bool,
    pub trail_min: f64,
    pub trail_max: f64,
    pub trail_mean: f64,
}

/// Serializable view of the whole simulation at one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub id: SimulationId,
    pub locations: Vec<Location>,
    pub edges: Vec<EdgeTrail>,
    pub best: Option<BestPath>,
    pub agents: Vec<AgentPosition>,
    pub stats: SimulationStats,
}

/// A running pheromone path-finding simulation.
///
/// Owns every piece of mutable state; independent instances share nothing.
pub struct Simulation {
    id: SimulationId,
    config: SimulationConfig,
    locations: Vec<Location>,
    graph: PetRouteGraph,
    pheromones: PheromoneField,
    constructor: Box<dyn PathConstructor>,
    selector: PathSelector,
    rng: ChaCha8Rng,
    /// Nearest location to the start, for first-hop gating.
    first_hop: Option<LocationId>,
    best: Option<BestPath>,
    candidates: Vec<Path>,
    scouts: Vec<Agent>,
    hero: Option<Agent>,
    hero_released: bool,
    hero_arrived: bool,
    running: bool,
    round_requested: bool,
    rounds: u64,
    elapsed: f64,
    round_elapsed: f64,
    tick_count: Tick,
}

/// The simulation state value that rendering and control layers hold.
pub type SimulationState = Simulation;

impl Simulation {
    /// Set up a simulation over `locations` with default parameters.
    ///
    /// The default start and goal are those of the built-in map; use
    /// [`Simulation::from_config`] with [`SimulationConfig::for_route`] for
    /// other maps.
    pub fn initialize(locations: Vec<Location>, edge_mode: EdgeMode, seed: u64) -> Result<Self> {
        let config = SimulationConfig {
            edge_mode,
            seed,
            ..SimulationConfig::default()
        };
        Self::from_config(locations, config)
    }

    /// Set up a simulation and run its first round.
    pub fn from_config(locations: Vec<Location>, config: SimulationConfig) -> Result<Self> {
        let mut sim = Self::assemble(SimulationId::new(), locations, config)?;
        let events = sim.run_round();
        info!(
            sim = %sim.id,
            locations = sim.locations.len(),
            edges = sim.graph.edge_count(),
            strategy = sim.constructor.name(),
            best = sim.best.is_some(),
            "Simulation initialized"
        );
        debug!(sim = %sim.id, ?events, "First round");
        Ok(sim)
    }

    /// The built-in Verdantia map with `config`.
    pub fn verdantia(config: SimulationConfig) -> Result<Self> {
        Self::from_config(map::verdantia_map(), config)
    }

    /// Validated state with no round run yet.
    fn assemble(id: SimulationId, locations: Vec<Location>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let ends = config.ends();
        let graph = graph_builder::build(&locations, config.edge_mode, &ends)?;
        let pheromones = PheromoneField::init(&graph, config.initial_trail)?;
        let first_hop = graph.nearest_neighbor(&ends.start);

        Ok(Self {
            id,
            constructor: constructor_for(config.strategy),
            selector: PathSelector::new(config.strategy, config.replacement),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            locations,
            graph,
            pheromones,
            first_hop,
            best: None,
            candidates: Vec::new(),
            scouts: Vec::new(),
            hero: None,
            hero_released: false,
            hero_arrived: false,
            running: true,
            round_requested: false,
            rounds: 0,
            elapsed: 0.0,
            round_elapsed: 0.0,
            tick_count: 0,
        })
    }

    /// Run one simulation step of `dt` seconds.
    ///
    /// A paused simulation returns no events and changes nothing.
    pub fn tick(&mut self, dt: f64) -> Result<Vec<SimulationEvent>> {
        validate_non_negative("dt", dt)?;
        if !self.running {
            return Ok(Vec::new());
        }
        let mut events = Vec::new();

        // Phase 1: Evaporate and reinforce on a staged field
        let mut staged = self.pheromones.clone();
        staged.decay(self.config.aco.rho)?;
        if let Some(best) = &self.best {
            staged.reinforce_path(&self.graph, &best.path, self.config.aco.alpha)?;
        }
        self.pheromones = staged;

        // Phase 2: New round
        if let RoundSchedule::Every { seconds } = self.config.schedule {
            if self.round_elapsed >= seconds {
                self.round_requested = true;
            }
        }
        if self.round_requested {
            events.extend(self.run_round());
        }

        // Phase 3: Move agents
        for scout in &mut self.scouts {
            scout.advance(self.config.scout_speed, dt);
        }
        if self.hero_released && !self.hero_arrived {
            if let Some(hero) = &mut self.hero {
                hero.advance(self.config.hero_speed, dt);
                if hero.is_finished() {
                    self.hero_arrived = true;
                    info!(sim = %self.id, tick = self.tick_count, elapsed = self.elapsed + dt, "Hero arrived");
                    events.push(SimulationEvent::HeroArrived {
                        tick: self.tick_count,
                    });
                }
            }
        }

        // Phase 4: Hero gating
        if !self.hero_released && self.hero.is_some() {
            let view = GateView {
                scouts: &self.scouts,
                round_elapsed: self.round_elapsed,
                first_hop: self.first_hop.as_ref(),
            };
            if gating::is_ready(&self.config.gating, &view) {
                self.hero_released = true;
                debug!(sim = %self.id, tick = self.tick_count, "Hero released");
                events.push(SimulationEvent::HeroReleased {
                    tick: self.tick_count,
                });
            }
        }

        // Phase 5: Advance the clock
        self.elapsed += dt;
        self.round_elapsed += dt;
        events.push(SimulationEvent::TickComplete {
            tick: self.tick_count,
            elapsed: self.elapsed,
        });
        self.tick_count += 1;

        Ok(events)
    }

    /// Run `ticks` steps of `dt` seconds each.
    pub fn run(&mut self, ticks: u64, dt: f64) -> Result<Vec<Vec<SimulationEvent>>> {
        let mut all_events = Vec::with_capacity(ticks as usize);
        for _ in 0..ticks {
            all_events.push(self.tick(dt)?);
        }
        Ok(all_events)
    }

    /// Construct and select, then re-seed the swarm and the hero.
    fn run_round(&mut self) -> Vec<SimulationEvent> {
        self.rounds += 1;
        let round = self.rounds;
        let mut events = Vec::new();

        let ends = self.config.ends();
        let params = self.construction_params();
        let count = match self.config.strategy {
            Strategy::RandomPermutation => self.config.candidate_paths,
            Strategy::AntColony => self.config.ants_per_round,
        };
        let snapshot = self.pheromones.snapshot();
        let built = construct_round(
            self.constructor.as_ref(),
            &self.graph,
            &snapshot,
            &params,
            count,
            &mut self.rng,
        );
        let candidates: Vec<Path> = built.into_iter().flatten().collect();

        // Scouts pick uniformly among the candidates; ants walk their own path.
        let scout_paths: Vec<Path> = match self.config.strategy {
            Strategy::RandomPermutation if !candidates.is_empty() => (0..self.config.scouts_per_round)
                .map(|_| candidates[self.rng.gen_range(0..candidates.len())].clone())
                .collect(),
            Strategy::RandomPermutation => Vec::new(),
            Strategy::AntColony => candidates.clone(),
        };
        let counts = scout_counts(&scout_paths);
        events.push(SimulationEvent::RoundCompleted {
            round,
            built: count,
            valid: candidates.len(),
        });

        match self.selector.select(&candidates, &counts, &self.graph, &ends) {
            None => {
                warn!(sim = %self.id, round, built = count, "No candidate reached the goal");
                events.push(SimulationEvent::NoCandidate { round });
            }
            Some(winner) if self.selector.should_replace(self.best.as_ref(), &winner.score) => {
                let length = euclidean_length(&winner.path, &self.graph);
                info!(sim = %self.id, round, path = %winner.path, length, "Best path replaced");
                events.push(SimulationEvent::BestPathReplaced {
                    round,
                    path: winner.path.clone(),
                    score: winner.score,
                });
                self.best = Some(BestPath {
                    path: winner.path,
                    score: winner.score,
                    length,
                    round,
                });
            }
            Some(winner) => {
                debug!(sim = %self.id, round, challenger = ?winner.score, "Best path kept");
                events.push(SimulationEvent::BestPathKept {
                    round,
                    challenger: winner.score,
                });
            }
        }

        self.scouts = scout_paths
            .into_iter()
            .filter_map(|path| bind_or_warn(self.id, AgentKind::Scout, path, &self.graph))
            .collect();
        self.hero = self
            .best
            .as_ref()
            .and_then(|best| bind_or_warn(self.id, AgentKind::Hero, best.path.clone(), &self.graph));
        self.candidates = candidates;
        self.hero_released = false;
        self.hero_arrived = false;
        self.round_elapsed = 0.0;
        self.round_requested = false;

        debug!(
            sim = %self.id,
            round,
            valid = self.candidates.len(),
            scouts = self.scouts.len(),
            "Round complete"
        );
        events
    }

    fn construction_params(&self) -> ConstructionParams {
        let max_steps = match self.config.max_steps {
            0 => 4 * self.graph.location_count(),
            n => n,
        };
        ConstructionParams {
            ends: self.config.ends(),
            alpha: self.config.aco.alpha,
            beta: self.config.aco.beta,
            visit_limit: self.config.visit_limit,
            max_steps,
        }
    }

    // --- Control ---

    /// Pause or resume ticking.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask for a construction round on the next tick.
    pub fn request_new_round(&mut self) {
        self.round_requested = true;
    }

    /// Return to the freshly initialized state and run a first round.
    ///
    /// The new state is built aside and swapped in whole. The running
    /// flag and the simulation ID survive.
    pub fn reset(&mut self) -> Result<Vec<SimulationEvent>> {
        let mut fresh = Self::assemble(self.id, self.locations.clone(), self.config.clone())?;
        fresh.running = self.running;
        let mut events = vec![SimulationEvent::Reset];
        events.extend(fresh.run_round());
        *self = fresh;
        info!(sim = %self.id, "Simulation reset");
        Ok(events)
    }

    // --- Configuration ---

    /// Replace all three pheromone parameters at once.
    pub fn set_aco(&mut self, aco: AcoParams) -> Result<()> {
        aco.validate()?;
        self.config.aco = aco;
        Ok(())
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.set_aco(AcoParams { alpha, ..self.config.aco })
    }

    pub fn set_beta(&mut self, beta: f64) -> Result<()> {
        self.set_aco(AcoParams { beta, ..self.config.aco })
    }

    pub fn set_rho(&mut self, rho: f64) -> Result<()> {
        self.set_aco(AcoParams { rho, ..self.config.aco })
    }

    // --- Queries ---

    pub fn id(&self) -> SimulationId {
        self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn graph(&self) -> &PetRouteGraph {
        &self.graph
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Every directed edge, sorted by key.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = self.graph.edges();
        edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        edges
    }

    pub fn pheromone_snapshot(&self) -> PheromoneSnapshot {
        self.pheromones.snapshot()
    }

    pub fn best_path(&self) -> Option<&Path> {
        self.best.as_ref().map(|b| &b.path)
    }

    pub fn best(&self) -> Option<&BestPath> {
        self.best.as_ref()
    }

    /// Valid candidates of the latest round.
    pub fn candidates(&self) -> &[Path] {
        &self.candidates
    }

    pub fn scouts(&self) -> &[Agent] {
        &self.scouts
    }

    pub fn hero(&self) -> Option<&Agent> {
        self.hero.as_ref()
    }

    pub fn hero_position(&self) -> Option<Position> {
        self.hero.as_ref().map(Agent::position)
    }

    pub fn hero_released(&self) -> bool {
        self.hero_released
    }

    pub fn hero_arrived(&self) -> bool {
        self.hero_arrived
    }

    /// Positions of all scouts followed by the hero.
    pub fn agent_positions(&self) -> Vec<AgentPosition> {
        self.scouts
            .iter()
            .chain(self.hero.iter())
            .map(|agent| AgentPosition {
                kind: agent.kind(),
                position: agent.position(),
            })
            .collect()
    }

    /// Simulated seconds since initialize or reset.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    pub fn tick_count(&self) -> Tick {
        self.tick_count
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn stats(&self) -> SimulationStats {
        let (trail_min, trail_max, trail_mean) = self.pheromones.summary();
        SimulationStats {
            tick: self.tick_count,
            elapsed: self.elapsed,
            rounds: self.rounds,
            locations: self.graph.location_count(),
            edges: self.graph.edge_count(),
            scouts: self.scouts.len(),
            scouts_finished: self.scouts.iter().filter(|s| s.is_finished()).count(),
            best_length: self.best.as_ref().map(|b| b.length),
            hero_released: self.hero_released,
            hero_arrived: self.hero_arrived,
            trail_min,
            trail_max,
            trail_mean,
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            id: self.id,
            locations: self.locations.clone(),
            edges: export::edge_trails(self),
            best: self.best.clone(),
            agents: self.agent_positions(),
            stats: self.stats(),
        }
    }
}

/// Bind an agent, logging and skipping a path the graph cannot place.
fn bind_or_warn(
    sim: SimulationId,
    kind: AgentKind,
    path: Path,
    graph: &PetRouteGraph,
) -> Option<Agent> {
    match Agent::bind(kind, path, graph) {
        Ok(agent) => Some(agent),
        Err(err) => {
            warn!(sim = %sim, ?kind, error = %err, "Agent could not be placed on its path");
            None
        }
    }
}
