//! # Verdantia Runtime
//!
//! The simulation engine: route graph, pheromone field, path construction,
//! path selection, agent stepping and the clock that drives them.
//!
//! A [`Simulation`](simulation::Simulation) owns all of its state and is
//! advanced one tick at a time. Rendering reads snapshots; control flips
//! the running flag, resets, or asks for a new round.

pub mod topology_impl;
pub mod graph_builder;
pub mod pheromone;
pub mod construct;
pub mod selector;
pub mod stepper;
pub mod gating;
pub mod map;
pub mod simulation;
pub mod export;
pub mod prelude;

#[cfg(feature = "async")]
pub mod async_runtime;
