//! Fixed-rate driver for real-time stepping.
//!
//! Steps a [`Simulation`] on a tokio interval so that simulated time keeps
//! pace with wall-clock time (60 ticks per second by default).
//!
//! # Feature Flag
//!
//! This module requires the `async` feature:
//! ```toml
//! verdantia-runtime = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use verdantia_runtime::async_runtime::TickTimer;
//! use verdantia_runtime::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut sim = Simulation::verdantia(SimulationConfig::default()).unwrap();
//!     let mut timer = TickTimer::default();
//!     timer.run_timed(&mut sim, 600).await.unwrap();
//! }
//! ```

#![cfg(feature = "async")]

use crate::simulation::{Simulation, SimulationEvent};
use tokio::time::{Duration, Interval, MissedTickBehavior};
use verdantia_core::error::Result;

/// Reference stepping rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// Paces simulation ticks on a fixed interval.
pub struct TickTimer {
    interval: Interval,
    dt: f64,
}

impl TickTimer {
    /// A timer firing `ticks_per_second` times per second (at least once).
    pub fn new(ticks_per_second: u32) -> Self {
        let rate = ticks_per_second.max(1);
        let period = Duration::from_secs_f64(1.0 / f64::from(rate));
        let mut interval = tokio::time::interval(period);
        // A late tick is run once, not in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            dt: period.as_secs_f64(),
        }
    }

    /// Simulated seconds per tick.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Wait for the next tick interval.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Step `sim` for `ticks` ticks at the timer's rate.
    pub async fn run_timed(
        &mut self,
        sim: &mut Simulation,
        ticks: u64,
    ) -> Result<Vec<Vec<SimulationEvent>>> {
        let mut all_events = Vec::with_capacity(ticks as usize);
        for _ in 0..ticks {
            self.tick().await;
            all_events.push(sim.tick(self.dt)?);
        }
        Ok(all_events)
    }

    /// Step `sim` until `callback` returns `false` or `max_ticks` is reached.
    ///
    /// The callback receives the tick number and that tick's events.
    pub async fn run_with_callback<F>(
        &mut self,
        sim: &mut Simulation,
        max_ticks: u64,
        mut callback: F,
    ) -> Result<u64>
    where
        F: FnMut(u64, &[SimulationEvent]) -> bool,
    {
        for n in 0..max_ticks {
            self.tick().await;
            let events = sim.tick(self.dt)?;
            if !callback(n, &events) {
                return Ok(n + 1);
            }
        }
        Ok(max_ticks)
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}
