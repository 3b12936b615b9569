//! Configuration management for the Verdantia CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verdantia::prelude::*;

pub const CONFIG_FILE: &str = "verdantia.toml";

/// Contents of `verdantia.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Custom map; the built-in map is used when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Simulated seconds per run.
    #[serde(default = "default_seconds")]
    pub seconds: f64,
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
    /// Strongest trails listed in the summary.
    #[serde(default = "default_top_trails")]
    pub top_trails: usize,
}

// Default value functions
fn default_seconds() -> f64 { 30.0 }
fn default_ticks_per_second() -> u32 { 60 }
fn default_top_trails() -> usize { 5 }

impl Default for Config {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            simulation: SimulationConfig::default(),
            locations: Vec::new(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seconds: default_seconds(),
            ticks_per_second: default_ticks_per_second(),
            top_trails: default_top_trails(),
        }
    }
}

impl RunConfig {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second.max(1))
    }

    /// Ticks needed to cover `seconds` of simulated time.
    pub fn ticks_for(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * f64::from(self.ticks_per_second.max(1))).ceil() as u64
    }
}

impl Config {
    /// Load config from verdantia.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// The configured map, or the built-in one.
    pub fn map(&self) -> Vec<Location> {
        if self.locations.is_empty() {
            verdantia_map()
        } else {
            self.locations.clone()
        }
    }

    /// Set up a simulation from this config.
    pub fn build_simulation(&self) -> Result<Simulation> {
        Simulation::from_config(self.map(), self.simulation.clone()).map_err(|err| {
            let section = if err.is_config() { "[simulation]" } else { "map" };
            anyhow::Error::new(err).context(format!("Invalid {section} in {CONFIG_FILE}"))
        })
    }
}

/// Find verdantia.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
