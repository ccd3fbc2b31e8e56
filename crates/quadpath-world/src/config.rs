//! Simulation configuration.
//!
//! Provides world size, tree resolution and agent movement parameters.
//! Configuration can be loaded from and saved to a TOML file.

use std::fs;
use std::io;
use std::path::Path;

use quadpath_common::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "quadpath.toml";

/// Errors raised while reading or writing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    /// The file exists but is not valid configuration
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be encoded
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    /// World width in units
    pub world_width: f32,
    /// World height in units
    pub world_height: f32,
    /// Cells smaller than this are never split (1.0-256.0)
    pub min_cell_size: f32,
    /// Random seed for collision sidesteps (None = random)
    pub seed: Option<u64>,

    // === Agents ===
    /// Distance moved per tick
    pub agent_speed: f32,
    /// Edge length of an agent's box
    pub agent_size: f32,
    /// Waypoints closer than this count as reached
    pub arrive_radius: f32,
    /// Ticks between planning episodes
    pub replan_interval: u64,

    // === Run ===
    /// Number of ticks to simulate
    pub ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            min_cell_size: 8.0,
            seed: None,

            agent_speed: 2.0,
            agent_size: 10.0,
            arrive_radius: 2.0,
            replan_interval: 30,

            ticks: 600,
        }
    }
}

impl SimConfig {
    /// Load configuration from a specific path.
    /// Returns default config if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.validate();
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            warn!(
                "World size {} x {} has no area, using defaults",
                self.world_width, self.world_height
            );
            let defaults = Self::default();
            self.world_width = defaults.world_width;
            self.world_height = defaults.world_height;
        }

        self.min_cell_size = self.min_cell_size.clamp(1.0, 256.0);
        self.agent_speed = self.agent_speed.max(0.0);
        self.agent_size = self.agent_size.max(1.0);
        self.arrive_radius = self.arrive_radius.max(0.0);
        self.replan_interval = self.replan_interval.max(1);
    }

    /// Bounds of the simulated world, anchored at the origin.
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.world_width, self.world_height)
    }
}
