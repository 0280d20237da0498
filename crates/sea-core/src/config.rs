//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sea construction parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaConfig {
    /// Width of the sea grid
    pub width: i32,
    /// Height of the sea grid
    pub height: i32,
    /// Initial number of predators
    pub predators: i32,
    /// Initial number of victims
    pub victims: i32,
    /// Number of obstacles
    pub obstacles: i32,
    /// Days a predator survives without eating
    pub starvation_limit: u32,
    /// Days between two reproductions
    pub reproduction_interval: u32,
}

impl Default for SeaConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 6,
            predators: 1,
            victims: 10,
            obstacles: 1,
            starvation_limit: 5,
            reproduction_interval: 10,
        }
    }
}

impl SeaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "sea dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.predators < 0 || self.victims < 0 || self.obstacles < 0 {
            return Err(Error::Validation(format!(
                "sea populations must not be negative, got predators={} victims={} obstacles={}",
                self.predators, self.victims, self.obstacles
            )));
        }

        let capacity = self.cell_count();
        let occupied =
            self.predators as usize + self.victims as usize + self.obstacles as usize;
        if capacity <= occupied {
            return Err(Error::Validation(format!(
                "{} occupants do not fit a sea of {} cells with water to spare",
                occupied, capacity
            )));
        }

        Ok(())
    }

    /// Total number of cells. Only meaningful for a validated config.
    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}

/// Playback run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Sea construction parameters
    pub sea: SeaConfig,
    /// Maximum number of days to simulate
    pub max_days: u64,
    /// Pause between printed days (milliseconds, 0 disables pacing)
    pub day_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sea: SeaConfig::default(),
            max_days: 25,
            day_delay_ms: 200,
        }
    }
}

impl RunConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(raw)?;
        config.sea.validate()?;
        Ok(config)
    }
}
