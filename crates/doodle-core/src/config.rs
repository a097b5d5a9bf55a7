//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid
    pub size: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { size: 20 }
    }
}

impl WorldConfig {
    /// Largest side length whose cell count still fits in an `i32`
    pub const MAX_SIZE: i32 = 46340;

    /// Check that the side length is positive and within [`Self::MAX_SIZE`].
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid size must be positive, got {}",
                self.size
            )));
        }
        if self.size > Self::MAX_SIZE {
            return Err(Error::InvalidConfig(format!(
                "grid size must be at most {}, got {}",
                Self::MAX_SIZE,
                self.size
            )));
        }
        Ok(())
    }

    /// Number of cells on the grid
    pub fn capacity(&self) -> usize {
        let side = self.size.max(0) as usize;
        side * side
    }
}

/// Initial population sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of predators (doodlebugs) placed at start
    pub predators: usize,
    /// Number of prey (ants) placed at start
    pub prey: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            predators: 5,
            prey: 100,
        }
    }
}

impl PopulationConfig {
    pub fn total(&self) -> usize {
        self.predators + self.prey
    }
}

/// What a successful breeding does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingMode {
    /// The parent moves into the free neighbor; population is unchanged
    Relocate,
    /// A new organism of the parent's kind appears in the free neighbor and
    /// the parent's move counter restarts
    Spawn,
}

/// Marker written into the cell a relocating prey moves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreyBreedMark {
    Predator,
    Prey,
}

/// Per-organism behavioral rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Predator breeds when its move counter equals this value
    pub predator_breed_age: u32,
    /// Prey breeds when its move counter equals this value
    pub prey_breed_age: u32,
    /// Predator is removed once its starve counter reaches this value
    pub starve_limit: u32,
    /// Random direction picks a predator makes when no prey is adjacent
    pub predator_move_attempts: u32,
    /// Random direction picks a prey makes before giving up for the tick
    pub prey_move_attempts: u32,
    pub breeding: BreedingMode,
    pub prey_breed_mark: PreyBreedMark,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            predator_breed_age: 8,
            prey_breed_age: 3,
            starve_limit: 3,
            predator_move_attempts: 4,
            prey_move_attempts: 5,
            breeding: BreedingMode::Relocate,
            prey_breed_mark: PreyBreedMark::Predator,
        }
    }
}

/// Complete configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Ticks to run in batch mode
    pub num_ticks: u64,
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub rules: RuleConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_ticks: 100,
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            rules: RuleConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Upper bound on `num_ticks`; every tick keeps a report in the run history
    pub const MAX_TICKS: u64 = 1_000_000;

    /// Load a configuration from a JSON file. Missing sections keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded simulation config");
        config.validate()?;
        Ok(config)
    }

    /// Check that the requested population fits on the grid.
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        let requested = self.population.total();
        let capacity = self.world.capacity();
        if requested > capacity {
            return Err(Error::CapacityExceeded { requested, capacity });
        }

        if self.num_ticks > Self::MAX_TICKS {
            return Err(Error::InvalidConfig(format!(
                "num_ticks must be at most {}, got {}",
                Self::MAX_TICKS,
                self.num_ticks
            )));
        }

        if self.rules.predator_move_attempts == 0 || self.rules.prey_move_attempts == 0 {
            return Err(Error::InvalidConfig(
                "move attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
