// iris_sim/src/simulation/config/mod.rs

//! This module handles loading, resolving, and validating all simulation
//! configuration from disk.

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use iris_core::prelude::{Cell, Color, ColorGrid, GridError, SensorModel};

/// Everything that can go wrong between a scenario file and a runnable
/// scenario. All variants are fatal at startup.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to load scenario file: {0}")]
    Load(#[from] figment::Error),
    #[error("failed to parse scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid world grid: {0}")]
    Grid(#[from] GridError),
    #[error("sensor weights need p_hit > 0 and p_miss >= 0, got p_hit = {p_hit}, p_miss = {p_miss}")]
    Sensor { p_hit: f64, p_miss: f64 },
    #[error("motion blur factor must be finite and non-negative, got {0}")]
    Blur(f64),
    #[error("start pose ({y}, {x}) is outside the {height}x{width} grid")]
    StartPose {
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    },
}

fn default_steps() -> u64 {
    20
}

fn default_blur() -> f64 {
    0.1
}

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use defaults if the [simulation] section is missing
    pub simulation: SimulationSection,

    pub world: WorldSection,

    /// Deserializes straight into the core's sensor model; `p_miss`
    /// defaults to 1.0.
    pub sensor: SensorModel,

    #[serde(default)]
    pub motion: MotionSection,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Optional seed for the pseudo-random number generator for determinism.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of sense/move cycles to run.
    #[serde(default = "default_steps")]
    pub steps: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            seed: None,
            steps: default_steps(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSection {
    /// One string per grid row, one character per cell color.
    pub rows: Vec<String>,
    /// Optional `[y, x]` starting cell; defaults to the grid center.
    #[serde(default)]
    pub start_pose: Option<[usize; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionSection {
    /// Blur factor spreading belief mass onto neighbors after each move.
    #[serde(default = "default_blur")]
    pub blur: f64,
}

impl Default for MotionSection {
    fn default() -> Self {
        Self {
            blur: default_blur(),
        }
    }
}

// =========================================================================
// == Resolution ==
// =========================================================================

/// A fully validated scenario, ready to drive a simulation.
#[derive(Debug, Clone)]
pub struct ResolvedScenario {
    pub grid: ColorGrid,
    pub sensor: SensorModel,
    pub blur: f64,
    pub steps: u64,
    pub seed: Option<u64>,
    pub start: Cell,
}

impl ScenarioConfig {
    /// Loads a scenario file from disk.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        Ok(Figment::new().merge(Toml::file(path)).extract()?)
    }

    /// Parses a scenario from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(raw)?)
    }

    /// Validates every section and produces the runnable scenario.
    pub fn resolve(self) -> Result<ResolvedScenario, ScenarioError> {
        let rows = self
            .world
            .rows
            .iter()
            .map(|row| row.chars().map(Color).collect())
            .collect();
        let grid = ColorGrid::from_rows(rows)?;

        let SensorModel { p_hit, p_miss } = self.sensor;
        if !(p_hit.is_finite() && p_hit > 0.0) || !(p_miss.is_finite() && p_miss >= 0.0) {
            return Err(ScenarioError::Sensor { p_hit, p_miss });
        }

        let blur = self.motion.blur;
        if !(blur.is_finite() && blur >= 0.0) {
            return Err(ScenarioError::Blur(blur));
        }

        let start = match self.world.start_pose {
            Some([y, x]) => {
                if y >= grid.height() || x >= grid.width() {
                    return Err(ScenarioError::StartPose {
                        y,
                        x,
                        height: grid.height(),
                        width: grid.width(),
                    });
                }
                Cell::new(y, x)
            }
            None => Cell::new(grid.height() / 2, grid.width() / 2),
        };

        Ok(ResolvedScenario {
            grid,
            sensor: self.sensor,
            blur,
            steps: self.simulation.steps,
            seed: self.simulation.seed,
            start,
        })
    }
}
