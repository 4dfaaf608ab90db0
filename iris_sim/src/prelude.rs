// iris_sim/src/prelude.rs

// Re-export the entire iris_core prelude so you can easily access
// pure types like `ColorGrid`, `BeliefState`, `GridEstimator`, etc.
pub use iris_core::prelude::*;

// Re-export common simulation-specific types for easy access.
pub use crate::cli::Cli;
pub use crate::simulation::config::{ResolvedScenario, ScenarioConfig, ScenarioError};
pub use crate::simulation::core::pose::GroundTruthPose;
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::driver::{BeliefReport, Simulation};
