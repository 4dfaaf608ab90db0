// iris_core/src/messages.rs

use crate::types::Color;

/// A commanded displacement in whole grid cells, applied modulo the grid
/// dimensions. Any magnitude and sign is valid on the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionCommand {
    pub dy: i64,
    pub dx: i64,
}

impl MotionCommand {
    pub fn new(dy: i64, dx: i64) -> Self {
        Self { dy, dx }
    }
}

/// The universal input packet for all `GridEstimator` implementations.
/// The implementation is responsible for interpreting each variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterInput {
    /// One (possibly incorrect) color reading from the agent's cell.
    Observation { color: Color },
    /// A displacement the agent was commanded to drive.
    Motion { command: MotionCommand },
}
