// iris_sim/src/simulation/core/pose.rs

use iris_core::prelude::{wrap, Cell, MotionCommand};

/// The perfect, ground truth pose. Only for sensor simulation and reporting;
/// the estimator never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundTruthPose {
    pub current: Cell,
    /// Where the agent was before the last commanded move.
    pub previous: Cell,
}

impl GroundTruthPose {
    pub fn new(start: Cell) -> Self {
        Self {
            current: start,
            previous: start,
        }
    }

    /// Advances the pose by a commanded displacement, wrapping on the torus.
    pub fn advance(&mut self, command: MotionCommand, height: usize, width: usize) {
        self.previous = self.current;
        self.current = Cell::new(
            wrap(self.current.y as i64 + command.dy, height),
            wrap(self.current.x as i64 + command.dx, width),
        );
    }
}
