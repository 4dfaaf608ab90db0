// iris_core/src/belief.rs

use crate::types::Cell;
use nalgebra::DMatrix;

/// The current probability distribution over grid cells: P(agent is at (y, x)).
///
/// Invariants after every completed update: every entry is non-negative and
/// the total is 1 within floating tolerance. The matrix is private; callers
/// treat the state as an opaque, replace-on-update value. Updates are pure
/// functions from a prior snapshot to a new snapshot, so readers of an old
/// snapshot are never invalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefState {
    weights: DMatrix<f64>,
}

impl BeliefState {
    /// The uniform distribution: `1 / (height * width)` in every cell.
    pub fn uniform(height: usize, width: usize) -> Self {
        assert!(
            height > 0 && width > 0,
            "BeliefState::uniform: dimensions must be positive"
        );
        let p = 1.0 / (height * width) as f64;
        Self {
            weights: DMatrix::from_element(height, width, p),
        }
    }

    pub(crate) fn from_matrix(weights: DMatrix<f64>) -> Self {
        Self { weights }
    }

    pub(crate) fn matrix(&self) -> &DMatrix<f64> {
        &self.weights
    }

    pub fn height(&self) -> usize {
        self.weights.nrows()
    }

    pub fn width(&self) -> usize {
        self.weights.ncols()
    }

    pub fn prob_at(&self, y: usize, x: usize) -> f64 {
        self.weights[(y, x)]
    }

    /// Sum over all cells. 1.0 within tolerance for any valid state.
    pub fn total(&self) -> f64 {
        self.weights.sum()
    }

    /// The most probable cell and its probability. Ties resolve to the first
    /// cell in row-major order.
    pub fn max_cell(&self) -> (Cell, f64) {
        let mut best = (Cell::default(), f64::NEG_INFINITY);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let p = self.weights[(y, x)];
                if p > best.1 {
                    best = (Cell::new(y, x), p);
                }
            }
        }
        best
    }

    /// Row-major iteration over `(cell, probability)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        let width = self.width();
        (0..self.height()).flat_map(move |y| {
            (0..width).map(move |x| (Cell::new(y, x), self.weights[(y, x)]))
        })
    }
}
