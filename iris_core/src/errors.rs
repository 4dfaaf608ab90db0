// iris_core/src/errors.rs

use thiserror::Error;

/// Rejections raised while constructing a [`crate::grid::ColorGrid`].
///
/// These are fatal at initialization and never recovered internally: a grid
/// that fails validation is never handed to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("grid needs at least one row and one column")]
    Empty,
    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// Raised when a sense update's total evidence collapses to zero.
///
/// Recoverable by policy: the caller keeps the prior belief snapshot and
/// surfaces a diagnostic instead of propagating a zero-sum distribution.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SenseError {
    #[error("sense update evidence summed to {total_evidence}; prior retained")]
    DegenerateBelief { total_evidence: f64 },
}
