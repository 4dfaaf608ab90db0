// iris_core/src/grid.rs

use crate::errors::GridError;
use crate::types::{wrap, Color};

/// The world map: a rectangular, toroidal matrix of color labels.
///
/// Immutable for the simulation's duration. `from_rows` is the only
/// constructor, so every `ColorGrid` in existence has at least one row, at
/// least one column, and rows of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    cells: Vec<Color>,
    height: usize,
    width: usize,
}

impl ColorGrid {
    /// Validates the row matrix and builds the grid.
    ///
    /// Fails with [`GridError::Empty`] when there are no rows or no columns,
    /// and with [`GridError::Ragged`] when row lengths differ.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, GridError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let width = rows[0].len();
        let mut cells = Vec::with_capacity(height * width);
        for (row, labels) in rows.into_iter().enumerate() {
            if labels.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    got: labels.len(),
                });
            }
            cells.extend(labels);
        }

        Ok(Self {
            cells,
            height,
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        // Unreachable for a constructed grid, but the conventional pair to len().
        self.cells.is_empty()
    }

    /// The label at an in-bounds cell. Panics on out-of-range indices; use
    /// [`ColorGrid::wrapped_color_at`] for toroidal lookups.
    pub fn color_at(&self, y: usize, x: usize) -> Color {
        assert!(y < self.height && x < self.width, "cell index out of range");
        self.cells[y * self.width + x]
    }

    /// Toroidal lookup: indices of any sign wrap onto the grid.
    pub fn wrapped_color_at(&self, iy: i64, ix: i64) -> Color {
        let y = wrap(iy, self.height);
        let x = wrap(ix, self.width);
        self.cells[y * self.width + x]
    }

    /// The distinct labels present in the grid, in first-appearance order.
    pub fn palette(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = Vec::new();
        for &cell in &self.cells {
            if !colors.contains(&cell) {
                colors.push(cell);
            }
        }
        colors
    }
}
