// iris_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::GridEstimator;
pub use crate::messages::{FilterInput, MotionCommand};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::belief::BeliefState;
pub use crate::grid::ColorGrid;
pub use crate::types::{wrap, Cell, Color};

// --- Error Taxonomy ---
pub use crate::errors::{GridError, SenseError};

// --- Estimation Algorithms ---
pub use crate::estimation::filters::histogram::{
    initialize_beliefs, predict, sense, HistogramFilter,
};

// --- Concrete Model Implementations ---
pub use crate::models::sensor::SensorModel;
