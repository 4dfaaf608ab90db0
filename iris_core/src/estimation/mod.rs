// iris_core/src/estimation/mod.rs

use crate::belief::BeliefState;
use crate::messages::FilterInput;

/// The contract for any algorithm that performs the "localizer" role.
/// Its sole responsibility is to maintain a belief over the agent's cell.
pub trait GridEstimator: Send + Sync {
    /// The single, unified method for processing all types of input data.
    /// The implementation is responsible for interpreting the `FilterInput`.
    fn process(&mut self, input: &FilterInput);

    /// Returns a reference to the current belief snapshot.
    fn beliefs(&self) -> &BeliefState;

    /// Number of sense updates discarded because their evidence collapsed to
    /// zero. The simulation layer reports these; the estimator never aborts.
    fn discarded_updates(&self) -> u64;
}

pub mod filters;
