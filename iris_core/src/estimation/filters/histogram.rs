// iris_core/src/estimation/filters/histogram.rs

use nalgebra::DMatrix;

use crate::belief::BeliefState;
use crate::errors::SenseError;
use crate::estimation::GridEstimator;
use crate::grid::ColorGrid;
use crate::messages::{FilterInput, MotionCommand};
use crate::models::motion::blur_kernel;
use crate::models::sensor::SensorModel;
use crate::types::{wrap, Color};

/// The uniform prior over a grid: `1 / (height * width)` in every cell.
pub fn initialize_beliefs(grid: &ColorGrid) -> BeliefState {
    BeliefState::uniform(grid.height(), grid.width())
}

/// Bayesian correction: folds one color observation into the belief state.
///
/// Each cell's prior is weighted by `p_hit` where the map color matches the
/// observation and by `p_miss` where it does not, then the result is
/// renormalized. The prior is never mutated.
///
/// Fails with [`SenseError::DegenerateBelief`] when the total evidence is
/// zero (for example a zero `p_miss` with all prior mass on mismatching
/// cells). Callers keep the prior snapshot in that case; a zero-sum
/// distribution is never returned.
pub fn sense(
    observed: Color,
    grid: &ColorGrid,
    prior: &BeliefState,
    sensor: &SensorModel,
) -> Result<BeliefState, SenseError> {
    assert_eq!(
        (prior.height(), prior.width()),
        (grid.height(), grid.width()),
        "sense: belief and grid dimensions must match"
    );

    let (h, w) = (grid.height(), grid.width());
    let mut weights = DMatrix::<f64>::zeros(h, w);
    for y in 0..h {
        for x in 0..w {
            let hit = grid.color_at(y, x) == observed;
            weights[(y, x)] = prior.prob_at(y, x) * sensor.likelihood(hit);
        }
    }

    let total_evidence = weights.sum();
    if total_evidence <= 0.0 {
        return Err(SenseError::DegenerateBelief { total_evidence });
    }

    weights /= total_evidence;
    Ok(BeliefState::from_matrix(weights))
}

/// Prediction: shifts the belief by a commanded displacement on the torus,
/// then spreads mass onto neighboring cells to model motion noise.
///
/// Total for every finite command and `blur >= 0`. At `blur == 0` the result
/// is the exact shift.
pub fn predict(command: MotionCommand, prior: &BeliefState, blur: f64) -> BeliefState {
    let shifted = shift(prior.matrix(), command);
    if blur == 0.0 {
        // A pure permutation: mass is moved, never recomputed, so the shift
        // is exactly invertible and needs no renormalization.
        return BeliefState::from_matrix(shifted);
    }

    let (h, w) = (shifted.nrows(), shifted.ncols());
    let kernel = blur_kernel(blur);
    let mut spread = DMatrix::<f64>::zeros(h, w);
    for y in 0..h {
        for x in 0..w {
            let mass = shifted[(y, x)];
            if mass == 0.0 {
                continue;
            }
            for tap in &kernel {
                let ty = wrap(y as i64 + tap.dy, h);
                let tx = wrap(x as i64 + tap.dx, w);
                spread[(ty, tx)] += mass * tap.weight;
            }
        }
    }

    // Close the update against accumulated floating error.
    let total = spread.sum();
    if total > 0.0 {
        spread /= total;
    }
    BeliefState::from_matrix(spread)
}

/// The exact toroidal displacement: `shifted[(y + dy) % h][(x + dx) % w] =
/// prior[y][x]` for every cell, preserving total mass.
fn shift(prior: &DMatrix<f64>, command: MotionCommand) -> DMatrix<f64> {
    let (h, w) = (prior.nrows(), prior.ncols());
    let mut shifted = DMatrix::<f64>::zeros(h, w);
    for y in 0..h {
        for x in 0..w {
            let ty = wrap(y as i64 + command.dy, h);
            let tx = wrap(x as i64 + command.dx, w);
            shifted[(ty, tx)] = prior[(y, x)];
        }
    }
    shifted
}

/// A concrete discrete Bayes filter over a colored grid.
///
/// Owns the world map, the sensor model, the blur factor, and the current
/// belief snapshot. Each processed input replaces the snapshot with the
/// output of the corresponding pure update.
pub struct HistogramFilter {
    grid: ColorGrid,
    sensor: SensorModel,
    blur: f64,
    beliefs: BeliefState,
    discarded_updates: u64,
}

impl HistogramFilter {
    /// Creates a filter with a uniform initial belief over the grid.
    pub fn new(grid: ColorGrid, sensor: SensorModel, blur: f64) -> Self {
        assert!(
            blur.is_finite() && blur >= 0.0,
            "HistogramFilter::new: blur factor must be finite and non-negative"
        );
        let beliefs = initialize_beliefs(&grid);
        Self {
            grid,
            sensor,
            blur,
            beliefs,
            discarded_updates: 0,
        }
    }

    pub fn grid(&self) -> &ColorGrid {
        &self.grid
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }
}

impl GridEstimator for HistogramFilter {
    fn process(&mut self, input: &FilterInput) {
        match input {
            FilterInput::Observation { color } => {
                match sense(*color, &self.grid, &self.beliefs, &self.sensor) {
                    Ok(next) => self.beliefs = next,
                    Err(SenseError::DegenerateBelief { .. }) => {
                        // Zero total evidence: keep the prior snapshot and
                        // count the discard for the simulation layer's
                        // diagnostics.
                        self.discarded_updates += 1;
                    }
                }
            }
            FilterInput::Motion { command } => {
                self.beliefs = predict(*command, &self.beliefs, self.blur);
            }
        }
    }

    fn beliefs(&self) -> &BeliefState {
        &self.beliefs
    }

    fn discarded_updates(&self) -> u64 {
        self.discarded_updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SUM_EPSILON: f64 = 1e-9;

    fn grid_from(layout: &[&str]) -> ColorGrid {
        let rows = layout
            .iter()
            .map(|row| row.chars().map(Color).collect())
            .collect();
        ColorGrid::from_rows(rows).unwrap()
    }

    /// A belief with all mass on one cell.
    fn point_mass(h: usize, w: usize, y: usize, x: usize) -> BeliefState {
        let mut weights = DMatrix::<f64>::zeros(h, w);
        weights[(y, x)] = 1.0;
        BeliefState::from_matrix(weights)
    }

    fn assert_valid_distribution(beliefs: &BeliefState) {
        for (cell, p) in beliefs.iter() {
            assert!(p >= 0.0, "negative probability at {:?}", cell);
        }
        assert_abs_diff_eq!(beliefs.total(), 1.0, epsilon = SUM_EPSILON);
    }

    #[test]
    fn test_initialize_beliefs_is_uniform() {
        let grid = grid_from(&["rgr", "grg"]);
        let beliefs = initialize_beliefs(&grid);
        assert_eq!((beliefs.height(), beliefs.width()), (2, 3));
        for (_, p) in beliefs.iter() {
            assert_abs_diff_eq!(p, 1.0 / 6.0, epsilon = 1e-15);
        }
        assert_valid_distribution(&beliefs);
    }

    #[test]
    fn test_sense_normalizes_and_stays_non_negative() {
        let grid = grid_from(&["rgr", "grg", "rgr"]);
        let prior = initialize_beliefs(&grid);
        let sensor = SensorModel::new(0.6, 0.2);
        let posterior = sense(Color('g'), &grid, &prior, &sensor).unwrap();
        assert_valid_distribution(&posterior);
    }

    #[test]
    fn test_sense_concrete_three_by_three_scenario() {
        // Grid [[R,G,R],[G,R,G],[R,G,R]], p_hit = 0.6, p_miss = 0.2,
        // uniform prior 1/9. Observing G must raise the four G cells above
        // 1/9, lower the five R cells below it, and leave the posterior
        // ratio G/R at exactly p_hit / p_miss = 3.
        let grid = grid_from(&["rgr", "grg", "rgr"]);
        let prior = initialize_beliefs(&grid);
        let sensor = SensorModel::new(0.6, 0.2);
        let posterior = sense(Color('g'), &grid, &prior, &sensor).unwrap();

        let uniform = 1.0 / 9.0;
        for (cell, p) in posterior.iter() {
            if grid.color_at(cell.y, cell.x) == Color('g') {
                assert!(p > uniform, "G cell {:?} not raised", cell);
            } else {
                assert!(p < uniform, "R cell {:?} not lowered", cell);
            }
        }

        let g_cell = posterior.prob_at(0, 1);
        let r_cell = posterior.prob_at(0, 0);
        assert_abs_diff_eq!(g_cell / r_cell, 3.0, epsilon = 1e-12);
        assert_valid_distribution(&posterior);
    }

    #[test]
    fn test_sense_is_no_op_on_single_color_grid() {
        // Constant likelihood everywhere: the update must renormalize back
        // to the prior, whether or not the observation matches the map.
        let grid = grid_from(&["bbb", "bbb"]);
        let mut weights = DMatrix::<f64>::zeros(2, 3);
        weights[(0, 0)] = 0.5;
        weights[(1, 2)] = 0.5;
        let prior = BeliefState::from_matrix(weights);
        let sensor = SensorModel::new(0.8, 0.3);

        for observed in [Color('b'), Color('z')] {
            let posterior = sense(observed, &grid, &prior, &sensor).unwrap();
            for (cell, p) in posterior.iter() {
                assert_abs_diff_eq!(p, prior.prob_at(cell.y, cell.x), epsilon = 1e-12);
            }
            assert_valid_distribution(&posterior);
        }
    }

    #[test]
    fn test_sense_does_not_mutate_prior() {
        let grid = grid_from(&["rg", "gr"]);
        let prior = initialize_beliefs(&grid);
        let snapshot = prior.clone();
        let sensor = SensorModel::new(0.7, 0.1);
        let _ = sense(Color('r'), &grid, &prior, &sensor).unwrap();
        assert_eq!(prior, snapshot);
    }

    #[test]
    fn test_sense_degenerate_evidence_is_an_error() {
        // All prior mass on an R cell, a perfect sensor (p_miss = 0), and a
        // G observation: total evidence is zero. The update must signal the
        // degenerate case rather than return a zero-sum state.
        let grid = grid_from(&["rgr", "grg", "rgr"]);
        let prior = point_mass(3, 3, 0, 0);
        let sensor = SensorModel::new(0.6, 0.0);
        let result = sense(Color('g'), &grid, &prior, &sensor);
        assert_eq!(
            result,
            Err(SenseError::DegenerateBelief {
                total_evidence: 0.0
            })
        );
    }

    #[test]
    fn test_predict_shift_moves_point_mass_with_wraparound() {
        let prior = point_mass(3, 4, 2, 3);
        let posterior = predict(MotionCommand::new(1, 1), &prior, 0.0);
        assert_abs_diff_eq!(posterior.prob_at(0, 0), 1.0);
        assert_valid_distribution(&posterior);
    }

    #[test]
    fn test_predict_round_trip_is_exact_without_blur() {
        let grid = grid_from(&["rgr", "grg", "rgr"]);
        let sensor = SensorModel::new(0.6, 0.2);
        // A non-trivial distribution survives the round trip bit-for-bit.
        let beliefs = sense(Color('g'), &grid, &initialize_beliefs(&grid), &sensor).unwrap();

        let there = predict(MotionCommand::new(2, -1), &beliefs, 0.0);
        let back = predict(MotionCommand::new(-2, 1), &there, 0.0);
        assert_eq!(back, beliefs);
    }

    #[test]
    fn test_predict_preserves_mass_under_blur() {
        let grid = grid_from(&["rgrb", "grbg", "rbgr"]);
        let sensor = SensorModel::new(0.9, 0.4);
        let beliefs = sense(Color('b'), &grid, &initialize_beliefs(&grid), &sensor).unwrap();
        for &blur in &[0.0, 0.1, 1.0, 10.0] {
            let posterior = predict(MotionCommand::new(-3, 7), &beliefs, blur);
            assert_valid_distribution(&posterior);
        }
    }

    #[test]
    fn test_predict_blur_monotonically_flattens_point_mass() {
        let prior = point_mass(5, 5, 2, 2);
        let mut last_max = f64::INFINITY;
        for &blur in &[0.0, 0.2, 0.5, 1.0, 3.0] {
            let posterior = predict(MotionCommand::new(0, 0), &prior, blur);
            let (_, max_p) = posterior.max_cell();
            assert!(
                max_p < last_max,
                "max probability did not shrink at blur {}",
                blur
            );
            last_max = max_p;
        }
    }

    #[test]
    fn test_filter_alternates_sense_and_predict() {
        let grid = grid_from(&["rgr", "grg", "rgr"]);
        let mut filter = HistogramFilter::new(grid, SensorModel::new(0.6, 0.2), 0.1);
        assert_eq!((filter.grid().height(), filter.grid().width()), (3, 3));
        assert_abs_diff_eq!(filter.blur(), 0.1);

        filter.process(&FilterInput::Observation { color: Color('g') });
        filter.process(&FilterInput::Motion {
            command: MotionCommand::new(0, 1),
        });
        filter.process(&FilterInput::Observation { color: Color('r') });

        assert_valid_distribution(filter.beliefs());
        assert_eq!(filter.discarded_updates(), 0);
    }

    #[test]
    fn test_filter_keeps_prior_on_degenerate_sense() {
        // An observation outside the map's palette with a zero miss weight
        // produces zero evidence everywhere. The filter must hold its
        // belief and count the discard.
        let grid = grid_from(&["rr", "rr"]);
        let mut filter = HistogramFilter::new(grid, SensorModel::new(0.9, 0.0), 0.0);
        let before = filter.beliefs().clone();

        filter.process(&FilterInput::Observation { color: Color('g') });

        assert_eq!(filter.beliefs(), &before);
        assert_eq!(filter.discarded_updates(), 1);
        assert_valid_distribution(filter.beliefs());
    }

    #[test]
    fn test_filter_converges_on_distinctive_cell() {
        // One unique color in the map: repeated matching observations with
        // no motion should concentrate belief on that cell.
        let grid = grid_from(&["rrr", "rgr", "rrr"]);
        let mut filter = HistogramFilter::new(grid, SensorModel::new(0.9, 0.1), 0.0);
        for _ in 0..8 {
            filter.process(&FilterInput::Observation { color: Color('g') });
        }
        let (cell, p) = filter.beliefs().max_cell();
        assert_eq!((cell.y, cell.x), (1, 1));
        assert!(p > 0.99);
    }
}
