// iris_sim/src/simulation/driver.rs

use rand::Rng;
use tracing::{debug, warn};

// --- Simulation Crate Imports ---
use crate::simulation::config::ResolvedScenario;
use crate::simulation::core::{pose::GroundTruthPose, prng::SimulationRng};

// --- Core Library Imports ---
use iris_core::prelude::{
    BeliefState, Cell, Color, ColorGrid, FilterInput, GridEstimator, HistogramFilter,
    MotionCommand, SensorModel,
};

/// Snapshot of where the filter thinks the agent is versus the truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeliefReport {
    pub best_cell: Cell,
    pub best_prob: f64,
    pub prob_at_truth: f64,
    pub discarded_updates: u64,
}

/// The simulation driver.
///
/// Owns the ground-truth pose, injects sensor noise, chooses random-walk
/// displacements, and alternates sense/predict calls on the estimator. The
/// belief state is treated as an opaque, replace-on-update value; no filter
/// algorithm lives here.
pub struct Simulation {
    grid: ColorGrid,
    palette: Vec<Color>,
    sensor: SensorModel,
    estimator: Box<dyn GridEstimator>,
    pose: GroundTruthPose,
    rng: SimulationRng,
}

impl Simulation {
    pub fn new(scenario: ResolvedScenario) -> Self {
        let ResolvedScenario {
            grid,
            sensor,
            blur,
            seed,
            start,
            ..
        } = scenario;
        let estimator = Box::new(HistogramFilter::new(grid.clone(), sensor, blur));
        Self {
            palette: grid.palette(),
            grid,
            sensor,
            estimator,
            pose: GroundTruthPose::new(start),
            rng: SimulationRng::new(seed),
        }
    }

    /// Samples the observed color at the true cell: with probability
    /// `p_miss / (p_hit + p_miss)` a uniformly chosen incorrect color,
    /// otherwise the truth. A single-color world can never read wrong.
    fn observe(&mut self) -> Color {
        let truth = self
            .grid
            .color_at(self.pose.current.y, self.pose.current.x);
        let wrong: Vec<Color> = self
            .palette
            .iter()
            .copied()
            .filter(|&color| color != truth)
            .collect();
        if !wrong.is_empty() && self.rng.0.gen::<f64>() < self.sensor.miss_probability() {
            wrong[self.rng.0.gen_range(0..wrong.len())]
        } else {
            truth
        }
    }

    /// Uniform random walk over single-cell displacements.
    fn random_walk(&mut self) -> MotionCommand {
        MotionCommand::new(self.rng.0.gen_range(-1..=1), self.rng.0.gen_range(-1..=1))
    }

    /// One sense/move cycle.
    pub fn step(&mut self) {
        let discarded_before = self.estimator.discarded_updates();
        let observed = self.observe();
        self.estimator
            .process(&FilterInput::Observation { color: observed });
        if self.estimator.discarded_updates() > discarded_before {
            warn!(%observed, "sense evidence collapsed to zero; beliefs retained");
        }

        let command = self.random_walk();
        self.pose
            .advance(command, self.grid.height(), self.grid.width());
        self.estimator.process(&FilterInput::Motion { command });
        debug!(dy = command.dy, dx = command.dx, "advanced ground truth");
    }

    pub fn run(&mut self, steps: u64) {
        for step in 1..=steps {
            self.step();
            let report = self.report();
            debug!(
                step,
                best_y = report.best_cell.y,
                best_x = report.best_cell.x,
                best_prob = report.best_prob,
                prob_at_truth = report.prob_at_truth,
                "belief after step"
            );
        }
    }

    pub fn report(&self) -> BeliefReport {
        let beliefs = self.estimator.beliefs();
        let (best_cell, best_prob) = beliefs.max_cell();
        BeliefReport {
            best_cell,
            best_prob,
            prob_at_truth: beliefs.prob_at(self.pose.current.y, self.pose.current.x),
            discarded_updates: self.estimator.discarded_updates(),
        }
    }

    pub fn true_pose(&self) -> Cell {
        self.pose.current
    }

    pub fn beliefs(&self) -> &BeliefState {
        self.estimator.beliefs()
    }
}
