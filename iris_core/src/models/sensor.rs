// iris_core/src/models/sensor.rs

use serde::Deserialize;

fn default_p_miss() -> f64 {
    1.0
}

/// The color-sensor noise model.
///
/// `p_hit` is the likelihood weight of a reading that matches the cell's true
/// color; `p_miss` is the unnormalized weight of a mismatch, conventionally
/// 1.0. Both are immutable for the simulation's duration. The derived
/// quantity `p_miss / (p_hit + p_miss)` is the probability that a single
/// reading is incorrect, which the simulation layer uses to inject noise.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorModel {
    pub p_hit: f64,
    #[serde(default = "default_p_miss")]
    pub p_miss: f64,
}

impl SensorModel {
    /// Creates a sensor model, checking the weight preconditions.
    pub fn new(p_hit: f64, p_miss: f64) -> Self {
        assert!(
            p_hit.is_finite() && p_hit > 0.0,
            "SensorModel::new: p_hit must be finite and positive"
        );
        assert!(
            p_miss.is_finite() && p_miss >= 0.0,
            "SensorModel::new: p_miss must be finite and non-negative"
        );
        Self { p_hit, p_miss }
    }

    /// Likelihood weight of one reading given whether it matched the cell.
    pub fn likelihood(&self, hit: bool) -> f64 {
        if hit {
            self.p_hit
        } else {
            self.p_miss
        }
    }

    /// Probability that a single reading reports a wrong color.
    pub fn miss_probability(&self) -> f64 {
        self.p_miss / (self.p_hit + self.p_miss)
    }
}
