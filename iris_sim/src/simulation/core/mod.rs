// iris_sim/src/simulation/core/mod.rs

pub mod pose;
pub mod prng;
