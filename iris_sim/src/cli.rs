// iris_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Iris: a histogram-filter localization simulator for colored grid worlds.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Iris simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "scenarios/checkerboard.toml")]
    pub scenario: PathBuf,

    /// Override the scenario's number of sense/move cycles.
    #[arg(long)]
    pub steps: Option<u64>,

    /// Override the scenario's PRNG seed for a deterministic replay.
    #[arg(long)]
    pub seed: Option<u64>,
}
