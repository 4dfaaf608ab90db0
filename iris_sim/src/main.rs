// iris_sim/src/main.rs

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use iris_sim::prelude::{Cli, ScenarioConfig, Simulation};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(scenario = %cli.scenario.display(), "loading scenario");

    let config = match ScenarioConfig::load(&cli.scenario) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load scenario");
            std::process::exit(1);
        }
    };

    let mut scenario = match config.resolve() {
        Ok(scenario) => scenario,
        Err(err) => {
            error!(%err, "invalid scenario");
            std::process::exit(1);
        }
    };

    if let Some(steps) = cli.steps {
        scenario.steps = steps;
    }
    if let Some(seed) = cli.seed {
        scenario.seed = Some(seed);
    }

    info!(
        height = scenario.grid.height(),
        width = scenario.grid.width(),
        steps = scenario.steps,
        seed = scenario.seed,
        "starting simulation"
    );

    let steps = scenario.steps;
    let mut simulation = Simulation::new(scenario);
    simulation.run(steps);

    let report = simulation.report();
    let truth = simulation.true_pose();
    info!(
        best_y = report.best_cell.y,
        best_x = report.best_cell.x,
        best_prob = report.best_prob,
        true_y = truth.y,
        true_x = truth.x,
        prob_at_truth = report.prob_at_truth,
        discarded_updates = report.discarded_updates,
        "simulation finished"
    );
}
