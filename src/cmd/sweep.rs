use crate::reports;
use clap::Args;
use evobench::config::Config;
use evobench::dataset::Dataset;
use evobench::error::EbResult;
use evobench::sweep::{BenchmarkHarness, ResolvedAxes, ResultSink};
use std::time::Instant;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: SweepArgs, data_path: &str, log_path: &str) -> EbResult<()> {
    // Fail fast: a bad axis or fraction would poison every unit of work.
    args.config.eval.validate()?;
    let axes = ResolvedAxes::from_config(&args.config.axes)?;
    let combinations = axes.combinations();
    info!(
        combinations = combinations.len(),
        workers = BenchmarkHarness::worker_count(),
        algorithm = %args.config.eval.algorithm,
        "grid generated"
    );

    let dataset = Dataset::load_from_file(data_path)?;
    info!(
        samples = dataset.inputs.len(),
        features = dataset.n_features,
        classes = dataset.n_classes,
        "dataset loaded from {}",
        data_path
    );
    let split = dataset.split(args.config.eval.test_fraction, args.config.eval.partition_seed)?;

    let sink = ResultSink::new(log_path);
    let harness = BenchmarkHarness::new(split, args.config.eval.clone(), sink);

    let start = Instant::now();
    let outcome = harness.run(&combinations)?;

    for failure in &outcome.failures {
        error!(
            repeat = failure.repeat,
            combination = ?failure.combination,
            "run failed: {}",
            failure.error
        );
    }

    reports::print_sweep_summary(&outcome, start.elapsed(), log_path);
    Ok(())
}
