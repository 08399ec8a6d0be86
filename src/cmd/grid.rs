use crate::reports;
use clap::Args;
use evobench::config::Config;
use evobench::error::EbResult;
use evobench::sweep::{BenchmarkHarness, ResolvedAxes};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    #[command(flatten)]
    pub config: Config,
}

/// Resolves and prints the combination grid without dispatching anything.
pub fn run(args: GridArgs) -> EbResult<()> {
    args.config.eval.validate()?;
    let axes = ResolvedAxes::from_config(&args.config.axes)?;
    let combinations = axes.combinations();

    info!(
        combinations = combinations.len(),
        workers = BenchmarkHarness::worker_count(),
        "grid preview"
    );
    reports::print_grid_table(&combinations);
    Ok(())
}
