use super::executor::{RunExecutor, LOG_HEADER};
use super::grid::Combination;
use super::sink::ResultSink;
use crate::config::EvalParams;
use crate::dataset::DatasetSplit;
use crate::error::{EbResult, EvoBenchError};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// A run-level failure, attributed to the combination and repeat that raised
/// it. Sibling units keep running; nothing already written is lost.
#[derive(Debug)]
pub struct RunFailure {
    pub combination: Combination,
    pub repeat: usize,
    pub error: EvoBenchError,
}

#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Repeats that completed and were durably logged.
    pub completed: usize,
    pub failures: Vec<RunFailure>,
}

/// What one unit of work produced: the count of durably logged repeats and
/// the failure that stopped it, if any. Sink I/O errors surface through the
/// outer Result and are fatal.
struct UnitReport {
    completed: usize,
    failure: Option<RunFailure>,
}

/// Orchestrates the end-to-end sweep: one shared read-only dataset split,
/// one unit of work per combination, a worker pool sized to the host.
pub struct BenchmarkHarness {
    split: Arc<DatasetSplit>,
    eval: EvalParams,
    sink: ResultSink,
}

impl BenchmarkHarness {
    pub fn new(split: DatasetSplit, eval: EvalParams, sink: ResultSink) -> Self {
        BenchmarkHarness {
            split: Arc::new(split),
            eval,
            sink,
        }
    }

    pub fn worker_count() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }

    /// Runs the full grid to completion. Run-level failures are isolated and
    /// collected; a sink I/O failure is fatal because the log is the sweep's
    /// only observable output. No unit is ever retried.
    pub fn run(&self, combinations: &[Combination]) -> EbResult<SweepOutcome> {
        self.sink.write_header(LOG_HEADER)?;

        if combinations.is_empty() {
            info!("empty grid, nothing to dispatch");
            return Ok(SweepOutcome::default());
        }

        let workers = Self::worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| EvoBenchError::Config(format!("could not build worker pool: {}", e)))?;

        info!(
            combinations = combinations.len(),
            workers, "dispatching sweep"
        );

        let units: Vec<EbResult<UnitReport>> = pool.install(|| {
            combinations
                .par_iter()
                .map(|combination| self.run_unit(combination))
                .collect()
        });

        let mut outcome = SweepOutcome::default();
        for unit in units {
            let report = unit?;
            outcome.completed += report.completed;
            if let Some(failure) = report.failure {
                outcome.failures.push(failure);
            }
        }
        Ok(outcome)
    }

    /// One unit of work: every repeat of one combination, results appended
    /// in repeat order as they are produced. A failing repeat ends the unit;
    /// lines appended before it stay durable and counted.
    fn run_unit(&self, combination: &Combination) -> EbResult<UnitReport> {
        let executor = RunExecutor::new(&self.split, &self.eval);
        let mut report = UnitReport {
            completed: 0,
            failure: None,
        };

        for repeat in 0..combination.repeats {
            match executor.run_repeat(combination, repeat) {
                Ok(result) => {
                    let line = result.to_log_line();
                    self.sink.append(&line)?;
                    info!(%line, "repeat logged");
                    report.completed += 1;
                }
                Err(error) => {
                    report.failure = Some(RunFailure {
                        combination: combination.clone(),
                        repeat,
                        error,
                    });
                    break;
                }
            }
        }
        Ok(report)
    }
}
