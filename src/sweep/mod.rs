pub mod executor;
pub mod grid;
pub mod harness;
pub mod sink;

pub use executor::{format_elapsed, RunExecutor, RunResult, LOG_HEADER};
pub use grid::{Combination, ResolvedAxes};
pub use harness::{BenchmarkHarness, RunFailure, SweepOutcome};
pub use sink::ResultSink;
