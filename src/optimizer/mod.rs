pub mod ga;
pub mod operators;
pub mod problem;
pub mod sa;

pub use ga::GeneticAlgorithm;
pub use problem::{Bounds, SearchProblem};
pub use sa::SimulatedAnnealing;

/// Best candidate found by one search run. The representation is handed to
/// the classifier for held-out evaluation once the search is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub representation: Vec<f64>,
    pub fitness: f64,
}
