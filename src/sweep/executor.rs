use super::grid::Combination;
use crate::ann::{accuracy, Classifier};
use crate::config::{Algorithm, EvalParams};
use crate::dataset::DatasetSplit;
use crate::error::EbResult;
use crate::optimizer::operators::{BallMutation, TournamentSelection};
use crate::optimizer::{Bounds, GeneticAlgorithm, SearchProblem, SimulatedAnnealing, Solution};
use std::time::{Duration, Instant};

pub const LOG_HEADER: &str = "Seed,N_gen,PS,PC,PM,radius,Pressure,Fitness,UnseenAccuracy,Time";

/// Search box for every network weight.
const WEIGHT_LOWER: f64 = -2.0;
const WEIGHT_UPPER: f64 = 2.0;

/// Complete record of one repeat: the exact combination values that produced
/// it plus its outcome. Written once to the log, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub repeat: usize,
    pub repeats: usize,
    pub n_generations: usize,
    pub population_size: usize,
    pub crossover_prob: f64,
    pub mutation_prob: f64,
    pub mutation_radius: f64,
    pub selection_pressure: f64,
    pub fitness: f64,
    pub unseen_accuracy: f64,
    pub elapsed: Duration,
}

impl RunResult {
    /// One comma-delimited log line matching [`LOG_HEADER`].
    pub fn to_log_line(&self) -> String {
        format!(
            "{}/{},{},{},{},{},{},{},{},{},{}",
            self.repeat + 1,
            self.repeats,
            self.n_generations,
            self.population_size,
            self.crossover_prob,
            self.mutation_prob,
            self.mutation_radius,
            self.selection_pressure,
            self.fitness,
            self.unseen_accuracy,
            format_elapsed(self.elapsed)
        )
    }
}

/// Renders a wall-clock duration as `H:MM:SS.mmm`.
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        d.subsec_millis()
    )
}

/// Executes single repeats of a combination against a shared read-only
/// dataset split.
pub struct RunExecutor<'a> {
    split: &'a DatasetSplit,
    eval: &'a EvalParams,
}

impl<'a> RunExecutor<'a> {
    pub fn new(split: &'a DatasetSplit, eval: &'a EvalParams) -> Self {
        RunExecutor { split, eval }
    }

    /// One full repeat: seeded search over the classifier's weight space,
    /// then held-out evaluation with the best weights found.
    ///
    /// The repeat index is the sole seed, so a (combination, repeat) pair is
    /// fully reproducible. Errors are propagated to the dispatch layer for
    /// attribution, never swallowed here.
    pub fn run_repeat(&self, combination: &Combination, repeat: usize) -> EbResult<RunResult> {
        let start = Instant::now();
        let mut rng = fastrand::Rng::with_seed(repeat as u64);

        let mut classifier =
            Classifier::new(self.split, self.eval.validation_fraction, &mut rng)?;
        let bounds = Bounds::new(WEIGHT_LOWER, WEIGHT_UPPER, classifier.weight_count())?;

        let best = {
            let problem = SearchProblem::new(
                bounds,
                |weights: &[f64]| classifier.stimulate(weights),
                false,
                Some(self.eval.validation_threshold),
            );
            self.search(&problem, combination, rng)?
        };

        let fitness = best.fitness;
        classifier.set_weights(best.representation)?;
        let predicted = classifier.predict(&self.split.test_inputs);
        let unseen_accuracy = accuracy(&self.split.test_labels, &predicted);

        Ok(RunResult {
            repeat,
            repeats: combination.repeats,
            n_generations: combination.n_generations,
            population_size: combination.population_size,
            crossover_prob: combination.crossover_prob,
            mutation_prob: combination.mutation_prob,
            mutation_radius: combination.mutation_radius,
            selection_pressure: combination.selection_pressure,
            fitness,
            unseen_accuracy,
            elapsed: start.elapsed(),
        })
    }

    fn search<F: Fn(&[f64]) -> f64>(
        &self,
        problem: &SearchProblem<F>,
        combination: &Combination,
        rng: fastrand::Rng,
    ) -> EbResult<Solution> {
        match self.eval.algorithm {
            Algorithm::Ga => {
                let mut alg = GeneticAlgorithm::new(
                    problem,
                    rng,
                    combination.population_size,
                    TournamentSelection::new(combination.selection_pressure),
                    combination.crossover_prob,
                    BallMutation::new(combination.mutation_radius),
                    combination.mutation_prob,
                )?;
                alg.initialize();
                alg.search(combination.n_generations)
            }
            Algorithm::Sa => {
                let mut alg = SimulatedAnnealing::new(
                    problem,
                    rng,
                    combination.population_size,
                    BallMutation::new(combination.mutation_radius),
                    self.eval.sa_control,
                    self.eval.sa_update_rate,
                )?;
                alg.initialize();
                alg.search(combination.n_generations)
            }
        }
    }
}
