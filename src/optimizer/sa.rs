use super::operators::BallMutation;
use super::problem::SearchProblem;
use super::Solution;
use crate::error::{EbResult, EvoBenchError};
use tracing::debug;

/// Simulated annealing with geometric cooling.
///
/// Each iteration samples `neighborhood_size` neighbors of the current
/// solution via ball mutation, takes the best of them, and accepts it by the
/// Metropolis criterion under the current control temperature.
pub struct SimulatedAnnealing<'a, F: Fn(&[f64]) -> f64> {
    problem: &'a SearchProblem<F>,
    rng: fastrand::Rng,
    neighborhood_size: usize,
    neighborhood: BallMutation,
    control: f64,
    update_rate: f64,
    current: Option<Solution>,
    best: Option<Solution>,
}

impl<'a, F: Fn(&[f64]) -> f64> SimulatedAnnealing<'a, F> {
    pub fn new(
        problem: &'a SearchProblem<F>,
        rng: fastrand::Rng,
        neighborhood_size: usize,
        neighborhood: BallMutation,
        control: f64,
        update_rate: f64,
    ) -> EbResult<Self> {
        if neighborhood_size == 0 {
            return Err(EvoBenchError::Search(
                "neighborhood size must be positive".to_string(),
            ));
        }
        if control <= 0.0 || update_rate <= 0.0 || update_rate >= 1.0 {
            return Err(EvoBenchError::Search(format!(
                "invalid annealing schedule: control {}, update rate {}",
                control, update_rate
            )));
        }
        Ok(SimulatedAnnealing {
            problem,
            rng,
            neighborhood_size,
            neighborhood,
            control,
            update_rate,
            current: None,
            best: None,
        })
    }

    /// Samples and evaluates the starting point.
    pub fn initialize(&mut self) {
        let representation = self.problem.bounds.sample(&mut self.rng);
        let fitness = self.problem.evaluate(&representation);
        let start = Solution {
            representation,
            fitness,
        };
        self.best = Some(start.clone());
        self.current = Some(start);
    }

    pub fn search(&mut self, n_iterations: usize) -> EbResult<Solution> {
        if self.current.is_none() {
            return Err(EvoBenchError::Search(
                "search invoked before initialize".to_string(),
            ));
        }

        for iter in 0..n_iterations {
            let best_fitness = self.best.as_ref().map(|b| b.fitness).unwrap_or(f64::NAN);
            if self.problem.meets_threshold(best_fitness) {
                debug!(iter, best_fitness, "validation threshold reached");
                break;
            }

            let current = self.current.clone().expect("initialized above");

            // Best of a sampled neighborhood around the current point.
            let mut candidate: Option<Solution> = None;
            for _ in 0..self.neighborhood_size {
                let mut genes = current.representation.clone();
                self.neighborhood
                    .mutate(&mut genes, &self.problem.bounds, &mut self.rng);
                let fitness = self.problem.evaluate(&genes);
                let better = match &candidate {
                    Some(c) => self.problem.is_better(fitness, c.fitness),
                    None => true,
                };
                if better {
                    candidate = Some(Solution {
                        representation: genes,
                        fitness,
                    });
                }
            }
            let candidate = candidate.expect("neighborhood size checked positive");

            // Metropolis criterion: worse moves pass with a probability that
            // shrinks as the control temperature cools.
            let worse_by = if self.problem.minimizing {
                candidate.fitness - current.fitness
            } else {
                current.fitness - candidate.fitness
            };
            let accept = worse_by <= 0.0 || self.rng.f64() < (-worse_by / self.control).exp();

            if accept {
                let improved = match &self.best {
                    Some(best) => self.problem.is_better(candidate.fitness, best.fitness),
                    None => true,
                };
                if improved {
                    self.best = Some(candidate.clone());
                }
                self.current = Some(candidate);
            }

            self.control *= self.update_rate;
            debug!(
                iter,
                control = self.control,
                best = self.best.as_ref().map(|b| b.fitness).unwrap_or(f64::NAN),
                "annealing step complete"
            );
        }

        Ok(self.best.clone().expect("best solution tracked"))
    }

    pub fn best_solution(&self) -> Option<&Solution> {
        self.best.as_ref()
    }
}
