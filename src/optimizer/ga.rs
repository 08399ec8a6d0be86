use super::operators::{one_point_crossover, BallMutation, TournamentSelection};
use super::problem::SearchProblem;
use super::Solution;
use crate::error::{EbResult, EvoBenchError};
use tracing::debug;

/// Generational genetic algorithm over a bounded real-valued search space.
///
/// The single best individual is carried into every next generation, so the
/// best fitness is monotone across generations. All stochasticity flows
/// through the RNG handed in at construction.
pub struct GeneticAlgorithm<'a, F: Fn(&[f64]) -> f64> {
    problem: &'a SearchProblem<F>,
    rng: fastrand::Rng,
    population_size: usize,
    selection: TournamentSelection,
    crossover_prob: f64,
    mutation: BallMutation,
    mutation_prob: f64,
    population: Vec<Solution>,
    best: Option<Solution>,
}

impl<'a, F: Fn(&[f64]) -> f64> GeneticAlgorithm<'a, F> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        problem: &'a SearchProblem<F>,
        rng: fastrand::Rng,
        population_size: usize,
        selection: TournamentSelection,
        crossover_prob: f64,
        mutation: BallMutation,
        mutation_prob: f64,
    ) -> EbResult<Self> {
        if population_size == 0 {
            return Err(EvoBenchError::Search(
                "population size must be positive".to_string(),
            ));
        }
        Ok(GeneticAlgorithm {
            problem,
            rng,
            population_size,
            selection,
            crossover_prob,
            mutation,
            mutation_prob,
            population: Vec::new(),
            best: None,
        })
    }

    /// Samples and evaluates the initial population.
    pub fn initialize(&mut self) {
        self.population = (0..self.population_size)
            .map(|_| {
                let representation = self.problem.bounds.sample(&mut self.rng);
                let fitness = self.problem.evaluate(&representation);
                Solution {
                    representation,
                    fitness,
                }
            })
            .collect();
        self.best = Some(self.pick_best().clone());
    }

    /// Runs the evolutionary loop for at most `n_iterations` generations,
    /// stopping early when the problem's threshold is reached.
    pub fn search(&mut self, n_iterations: usize) -> EbResult<Solution> {
        if self.population.is_empty() {
            return Err(EvoBenchError::Search(
                "search invoked before initialize".to_string(),
            ));
        }

        for gen in 0..n_iterations {
            let best_fitness = self.best.as_ref().map(|b| b.fitness).unwrap_or(f64::NAN);
            if self.problem.meets_threshold(best_fitness) {
                debug!(gen, best_fitness, "validation threshold reached");
                break;
            }

            let fitnesses: Vec<f64> = self.population.iter().map(|s| s.fitness).collect();
            let mut next_gen: Vec<Solution> = Vec::with_capacity(self.population_size);

            // Elitism: the incumbent survives unchanged.
            if let Some(best) = &self.best {
                next_gen.push(best.clone());
            }

            while next_gen.len() < self.population_size {
                let p1 = self
                    .selection
                    .select(&fitnesses, self.problem.minimizing, &mut self.rng);
                let p2 = self
                    .selection
                    .select(&fitnesses, self.problem.minimizing, &mut self.rng);

                let (c1, c2) = if self.rng.f64() < self.crossover_prob {
                    one_point_crossover(
                        &self.population[p1].representation,
                        &self.population[p2].representation,
                        &mut self.rng,
                    )
                } else {
                    (
                        self.population[p1].representation.clone(),
                        self.population[p2].representation.clone(),
                    )
                };

                for mut genes in [c1, c2] {
                    if next_gen.len() >= self.population_size {
                        break;
                    }
                    if self.rng.f64() < self.mutation_prob {
                        self.mutation
                            .mutate(&mut genes, &self.problem.bounds, &mut self.rng);
                    }
                    let fitness = self.problem.evaluate(&genes);
                    next_gen.push(Solution {
                        representation: genes,
                        fitness,
                    });
                }
            }

            self.population = next_gen;

            let gen_best = self.pick_best().clone();
            let improved = match &self.best {
                Some(best) => self.problem.is_better(gen_best.fitness, best.fitness),
                None => true,
            };
            if improved {
                self.best = Some(gen_best);
            }

            debug!(
                gen,
                best = self.best.as_ref().map(|b| b.fitness).unwrap_or(f64::NAN),
                "generation complete"
            );
        }

        // Population is non-empty, so best is always set after initialize.
        Ok(self.best.clone().expect("best solution tracked"))
    }

    pub fn best_solution(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    fn pick_best(&self) -> &Solution {
        let mut best = &self.population[0];
        for s in &self.population[1..] {
            if self.problem.is_better(s.fitness, best.fitness) {
                best = s;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::Bounds;

    fn sphere_problem(threshold: Option<f64>) -> SearchProblem<impl Fn(&[f64]) -> f64> {
        let bounds = Bounds::new(-5.0, 5.0, 6).unwrap();
        SearchProblem::new(
            bounds,
            |genes: &[f64]| genes.iter().map(|g| g * g).sum::<f64>(),
            true,
            threshold,
        )
    }

    fn make_ga<F: Fn(&[f64]) -> f64>(
        problem: &SearchProblem<F>,
        seed: u64,
    ) -> GeneticAlgorithm<'_, F> {
        GeneticAlgorithm::new(
            problem,
            fastrand::Rng::with_seed(seed),
            40,
            TournamentSelection::new(0.2),
            0.8,
            BallMutation::new(0.3),
            0.9,
        )
        .unwrap()
    }

    #[test]
    fn converges_on_sphere() {
        let problem = sphere_problem(None);
        let mut ga = make_ga(&problem, 42);
        ga.initialize();
        let initial = ga.best_solution().unwrap().fitness;
        let best = ga.search(120).unwrap();
        assert!(best.fitness < initial, "search should improve on init");
        assert!(best.fitness < 5.0, "got {}", best.fitness);
    }

    #[test]
    fn best_is_monotone_with_elitism() {
        let problem = sphere_problem(None);
        let mut ga = make_ga(&problem, 7);
        ga.initialize();
        let mut last = ga.best_solution().unwrap().fitness;
        for _ in 0..20 {
            let best = ga.search(1).unwrap();
            assert!(best.fitness <= last);
            last = best.fitness;
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let problem = sphere_problem(None);
        let mut a = make_ga(&problem, 99);
        let mut b = make_ga(&problem, 99);
        a.initialize();
        b.initialize();
        let ra = a.search(30).unwrap();
        let rb = b.search(30).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn threshold_stops_the_search() {
        // Threshold so loose every initial population already meets it.
        let problem = sphere_problem(Some(1e9));
        let mut ga = make_ga(&problem, 3);
        ga.initialize();
        let at_init = ga.best_solution().unwrap().clone();
        let best = ga.search(1_000).unwrap();
        assert_eq!(best, at_init, "no generation should have run");
    }

    #[test]
    fn zero_population_is_a_config_error() {
        let problem = sphere_problem(None);
        let err = GeneticAlgorithm::new(
            &problem,
            fastrand::Rng::with_seed(0),
            0,
            TournamentSelection::new(0.2),
            0.8,
            BallMutation::new(0.2),
            0.9,
        );
        assert!(err.is_err());
    }

    #[test]
    fn search_before_initialize_is_an_error() {
        let problem = sphere_problem(None);
        let mut ga = make_ga(&problem, 0);
        assert!(ga.search(10).is_err());
    }
}
