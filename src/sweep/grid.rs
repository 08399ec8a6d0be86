use crate::config::{parse_f64_list, parse_usize_list, SweepAxes};
use crate::error::{EbResult, EvoBenchError};

/// One fully specified experiment configuration: a named value per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub n_generations: usize,
    pub population_size: usize,
    pub crossover_prob: f64,
    pub mutation_prob: f64,
    pub mutation_radius: f64,
    pub selection_pressure: f64,
    pub repeats: usize,
}

/// Parsed, validated hyperparameter axes. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAxes {
    pub n_generations: Vec<usize>,
    pub population_sizes: Vec<usize>,
    pub crossover_probs: Vec<f64>,
    pub mutation_probs: Vec<f64>,
    pub mutation_radiuses: Vec<f64>,
    pub selection_pressures: Vec<f64>,
    pub repeats: Vec<usize>,
}

impl ResolvedAxes {
    pub fn from_config(axes: &SweepAxes) -> EbResult<Self> {
        let resolved = ResolvedAxes {
            n_generations: parse_usize_list(&axes.n_generations, "n-generations")?,
            population_sizes: parse_usize_list(&axes.population_sizes, "population-sizes")?,
            crossover_probs: parse_f64_list(&axes.crossover_probs, "crossover-probs")?,
            mutation_probs: parse_f64_list(&axes.mutation_probs, "mutation-probs")?,
            mutation_radiuses: parse_f64_list(&axes.mutation_radiuses, "mutation-radiuses")?,
            selection_pressures: parse_f64_list(&axes.selection_pressures, "selection-pressures")?,
            repeats: parse_usize_list(&axes.repeats, "repeats")?,
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Fail-fast value checks; a bad axis value would poison every unit of
    /// work, so nothing may be dispatched past this point.
    pub fn validate(&self) -> EbResult<()> {
        for &p in self.crossover_probs.iter().chain(&self.mutation_probs) {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvoBenchError::Config(format!(
                    "probability {} is outside [0, 1]",
                    p
                )));
            }
        }
        for &r in &self.mutation_radiuses {
            if !r.is_finite() || r <= 0.0 {
                return Err(EvoBenchError::Config(format!(
                    "mutation radius {} must be positive",
                    r
                )));
            }
        }
        for &p in &self.selection_pressures {
            if !(p > 0.0 && p <= 1.0) {
                return Err(EvoBenchError::Config(format!(
                    "selection pressure {} is outside (0, 1]",
                    p
                )));
            }
        }
        for &ps in &self.population_sizes {
            if ps == 0 {
                return Err(EvoBenchError::Config(
                    "population size must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Full Cartesian product of the axes, last axis varying fastest. Any
    /// zero-length axis collapses the grid to zero combinations.
    pub fn combinations(&self) -> Vec<Combination> {
        let mut grid = Vec::with_capacity(self.len());
        for &n_generations in &self.n_generations {
            for &population_size in &self.population_sizes {
                for &crossover_prob in &self.crossover_probs {
                    for &mutation_prob in &self.mutation_probs {
                        for &mutation_radius in &self.mutation_radiuses {
                            for &selection_pressure in &self.selection_pressures {
                                for &repeats in &self.repeats {
                                    grid.push(Combination {
                                        n_generations,
                                        population_size,
                                        crossover_prob,
                                        mutation_prob,
                                        mutation_radius,
                                        selection_pressure,
                                        repeats,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
        grid
    }

    pub fn len(&self) -> usize {
        self.n_generations.len()
            * self.population_sizes.len()
            * self.crossover_probs.len()
            * self.mutation_probs.len()
            * self.mutation_radiuses.len()
            * self.selection_pressures.len()
            * self.repeats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
