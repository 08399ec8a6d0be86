use crate::error::{EbResult, EvoBenchError};

/// Box constraints of a continuous search space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
    pub dimension: usize,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64, dimension: usize) -> EbResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(EvoBenchError::Search(format!(
                "malformed search bounds [{}, {}]",
                lower, upper
            )));
        }
        if dimension == 0 {
            return Err(EvoBenchError::Search(
                "search space has zero dimensions".to_string(),
            ));
        }
        Ok(Bounds {
            lower,
            upper,
            dimension,
        })
    }

    /// Draws a uniform point inside the box.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        (0..self.dimension)
            .map(|_| self.lower + rng.f64() * (self.upper - self.lower))
            .collect()
    }

    pub fn clamp(&self, genes: &mut [f64]) {
        for g in genes {
            *g = g.clamp(self.lower, self.upper);
        }
    }
}

/// A continuous optimization problem: a fitness closure over bounded real
/// vectors, a direction, and an optional fitness level at which the search
/// may terminate early.
pub struct SearchProblem<F: Fn(&[f64]) -> f64> {
    pub bounds: Bounds,
    pub minimizing: bool,
    pub validation_threshold: Option<f64>,
    fitness: F,
}

impl<F: Fn(&[f64]) -> f64> SearchProblem<F> {
    pub fn new(
        bounds: Bounds,
        fitness: F,
        minimizing: bool,
        validation_threshold: Option<f64>,
    ) -> Self {
        SearchProblem {
            bounds,
            minimizing,
            validation_threshold,
            fitness,
        }
    }

    pub fn evaluate(&self, candidate: &[f64]) -> f64 {
        (self.fitness)(candidate)
    }

    /// Whether fitness `a` beats fitness `b` under this problem's direction.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        if self.minimizing {
            a < b
        } else {
            a > b
        }
    }

    pub fn meets_threshold(&self, fitness: f64) -> bool {
        match self.validation_threshold {
            Some(t) if self.minimizing => fitness <= t,
            Some(t) => fitness >= t,
            None => false,
        }
    }
}
