use super::problem::Bounds;

/// Tournament selection where `pressure` is the fraction of the population
/// drawn into each tournament. Higher pressure converges faster and loses
/// diversity sooner.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    pub pressure: f64,
}

impl TournamentSelection {
    pub fn new(pressure: f64) -> Self {
        TournamentSelection { pressure }
    }

    /// Picks the index of the tournament winner. The tournament draws at
    /// least two contenders so selection always discriminates.
    pub fn select(&self, fitnesses: &[f64], minimizing: bool, rng: &mut fastrand::Rng) -> usize {
        let n = fitnesses.len();
        if n <= 1 {
            return 0;
        }
        let k = ((n as f64 * self.pressure).round() as usize).clamp(2, n);

        let mut best = rng.usize(0..n);
        for _ in 1..k {
            let idx = rng.usize(0..n);
            let wins = if minimizing {
                fitnesses[idx] < fitnesses[best]
            } else {
                fitnesses[idx] > fitnesses[best]
            };
            if wins {
                best = idx;
            }
        }
        best
    }
}

/// One-point crossover: children swap tails at a cut drawn from `1..len`.
pub fn one_point_crossover(
    a: &[f64],
    b: &[f64],
    rng: &mut fastrand::Rng,
) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(a.len(), b.len());
    if a.len() < 2 {
        return (a.to_vec(), b.to_vec());
    }
    let cut = rng.usize(1..a.len());
    let mut c1 = Vec::with_capacity(a.len());
    let mut c2 = Vec::with_capacity(a.len());
    c1.extend_from_slice(&a[..cut]);
    c1.extend_from_slice(&b[cut..]);
    c2.extend_from_slice(&b[..cut]);
    c2.extend_from_slice(&a[cut..]);
    (c1, c2)
}

/// Ball mutation: each gene is perturbed uniformly within `radius` and
/// clamped back into the search box.
#[derive(Debug, Clone, Copy)]
pub struct BallMutation {
    pub radius: f64,
}

impl BallMutation {
    pub fn new(radius: f64) -> Self {
        BallMutation { radius }
    }

    pub fn mutate(&self, genes: &mut [f64], bounds: &Bounds, rng: &mut fastrand::Rng) {
        for g in genes.iter_mut() {
            *g += (rng.f64() * 2.0 - 1.0) * self.radius;
        }
        bounds.clamp(genes);
    }
}
