use crate::error::{EbResult, EvoBenchError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use strum::Display;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub axes: SweepAxes,
    #[command(flatten)]
    pub eval: EvalParams,
}

/// Optimizer family driving each run. The log schema is identical for both;
/// SA reuses PS as its neighborhood sample count and radius as its
/// neighborhood radius.
#[derive(
    clap::ValueEnum, Display, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    Ga,
    Sa,
}

/// One comma-separated value list per tunable hyperparameter. An empty list
/// is a legal zero-length axis: the grid collapses to zero combinations.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepAxes {
    #[arg(long, default_value = "10,11,12,13,14,15,16,17,18,19")]
    pub n_generations: String,

    #[arg(long, default_value = "50")]
    pub population_sizes: String,

    #[arg(long, default_value = "0.8")]
    pub crossover_probs: String,

    #[arg(long, default_value = "0.9")]
    pub mutation_probs: String,

    #[arg(long, default_value = "0.2")]
    pub mutation_radiuses: String,

    #[arg(long, default_value = "0.2")]
    pub selection_pressures: String,

    #[arg(long, default_value = "2")]
    pub repeats: String,
}

impl Default for SweepAxes {
    fn default() -> Self {
        Self {
            n_generations: "10,11,12,13,14,15,16,17,18,19".to_string(),
            population_sizes: "50".to_string(),
            crossover_probs: "0.8".to_string(),
            mutation_probs: "0.9".to_string(),
            mutation_radiuses: "0.2".to_string(),
            selection_pressures: "0.2".to_string(),
            repeats: "2".to_string(),
        }
    }
}

impl SweepAxes {
    /// Loads a full axes definition from a JSON file. Fields absent from the
    /// file fall back to the defaults above.
    pub fn load_from_file(path: &str) -> EbResult<Self> {
        let content = fs::read_to_string(path)?;
        let axes = serde_json::from_str(&content)?;
        Ok(axes)
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvalParams {
    /// Held-out test share of the full dataset.
    #[arg(long, default_value_t = 0.33)]
    pub test_fraction: f64,

    /// Share of the training partition the classifier keeps for validation.
    #[arg(long, default_value_t = 0.2)]
    pub validation_fraction: f64,

    /// Validation fitness at which the search may stop early.
    #[arg(long, default_value_t = 0.07)]
    pub validation_threshold: f64,

    /// Seed for the one-time train/test partition shuffle.
    #[arg(long, default_value_t = 0)]
    pub partition_seed: u64,

    #[arg(long, value_enum, default_value_t = Algorithm::Ga)]
    pub algorithm: Algorithm,

    /// Initial control temperature (simulated annealing only).
    #[arg(long, default_value_t = 2.0)]
    pub sa_control: f64,

    /// Geometric cooling rate (simulated annealing only).
    #[arg(long, default_value_t = 0.9)]
    pub sa_update_rate: f64,
}

impl EvalParams {
    /// Fail-fast check run before any dispatch: a bad value here would
    /// poison every unit of work.
    pub fn validate(&self) -> EbResult<()> {
        check_fraction(self.test_fraction, "test-fraction")?;
        check_fraction(self.validation_fraction, "validation-fraction")?;
        if !(0.0..=1.0).contains(&self.validation_threshold) {
            return Err(EvoBenchError::Config(format!(
                "--validation-threshold must be within [0, 1], got {}",
                self.validation_threshold
            )));
        }
        if self.sa_control <= 0.0 {
            return Err(EvoBenchError::Config(format!(
                "--sa-control must be positive, got {}",
                self.sa_control
            )));
        }
        if self.sa_update_rate <= 0.0 || self.sa_update_rate >= 1.0 {
            return Err(EvoBenchError::Config(format!(
                "--sa-update-rate must be within (0, 1), got {}",
                self.sa_update_rate
            )));
        }
        Ok(())
    }
}

fn check_fraction(value: f64, name: &str) -> EbResult<()> {
    if value <= 0.0 || value >= 1.0 {
        return Err(EvoBenchError::Config(format!(
            "--{} must be within (0, 1), got {}",
            name, value
        )));
    }
    Ok(())
}

pub fn parse_usize_list(s: &str, name: &str) -> EbResult<Vec<usize>> {
    split_list(s)
        .map(|p| {
            p.parse::<usize>().map_err(|_| {
                EvoBenchError::Config(format!("--{}: '{}' is not an integer", name, p))
            })
        })
        .collect()
}

pub fn parse_f64_list(s: &str, name: &str) -> EbResult<Vec<f64>> {
    split_list(s)
        .map(|p| {
            p.parse::<f64>()
                .map_err(|_| EvoBenchError::Config(format!("--{}: '{}' is not a number", name, p)))
        })
        .collect()
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty())
}
