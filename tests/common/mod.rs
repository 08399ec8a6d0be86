use evobench::config::{Algorithm, EvalParams};
use evobench::dataset::{Dataset, DatasetSplit};
use std::io::Cursor;

/// Small separable dataset: 3 classes, 4 features, 60 samples.
pub fn toy_dataset() -> Dataset {
    let mut csv = String::new();
    for i in 0..60 {
        let label = i % 3;
        let base = label as f64;
        let jitter = 0.01 * (i / 3) as f64;
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            base + jitter,
            base - jitter,
            0.5 * base + jitter,
            1.0 - 0.3 * base,
            label
        ));
    }
    Dataset::from_reader(Cursor::new(csv)).unwrap()
}

pub fn toy_split() -> DatasetSplit {
    toy_dataset().split(0.25, 0).unwrap()
}

pub fn eval_params(algorithm: Algorithm) -> EvalParams {
    EvalParams {
        test_fraction: 0.25,
        validation_fraction: 0.2,
        validation_threshold: 1.0,
        partition_seed: 0,
        algorithm,
        sa_control: 2.0,
        sa_update_rate: 0.9,
    }
}
