use crate::error::{EbResult, EvoBenchError};
use std::fs::File;
use std::io::Read;

/// Full labelled dataset: one flattened feature row per sample, class labels
/// in `0..n_classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    pub n_features: usize,
    pub n_classes: usize,
}

/// Immutable train/test partition. Computed once per sweep and shared
/// read-only by every worker; no run mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    pub train_inputs: Vec<Vec<f64>>,
    pub train_labels: Vec<usize>,
    pub test_inputs: Vec<Vec<f64>>,
    pub test_labels: Vec<usize>,
    pub n_features: usize,
    pub n_classes: usize,
}

impl Dataset {
    /// Loads a headerless CSV of `f1,...,fn,label` rows.
    pub fn load_from_file(path: &str) -> EbResult<Self> {
        let file = File::open(path)
            .map_err(|e| EvoBenchError::Dataset(format!("could not open '{}': {}", path, e)))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> EbResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut inputs: Vec<Vec<f64>> = Vec::new();
        let mut labels: Vec<usize> = Vec::new();
        let mut n_features = 0usize;

        for (row_idx, result) in rdr.records().enumerate() {
            let rec = result?;
            if rec.len() < 2 {
                return Err(EvoBenchError::Dataset(format!(
                    "row {}: need at least one feature and a label",
                    row_idx
                )));
            }

            let width = rec.len() - 1;
            if inputs.is_empty() {
                n_features = width;
            } else if width != n_features {
                return Err(EvoBenchError::Dataset(format!(
                    "row {}: expected {} features, found {}",
                    row_idx, n_features, width
                )));
            }

            let mut row = Vec::with_capacity(width);
            for field in rec.iter().take(width) {
                let v: f64 = field.parse().map_err(|_| {
                    EvoBenchError::Dataset(format!("row {}: '{}' is not a number", row_idx, field))
                })?;
                row.push(v);
            }

            let label: usize = rec[width].parse().map_err(|_| {
                EvoBenchError::Dataset(format!(
                    "row {}: '{}' is not a class label",
                    row_idx, &rec[width]
                ))
            })?;

            inputs.push(row);
            labels.push(label);
        }

        if inputs.is_empty() {
            return Err(EvoBenchError::Dataset("dataset is empty".to_string()));
        }

        let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;

        Ok(Dataset {
            inputs,
            labels,
            n_features,
            n_classes,
        })
    }

    /// Partitions into train/test with a seeded shuffle. The same
    /// (fraction, seed) pair always yields the same partition, which is what
    /// keeps cross-run accuracy comparisons meaningful.
    pub fn split(&self, test_fraction: f64, seed: u64) -> EbResult<DatasetSplit> {
        let n = self.inputs.len();
        let n_test = (n as f64 * test_fraction).round() as usize;
        if n_test == 0 || n_test >= n {
            return Err(EvoBenchError::Dataset(format!(
                "test fraction {} leaves no usable partition for {} samples",
                test_fraction, n
            )));
        }

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut indices: Vec<usize> = (0..n).collect();
        rng.shuffle(&mut indices);

        let mut split = DatasetSplit {
            train_inputs: Vec::with_capacity(n - n_test),
            train_labels: Vec::with_capacity(n - n_test),
            test_inputs: Vec::with_capacity(n_test),
            test_labels: Vec::with_capacity(n_test),
            n_features: self.n_features,
            n_classes: self.n_classes,
        };

        for (pos, &idx) in indices.iter().enumerate() {
            if pos < n_test {
                split.test_inputs.push(self.inputs[idx].clone());
                split.test_labels.push(self.labels[idx]);
            } else {
                split.train_inputs.push(self.inputs[idx].clone());
                split.train_labels.push(self.labels[idx]);
            }
        }

        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn toy_csv(rows: usize) -> String {
        let mut s = String::new();
        for i in 0..rows {
            let label = i % 3;
            s.push_str(&format!("{}.0,{}.5,{}\n", i, i, label));
        }
        s
    }

    #[test]
    fn parses_features_and_labels() {
        let ds = Dataset::from_reader(Cursor::new("1.0,2.0,0\n3.0,4.0,1\n")).unwrap();
        assert_eq!(ds.n_features, 2);
        assert_eq!(ds.n_classes, 2);
        assert_eq!(ds.inputs[1], vec![3.0, 4.0]);
        assert_eq!(ds.labels, vec![0, 1]);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::from_reader(Cursor::new("1.0,2.0,0\n3.0,1\n"));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(Dataset::from_reader(Cursor::new("")).is_err());
    }

    #[test]
    fn split_is_disjoint_and_exhaustive() {
        let ds = Dataset::from_reader(Cursor::new(toy_csv(30))).unwrap();
        let split = ds.split(0.33, 0).unwrap();
        assert_eq!(split.test_inputs.len(), 10);
        assert_eq!(split.train_inputs.len(), 20);
        assert_eq!(split.train_labels.len(), 20);
        assert_eq!(split.test_labels.len(), 10);
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let ds = Dataset::from_reader(Cursor::new(toy_csv(30))).unwrap();
        let a = ds.split(0.33, 7).unwrap();
        let b = ds.split(0.33, 7).unwrap();
        assert_eq!(a, b);

        let c = ds.split(0.33, 8).unwrap();
        assert_ne!(a.test_inputs, c.test_inputs);
    }

    #[test]
    fn degenerate_fractions_are_errors() {
        let ds = Dataset::from_reader(Cursor::new(toy_csv(4))).unwrap();
        assert!(ds.split(0.01, 0).is_err());
    }
}
