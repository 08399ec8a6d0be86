use crate::dataset::DatasetSplit;
use crate::error::{EbResult, EvoBenchError};

/// Fixed architecture: two sigmoid hidden layers, softmax output. The sweep
/// tunes the search, never the network.
pub const HIDDEN_WIDTHS: [usize; 2] = [10, 10];

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

pub fn accuracy(truth: &[usize], predicted: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let hits = truth
        .iter()
        .zip(predicted.iter())
        .filter(|(t, p)| t == p)
        .count();
    hits as f64 / truth.len() as f64
}

/// Feed-forward classifier whose entire weight vector is the search space.
///
/// On construction it carves a validation subset out of the training
/// partition using the caller's RNG, so a given seed fixes both the weight
/// initialization downstream and the internal fit/validation split.
pub struct Classifier {
    n_features: usize,
    n_classes: usize,
    fit_inputs: Vec<Vec<f64>>,
    fit_labels: Vec<usize>,
    val_inputs: Vec<Vec<f64>>,
    val_labels: Vec<usize>,
    weights: Vec<f64>,
}

impl Classifier {
    pub fn new(
        split: &DatasetSplit,
        validation_fraction: f64,
        rng: &mut fastrand::Rng,
    ) -> EbResult<Self> {
        let n_train = split.train_inputs.len();
        let n_val = (n_train as f64 * validation_fraction).round() as usize;
        if n_val == 0 || n_val >= n_train {
            return Err(EvoBenchError::Dataset(format!(
                "validation fraction {} leaves no usable fit set for {} training samples",
                validation_fraction, n_train
            )));
        }

        let mut indices: Vec<usize> = (0..n_train).collect();
        rng.shuffle(&mut indices);

        let mut classifier = Classifier {
            n_features: split.n_features,
            n_classes: split.n_classes,
            fit_inputs: Vec::with_capacity(n_train - n_val),
            fit_labels: Vec::with_capacity(n_train - n_val),
            val_inputs: Vec::with_capacity(n_val),
            val_labels: Vec::with_capacity(n_val),
            weights: Vec::new(),
        };

        for (pos, &idx) in indices.iter().enumerate() {
            if pos < n_val {
                classifier.val_inputs.push(split.train_inputs[idx].clone());
                classifier.val_labels.push(split.train_labels[idx]);
            } else {
                classifier.fit_inputs.push(split.train_inputs[idx].clone());
                classifier.fit_labels.push(split.train_labels[idx]);
            }
        }

        classifier.weights = vec![0.0; classifier.weight_count()];
        Ok(classifier)
    }

    /// Number of weights the forward pass consumes; the optimizer's search
    /// space dimension must always match this.
    pub fn weight_count(&self) -> usize {
        let [h1, h2] = HIDDEN_WIDTHS;
        self.n_features * h1 + h1 * h2 + h2 * self.n_classes
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Fitness of a candidate weight vector: classification accuracy on the
    /// internal validation subset. Pure with respect to `self`.
    pub fn stimulate(&self, candidate: &[f64]) -> f64 {
        let predicted = self.predict_with(candidate, &self.val_inputs);
        accuracy(&self.val_labels, &predicted)
    }

    /// Installs a weight vector, taking ownership of it.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> EbResult<()> {
        if weights.len() != self.weight_count() {
            return Err(EvoBenchError::Search(format!(
                "weight vector has {} entries, network needs {}",
                weights.len(),
                self.weight_count()
            )));
        }
        self.weights = weights;
        Ok(())
    }

    /// Predicts class labels with the installed weights.
    pub fn predict(&self, inputs: &[Vec<f64>]) -> Vec<usize> {
        self.predict_with(&self.weights, inputs)
    }

    fn predict_with(&self, weights: &[f64], inputs: &[Vec<f64>]) -> Vec<usize> {
        inputs
            .iter()
            .map(|x| {
                let probs = self.forward(weights, x);
                argmax(&probs)
            })
            .collect()
    }

    /// Forward pass: input -> sigmoid(h1) -> sigmoid(h2) -> softmax(classes).
    /// Weight layout is row-major per layer, no bias terms.
    fn forward(&self, weights: &[f64], x: &[f64]) -> Vec<f64> {
        let [h1, h2] = HIDDEN_WIDTHS;
        let w1 = &weights[..self.n_features * h1];
        let w2 = &weights[self.n_features * h1..self.n_features * h1 + h1 * h2];
        let w3 = &weights[self.n_features * h1 + h1 * h2..];

        let mut a1 = vec![0.0; h1];
        for (j, out) in a1.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (f, &xf) in x.iter().enumerate() {
                sum += xf * w1[f * h1 + j];
            }
            *out = sigmoid(sum);
        }

        let mut a2 = vec![0.0; h2];
        for (j, out) in a2.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (i, &ai) in a1.iter().enumerate() {
                sum += ai * w2[i * h2 + j];
            }
            *out = sigmoid(sum);
        }

        let mut logits = vec![0.0; self.n_classes];
        for (j, out) in logits.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (i, &ai) in a2.iter().enumerate() {
                sum += ai * w3[i * self.n_classes + j];
            }
            *out = sum;
        }

        softmax(&logits)
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
