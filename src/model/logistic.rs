//! Multinomial logistic regression

use super::Classifier;
use crate::error::{Error, Result};

/// Configuration for multinomial logistic regression
#[derive(Clone, Debug)]
pub struct LogisticRegressionConfig {
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Maximum number of gradient descent iterations
    pub max_iter: usize,
    /// Convergence threshold on loss improvement
    pub tol: f64,
    /// L2 regularization strength
    pub l2: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iter: 1000,
            tol: 1e-6,
            l2: 0.0,
        }
    }
}

impl LogisticRegressionConfig {
    /// Set the maximum iteration count
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the learning rate
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set the L2 regularization strength
    pub fn with_l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }
}

/// Softmax classifier trained with full-batch gradient descent
///
/// Features are standardized internally (per-feature mean/std recorded at
/// fit time) so the fixed learning rate behaves across datasets with very
/// different scales.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    /// Weight matrix [n_classes][n_features]
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    feature_means: Vec<f64>,
    feature_stds: Vec<f64>,
    n_classes: usize,
    is_fitted: bool,
}

impl LogisticRegression {
    /// Create a new logistic regression model
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self {
            config,
            weights: Vec::new(),
            bias: Vec::new(),
            feature_means: Vec::new(),
            feature_stds: Vec::new(),
            n_classes: 0,
            is_fitted: false,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(LogisticRegressionConfig::default())
    }

    fn standardize_row(&self, sample: &[f64]) -> Vec<f64> {
        sample
            .iter()
            .zip(self.feature_means.iter().zip(self.feature_stds.iter()))
            .map(|(&v, (&mean, &std))| (v - mean) / std)
            .collect()
    }

    /// Numerically stable softmax over logits
    fn softmax(logits: &[f64]) -> Vec<f64> {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|&z| (z - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        exps.iter().map(|&e| e / sum).collect()
    }

    fn logits(&self, sample: &[f64]) -> Vec<f64> {
        (0..self.n_classes)
            .map(|class| {
                self.bias[class]
                    + self.weights[class]
                        .iter()
                        .zip(sample.iter())
                        .map(|(&w, &v)| w * v)
                        .sum::<f64>()
            })
            .collect()
    }

    /// Class probabilities for a feature matrix
    pub fn predict_proba(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if !self.is_fitted {
            return Err(Error::Model("logistic regression is not fitted".to_string()));
        }
        features
            .iter()
            .map(|sample| {
                if sample.len() != self.feature_means.len() {
                    return Err(Error::Model(format!(
                        "expected {} features, got {}",
                        self.feature_means.len(),
                        sample.len()
                    )));
                }
                let xs = self.standardize_row(sample);
                Ok(Self::softmax(&self.logits(&xs)))
            })
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<()> {
        if features.is_empty() {
            return Err(Error::Model("cannot fit on empty data".to_string()));
        }
        if features.len() != labels.len() {
            return Err(Error::Model(format!(
                "feature/label length mismatch: {} vs {}",
                features.len(),
                labels.len()
            )));
        }

        let n_samples = features.len();
        let n_features = features[0].len();
        self.n_classes = labels.iter().max().map_or(0, |&m| m + 1);

        // Per-feature standardization parameters
        self.feature_means = (0..n_features)
            .map(|f| features.iter().map(|row| row[f]).sum::<f64>() / n_samples as f64)
            .collect();
        self.feature_stds = (0..n_features)
            .map(|f| {
                let mean = self.feature_means[f];
                let var = features
                    .iter()
                    .map(|row| (row[f] - mean).powi(2))
                    .sum::<f64>()
                    / n_samples as f64;
                let std = var.sqrt();
                // constant features carry no signal; avoid division by zero
                if std > 1e-12 {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        let x: Vec<Vec<f64>> = features.iter().map(|row| self.standardize_row(row)).collect();

        self.weights = vec![vec![0.0; n_features]; self.n_classes];
        self.bias = vec![0.0; self.n_classes];
        self.is_fitted = true; // logits() below needs the parameters in place

        let lr = self.config.learning_rate;
        let n = n_samples as f64;
        let mut prev_loss = f64::INFINITY;

        for _ in 0..self.config.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; self.n_classes];
            let mut grad_b = vec![0.0; self.n_classes];
            let mut loss = 0.0;

            for (sample, &label) in x.iter().zip(labels.iter()) {
                let probs = Self::softmax(&self.logits(sample));
                loss -= probs[label].max(1e-300).ln();

                for class in 0..self.n_classes {
                    let residual = probs[class] - f64::from(u8::from(class == label));
                    grad_b[class] += residual;
                    let row = &mut grad_w[class];
                    for (g, &v) in row.iter_mut().zip(sample.iter()) {
                        *g += residual * v;
                    }
                }
            }

            loss /= n;
            if self.config.l2 > 0.0 {
                let sq: f64 = self
                    .weights
                    .iter()
                    .flat_map(|row| row.iter())
                    .map(|&w| w * w)
                    .sum();
                loss += 0.5 * self.config.l2 * sq;
            }

            for class in 0..self.n_classes {
                self.bias[class] -= lr * grad_b[class] / n;
                for (w, &g) in self.weights[class].iter_mut().zip(grad_w[class].iter()) {
                    *w -= lr * (g / n + self.config.l2 * *w);
                }
            }

            if (prev_loss - loss).abs() < self.config.tol {
                break;
            }
            prev_loss = loss;
        }

        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>> {
        let probs = self.predict_proba(features)?;
        Ok(probs
            .iter()
            .map(|sample_probs| {
                sample_probs
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(class, _)| class)
                    .unwrap_or(0)
            })
            .collect())
    }
}
