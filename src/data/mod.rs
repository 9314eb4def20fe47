//! Datasets for batch evaluation
//!
//! A [`Dataset`] is an immutable bundle of a feature matrix and a label
//! vector. Datasets enter the evaluator through the [`DatasetProvider`]
//! trait, so built-in generators and external sources share one seam.

mod builtin;
mod split;

pub use builtin::{DigitsDataset, IrisDataset};
pub use split::TrainTestSplit;

use crate::error::{Error, Result};

/// An immutable feature matrix with class labels
///
/// Rows are samples, columns are features. Labels are class indices in
/// `0..n_classes`.
#[derive(Clone, Debug)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    n_classes: usize,
}

impl Dataset {
    /// Create a dataset, validating shape consistency
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::Dataset("empty feature matrix".to_string()));
        }
        if features.len() != labels.len() {
            return Err(Error::Dataset(format!(
                "feature/label length mismatch: {} vs {}",
                features.len(),
                labels.len()
            )));
        }
        let width = features[0].len();
        if width == 0 {
            return Err(Error::Dataset("samples have no features".to_string()));
        }
        if features.iter().any(|row| row.len() != width) {
            return Err(Error::Dataset("ragged feature matrix".to_string()));
        }
        let n_classes = labels.iter().max().map_or(0, |&m| m + 1);
        Ok(Self {
            features,
            labels,
            n_classes,
        })
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features per sample
    pub fn n_features(&self) -> usize {
        self.features[0].len()
    }

    /// Number of classes (max label + 1)
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Feature matrix
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Label vector
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Materialize the rows at `indices` as an owned (features, labels) pair
    pub fn select(&self, indices: &[usize]) -> (Vec<Vec<f64>>, Vec<usize>) {
        let features = indices.iter().map(|&i| self.features[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        (features, labels)
    }
}

/// Opaque source of a dataset
///
/// Implementations must be deterministic: repeated loads yield identical
/// features and labels.
pub trait DatasetProvider {
    /// Load the full dataset
    fn load(&self) -> Result<Dataset>;
}
