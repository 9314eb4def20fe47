//! Trainable classifier models
//!
//! Models enter the evaluator through two seams: [`Classifier`] is the
//! minimal fit/predict capability, and [`ModelFactory`] builds a fresh
//! instance for every (dataset, model) pair so no fitted state leaks
//! between evaluations.

mod forest;
mod logistic;
mod tree;

pub use forest::{RandomForestClassifier, RandomForestConfig};
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
pub use tree::{DecisionTreeClassifier, DecisionTreeConfig, SplitCriterion};

use crate::error::Result;

/// Minimal trainable-model capability: fit on labeled data, predict labels
pub trait Classifier {
    /// Fit the model on a feature matrix and class labels
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<()>;

    /// Predict class labels for a feature matrix
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>>;
}

/// Builds fresh, unfitted classifier instances
pub trait ModelFactory {
    /// Construct a new classifier from this configuration
    fn build(&self) -> Box<dyn Classifier>;
}

impl ModelFactory for RandomForestConfig {
    fn build(&self) -> Box<dyn Classifier> {
        Box::new(RandomForestClassifier::new(self.clone()))
    }
}

impl ModelFactory for LogisticRegressionConfig {
    fn build(&self) -> Box<dyn Classifier> {
        Box::new(LogisticRegression::new(self.clone()))
    }
}

impl ModelFactory for DecisionTreeConfig {
    fn build(&self) -> Box<dyn Classifier> {
        Box::new(DecisionTreeClassifier::new(self.clone()))
    }
}
