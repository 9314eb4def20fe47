//! Random forest classifier

use std::cmp::Ordering;

use super::tree::{DecisionTreeClassifier, DecisionTreeConfig};
use super::Classifier;
use crate::error::{Error, Result};

/// Configuration for a random forest classifier
#[derive(Clone, Debug)]
pub struct RandomForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree (None = unbounded)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (None = sqrt of feature count)
    pub max_features: Option<usize>,
    /// Whether to bootstrap-sample the training data per tree
    pub bootstrap: bool,
    /// Random seed; tree i uses seed + i
    pub seed: u64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl RandomForestConfig {
    /// Set the number of trees
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    /// Set maximum depth per tree
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the number of features considered per split
    pub fn with_max_features(mut self, features: usize) -> Self {
        self.max_features = Some(features);
        self
    }

    /// Disable bootstrap sampling
    pub fn without_bootstrap(mut self) -> Self {
        self.bootstrap = false;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Bagged ensemble of decision trees with probability-averaged voting
#[derive(Clone, Debug)]
pub struct RandomForestClassifier {
    config: RandomForestConfig,
    trees: Vec<DecisionTreeClassifier>,
    n_classes: usize,
    is_fitted: bool,
}

impl RandomForestClassifier {
    /// Create a new random forest classifier
    pub fn new(config: RandomForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_classes: 0,
            is_fitted: false,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(RandomForestConfig::default())
    }

    /// Number of fitted trees
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Bootstrap sample indices for one tree, drawn with replacement
    fn bootstrap_indices(&self, n_samples: usize, tree_idx: usize) -> Vec<usize> {
        let mut rng_state = self.config.seed.wrapping_add(tree_idx as u64);
        let mut indices = Vec::with_capacity(n_samples);
        for _ in 0..n_samples {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            indices.push((rng_state >> 33) as usize % n_samples);
        }
        indices
    }

    /// Class probabilities averaged over all trees
    pub fn predict_proba(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if !self.is_fitted {
            return Err(Error::Model("random forest is not fitted".to_string()));
        }

        let n_samples = features.len();
        let mut avg_probs = vec![vec![0.0; self.n_classes]; n_samples];

        for tree in &self.trees {
            let tree_probs = tree.predict_proba(features)?;
            for (avg, probs) in avg_probs.iter_mut().zip(tree_probs.iter()) {
                // A tree fitted on a bootstrap sample may have seen fewer
                // classes; its shorter probability vector still indexes the
                // same global class ids
                for (class, &p) in probs.iter().enumerate() {
                    if class < self.n_classes {
                        avg[class] += p;
                    }
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        for probs in &mut avg_probs {
            for p in probs.iter_mut() {
                *p /= n_trees;
            }
        }
        Ok(avg_probs)
    }
}

impl Classifier for RandomForestClassifier {
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
        if self.config.n_estimators == 0 {
            return Err(Error::InvalidParameter(
                "n_estimators must be > 0".to_string(),
            ));
        }

        let n_samples = features.len();
        let n_features = features[0].len();
        if n_features == 0 {
            return Err(Error::Model("samples have no features".to_string()));
        }
        self.n_classes = labels.iter().max().map_or(0, |&m| m + 1);

        // sqrt(n_features) is the usual default for classification
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .clamp(1, n_features);

        self.trees.clear();
        for tree_idx in 0..self.config.n_estimators {
            let mut tree_config = DecisionTreeConfig::default()
                .with_min_samples_split(self.config.min_samples_split)
                .with_min_samples_leaf(self.config.min_samples_leaf)
                .with_max_features(max_features)
                .with_seed(self.config.seed.wrapping_add(tree_idx as u64));
            if let Some(depth) = self.config.max_depth {
                tree_config = tree_config.with_max_depth(depth);
            }

            let indices = if self.config.bootstrap {
                self.bootstrap_indices(n_samples, tree_idx)
            } else {
                (0..n_samples).collect()
            };

            let boot_features: Vec<Vec<f64>> =
                indices.iter().map(|&i| features[i].clone()).collect();
            let boot_labels: Vec<usize> = indices.iter().map(|&i| labels[i]).collect();

            let mut tree = DecisionTreeClassifier::new(tree_config);
            tree.fit(&boot_features, &boot_labels)?;
            self.trees.push(tree);
        }

        self.is_fitted = true;
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
                    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                    .map(|(class, _)| class)
                    .unwrap_or(0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..30 {
            let offset = f64::from(i) * 0.01;
            x.push(vec![0.0 + offset, 0.0 - offset]);
            y.push(0);
            x.push(vec![5.0 + offset, 5.0 - offset]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn test_fits_separable_blobs() {
        let (x, y) = two_blobs();
        let config = RandomForestConfig::default().with_n_estimators(10).with_max_depth(4);
        let mut forest = RandomForestClassifier::new(config);
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.predict(&x).unwrap(), y);
        assert_eq!(forest.n_estimators(), 10);
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let (x, y) = two_blobs();
        let config = RandomForestConfig::default().with_n_estimators(5).with_seed(7);
        let mut a = RandomForestClassifier::new(config.clone());
        let mut b = RandomForestClassifier::new(config);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn test_bootstrap_indices_are_deterministic() {
        let forest = RandomForestClassifier::default_config();
        assert_eq!(
            forest.bootstrap_indices(100, 3),
            forest.bootstrap_indices(100, 3)
        );
        assert_ne!(
            forest.bootstrap_indices(100, 3),
            forest.bootstrap_indices(100, 4)
        );
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = two_blobs();
        let config = RandomForestConfig::default().with_n_estimators(5);
        let mut forest = RandomForestClassifier::new(config);
        forest.fit(&x, &y).unwrap();
        for probs in forest.predict_proba(&x).unwrap() {
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "probs sum to {sum}");
        }
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let forest = RandomForestClassifier::default_config();
        assert!(forest.predict(&[vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_zero_estimators_rejected() {
        let (x, y) = two_blobs();
        let mut forest = RandomForestClassifier::new(RandomForestConfig {
            n_estimators: 0,
            ..RandomForestConfig::default()
        });
        assert!(forest.fit(&x, &y).is_err());
    }
}
