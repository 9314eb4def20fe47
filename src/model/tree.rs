//! Decision tree classifier

use std::cmp::Ordering;

use super::Classifier;
use crate::error::{Error, Result};

/// Split quality criterion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitCriterion {
    /// Gini impurity
    #[default]
    Gini,
    /// Information entropy
    Entropy,
}

/// Configuration for a decision tree classifier
#[derive(Clone, Debug)]
pub struct DecisionTreeConfig {
    /// Maximum tree depth (None = unbounded)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required in a leaf
    pub min_samples_leaf: usize,
    /// Number of features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Split quality criterion
    pub criterion: SplitCriterion,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            criterion: SplitCriterion::Gini,
            seed: 42,
        }
    }
}

impl DecisionTreeConfig {
    /// Set maximum tree depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set minimum samples required to split
    pub fn with_min_samples_split(mut self, samples: usize) -> Self {
        self.min_samples_split = samples;
        self
    }

    /// Set minimum samples per leaf
    pub fn with_min_samples_leaf(mut self, samples: usize) -> Self {
        self.min_samples_leaf = samples;
        self
    }

    /// Set the number of features considered per split
    pub fn with_max_features(mut self, features: usize) -> Self {
        self.max_features = Some(features);
        self
    }

    /// Set the split criterion
    pub fn with_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A node in the fitted tree, stored in a flat vec
#[derive(Clone, Debug)]
struct TreeNode {
    feature_index: Option<usize>,
    threshold: Option<f64>,
    left_child: Option<usize>,
    right_child: Option<usize>,
    /// Class distribution of training samples reaching this node
    class_probs: Vec<f64>,
    /// Majority class at this node
    prediction: usize,
    is_leaf: bool,
}

impl TreeNode {
    fn new_leaf(prediction: usize, class_probs: Vec<f64>) -> Self {
        Self {
            feature_index: None,
            threshold: None,
            left_child: None,
            right_child: None,
            class_probs,
            prediction,
            is_leaf: true,
        }
    }

    fn new_split(feature_index: usize, threshold: f64, prediction: usize, class_probs: Vec<f64>) -> Self {
        Self {
            feature_index: Some(feature_index),
            threshold: Some(threshold),
            left_child: None,
            right_child: None,
            class_probs,
            prediction,
            is_leaf: false,
        }
    }
}

/// CART-style decision tree classifier
///
/// Thresholds are midpoints between adjacent sorted feature values; split
/// quality is evaluated with a single sorted sweep per candidate feature.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier {
    config: DecisionTreeConfig,
    nodes: Vec<TreeNode>,
    n_classes: usize,
    n_features: usize,
    is_fitted: bool,
}

impl DecisionTreeClassifier {
    /// Create a new decision tree classifier
    pub fn new(config: DecisionTreeConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            n_classes: 0,
            n_features: 0,
            is_fitted: false,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(DecisionTreeConfig::default())
    }

    /// Depth of the fitted tree
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, node_idx: usize) -> usize {
        match self.nodes.get(node_idx) {
            None => 0,
            Some(node) if node.is_leaf => 0,
            Some(node) => {
                let l = node.left_child.map_or(0, |c| self.depth_from(c));
                let r = node.right_child.map_or(0, |c| self.depth_from(c));
                1 + l.max(r)
            }
        }
    }

    /// Number of leaves in the fitted tree
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf).count()
    }

    fn gini_impurity(class_counts: &[usize], total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let total_f = total as f64;
        1.0 - class_counts
            .iter()
            .map(|&c| (c as f64 / total_f).powi(2))
            .sum::<f64>()
    }

    fn entropy(class_counts: &[usize], total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let total_f = total as f64;
        -class_counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total_f;
                p * p.ln()
            })
            .sum::<f64>()
    }

    fn impurity(&self, class_counts: &[usize], total: usize) -> f64 {
        match self.config.criterion {
            SplitCriterion::Gini => Self::gini_impurity(class_counts, total),
            SplitCriterion::Entropy => Self::entropy(class_counts, total),
        }
    }

    /// Features to consider at one node, subsampled when max_features is set
    fn candidate_features(&self, rng_state: &mut u64) -> Vec<usize> {
        match self.config.max_features {
            Some(max_features) if max_features < self.n_features => {
                let mut feature_indices: Vec<usize> = (0..self.n_features).collect();
                for i in (1..feature_indices.len()).rev() {
                    *rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
                    let j = (*rng_state >> 33) as usize % (i + 1);
                    feature_indices.swap(i, j);
                }
                feature_indices.truncate(max_features);
                feature_indices
            }
            _ => (0..self.n_features).collect(),
        }
    }

    /// Find the best split for a node
    ///
    /// Returns (feature, threshold, left_indices, right_indices) for the
    /// split with the highest impurity gain, or None when no split improves.
    fn find_best_split(
        &self,
        x: &[Vec<f64>],
        y: &[usize],
        indices: &[usize],
        class_counts: &[usize],
        rng_state: &mut u64,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n = indices.len();
        if n < self.config.min_samples_split {
            return None;
        }

        let current_impurity = self.impurity(class_counts, n);
        let mut best_gain = 0.0;
        let mut best: Option<(usize, f64)> = None;

        for &feature in &self.candidate_features(rng_state) {
            // Sweep samples in feature order, moving one at a time from the
            // right partition to the left and scoring each value boundary
            let mut order: Vec<usize> = indices.to_vec();
            order.sort_by(|&a, &b| {
                x[a][feature]
                    .partial_cmp(&x[b][feature])
                    .unwrap_or(Ordering::Equal)
            });

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = class_counts.to_vec();

            for k in 0..n - 1 {
                let idx = order[k];
                left_counts[y[idx]] += 1;
                right_counts[y[idx]] -= 1;

                let value = x[idx][feature];
                let next = x[order[k + 1]][feature];
                if next <= value {
                    continue; // no boundary between equal values
                }

                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < self.config.min_samples_leaf || n_right < self.config.min_samples_leaf {
                    continue;
                }

                let weighted = (n_left as f64 * self.impurity(&left_counts, n_left)
                    + n_right as f64 * self.impurity(&right_counts, n_right))
                    / n as f64;
                let gain = current_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, (value + next) / 2.0));
                }
            }
        }

        let (feature, threshold) = best?;
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&idx| x[idx][feature] <= threshold);
        Some((feature, threshold, left_indices, right_indices))
    }

    /// Build the tree recursively, returning the node index
    fn build_tree(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        indices: Vec<usize>,
        depth: usize,
        rng_state: &mut u64,
    ) -> usize {
        let total = indices.len();
        let mut class_counts = vec![0usize; self.n_classes];
        for &idx in &indices {
            class_counts[y[idx]] += 1;
        }

        let prediction = class_counts
            .iter()
            .enumerate()
            .max_by_key(|(_, &c)| c)
            .map(|(class, _)| class)
            .unwrap_or(0);
        let class_probs: Vec<f64> = class_counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect();

        let pure = class_counts.iter().filter(|&&c| c > 0).count() <= 1;
        let at_max_depth = self.config.max_depth.is_some_and(|d| depth >= d);
        if pure || at_max_depth || total < self.config.min_samples_split {
            let node_idx = self.nodes.len();
            self.nodes.push(TreeNode::new_leaf(prediction, class_probs));
            return node_idx;
        }

        match self.find_best_split(x, y, &indices, &class_counts, rng_state) {
            Some((feature, threshold, left_indices, right_indices)) => {
                let node_idx = self.nodes.len();
                self.nodes
                    .push(TreeNode::new_split(feature, threshold, prediction, class_probs));

                let left = self.build_tree(x, y, left_indices, depth + 1, rng_state);
                let right = self.build_tree(x, y, right_indices, depth + 1, rng_state);
                self.nodes[node_idx].left_child = Some(left);
                self.nodes[node_idx].right_child = Some(right);
                node_idx
            }
            None => {
                let node_idx = self.nodes.len();
                self.nodes.push(TreeNode::new_leaf(prediction, class_probs));
                node_idx
            }
        }
    }

    /// Class distribution at the leaf a sample falls into
    pub fn predict_proba_single(&self, sample: &[f64]) -> Result<Vec<f64>> {
        if !self.is_fitted {
            return Err(Error::Model("decision tree is not fitted".to_string()));
        }
        if sample.len() != self.n_features {
            return Err(Error::Model(format!(
                "expected {} features, got {}",
                self.n_features,
                sample.len()
            )));
        }

        let mut node_idx = 0;
        loop {
            let node = &self.nodes[node_idx];
            if node.is_leaf {
                return Ok(node.class_probs.clone());
            }
            let feature = node.feature_index.ok_or_else(|| {
                Error::Model("split node missing feature index".to_string())
            })?;
            let threshold = node
                .threshold
                .ok_or_else(|| Error::Model("split node missing threshold".to_string()))?;
            node_idx = if sample[feature] <= threshold {
                node.left_child
            } else {
                node.right_child
            }
            .ok_or_else(|| Error::Model("split node missing child".to_string()))?;
        }
    }

    /// Class distributions for a feature matrix
    pub fn predict_proba(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        features
            .iter()
            .map(|sample| self.predict_proba_single(sample))
            .collect()
    }
}

impl Classifier for DecisionTreeClassifier {
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

        self.n_features = features[0].len();
        self.n_classes = labels.iter().max().map_or(0, |&m| m + 1);
        self.nodes.clear();

        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng_state = self.config.seed;
        self.build_tree(features, labels, indices, 0, &mut rng_state);
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
