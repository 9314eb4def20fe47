//! Multi-class classification metrics

use super::average::Average;
use super::confusion::ConfusionMatrix;

/// Per-class precision, recall, and F1 with support counts
#[derive(Clone, Debug)]
pub struct MultiClassMetrics {
    /// Per-class precision
    pub precision: Vec<f64>,
    /// Per-class recall
    pub recall: Vec<f64>,
    /// Per-class F1 score
    pub f1: Vec<f64>,
    /// Per-class support (count of true instances)
    pub support: Vec<usize>,
    /// Number of classes
    pub n_classes: usize,
}

impl MultiClassMetrics {
    /// Compute metrics from a confusion matrix
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut f1 = Vec::with_capacity(n_classes);
        let mut support = Vec::with_capacity(n_classes);

        for class in 0..n_classes {
            let tp = cm.true_positives(class) as f64;
            let fp = cm.false_positives(class) as f64;
            let fn_ = cm.false_negatives(class) as f64;

            let p = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
            let r = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
            let f = if p + r > 0.0 {
                2.0 * p * r / (p + r)
            } else {
                0.0
            };

            precision.push(p);
            recall.push(r);
            f1.push(f);
            support.push(cm.support(class));
        }

        Self {
            precision,
            recall,
            f1,
            support,
            n_classes,
        }
    }

    /// Compute from predictions and ground truth with a known class count
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        let cm = ConfusionMatrix::with_n_classes(y_pred, y_true, n_classes);
        Self::from_confusion_matrix(&cm)
    }

    /// Averaged precision
    pub fn precision_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.precision, average)
    }

    /// Averaged recall
    pub fn recall_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.recall, average)
    }

    /// Averaged F1
    pub fn f1_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.f1, average)
    }

    fn average_metric(&self, values: &[f64], average: Average) -> f64 {
        match average {
            Average::Macro => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            Average::Weighted => {
                let total_support: usize = self.support.iter().sum();
                if total_support == 0 {
                    return 0.0;
                }
                values
                    .iter()
                    .zip(self.support.iter())
                    .map(|(&v, &s)| v * s as f64)
                    .sum::<f64>()
                    / total_support as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_predictions() {
        let labels = vec![0, 1, 2, 0, 1, 2];
        let m = MultiClassMetrics::from_predictions(&labels, &labels, 3);
        assert_relative_eq!(m.f1_avg(Average::Weighted), 1.0);
        assert_relative_eq!(m.f1_avg(Average::Macro), 1.0);
        assert_relative_eq!(m.precision_avg(Average::Weighted), 1.0);
        assert_relative_eq!(m.recall_avg(Average::Weighted), 1.0);
    }

    #[test]
    fn test_weighted_f1_matches_hand_computation() {
        // True: two 0s, one 1. Predict: [0, 1, 1].
        // Class 0: tp=1 fp=0 fn=1 -> p=1, r=0.5, f1=2/3, support 2
        // Class 1: tp=1 fp=1 fn=0 -> p=0.5, r=1, f1=2/3, support 1
        let m = MultiClassMetrics::from_predictions(&[0, 1, 1], &[0, 0, 1], 2);
        assert_relative_eq!(m.f1[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.f1[1], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            m.f1_avg(Average::Weighted),
            2.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_weighted_differs_from_macro_on_imbalance() {
        // Class 0 dominates and is predicted well; class 1 is not
        let y_true = vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1];
        let y_pred = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        let m = MultiClassMetrics::from_predictions(&y_pred, &y_true, 2);
        assert!(m.f1_avg(Average::Weighted) > m.f1_avg(Average::Macro));
    }

    #[test]
    fn test_absent_class_scores_zero() {
        let m = MultiClassMetrics::from_predictions(&[0, 0], &[0, 0], 2);
        assert_eq!(m.f1[1], 0.0);
        assert_eq!(m.support[1], 0);
        // Weighted average ignores the zero-support class
        assert_relative_eq!(m.f1_avg(Average::Weighted), 1.0);
    }

    #[test]
    fn test_all_wrong_is_zero() {
        let m = MultiClassMetrics::from_predictions(&[1, 0], &[0, 1], 2);
        assert_eq!(m.f1_avg(Average::Weighted), 0.0);
    }
}
