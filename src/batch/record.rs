//! Metric record produced per (dataset, model) pair

use serde::{Deserialize, Serialize};

/// One evaluation outcome for a (dataset, model) pair
///
/// Field order is the serialization order for both log formats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// ISO-8601 wall-clock timestamp of record creation
    pub timestamp: String,
    /// Dataset key
    pub dataset: String,
    /// Model key
    pub model: String,
    /// Exact-match fraction, rounded to 4 decimals
    pub accuracy: f64,
    /// Support-weighted F1, rounded to 4 decimals
    pub f1_score: f64,
}

/// Round to 4 decimal places with ties to even
pub fn round4(value: f64) -> f64 {
    (value * 1e4).round_ties_even() / 1e4
}
