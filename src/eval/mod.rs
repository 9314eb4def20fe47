//! Classification metrics
//!
//! Confusion-matrix based accuracy and per-class precision/recall/F1 with
//! macro and support-weighted averaging.

mod average;
mod confusion;
mod metrics;

pub use average::Average;
pub use confusion::ConfusionMatrix;
pub use metrics::MultiClassMetrics;
