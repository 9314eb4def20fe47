//! # evaluar
//!
//! Batch classifier evaluation with dual-format metric logs.
//!
//! For each configured dataset, the [`batch::BatchEvaluator`] splits the
//! data into deterministic train/test partitions, fits a fresh instance of
//! each configured model, scores accuracy and support-weighted F1 on the
//! test partition, and persists one record per (dataset, model) pair as a
//! CSV table and a pretty-printed JSON array.
//!
//! # Example
//!
//! ```no_run
//! use evaluar::batch::{BatchConfig, BatchEvaluator};
//!
//! # fn main() -> evaluar::error::Result<()> {
//! let records = BatchEvaluator::new(BatchConfig::default()).run()?;
//! assert_eq!(records.len(), 4); // 2 datasets x 2 models
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod data;
pub mod error;
pub mod eval;
pub mod model;

pub use batch::{BatchConfig, BatchEvaluator, MetricRecord};
pub use error::{Error, Result};
