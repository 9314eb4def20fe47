//! Batch Evaluator
//!
//! Runs every configured model against every configured dataset: split,
//! fit, predict, score. One [`MetricRecord`] is produced per (dataset,
//! model) pair in nested loop order (outer datasets, inner models), and the
//! full sequence is persisted as CSV and JSON only after the loop completes,
//! so a mid-loop failure leaves no output files behind.

mod record;
mod sink;

pub use record::{round4, MetricRecord};
pub use sink::{LogSink, CSV_FILE, JSON_FILE};

use std::path::PathBuf;

use chrono::Utc;

use crate::cli::{log, LogLevel};
use crate::data::{DatasetProvider, DigitsDataset, IrisDataset, TrainTestSplit};
use crate::error::{Error, Result};
use crate::eval::{Average, ConfusionMatrix, MultiClassMetrics};
use crate::model::{LogisticRegressionConfig, ModelFactory, RandomForestConfig};

/// A dataset provider with its string key
pub struct NamedDataset {
    /// Dataset key used in records and logs
    pub name: String,
    /// Opaque dataset source
    pub provider: Box<dyn DatasetProvider>,
}

impl NamedDataset {
    /// Pair a name with a provider
    pub fn new(name: impl Into<String>, provider: Box<dyn DatasetProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }
}

/// A model factory with its string key
pub struct NamedModel {
    /// Model key used in records and logs
    pub name: String,
    /// Factory building a fresh instance per (dataset, model) pair
    pub factory: Box<dyn ModelFactory>,
}

impl NamedModel {
    /// Pair a name with a factory
    pub fn new(name: impl Into<String>, factory: Box<dyn ModelFactory>) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }
}

/// Configuration for a batch evaluation run
///
/// Datasets and models are ordered; iteration order defines record order.
pub struct BatchConfig {
    /// Datasets, in evaluation order
    pub datasets: Vec<NamedDataset>,
    /// Models, in evaluation order
    pub models: Vec<NamedModel>,
    /// Fraction of each dataset reserved for testing
    pub test_fraction: f64,
    /// Seed for the train/test split
    pub seed: u64,
    /// Directory receiving both log files
    pub output_dir: PathBuf,
}

impl Default for BatchConfig {
    /// The built-in evaluation matrix: iris and digits against a 100-tree
    /// random forest and logistic regression, 0.2 test split, seed 42,
    /// logs under `pipeline/results_logs`
    fn default() -> Self {
        Self {
            datasets: vec![
                NamedDataset::new("iris", Box::new(IrisDataset)),
                NamedDataset::new("digits", Box::new(DigitsDataset)),
            ],
            models: vec![
                NamedModel::new("random_forest", Box::new(RandomForestConfig::default())),
                NamedModel::new(
                    "logistic_regression",
                    Box::new(LogisticRegressionConfig::default()),
                ),
            ],
            test_fraction: 0.2,
            seed: 42,
            output_dir: PathBuf::from("pipeline/results_logs"),
        }
    }
}

/// Runs the dataset x model evaluation matrix and persists the metric logs
pub struct BatchEvaluator {
    config: BatchConfig,
    log_level: LogLevel,
}

impl BatchEvaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            log_level: LogLevel::Normal,
        }
    }

    /// Set console output level
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    fn validate(&self) -> Result<()> {
        if !(self.config.test_fraction > 0.0 && self.config.test_fraction < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                self.config.test_fraction
            )));
        }
        if self.config.datasets.is_empty() {
            return Err(Error::InvalidParameter("no datasets configured".to_string()));
        }
        if self.config.models.is_empty() {
            return Err(Error::InvalidParameter("no models configured".to_string()));
        }
        Ok(())
    }

    /// Run the full evaluation matrix
    ///
    /// Returns the ordered record sequence after writing both log files.
    /// Any dataset, model, or filesystem failure propagates immediately; in
    /// that case no log file is written.
    pub fn run(&self) -> Result<Vec<MetricRecord>> {
        self.validate()?;

        let splitter =
            TrainTestSplit::new(self.config.test_fraction).with_seed(self.config.seed);
        let mut records = Vec::with_capacity(self.config.datasets.len() * self.config.models.len());

        for dataset in &self.config.datasets {
            let data = dataset.provider.load()?;
            let (train_idx, test_idx) = splitter.split(data.n_samples());
            let (x_train, y_train) = data.select(&train_idx);
            let (x_test, y_test) = data.select(&test_idx);

            for model in &self.config.models {
                let mut classifier = model.factory.build();
                classifier.fit(&x_train, &y_train)?;
                let y_pred = classifier.predict(&x_test)?;

                let cm = ConfusionMatrix::with_n_classes(&y_pred, &y_test, data.n_classes());
                let accuracy = round4(cm.accuracy());
                let f1_score = round4(
                    MultiClassMetrics::from_confusion_matrix(&cm).f1_avg(Average::Weighted),
                );

                records.push(MetricRecord {
                    timestamp: Utc::now().to_rfc3339(),
                    dataset: dataset.name.clone(),
                    model: model.name.clone(),
                    accuracy,
                    f1_score,
                });

                log(
                    self.log_level,
                    LogLevel::Normal,
                    &format!(
                        "Finished: {} on {} | Acc: {accuracy:.4}, F1: {f1_score:.4}",
                        model.name, dataset.name
                    ),
                );
            }
        }

        LogSink::new(&self.config.output_dir).write(&records)?;
        log(
            self.log_level,
            LogLevel::Normal,
            &format!(
                "\nAll results saved in: {}",
                self.config.output_dir.display()
            ),
        );

        Ok(records)
    }
}
