//! The list command: show the built-in evaluation matrix

use crate::batch::BatchConfig;
use crate::cli::logging::{log, LogLevel};
use crate::error::Result;

/// Print the built-in dataset and model keys
pub fn run_list(log_level: LogLevel) -> Result<()> {
    let config = BatchConfig::default();

    log(log_level, LogLevel::Normal, "Datasets:");
    for dataset in &config.datasets {
        log(log_level, LogLevel::Normal, &format!("  {}", dataset.name));
    }
    log(log_level, LogLevel::Normal, "Models:");
    for model in &config.models {
        log(log_level, LogLevel::Normal, &format!("  {}", model.name));
    }
    Ok(())
}
