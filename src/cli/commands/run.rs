//! The run command: execute the batch evaluation

use crate::batch::{BatchConfig, BatchEvaluator};
use crate::cli::args::RunArgs;
use crate::cli::logging::{log, LogLevel};
use crate::error::Result;

/// Run the built-in evaluation matrix, optionally redirecting the logs
pub fn run_run(args: RunArgs, log_level: LogLevel) -> Result<()> {
    let mut config = BatchConfig::default();
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    log(
        log_level,
        LogLevel::Verbose,
        &format!(
            "Evaluating {} models on {} datasets (test fraction {}, seed {})",
            config.models.len(),
            config.datasets.len(),
            config.test_fraction,
            config.seed
        ),
    );

    let evaluator = BatchEvaluator::new(config).with_log_level(log_level);
    evaluator.run()?;
    Ok(())
}
