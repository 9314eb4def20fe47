//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evaluar: batch classifier evaluation with dual-format metric logs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "evaluar")]
#[command(version)]
#[command(about = "Evaluate built-in classifiers on built-in datasets and log the metrics")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the batch evaluation and write the metric logs
    Run(RunArgs),

    /// List the built-in datasets and models
    List,
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Override the results directory (default: pipeline/results_logs)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
