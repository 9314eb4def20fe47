//! Evaluar CLI
//!
//! Batch classifier evaluation entry point.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate the built-in matrix, logs under pipeline/results_logs
//! evaluar run
//!
//! # Redirect the logs
//! evaluar run --output-dir ./results
//!
//! # Show the built-in datasets and models
//! evaluar list
//! ```

use clap::Parser;
use evaluar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
