//! CLI command implementations

mod list;
mod run;

use super::args::{Cli, Command};
use super::logging::LogLevel;
use crate::error::Result;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Run(args) => run::run_run(args, log_level),
        Command::List => list::run_list(log_level),
    }
}
