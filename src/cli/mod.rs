//! CLI module for evaluar
//!
//! Argument parsing, command dispatch, and console output utilities.

mod args;
mod commands;
mod logging;

pub use args::{Cli, Command, RunArgs};
pub use commands::run_command;
pub use logging::{log, LogLevel};
