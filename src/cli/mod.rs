//! CLI module for the comparison tool.
//!
//! This module provides the command-line arguments and the console output
//! of a comparison run.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat, USAGE};
pub use output::{ConsoleProgress, OutputFormatter};
