//! f5compare CLI entrypoint.
//!
//! This is the main entrypoint for the f5compare command-line tool.

use std::process::ExitCode;

use f5_config_compare::cli::{Cli, ConsoleProgress, OutputFormatter, USAGE};
use f5_config_compare::error::Result;
use f5_config_compare::runner::{ProgressReporter, Runner, SilentProgress};

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    // Initialize logging
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Diagnostics go to stderr; stdout is reserved for the report.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the comparison and prints the verdict.
fn run(cli: &Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);
    let progress: &dyn ProgressReporter = if formatter.shows_progress() {
        &ConsoleProgress
    } else {
        &SilentProgress
    };

    let runner = Runner::new(cli.run_options(), progress);
    debug!("Starting run with {runner:?}");

    let outcome = runner.run(&cli.first, &cli.second)?;
    println!("{}", formatter.format_outcome(&outcome));

    Ok(())
}
