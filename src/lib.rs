// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # f5 config compare
//!
//! Compares the virtual server definitions of two BIG-IP configuration
//! snapshots (UCS or QKView archives).
//!
//! ## Overview
//!
//! A comparison is a single sequential pass:
//!
//! 1. **Extract**: each archive is unpacked into its own scratch directory
//!    and `bigip.conf` is located inside it
//! 2. **Parse**: every `ltm virtual <name> { ... }` block becomes a
//!    [`config::VirtualServer`] with its attribute lines
//! 3. **Diff**: virtual server names and attribute names are unioned, and
//!    every missing entry or differing value becomes a [`diff::Discrepancy`]
//! 4. **Report**: discrepancies are written to
//!    `results-YYYY-MM-DD-HH:MM.txt`, never overwriting an existing file
//!
//! ## Modules
//!
//! - [`archive`]: Archive validation, extraction and config file lookup
//! - [`config`]: Virtual server parsing
//! - [`diff`]: Discrepancy computation
//! - [`report`]: Results file persistence
//! - [`runner`]: End-to-end orchestration and scratch directory lifecycle
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use f5_config_compare::runner::{RunOptions, Runner, SilentProgress};
//!
//! # fn main() -> f5_config_compare::Result<()> {
//! let progress = SilentProgress;
//! let runner = Runner::new(RunOptions::default(), &progress);
//! let outcome = runner.run("before.ucs", "after.ucs")?;
//! for discrepancy in &outcome.diff.discrepancies {
//!     eprintln!("{discrepancy}");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod archive;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;
pub mod runner;

// ============================================================================
// Re-exports
// ============================================================================

pub use archive::{ArchiveExtractor, ArchiveKind, find_config_file};
pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use config::{BlockMode, ConfigParser, ParsedConfig, VirtualServer};
pub use diff::{DiffEngine, DiffResult, Discrepancy, DiscrepancyKind, Side};
pub use error::{CompareError, Result};
pub use report::{ResultsWriter, results_file_name};
pub use runner::{ProgressReporter, ReportStatus, RunOptions, RunOutcome, Runner, SilentProgress};
