//! Output formatting for the CLI.
//!
//! This module renders the verdict of a comparison, either as text for an
//! operator or as a JSON document for scripts.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tabled::{Table, Tabled};

use crate::diff::{DiffResult, Discrepancy};
use crate::runner::{ProgressReporter, ReportStatus, RunOutcome};

use super::commands::OutputFormat;

/// Prints progress lines on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    #[allow(clippy::print_stdout)]
    fn step(&self, message: &str) {
        println!("{message}");
    }
}

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Discrepancy count row for table display.
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// JSON representation of a run outcome.
#[derive(Serialize)]
struct OutcomeJson<'a> {
    status: &'static str,
    results_file: Option<String>,
    first_config: String,
    second_config: String,
    servers_compared: usize,
    missing_servers: usize,
    missing_attributes: usize,
    differing_values: usize,
    discrepancies: Vec<DiscrepancyJson<'a>>,
}

/// JSON representation of a discrepancy.
#[derive(Serialize)]
struct DiscrepancyJson<'a> {
    #[serde(flatten)]
    detail: &'a Discrepancy,
    message: String,
}

impl<'a> From<&'a RunOutcome> for OutcomeJson<'a> {
    fn from(outcome: &'a RunOutcome) -> Self {
        let (status, results_file) = match &outcome.report {
            ReportStatus::Identical => ("identical", None),
            ReportStatus::Written(path) => ("written", Some(path.display().to_string())),
            ReportStatus::Collision(path) => ("collision", Some(path.display().to_string())),
        };
        let diff = &outcome.diff;

        Self {
            status,
            results_file,
            first_config: outcome.first_config.display().to_string(),
            second_config: outcome.second_config.display().to_string(),
            servers_compared: diff.servers_compared,
            missing_servers: diff.missing_servers,
            missing_attributes: diff.missing_attributes,
            differing_values: diff.differing_values,
            discrepancies: diff
                .discrepancies
                .iter()
                .map(|d| DiscrepancyJson {
                    detail: d,
                    message: d.to_string(),
                })
                .collect(),
        }
    }
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns true if progress lines should be printed.
    #[must_use]
    pub const fn shows_progress(&self) -> bool {
        matches!(self.format, OutputFormat::Text)
    }

    /// Formats the verdict of a comparison.
    #[must_use]
    pub fn format_outcome(&self, outcome: &RunOutcome) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&OutcomeJson::from(outcome)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_outcome_text(outcome),
        }
    }

    /// Formats the verdict as text.
    fn format_outcome_text(outcome: &RunOutcome) -> String {
        let mut output = String::new();

        match &outcome.report {
            ReportStatus::Identical => {
                let _ = writeln!(
                    output,
                    "\n{} No discrepancies found. The configurations are identical.",
                    "✓".green()
                );
            }
            ReportStatus::Written(path) => {
                Self::write_summary(&mut output, &outcome.diff);
                let _ = writeln!(output, "Results written to: {}", Self::display(path));
            }
            ReportStatus::Collision(path) => {
                Self::write_summary(&mut output, &outcome.diff);
                let _ = writeln!(
                    output,
                    "{} File already exists: {}. Discrepancies were not saved.",
                    "⚠".yellow(),
                    Self::display(path)
                );
            }
        }

        output
    }

    /// Writes the discrepancy count and per-kind table.
    fn write_summary(output: &mut String, diff: &DiffResult) {
        let _ = writeln!(
            output,
            "\n{} Discrepancies found: {} across {} shared virtual servers\n",
            "✗".red(),
            diff.len(),
            diff.servers_compared
        );

        let rows: Vec<SummaryRow> = diff
            .counts()
            .into_iter()
            .map(|(kind, count)| SummaryRow {
                kind: kind.to_string(),
                count,
            })
            .collect();

        output.push_str(&Table::new(rows).to_string());
        output.push('\n');
    }

    fn display(path: &Path) -> String {
        path.display().to_string()
    }
}
