//! CLI argument definitions.
//!
//! This module defines the command-line arguments using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::archive::DEFAULT_CONFIG_NAME;
use crate::config::BlockMode;
use crate::runner::RunOptions;

/// Usage line printed when the arguments are wrong.
pub const USAGE: &str = "Usage: f5compare <file1> <file2>";

/// f5compare - Compare virtual servers between two BIG-IP archives.
#[derive(Parser, Debug)]
#[command(name = "f5compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First UCS or QKView archive.
    pub first: PathBuf,

    /// Second UCS or QKView archive.
    pub second: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,

    /// Directory where the results file is written.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory under which scratch directories are created.
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Configuration file to look for inside each archive.
    #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
    pub config_name: String,

    /// Keep nested sub-blocks inside their virtual server.
    #[arg(long)]
    pub nested_blocks: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Builds the run options selected on the command line.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        let mode = if self.nested_blocks {
            BlockMode::Nested
        } else {
            BlockMode::Compat
        };

        let options = RunOptions::default()
            .with_output_dir(&self.output_dir)
            .with_config_name(self.config_name.as_str())
            .with_block_mode(mode);

        match &self.scratch_dir {
            Some(dir) => options.with_scratch_root(dir),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_two_positionals() {
        let cli = Cli::try_parse_from(["f5compare", "a.ucs", "b.ucs"]).unwrap();
        assert_eq!(cli.first, PathBuf::from("a.ucs"));
        assert_eq!(cli.second, PathBuf::from("b.ucs"));
        assert_eq!(cli.output, OutputFormat::Text);

        let options = cli.run_options();
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.config_name, "bigip.conf");
        assert_eq!(options.block_mode, BlockMode::Compat);
        assert!(options.scratch_root.is_none());
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        let missing = Cli::try_parse_from(["f5compare", "a.ucs"]).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

        assert!(Cli::try_parse_from(["f5compare", "a.ucs", "b.ucs", "c.ucs"]).is_err());
        assert!(Cli::try_parse_from(["f5compare"]).is_err());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "f5compare",
            "--output",
            "json",
            "--output-dir",
            "reports",
            "--scratch-dir",
            "/var/tmp/f5",
            "--config-name",
            "bigip_base.conf",
            "--nested-blocks",
            "a.ucs",
            "b.ucs",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        let options = cli.run_options();
        assert_eq!(options.output_dir, PathBuf::from("reports"));
        assert_eq!(options.scratch_root, Some(PathBuf::from("/var/tmp/f5")));
        assert_eq!(options.config_name, "bigip_base.conf");
        assert_eq!(options.block_mode, BlockMode::Nested);
    }
}
