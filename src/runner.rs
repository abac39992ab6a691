//! Comparison runner.
//!
//! The runner drives one comparison from start to finish: it unpacks both
//! archives into their own scratch directories, parses both configuration
//! files, diffs them, persists any discrepancies and removes the scratch
//! directories.
//!
//! Scratch directories are RAII guards. They are removed at the end of a
//! successful run, and also when a fatal error aborts the run early.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::archive::{ArchiveExtractor, DEFAULT_CONFIG_NAME};
use crate::config::{BlockMode, ConfigParser};
use crate::diff::{DiffEngine, DiffResult};
use crate::error::{ArchiveError, CompareError, ReportError, Result};
use crate::report::ResultsWriter;

/// Receives the progress lines of a run.
pub trait ProgressReporter {
    /// Reports that the run has reached a new step.
    fn step(&self, message: &str);
}

/// Progress reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn step(&self, _message: &str) {}
}

/// Options controlling a comparison run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory receiving the results file.
    pub output_dir: PathBuf,
    /// Parent of the scratch directories; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
    /// Configuration file to locate inside each archive.
    pub config_name: String,
    /// How virtual server blocks are delimited.
    pub block_mode: BlockMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            scratch_root: None,
            config_name: String::from(DEFAULT_CONFIG_NAME),
            block_mode: BlockMode::Compat,
        }
    }
}

impl RunOptions {
    /// Sets the directory receiving the results file.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the parent directory of the scratch directories.
    #[must_use]
    pub fn with_scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(dir.into());
        self
    }

    /// Sets the configuration file name to locate.
    #[must_use]
    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = name.into();
        self
    }

    /// Sets the block delimiting mode.
    #[must_use]
    pub const fn with_block_mode(mut self, mode: BlockMode) -> Self {
        self.block_mode = mode;
        self
    }
}

/// What happened to the discrepancies of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// No discrepancies; nothing was written.
    Identical,
    /// Discrepancies were written to this file.
    Written(PathBuf),
    /// The results file already existed; discrepancies were discarded.
    Collision(PathBuf),
}

/// Outcome of a completed comparison.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Configuration file located in the first archive, relative to its
    /// (now removed) scratch directory.
    pub first_config: PathBuf,
    /// Configuration file located in the second archive, relative to its
    /// (now removed) scratch directory.
    pub second_config: PathBuf,
    /// Diff of the two configurations.
    pub diff: DiffResult,
    /// Persistence status of the discrepancies.
    pub report: ReportStatus,
}

/// The pair of scratch directories owned by one run.
struct ScratchDirs {
    first: TempDir,
    second: TempDir,
}

impl ScratchDirs {
    fn create(root: Option<&Path>) -> Result<Self> {
        if let Some(root) = root {
            std::fs::create_dir_all(root).map_err(|e| {
                ArchiveError::scratch(format!("cannot create {}: {e}", root.display()))
            })?;
        }

        Ok(Self {
            first: Self::tempdir(root, "f5compare-first-")?,
            second: Self::tempdir(root, "f5compare-second-")?,
        })
    }

    fn tempdir(root: Option<&Path>, prefix: &str) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ArchiveError::scratch(format!("cannot create scratch directory: {e}")))?;

        debug!("Created scratch directory {}", dir.path().display());
        Ok(dir)
    }

    fn close(self) -> Result<()> {
        for dir in [self.first, self.second] {
            let path = dir.path().to_path_buf();
            dir.close().map_err(|e| {
                ArchiveError::scratch(format!("cannot remove {}: {e}", path.display()))
            })?;
            debug!("Removed scratch directory {}", path.display());
        }
        Ok(())
    }
}

/// Runs comparisons between two archives.
pub struct Runner<'a> {
    /// Run options.
    options: RunOptions,
    /// Sink for progress lines.
    progress: &'a dyn ProgressReporter,
}

impl std::fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> Runner<'a> {
    /// Creates a runner reporting progress to `progress`.
    #[must_use]
    pub fn new(options: RunOptions, progress: &'a dyn ProgressReporter) -> Self {
        Self { options, progress }
    }

    /// Returns the run options.
    #[must_use]
    pub const fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Compares two archives, naming any results file after the current
    /// local time.
    ///
    /// # Errors
    ///
    /// Returns an error on any fatal condition: invalid archive, extraction
    /// failure, missing or unreadable configuration file, or a results file
    /// that cannot be written. A results file name collision is not an error.
    pub fn run(&self, first: impl AsRef<Path>, second: impl AsRef<Path>) -> Result<RunOutcome> {
        self.run_at(first, second, &Local::now())
    }

    /// Compares two archives, naming any results file after `timestamp`.
    ///
    /// # Errors
    ///
    /// See [`Runner::run`].
    pub fn run_at(
        &self,
        first: impl AsRef<Path>,
        second: impl AsRef<Path>,
        timestamp: &DateTime<Local>,
    ) -> Result<RunOutcome> {
        let first = first.as_ref();
        let second = second.as_ref();
        info!("Comparing {} against {}", first.display(), second.display());

        let scratch = ScratchDirs::create(self.options.scratch_root.as_deref())?;
        let extractor = ArchiveExtractor::new().with_config_name(self.options.config_name.as_str());

        let first_config = self.unpack(&extractor, first, scratch.first.path())?;
        let second_config = self.unpack(&extractor, second, scratch.second.path())?;

        let parser = ConfigParser::new().with_mode(self.options.block_mode);

        self.progress
            .step(&format!("Parsing configuration file: {}", first_config.display()));
        let first_parsed = parser.parse_file(&first_config)?;

        self.progress
            .step(&format!("Parsing configuration file: {}", second_config.display()));
        let second_parsed = parser.parse_file(&second_config)?;

        self.progress.step("Comparing configurations...");
        let diff = DiffEngine::new().compute_diff(&first_parsed, &second_parsed);
        debug!(
            "{} discrepancies across {} shared virtual servers",
            diff.len(),
            diff.servers_compared
        );

        let report = self.persist(&diff, timestamp)?;

        self.progress.step("Cleaning up temporary files...");
        let first_config = relative_to(&first_config, scratch.first.path());
        let second_config = relative_to(&second_config, scratch.second.path());
        scratch.close()?;

        Ok(RunOutcome {
            first_config,
            second_config,
            diff,
            report,
        })
    }

    /// Unpacks one archive and returns the path of its configuration file.
    fn unpack(&self, extractor: &ArchiveExtractor, archive: &Path, dest: &Path) -> Result<PathBuf> {
        let kind = extractor.validate(archive)?;
        self.progress.step(&format!(
            "Unpacking {} to {}...",
            archive.display(),
            dest.display()
        ));
        let config = extractor.extract_validated(archive, kind, dest)?;
        self.progress
            .step(&format!("Found configuration file: {}", config.display()));
        Ok(config)
    }

    /// Writes discrepancies to the results file, if there are any.
    fn persist(&self, diff: &DiffResult, timestamp: &DateTime<Local>) -> Result<ReportStatus> {
        if diff.is_empty() {
            return Ok(ReportStatus::Identical);
        }

        let writer = ResultsWriter::new(&self.options.output_dir);
        match writer.write(&diff.discrepancies, timestamp) {
            Ok(path) => Ok(ReportStatus::Written(path)),
            Err(CompareError::Report(ReportError::OutputCollision { path })) => {
                warn!("Results file {} already exists, discrepancies not saved", path.display());
                Ok(ReportStatus::Collision(path))
            }
            Err(e) => Err(e),
        }
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
