//! Error types for the configuration comparison tool.
//!
//! Every failure a comparison run can hit is represented here: archive
//! validation and extraction, reading the configuration file, and writing
//! the results file. Fatal errors bubble up to `main`, which prints them as
//! `Error: ...` and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for a comparison run.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Archive-related errors.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Configuration file errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Results file errors.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Errors raised while validating, unpacking or searching an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The input is not a readable tar container.
    #[error("{path} is not a valid UCS or QKView file")]
    InvalidArchive {
        /// Path to the rejected archive.
        path: PathBuf,
    },

    /// Unpacking failed partway through.
    #[error("failed to extract archive {path}: {message}")]
    ExtractionFailed {
        /// Path to the archive being extracted.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// No configuration file with the expected name was extracted.
    #[error("no '{file_name}' file found in the archive {archive}")]
    ConfigNotFound {
        /// Path to the archive that was searched.
        archive: PathBuf,
        /// File name that was looked for.
        file_name: String,
    },

    /// A scratch directory could not be created or removed.
    #[error("scratch directory failure: {message}")]
    ScratchDir {
        /// Description of the failure.
        message: String,
    },
}

/// Errors raised while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read.
    #[error("failed to read {path}: {message}")]
    FileRead {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Errors raised while persisting discrepancies.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results file already exists and was left untouched.
    #[error("results file {path} already exists")]
    OutputCollision {
        /// Path of the existing file.
        path: PathBuf,
    },

    /// The results file could not be written.
    #[error("failed to write results file {path}: {message}")]
    WriteFailed {
        /// Path of the results file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;

impl ArchiveError {
    /// Creates an extraction error for the given archive.
    #[must_use]
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a scratch directory error with the given message.
    #[must_use]
    pub fn scratch(message: impl Into<String>) -> Self {
        Self::ScratchDir {
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a file read error for the given path.
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }
}
