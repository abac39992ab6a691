//! Results file persistence.
//!
//! Discrepancies are written to `results-YYYY-MM-DD-HH:MM.txt`, one per
//! line. The file is created with create-new semantics so an earlier run in
//! the same minute is never overwritten.

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::diff::Discrepancy;
use crate::error::{ReportError, Result};

/// `strftime` pattern of the results file name.
const RESULTS_FILE_FORMAT: &str = "results-%Y-%m-%d-%H:%M.txt";

/// Returns the results file name for a run started at `timestamp`.
#[must_use]
pub fn results_file_name(timestamp: &DateTime<Local>) -> String {
    timestamp.format(RESULTS_FILE_FORMAT).to_string()
}

/// Writes discrepancy reports into a directory.
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    /// Directory receiving results files.
    output_dir: PathBuf,
}

impl ResultsWriter {
    /// Creates a writer targeting `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory results files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the results file path for a run started at `timestamp`.
    #[must_use]
    pub fn path_for(&self, timestamp: &DateTime<Local>) -> PathBuf {
        self.output_dir.join(results_file_name(timestamp))
    }

    /// Writes one discrepancy per line to a new results file.
    ///
    /// The output directory is created first if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::OutputCollision`] if the file already exists,
    /// or [`ReportError::WriteFailed`] if it or its directory cannot be
    /// created or written.
    pub fn write(&self, discrepancies: &[Discrepancy], timestamp: &DateTime<Local>) -> Result<PathBuf> {
        let path = self.path_for(timestamp);
        let write_failed = |e: std::io::Error| ReportError::WriteFailed {
            path: path.clone(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::WriteFailed {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Results file {} already exists", path.display());
                return Err(ReportError::OutputCollision { path: path.clone() }.into());
            }
            Err(e) => return Err(write_failed(e).into()),
        };

        let mut writer = BufWriter::new(file);
        for discrepancy in discrepancies {
            writeln!(writer, "{discrepancy}").map_err(write_failed)?;
        }
        writer.flush().map_err(write_failed)?;

        info!("Wrote {} discrepancies to {}", discrepancies.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Side;
    use crate::error::CompareError;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 14, 9, 7, 42).single().unwrap()
    }

    fn sample() -> Vec<Discrepancy> {
        vec![
            Discrepancy::ValueDiffers {
                server: String::from("vs1"),
                attribute: String::from("pool"),
                first: String::from("poolA"),
                second: String::from("poolB"),
            },
            Discrepancy::MissingServer {
                server: String::from("vs2"),
                missing_in: Side::First,
            },
        ]
    }

    #[test]
    fn test_file_name_has_minute_precision() {
        assert_eq!(results_file_name(&timestamp()), "results-2024-05-14-09:07.txt");
    }

    #[test]
    fn test_write_one_line_per_discrepancy() {
        let dir = TempDir::new().unwrap();
        let writer = ResultsWriter::new(dir.path());

        let path = writer.write(&sample(), &timestamp()).unwrap();
        assert_eq!(path, dir.path().join("results-2024-05-14-09:07.txt"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Attribute 'pool' in virtual server 'vs1' differs: 'poolA' vs 'poolB'.\n\
             Virtual server 'vs2' is missing in the first configuration.\n"
        );
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let writer = ResultsWriter::new(dir.path());
        let path = writer.path_for(&timestamp());
        std::fs::write(&path, "earlier run\n").unwrap();

        let err = writer.write(&sample(), &timestamp()).unwrap_err();
        assert!(matches!(
            err,
            CompareError::Report(ReportError::OutputCollision { path: ref p }) if *p == path
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier run\n");
    }

    #[test]
    fn test_missing_output_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let writer = ResultsWriter::new(dir.path().join("reports").join("f5"));
        assert_eq!(writer.output_dir(), dir.path().join("reports/f5"));

        let path = writer.write(&sample(), &timestamp()).unwrap();
        assert_eq!(path, dir.path().join("reports/f5/results-2024-05-14-09:07.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_output_dir_blocked_by_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, "not a directory\n").unwrap();

        let err = ResultsWriter::new(&blocker)
            .write(&sample(), &timestamp())
            .unwrap_err();
        assert!(matches!(err, CompareError::Report(ReportError::WriteFailed { .. })));
    }
}
