//! Archive validation and extraction.
//!
//! UCS and QKView snapshots are tar containers, usually gzip-compressed.
//! The compression is sniffed from the leading magic bytes rather than the
//! file extension.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info, warn};

use crate::error::{ArchiveError, CompareError, Result};

use super::search::find_config_file;

/// Name of the configuration file holding virtual server definitions.
pub const DEFAULT_CONFIG_NAME: &str = "bigip.conf";

/// Leading bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Container flavour detected for an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Uncompressed tar.
    Tar,
    /// Gzip-compressed tar.
    GzipTar,
}

impl ArchiveKind {
    /// Detects the container flavour from the first bytes of the file.
    fn sniff(path: &Path) -> std::io::Result<Self> {
        let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
        File::open(path)?
            .take(GZIP_MAGIC.len() as u64)
            .read_to_end(&mut magic)?;

        if magic == GZIP_MAGIC {
            Ok(Self::GzipTar)
        } else {
            Ok(Self::Tar)
        }
    }

    /// Opens the archive for a single sequential pass.
    fn open(self, path: &Path) -> std::io::Result<Archive<Box<dyn Read>>> {
        let reader = BufReader::new(File::open(path)?);
        let reader: Box<dyn Read> = match self {
            Self::Tar => Box::new(reader),
            Self::GzipTar => Box::new(GzDecoder::new(reader)),
        };
        Ok(Archive::new(reader))
    }
}

/// Unpacks snapshot archives and locates their configuration file.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    /// File name to look for once the archive is unpacked.
    config_name: String,
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor {
    /// Creates an extractor looking for `bigip.conf`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_name: String::from(DEFAULT_CONFIG_NAME),
        }
    }

    /// Sets the configuration file name to look for.
    #[must_use]
    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = name.into();
        self
    }

    /// Returns the configuration file name this extractor looks for.
    #[must_use]
    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    /// Checks that `path` is a readable tar container.
    ///
    /// The first entry header must parse. Empty files, truncated headers and
    /// checksum mismatches are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidArchive`] if the file is not a tar
    /// container or cannot be opened.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ArchiveKind> {
        let path = path.as_ref();
        let invalid = || {
            CompareError::Archive(ArchiveError::InvalidArchive {
                path: path.to_path_buf(),
            })
        };

        let kind = ArchiveKind::sniff(path).map_err(|e| {
            debug!("Cannot read {}: {e}", path.display());
            invalid()
        })?;

        let mut archive = kind.open(path).map_err(|e| {
            debug!("Cannot open {}: {e}", path.display());
            invalid()
        })?;
        let mut entries = archive.entries().map_err(|e| {
            debug!("Cannot list entries of {}: {e}", path.display());
            invalid()
        })?;

        match entries.next() {
            Some(Ok(_)) => {
                debug!("{} is a valid {kind:?} archive", path.display());
                Ok(kind)
            }
            Some(Err(e)) => {
                debug!("First header of {} is unreadable: {e}", path.display());
                Err(invalid())
            }
            None => {
                debug!("{} contains no entries", path.display());
                Err(invalid())
            }
        }
    }

    /// Validates and unpacks `archive_path` into `dest_dir`, then returns the
    /// path of the configuration file found inside it.
    ///
    /// `dest_dir` is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is invalid, extraction fails, or no
    /// configuration file is found.
    pub fn extract(
        &self,
        archive_path: impl AsRef<Path>,
        dest_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let kind = self.validate(archive_path.as_ref())?;
        self.extract_validated(archive_path, kind, dest_dir)
    }

    /// Unpacks an archive already checked by [`ArchiveExtractor::validate`]
    /// and returns the path of the configuration file found inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction fails or no configuration file is
    /// found.
    pub fn extract_validated(
        &self,
        archive_path: impl AsRef<Path>,
        kind: ArchiveKind,
        dest_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let archive_path = archive_path.as_ref();
        let dest_dir = dest_dir.as_ref();

        fs::create_dir_all(dest_dir).map_err(|e| {
            ArchiveError::scratch(format!("cannot create {}: {e}", dest_dir.display()))
        })?;

        Self::unpack(archive_path, kind, dest_dir)?;

        let found = find_config_file(dest_dir, &self.config_name).map_err(|e| {
            ArchiveError::extraction(archive_path, format!("cannot search extracted files: {e}"))
        })?;

        found.ok_or_else(|| {
            CompareError::Archive(ArchiveError::ConfigNotFound {
                archive: archive_path.to_path_buf(),
                file_name: self.config_name.clone(),
            })
        })
    }

    /// Unpacks every entry of the archive.
    ///
    /// Directories are applied last, deepest first, so that restrictive
    /// directory modes do not block their own children.
    fn unpack(archive_path: &Path, kind: ArchiveKind, dest_dir: &Path) -> Result<()> {
        info!("Unpacking {} to {}", archive_path.display(), dest_dir.display());

        let failed = |e: std::io::Error| ArchiveError::extraction(archive_path, e.to_string());

        let mut archive = kind.open(archive_path).map_err(failed)?;
        let entries = archive.entries().map_err(failed)?;

        let mut directories = Vec::new();
        let mut unpacked = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            let mut entry = entry.map_err(failed)?;
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                directories.push(entry);
                continue;
            }

            if entry_type.is_character_special()
                || entry_type.is_block_special()
                || entry_type.is_fifo()
            {
                debug!("Skipping special file {}", entry_display(&entry));
                skipped += 1;
                continue;
            }

            if entry.unpack_in(dest_dir).map_err(failed)? {
                unpacked += 1;
            } else {
                warn!("Skipping entry outside destination: {}", entry_display(&entry));
                skipped += 1;
            }
        }

        directories.sort_by(|a, b| b.path_bytes().cmp(&a.path_bytes()));
        for mut dir in directories {
            if !dir.unpack_in(dest_dir).map_err(failed)? {
                warn!("Skipping directory outside destination: {}", entry_display(&dir));
            }
        }

        debug!("Unpacked {unpacked} entries from {} ({skipped} skipped)", archive_path.display());
        Ok(())
    }
}

fn entry_display<R: Read>(entry: &tar::Entry<'_, R>) -> String {
    String::from_utf8_lossy(&entry.path_bytes()).into_owned()
}
