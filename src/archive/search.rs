//! Configuration file lookup inside an extracted tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Searches `root` recursively for a file named `file_name`.
///
/// The walk is depth-first and deterministic: the files of a directory are
/// checked before any of its subdirectories, and subdirectories are visited
/// in lexicographic order. Symlinked directories are not followed.
///
/// Returns `Ok(None)` if no such file exists.
///
/// # Errors
///
/// Returns an error if a directory in the tree cannot be listed.
pub fn find_config_file(root: impl AsRef<Path>, file_name: &str) -> io::Result<Option<PathBuf>> {
    let found = search_dir(root.as_ref(), file_name)?;
    if let Some(path) = &found {
        info!("Found configuration file: {}", path.display());
    }
    Ok(found)
}

fn search_dir(dir: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
    let mut candidate = None;
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        } else if entry.file_name() == file_name {
            candidate = Some(entry.path());
        }
    }

    // A dangling symlink with the right name is not a match.
    if let Some(path) = candidate.filter(|p| p.is_file()) {
        return Ok(Some(path));
    }

    subdirs.sort();
    for subdir in subdirs {
        debug!("Searching {}", subdir.display());
        if let Some(found) = search_dir(&subdir, file_name)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}
