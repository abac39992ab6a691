//! Archive handling module.
//!
//! This module turns a UCS or QKView snapshot into a configuration file on
//! disk:
//! - Validating that the input is a tar container (plain or gzip)
//! - Unpacking every entry into a scratch directory
//! - Locating the configuration file inside the extracted tree

mod extractor;
mod search;

pub use extractor::{ArchiveExtractor, ArchiveKind, DEFAULT_CONFIG_NAME};
pub use search::find_config_file;
