//! Virtual server parser for `bigip.conf` documents.
//!
//! The default mode matches blocks with a single-level pattern: the body
//! ends at the first closing brace, so a nested sub-block truncates its
//! virtual server. [`BlockMode::Nested`] switches to a brace-depth scanner.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::scanner::{balanced_blocks, nested_attributes};
use super::types::{ParsedConfig, VirtualServer};

/// Single-level virtual server block: name and body up to the first `}`.
#[allow(clippy::expect_used)]
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ltm virtual (\S+) \{([^}]+)\}").expect("virtual server pattern is valid")
});

/// Attribute line inside a block body: first token, then the rest of the line.
#[allow(clippy::expect_used)]
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+) (.+)").expect("attribute pattern is valid"));

/// Opening of a virtual server block, used by the brace-depth scanner.
#[allow(clippy::expect_used)]
pub(super) static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ltm virtual (\S+) \{").expect("header pattern is valid"));

/// How virtual server blocks are delimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockMode {
    /// Body ends at the first `}`; nested braces truncate the block.
    #[default]
    Compat,
    /// Body ends at the matching `}`; nested sub-blocks are kept whole.
    Nested,
}

/// Parser extracting virtual servers from a configuration document.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigParser {
    /// Block delimiting mode.
    mode: BlockMode,
}

impl ConfigParser {
    /// Creates a parser in compat mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: BlockMode::Compat,
        }
    }

    /// Sets the block delimiting mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: BlockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the block delimiting mode.
    #[must_use]
    pub const fn mode(&self) -> BlockMode {
        self.mode
    }

    /// Reads and parses a configuration file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedConfig> {
        let path = path.as_ref();
        info!("Parsing configuration file: {}", path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| ConfigError::file_read(path, e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);

        let config = self.parse_str(&text);
        debug!("Found {} virtual servers in {}", config.len(), path.display());
        Ok(config)
    }

    /// Parses virtual servers out of a configuration document.
    #[must_use]
    pub fn parse_str(&self, text: &str) -> ParsedConfig {
        let mut config = ParsedConfig::new();

        let servers: Vec<VirtualServer> = match self.mode {
            BlockMode::Compat => BLOCK_RE
                .captures_iter(text)
                .filter_map(|caps| {
                    let name = caps.get(1)?.as_str();
                    let body = caps.get(2)?.as_str();
                    Some(build_server(name, compat_attributes(body)))
                })
                .collect(),
            BlockMode::Nested => balanced_blocks(text)
                .into_iter()
                .map(|block| build_server(block.name, nested_attributes(block.body)))
                .collect(),
        };

        for server in servers {
            let name = server.name.clone();
            if config.insert(server).is_some() {
                debug!("Virtual server {name} defined more than once, keeping the last definition");
            }
        }

        config
    }
}

fn build_server(name: &str, attributes: BTreeMap<String, String>) -> VirtualServer {
    VirtualServer {
        name: name.to_string(),
        attributes,
    }
}

/// Collects `key value` pairs from a single-level body.
///
/// Only lines with a value are attributes; later keys overwrite earlier ones.
fn compat_attributes(body: &str) -> BTreeMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().trim();
            let value = caps.get(2)?.as_str().trim();
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
