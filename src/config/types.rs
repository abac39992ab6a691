//! Parsed configuration types.
//!
//! Both maps are ordered, so every walk over a parsed configuration is
//! lexicographic by name.

use std::collections::BTreeMap;

/// A single `ltm virtual` definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualServer {
    /// Object name as written after `ltm virtual`.
    pub name: String,
    /// Attribute name to raw attribute value.
    pub attributes: BTreeMap<String, String>,
}

impl VirtualServer {
    /// Creates a virtual server with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, replacing any previous value for the same key.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// All virtual servers found in one configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    servers: BTreeMap<String, VirtualServer>,
}

impl ParsedConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            servers: BTreeMap::new(),
        }
    }

    /// Inserts a virtual server, returning the definition it replaced.
    pub fn insert(&mut self, server: VirtualServer) -> Option<VirtualServer> {
        self.servers.insert(server.name.clone(), server)
    }

    /// Looks up a virtual server by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VirtualServer> {
        self.servers.get(name)
    }

    /// Returns true if a virtual server with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Iterates over virtual server names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    /// Iterates over virtual servers in name order.
    pub fn servers(&self) -> impl Iterator<Item = &VirtualServer> {
        self.servers.values()
    }

    /// Number of virtual servers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Returns true if no virtual servers were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl FromIterator<VirtualServer> for ParsedConfig {
    fn from_iter<I: IntoIterator<Item = VirtualServer>>(iter: I) -> Self {
        let mut config = Self::new();
        for server in iter {
            config.insert(server);
        }
        config
    }
}
