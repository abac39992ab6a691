//! Configuration module.
//!
//! This module turns a `bigip.conf` document into virtual server definitions:
//! - Locating `ltm virtual <name> { ... }` blocks
//! - Splitting each block body into attribute name/value pairs
//! - Keeping the last definition when a name repeats

mod parser;
mod scanner;
mod types;

pub use parser::{BlockMode, ConfigParser};
pub use types::{ParsedConfig, VirtualServer};
