//! Diff module for comparing parsed configurations.
//!
//! This module computes the attribute-level differences between the virtual
//! servers of two configuration snapshots.

mod discrepancy;
mod engine;

pub use discrepancy::{Discrepancy, DiscrepancyKind, Side};
pub use engine::{DiffEngine, DiffResult};
