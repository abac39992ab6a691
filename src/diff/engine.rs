//! Diff engine for comparing two parsed configurations.
//!
//! Names are walked in lexicographic order (union of both sides), so the
//! same pair of configurations always yields the same discrepancy list.

use std::collections::BTreeSet;
use tracing::debug;

use crate::config::{ParsedConfig, VirtualServer};

use super::discrepancy::{Discrepancy, DiscrepancyKind, Side};

/// Engine for computing discrepancies between two configurations.
#[derive(Debug, Default)]
pub struct DiffEngine;

/// Complete diff result.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// All discrepancies, in generation order.
    pub discrepancies: Vec<Discrepancy>,
    /// Number of virtual servers present on only one side.
    pub missing_servers: usize,
    /// Number of attributes present on only one side.
    pub missing_attributes: usize,
    /// Number of attributes with differing values.
    pub differing_values: usize,
    /// Number of virtual servers present on both sides.
    pub servers_compared: usize,
}

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes every discrepancy between `first` and `second`.
    #[must_use]
    pub fn compute_diff(&self, first: &ParsedConfig, second: &ParsedConfig) -> DiffResult {
        let mut discrepancies = Vec::new();
        let mut servers_compared = 0;

        let names: BTreeSet<&str> = first.names().chain(second.names()).collect();

        for name in names {
            match (first.get(name), second.get(name)) {
                (None, _) => {
                    debug!("Virtual server {name} only in second configuration");
                    discrepancies.push(Discrepancy::MissingServer {
                        server: name.to_string(),
                        missing_in: Side::First,
                    });
                }
                (_, None) => {
                    debug!("Virtual server {name} only in first configuration");
                    discrepancies.push(Discrepancy::MissingServer {
                        server: name.to_string(),
                        missing_in: Side::Second,
                    });
                }
                (Some(a), Some(b)) => {
                    servers_compared += 1;
                    Self::compare_attributes(a, b, &mut discrepancies);
                }
            }
        }

        DiffResult::from_discrepancies(discrepancies, servers_compared)
    }

    /// Compares the attribute maps of a virtual server present on both sides.
    fn compare_attributes(first: &VirtualServer, second: &VirtualServer, out: &mut Vec<Discrepancy>) {
        let keys: BTreeSet<&String> = first.attributes.keys().chain(second.attributes.keys()).collect();

        for key in keys {
            let discrepancy = match (first.attributes.get(key), second.attributes.get(key)) {
                (None, _) => Discrepancy::MissingAttribute {
                    server: first.name.clone(),
                    attribute: key.clone(),
                    missing_in: Side::First,
                },
                (_, None) => Discrepancy::MissingAttribute {
                    server: first.name.clone(),
                    attribute: key.clone(),
                    missing_in: Side::Second,
                },
                (Some(a), Some(b)) if a != b => Discrepancy::ValueDiffers {
                    server: first.name.clone(),
                    attribute: key.clone(),
                    first: a.clone(),
                    second: b.clone(),
                },
                (Some(_), Some(_)) => continue,
            };
            out.push(discrepancy);
        }
    }
}

impl DiffResult {
    fn from_discrepancies(discrepancies: Vec<Discrepancy>, servers_compared: usize) -> Self {
        let count = |kind: DiscrepancyKind| discrepancies.iter().filter(|d| d.kind() == kind).count();

        Self {
            missing_servers: count(DiscrepancyKind::MissingServer),
            missing_attributes: count(DiscrepancyKind::MissingAttribute),
            differing_values: count(DiscrepancyKind::ValueDiffers),
            servers_compared,
            discrepancies,
        }
    }

    /// Returns true if the configurations matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Returns the total number of discrepancies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    /// Returns per-kind counts: missing servers, missing attributes, then
    /// differing values.
    #[must_use]
    pub const fn counts(&self) -> [(DiscrepancyKind, usize); 3] {
        [
            (DiscrepancyKind::MissingServer, self.missing_servers),
            (DiscrepancyKind::MissingAttribute, self.missing_attributes),
            (DiscrepancyKind::ValueDiffers, self.differing_values),
        ]
    }
}
