//! Outcome types of the coverage and connectivity checks.
//!
//! Insufficient coverage or connectivity is an expected answer, not an
//! error: [`KCoverage`] and [`MConnectivity`] carry it as a variant so
//! callers can match on it. Only the raising
//! [`Instance::validate`](crate::instance::Instance::validate) turns a
//! deficiency into an error.

use std::collections::BTreeSet;

/// Per-node counts plus the number of nodes whose count is non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeCounts {
    /// Count for each node, by index.
    pub counts: Vec<usize>,
    /// How many counted nodes have a count greater than zero.
    pub nonzero: usize,
}

/// Result of the K-coverage check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KCoverage {
    /// Every POI has at least `k` active covering sensors.
    Satisfied {
        /// For each POI, its first `k` active covering sensors in index order.
        witnesses: Vec<Vec<usize>>,
    },
    /// The first POI (by index) with fewer than `k` active covering sensors.
    Deficient {
        /// The failing POI.
        poi: usize,
        /// Its active coverage.
        coverage: usize,
    },
}

impl KCoverage {
    /// Whether every POI is covered.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }

    /// Union of the witness sensors; empty when deficient.
    pub fn used_sensors(&self) -> BTreeSet<usize> {
        match self {
            Self::Satisfied { witnesses } => witnesses.iter().flatten().copied().collect(),
            Self::Deficient { .. } => BTreeSet::new(),
        }
    }
}

/// Result of the M-connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MConnectivity {
    /// Every POI has `m` node-disjoint active paths to a sink.
    Satisfied {
        /// Sensors used by the paths found, over all POIs.
        used_sensors: BTreeSet<usize>,
    },
    /// The first POI (by index) for which the search ran dry.
    Deficient {
        /// The failing POI.
        poi: usize,
        /// Disjoint paths found for it before failing.
        paths: usize,
    },
}

impl MConnectivity {
    /// Whether every POI is connected.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }
}

/// Proof that an active set satisfies K-coverage and M-connectivity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Certificate {
    /// Sensors of the K-coverage witnesses.
    pub coverage_sensors: BTreeSet<usize>,
    /// Sensors on the M disjoint paths of every POI.
    pub connectivity_sensors: BTreeSet<usize>,
}

impl Certificate {
    /// All sensors named by the certificate.
    pub fn sensors(&self) -> BTreeSet<usize> {
        self.coverage_sensors
            .union(&self.connectivity_sensors)
            .copied()
            .collect()
    }
}
