//! Error taxonomy.
//!
//! Every fallible operation in the crate returns [`KcmcError`]. The variants
//! separate the four failure families callers need to tell apart:
//!
//! - [`FormatError`]: a serialized instance or evaluator line could not be
//!   parsed.
//! - [`InvalidInstanceError`]: the instance is empty, or it cannot meet the
//!   requested K-coverage / M-connectivity.
//! - [`KcmcError::DegenerateSelection`]: roulette selection ran out of
//!   positive fitness before choosing enough individuals.
//! - [`KcmcError::BrokenPredecessorChain`]: path reconstruction hit a hole
//!   in the predecessor buffer. This is a logic defect, never an expected
//!   outcome.

use crate::instance::NodeKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KcmcError>;

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum KcmcError {
    /// A serialized instance or evaluator line is malformed.
    #[error("malformed input: {0}")]
    Format(#[from] FormatError),

    /// The instance is empty or cannot satisfy the requested K/M.
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InvalidInstanceError),

    /// Total remaining fitness became non-positive before `requested`
    /// individuals were selected.
    #[error("degenerate selection: fitness exhausted after {selected} of {requested} picks")]
    DegenerateSelection {
        /// Individuals already selected when the fitness ran out.
        selected: usize,
        /// Individuals requested by the caller.
        requested: usize,
    },

    /// A predecessor chain did not lead back to its POI.
    #[error("broken predecessor chain for POI {poi} at sensor {sensor}")]
    BrokenPredecessorChain {
        /// POI whose path was being reconstructed.
        poi: usize,
        /// Sensor whose predecessor was missing.
        sensor: usize,
    },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KcmcError {
    /// Returns `true` for the expected, recoverable infeasibility outcomes
    /// (insufficient coverage or connectivity).
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::InvalidInstance(
                InvalidInstanceError::InsufficientCoverage { .. }
                    | InvalidInstanceError::InsufficientConnectivity { .. }
            )
        )
    }
}

/// Errors raised while parsing an instance or an evaluator line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The string does not start with `KCMC`.
    #[error("expected prefix 'KCMC', found {found:?}")]
    BadPrefix {
        /// The first token of the input.
        found: String,
    },

    /// A section tag other than `PI`, `II`, `IS` or `END` appeared where a
    /// tag was required.
    #[error("unknown stage tag {tag:?}")]
    UnknownTag {
        /// The offending token.
        tag: String,
    },

    /// A header field could not be parsed.
    #[error("malformed {field} field {token:?}")]
    MalformedField {
        /// Which field (`counts`, `geometry`, `seed` for instances; a column
        /// name such as `k` or `solution` for evaluator lines).
        field: &'static str,
        /// The raw token.
        token: String,
    },

    /// An edge token is not a pair of non-negative integers.
    #[error("malformed edge {token:?}")]
    MalformedEdge {
        /// The raw token.
        token: String,
    },

    /// An edge references a node index beyond the declared count.
    #[error("{kind} index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Node kind of the offending endpoint.
        kind: NodeKind,
        /// The index found in the edge.
        index: usize,
        /// Declared number of nodes of that kind.
        count: usize,
    },

    /// A sensor–sensor edge connects a sensor to itself.
    #[error("sensor {sensor} has a self edge")]
    SelfLoop {
        /// The sensor index.
        sensor: usize,
    },

    /// The input ended before the given stage was reached.
    #[error("instance truncated: missing {expected}")]
    Truncated {
        /// What the parser was waiting for.
        expected: &'static str,
    },

    /// A tab-separated line has the wrong number of columns.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Columns the line format defines.
        expected: usize,
        /// Columns present.
        found: usize,
    },

    /// An operation name is not `dinic`, `min_flood_<n>` or `max_flood_<n>`.
    #[error("unknown operation {name:?}")]
    UnknownOperation {
        /// The raw name.
        name: String,
    },
}

/// Errors describing an instance that is unusable for the requested task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidInstanceError {
    /// A node count is zero.
    #[error("instance has no {kind}s")]
    EmptyNodeSet {
        /// The empty node kind.
        kind: NodeKind,
    },

    /// A POI is observed by fewer than `k` active sensors.
    #[error("insufficient coverage: POI {poi} has {coverage} of {k} required sensors")]
    InsufficientCoverage {
        /// First POI falling short.
        poi: usize,
        /// Active sensors covering it.
        coverage: usize,
        /// Required coverage.
        k: usize,
    },

    /// A POI has fewer than `m` node-disjoint paths to a sink.
    #[error("insufficient connectivity: POI {poi} has {paths} of {m} required disjoint paths")]
    InsufficientConnectivity {
        /// First POI falling short.
        poi: usize,
        /// Disjoint paths found before the search failed.
        paths: usize,
        /// Required connectivity.
        m: usize,
    },
}
