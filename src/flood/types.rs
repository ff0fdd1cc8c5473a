//! Flood policy and outcome.

use std::collections::BTreeSet;
use std::fmt;

/// When the per-POI path search of [`flood`](crate::instance::Instance::flood) stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloodPolicy {
    /// Stop exactly at `m` paths.
    #[default]
    Min,

    /// Keep searching until a new path is strictly longer than the longest
    /// of the first `m`, so same-length alternatives at the connectivity
    /// boundary are flooded too.
    Full,
}

impl fmt::Display for FloodPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FloodPolicy::Min => "min",
            FloodPolicy::Full => "full",
        })
    }
}

/// Sensors selected by a flood run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloodOutcome {
    /// Active sensors selected: every active covering sensor plus the
    /// flooded relays of every path found.
    pub sensors: BTreeSet<usize>,

    /// Paths found over all POIs.
    pub paths: usize,

    /// Policy used.
    pub policy: FloodPolicy,
}
