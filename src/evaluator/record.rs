//! Evaluator output line.
//!
//! Lines render through `Display` and parse back through `FromStr`, so
//! result files can be reloaded for comparison across runs.

use crate::error::{FormatError, KcmcError, Result};
use crate::ga;
use crate::instance::Instance;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Columns of an evaluator line.
const FIELDS: usize = 9;

/// Heuristic an evaluator line reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Local optimum of the min flood, reduced by repeated validation.
    Dinic,
    /// Min-policy flood; carries the number of paths found.
    MinFlood(usize),
    /// Full-policy flood; carries the number of paths found.
    MaxFlood(usize),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Dinic => f.write_str("dinic"),
            Operation::MinFlood(n) => write!(f, "min_flood_{n}"),
            Operation::MaxFlood(n) => write!(f, "max_flood_{n}"),
        }
    }
}

impl FromStr for Operation {
    type Err = KcmcError;

    fn from_str(s: &str) -> Result<Self> {
        let operation = if s == "dinic" {
            Some(Operation::Dinic)
        } else if let Some(n) = s.strip_prefix("min_flood_") {
            n.parse().ok().map(Operation::MinFlood)
        } else if let Some(n) = s.strip_prefix("max_flood_") {
            n.parse().ok().map(Operation::MaxFlood)
        } else {
            None
        };
        operation.ok_or_else(|| {
            FormatError::UnknownOperation {
                name: s.to_string(),
            }
            .into()
        })
    }
}

/// One tab-separated evaluator line.
///
/// Renders as
/// `key \t k \t m \t operation \t micros \t OK|INVALID \t size \t compression \t bits`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationRecord {
    /// Instance key.
    pub key: String,
    /// Required coverage.
    pub k: usize,
    /// Required connectivity.
    pub m: usize,
    /// Heuristic run.
    pub operation: Operation,
    /// Runtime in microseconds.
    pub duration_us: u128,
    /// Whether the active set passed validation.
    pub valid: bool,
    /// Number of active sensors.
    pub size: usize,
    /// Inactive sensors over total sensors.
    pub compression: f64,
    /// Active set as one `0`/`1` per sensor.
    pub solution: String,
}

impl EvaluationRecord {
    /// Builds the record of `active`, validating it for `k` and `m`.
    ///
    /// # Errors
    /// Only [`KcmcError::BrokenPredecessorChain`]; infeasibility is reported
    /// as `valid = false`.
    pub fn new(
        instance: &Instance,
        k: usize,
        m: usize,
        operation: Operation,
        duration: Duration,
        active: &BTreeSet<usize>,
    ) -> Result<Self> {
        let n = instance.num_sensors();
        let inactive = instance.invert_set(active);
        let valid = instance.is_valid(k, m, &inactive)?;

        Ok(Self {
            key: instance.key(),
            k,
            m,
            operation,
            duration_us: duration.as_micros(),
            valid,
            size: active.len(),
            compression: inactive.len() as f64 / n as f64,
            solution: to_bitstring(active, n),
        })
    }
}

impl fmt::Display for EvaluationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.5}\t{}",
            self.key,
            self.k,
            self.m,
            self.operation,
            self.duration_us,
            if self.valid { "OK" } else { "INVALID" },
            self.size,
            self.compression,
            self.solution
        )
    }
}

/// Parses one line as rendered by `Display`; a trailing line break is
/// ignored.
///
/// The compression column is read back at the printed precision, so it may
/// differ from the value computed by [`EvaluationRecord::new`] in the last
/// digits.
impl FromStr for EvaluationRecord {
    type Err = KcmcError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        let [key, k, m, operation, duration, valid, size, compression, solution] = fields[..] else {
            return Err(FormatError::FieldCount {
                expected: FIELDS,
                found: fields.len(),
            }
            .into());
        };

        let valid = match valid {
            "OK" => true,
            "INVALID" => false,
            _ => return Err(malformed("valid", valid).into()),
        };
        if parse_bitstring(solution).is_none() {
            return Err(malformed("solution", solution).into());
        }

        Ok(Self {
            key: key.to_string(),
            k: column("k", k)?,
            m: column("m", m)?,
            operation: operation.parse()?,
            duration_us: column("duration", duration)?,
            valid,
            size: column("size", size)?,
            compression: column("compression", compression)?,
            solution: solution.to_string(),
        })
    }
}

fn malformed(field: &'static str, token: &str) -> FormatError {
    FormatError::MalformedField {
        field,
        token: token.to_string(),
    }
}

fn column<T: FromStr>(field: &'static str, token: &str) -> Result<T> {
    token.parse().map_err(|_| malformed(field, token).into())
}

/// `0`/`1` string of length `n` with the positions in `active` set.
pub fn to_bitstring(active: &BTreeSet<usize>, n: usize) -> String {
    ga::bitstring(&ga::from_active(active, n))
}

/// Positions set in a `0`/`1` string; `None` on any other character.
pub fn parse_bitstring(s: &str) -> Option<BTreeSet<usize>> {
    ga::parse_bitstring(s).map(|c| ga::active_genes(&c))
}
