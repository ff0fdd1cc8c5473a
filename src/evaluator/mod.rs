//! Heuristic evaluator.
//!
//! Runs the three heuristics on a fully active instance and renders one
//! [`EvaluationRecord`] line per heuristic, in this order:
//!
//! 1. `dinic`: [`Instance::local_optimum`]
//! 2. `min_flood_<n>`: [`Instance::flood`] with [`FloodPolicy::Min`]
//! 3. `max_flood_<n>`: [`Instance::flood`] with [`FloodPolicy::Full`]
//!
//! Each result is re-validated in boolean mode, so an infeasible answer is
//! reported as `INVALID` rather than raised.
//!
//! Lines parse back into [`EvaluationRecord`] and [`Operation`] through
//! `FromStr`.

mod record;

pub use record::{parse_bitstring, to_bitstring, EvaluationRecord, Operation};

use crate::error::Result;
use crate::flood::FloodPolicy;
use crate::instance::Instance;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, instrument};

/// Evaluates every heuristic on `instance` for `k` and `m`.
///
/// # Errors
/// Whatever the heuristics raise, typically
/// [`InvalidInstanceError`](crate::error::InvalidInstanceError) when the
/// fully active instance cannot meet `k` or `m`.
#[instrument(level = "debug", skip(instance), fields(key = %instance.key()))]
pub fn evaluate(instance: &Instance, k: usize, m: usize) -> Result<Vec<EvaluationRecord>> {
    let none = BTreeSet::new();
    let mut records = Vec::with_capacity(3);

    let start = Instant::now();
    let local = instance.local_optimum(k, m, &none)?;
    let elapsed = start.elapsed();
    let record = EvaluationRecord::new(instance, k, m, Operation::Dinic, elapsed, &local)?;
    records.push(record);

    for policy in [FloodPolicy::Min, FloodPolicy::Full] {
        let start = Instant::now();
        let outcome = instance.flood(k, m, policy, &none)?;
        let elapsed = start.elapsed();
        let operation = match policy {
            FloodPolicy::Min => Operation::MinFlood(outcome.paths),
            FloodPolicy::Full => Operation::MaxFlood(outcome.paths),
        };
        records.push(EvaluationRecord::new(
            instance,
            k,
            m,
            operation,
            elapsed,
            &outcome.sensors,
        )?);
    }

    debug!(records = records.len(), "evaluation finished");
    Ok(records)
}

/// Parses a combined requirement such as `K2M3` (case-insensitive,
/// surrounding brackets and separators ignored) into `(k, m)`.
pub fn parse_requirement(s: &str) -> Option<(usize, usize)> {
    let s: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();
    let rest = s.strip_prefix('K')?;
    let (k, m) = rest.split_once('M')?;
    Some((k.parse().ok()?, m.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KcmcError;

    const TWO_ROUTES: &str = "KCMC;2 5 1;10 5 5;0;PI;0 0;0 1;1 4;II;0 2;1 3;IS;2 0;3 0;4 0;END";

    #[test]
    fn test_evaluate_reports_three_lines() {
        let inst: Instance = TWO_ROUTES.parse().unwrap();
        let records = evaluate(&inst, 1, 1).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].operation, Operation::Dinic);
        assert!(matches!(records[1].operation, Operation::MinFlood(2)));
        assert!(matches!(records[2].operation, Operation::MaxFlood(_)));
        assert!(records.iter().all(|r| r.valid));
        assert!(records.iter().all(|r| r.key == "2 5 1;10 5 5;0"));
        assert!(records[0].size <= records[1].size);
        assert!(records[1].size <= records[2].size);
        for r in &records {
            let line = r.to_string();
            assert_eq!(line.split('\t').count(), 9);
            assert!(line.ends_with(&r.solution));
        }
    }

    #[test]
    fn test_evaluate_raises_when_infeasible() {
        let inst: Instance = TWO_ROUTES.parse().unwrap();
        let err = evaluate(&inst, 3, 1).unwrap_err();
        assert!(err.is_infeasible());
        assert!(matches!(err, KcmcError::InvalidInstance(_)));
    }

    #[test]
    fn test_parse_requirement() {
        assert_eq!(parse_requirement("K2M3"), Some((2, 3)));
        assert_eq!(parse_requirement("(k1,m2)"), Some((1, 2)));
        assert_eq!(parse_requirement("k10m4"), Some((10, 4)));
        assert_eq!(parse_requirement("2"), None);
        assert_eq!(parse_requirement("K2"), None);
    }
}
