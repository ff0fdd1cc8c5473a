//! Best-of-population extraction and the per-generation record.

use super::config::ReportConfig;
use super::types::{bitstring, Chromosome};
use std::collections::BTreeSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// One line of the GA observability output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord {
    /// Generation index.
    pub generation: usize,
    /// Milliseconds since the Unix epoch when the record was taken.
    pub timestamp_ms: u64,
    /// Set genes of the best chromosome.
    pub used: usize,
    /// Fitness of the best chromosome.
    pub fitness: f64,
    /// The best chromosome as a `0`/`1` string.
    pub chromosome: String,
    /// Whether [`HEADER`](Self::HEADER) should precede this record.
    pub header: bool,
}

impl GenerationRecord {
    /// Column header, emitted once before the generation-0 record.
    pub const HEADER: &'static str = "GEN_IT\tTIMESTAMP_MS\tSIZE\tFITNESS\tCHROMOSSOME";
}

impl fmt::Display for GenerationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:05}\t{}\t{:05}\t{:.3}\t{}",
            self.generation, self.timestamp_ms, self.used, self.fitness, self.chromosome
        )
    }
}

/// The best individual of a population.
#[derive(Debug, Clone, PartialEq)]
pub struct BestOf {
    /// Index of the best chromosome; the first one on ties.
    pub index: usize,
    /// Positions of its unset genes.
    pub unused: BTreeSet<usize>,
    /// Number of its set genes.
    pub used: usize,
    /// Record emitted for this generation, if any.
    pub record: Option<GenerationRecord>,
}

/// Finds the highest-fitness chromosome and reports it when due.
///
/// A [`GenerationRecord`] is produced (and logged at `info`) when
/// `generation` falls on `config`'s cadence or when the best uses fewer
/// genes than `previous_best`. Pass `usize::MAX` as `previous_best` before
/// any best is known.
///
/// # Panics
/// Panics if `population` is empty or `fitness` has a different length.
pub fn best_of(
    population: &[Chromosome],
    fitness: &[f64],
    generation: usize,
    previous_best: usize,
    config: &ReportConfig,
) -> BestOf {
    assert!(!population.is_empty(), "population must not be empty");
    assert_eq!(
        population.len(),
        fitness.len(),
        "one fitness value per chromosome"
    );

    let mut index = 0;
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f > fitness[index] {
            index = i;
        }
    }

    let best = &population[index];
    let unused: BTreeSet<usize> = best
        .iter()
        .enumerate()
        .filter(|&(_, &g)| g == 0)
        .map(|(i, _)| i)
        .collect();
    let used = best.len() - unused.len();

    let record = (config.emits_at(generation) || used < previous_best).then(|| {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        GenerationRecord {
            generation,
            timestamp_ms,
            used,
            fitness: fitness[index],
            chromosome: bitstring(best),
            header: generation == 0,
        }
    });

    if let Some(record) = &record {
        if record.header {
            info!(target: "kcmc_heur::ga", "{}", GenerationRecord::HEADER);
        }
        info!(target: "kcmc_heur::ga", "{record}");
    }

    BestOf {
        index,
        unused,
        used,
        record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Vec<Chromosome> {
        vec![vec![1, 1, 1, 0], vec![1, 0, 0, 0], vec![0, 1, 1, 0]]
    }

    #[test]
    fn test_best_of_picks_highest_fitness() {
        let best = best_of(
            &population(),
            &[0.2, 0.9, 0.5],
            3,
            usize::MAX,
            &ReportConfig::quiet(),
        );
        assert_eq!(best.index, 1);
        assert_eq!(best.used, 1);
        assert_eq!(best.unused, BTreeSet::from([1, 2, 3]));
        // first best is always an improvement
        let record = best.record.unwrap();
        assert_eq!(record.used, 1);
        assert_eq!(record.chromosome, "1000");
        assert!(!record.header);
    }

    #[test]
    fn test_ties_pick_first() {
        let fitness = [0.5, 0.1, 0.5];
        let best = best_of(&population(), &fitness, 1, 0, &ReportConfig::quiet());
        assert_eq!(best.index, 0);
        assert!(best.record.is_none());
    }

    #[test]
    fn test_record_cadence() {
        let config = ReportConfig::default().with_log_interval(5);
        let fitness = [0.2, 0.9, 0.5];

        let at_zero = best_of(&population(), &fitness, 0, 1, &config);
        assert!(at_zero.record.unwrap().header);

        let off_cadence = best_of(&population(), &fitness, 4, 1, &config);
        assert!(off_cadence.record.is_none());
        let on_cadence = best_of(&population(), &fitness, 10, 1, &config);
        assert!(on_cadence.record.is_some());
        let improved = best_of(&population(), &fitness, 4, 2, &config);
        assert!(improved.record.is_some());
    }

    #[test]
    fn test_record_format() {
        let record = GenerationRecord {
            generation: 7,
            timestamp_ms: 1234,
            used: 42,
            fitness: 0.5,
            chromosome: "0110".into(),
            header: false,
        };
        assert_eq!(record.to_string(), "00007\t1234\t00042\t0.500\t0110");
    }

    #[test]
    #[should_panic(expected = "population must not be empty")]
    fn test_empty_population_panics() {
        best_of(&[], &[], 0, 0, &ReportConfig::default());
    }
}
