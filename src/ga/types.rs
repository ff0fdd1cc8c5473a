//! Binary chromosome representation.
//!
//! A chromosome holds one gene per installable sensor: `1` means the sensor
//! is active, `0` means it is not. Genes are stored as `u8` rather than
//! `bool` so a corrupted chromosome can be detected by
//! [`inspect_individual`](super::operators::inspect_individual) instead of
//! being unrepresentable.

use std::collections::BTreeSet;

/// A single gene; valid values are `0` and `1`.
pub type Gene = u8;

/// A fixed-length binary vector, one gene per sensor.
pub type Chromosome = Vec<Gene>;

/// Renders genes as a `0`/`1` string; any non-zero gene renders as `1`.
pub fn bitstring(chromosome: &[Gene]) -> String {
    chromosome
        .iter()
        .map(|&g| if g == 0 { '0' } else { '1' })
        .collect()
}

/// Parses a `0`/`1` string; `None` on any other character.
pub fn parse_bitstring(s: &str) -> Option<Chromosome> {
    s.chars()
        .map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect()
}

/// Chromosome of length `size` with the genes in `active` set.
///
/// Indices at or beyond `size` are ignored.
pub fn from_active(active: &BTreeSet<usize>, size: usize) -> Chromosome {
    let mut chromosome = vec![0; size];
    for &i in active.range(..size) {
        chromosome[i] = 1;
    }
    chromosome
}

/// Positions of the set genes.
pub fn active_genes(chromosome: &[Gene]) -> BTreeSet<usize> {
    chromosome
        .iter()
        .enumerate()
        .filter(|&(_, &g)| g != 0)
        .map(|(i, _)| i)
        .collect()
}
