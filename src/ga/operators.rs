//! Creation, inspection, crossover and mutation of binary chromosomes.
//!
//! Every operator takes the random source from the caller, so a driver that
//! seeds its generator gets reproducible runs.
//!
//! # Crossover Operators
//!
//! - [`crossover_one_point`]: prefix of one parent, suffix of the other,
//!   the bit at the cut dropped from both
//!
//! # Mutation Operators
//!
//! - [`mutate_flip`]: flip one uniformly chosen bit
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::types::{Chromosome, Gene};
use rand::Rng;

// ============================================================================
// Creation and inspection
// ============================================================================

/// Creates a chromosome of `size` genes, each set with probability `bias`.
///
/// Returns the chromosome and its number of set genes. A `bias` at or below
/// `0.0` yields all zeros; at or above `1.0`, all ones.
pub fn create<R: Rng>(bias: f64, size: usize, rng: &mut R) -> (Chromosome, usize) {
    let chromosome: Chromosome = (0..size)
        .map(|_| Gene::from(rng.random::<f64>() < bias))
        .collect();
    let ones = chromosome.iter().filter(|&&g| g == 1).count();
    (chromosome, ones)
}

/// Whether every gene is `0` or `1`.
pub fn inspect_individual(chromosome: &[Gene]) -> bool {
    chromosome.iter().all(|&g| g <= 1)
}

/// Whether every gene of every chromosome is `0` or `1`.
pub fn inspect_population(population: &[Chromosome]) -> bool {
    population.iter().all(|c| inspect_individual(c))
}

// ============================================================================
// Crossover
// ============================================================================

/// One-point crossover at a uniformly random cut.
///
/// See [`crossover_one_point_at`]; returns the child and the cut used.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn crossover_one_point<R: Rng>(
    parent_a: &[Gene],
    parent_b: &[Gene],
    rng: &mut R,
) -> (Chromosome, usize) {
    assert!(!parent_a.is_empty(), "parents must not be empty");
    let cut = rng.random_range(0..parent_a.len());
    (crossover_one_point_at(parent_a, parent_b, cut), cut)
}

/// One-point crossover at `cut`: `parent_a[..cut]` followed by
/// `parent_b[cut + 1..]`.
///
/// The bit at `cut` comes from neither parent, so the child is one gene
/// shorter than its parents. `cut = 0` gives `parent_b[1..]`;
/// `cut = len - 1` gives `parent_a[..len - 1]`.
///
/// # Panics
/// Panics if parents have different lengths, or `cut` is out of range.
pub fn crossover_one_point_at(parent_a: &[Gene], parent_b: &[Gene], cut: usize) -> Chromosome {
    assert_eq!(
        parent_a.len(),
        parent_b.len(),
        "parents must have equal length"
    );
    assert!(cut < parent_a.len(), "cut {cut} out of range");

    let mut child = Vec::with_capacity(parent_a.len() - 1);
    child.extend_from_slice(&parent_a[..cut]);
    child.extend_from_slice(&parent_b[cut + 1..]);
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Flips exactly one uniformly chosen gene and returns its position.
///
/// # Complexity
/// O(1)
///
/// # Panics
/// Panics if `chromosome` is empty.
pub fn mutate_flip<R: Rng>(chromosome: &mut [Gene], rng: &mut R) -> usize {
    assert!(!chromosome.is_empty(), "cannot mutate an empty chromosome");
    let pos = rng.random_range(0..chromosome.len());
    chromosome[pos] = Gene::from(chromosome[pos] == 0);
    pos
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // ---- Creation ----

    #[test]
    fn test_create_counts_ones() {
        let mut rng = rng();
        for _ in 0..50 {
            let (c, ones) = create(0.3, 40, &mut rng);
            assert_eq!(c.len(), 40);
            assert_eq!(ones, c.iter().filter(|&&g| g == 1).count());
            assert!(inspect_individual(&c));
        }
    }

    #[test]
    fn test_create_extreme_bias() {
        let mut rng = rng();
        assert_eq!(create(0.0, 10, &mut rng), (vec![0; 10], 0));
        assert_eq!(create(1.0, 10, &mut rng), (vec![1; 10], 10));
    }

    #[test]
    fn test_create_bias_is_respected() {
        let mut rng = rng();
        let (_, ones) = create(0.8, 10_000, &mut rng);
        assert!((7_500..8_500).contains(&ones), "got {ones} ones");
    }

    // ---- Inspection ----

    #[test]
    fn test_inspect_rejects_non_binary_genes() {
        assert!(inspect_individual(&[0, 1, 1]));
        assert!(!inspect_individual(&[0, 2, 1]));
        assert!(inspect_population(&[vec![0], vec![1, 1]]));
        assert!(!inspect_population(&[vec![0], vec![1, 7]]));
        assert!(inspect_population(&[]));
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_at_boundaries() {
        let a = vec![1, 1, 1, 1, 1];
        let b = vec![0, 1, 0, 1, 0];
        assert_eq!(crossover_one_point_at(&a, &b, 0), vec![1, 0, 1, 0]);
        assert_eq!(crossover_one_point_at(&a, &b, 4), vec![1, 1, 1, 1]);
        assert_eq!(crossover_one_point_at(&a, &b, 2), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_crossover_random_cut_is_in_range() {
        let mut rng = rng();
        let a = vec![1; 8];
        let b = vec![0; 8];
        for _ in 0..100 {
            let (child, cut) = crossover_one_point(&a, &b, &mut rng);
            assert!(cut < 8);
            assert_eq!(child.len(), 7);
            assert_eq!(child.iter().filter(|&&g| g == 1).count(), cut);
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossover_length_mismatch_panics() {
        crossover_one_point_at(&[0, 1], &[0, 1, 1], 0);
    }

    // ---- Mutation ----

    #[test]
    fn test_mutate_flips_exactly_one_gene() {
        let mut rng = rng();
        for _ in 0..100 {
            let original = vec![0, 1, 1, 0, 1, 0];
            let mut c = original.clone();
            let pos = mutate_flip(&mut c, &mut rng);
            let diffs: Vec<usize> = (0..c.len()).filter(|&i| c[i] != original[i]).collect();
            assert_eq!(diffs, vec![pos]);
            assert!(inspect_individual(&c));
        }
    }

    #[test]
    #[should_panic(expected = "cannot mutate an empty chromosome")]
    fn test_mutate_empty_panics() {
        mutate_flip(&mut [], &mut rng());
    }
}
