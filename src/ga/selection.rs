//! Selection of parents by externally supplied fitness.
//!
//! Fitness here is maximized: higher values are better. Values that are
//! negative or NaN count as zero weight.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::{KcmcError, Result};
use rand::Rng;

/// Fitness-proportionate selection of `count` distinct indices.
///
/// Each draw picks a threshold in `(0, total]` over the fitness of the
/// candidates not selected yet, then walks them from index 0 subtracting
/// their fitness until the threshold is used up. The candidate that
/// exhausts it is selected and removed from the pool.
///
/// # Errors
/// [`KcmcError::DegenerateSelection`] when the remaining total fitness is
/// not positive before `count` indices are selected (including
/// `count > fitness.len()`).
///
/// # Complexity
/// O(count · n)
pub fn roulette_select<R: Rng>(count: usize, fitness: &[f64], rng: &mut R) -> Result<Vec<usize>> {
    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| if f > 0.0 { f } else { 0.0 })
        .collect();
    let mut remaining = vec![true; weights.len()];
    let mut selected = Vec::with_capacity(count);

    let degenerate = |selected: usize| KcmcError::DegenerateSelection {
        selected,
        requested: count,
    };

    while selected.len() < count {
        let total: f64 = weights
            .iter()
            .zip(&remaining)
            .filter(|&(_, &open)| open)
            .map(|(w, _)| w)
            .sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(degenerate(selected.len()));
        }

        let mut threshold = total * (1.0 - rng.random::<f64>());
        let mut pick = None;
        for (i, (&w, &open)) in weights.iter().zip(&remaining).enumerate() {
            if !open || w == 0.0 {
                continue;
            }
            pick = Some(i);
            threshold -= w;
            if threshold <= 0.0 {
                break;
            }
        }

        // rounding may leave a sliver of threshold; the last candidate takes it
        let Some(i) = pick else {
            return Err(degenerate(selected.len()));
        };
        remaining[i] = false;
        selected.push(i);
    }

    Ok(selected)
}

/// Uniformly picks an entry of `selection` that differs from `avoid`.
///
/// Used to draw a second parent distinct from the first. Returns `None`
/// when every entry equals `avoid`.
pub fn select_excluding<R: Rng>(selection: &[usize], avoid: usize, rng: &mut R) -> Option<usize> {
    let candidates: Vec<usize> = selection.iter().copied().filter(|&i| i != avoid).collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}
