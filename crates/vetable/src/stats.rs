//! Aggregate primitives: mean, median, frequency tables, quartiles.
//!
//! Pure functions over numeric or categorical sequences. Report renderers
//! depend on the exact numbers these produce, so the rounding and
//! interpolation rules here are contracts, not implementation details.

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Five-number summary over a sorted numeric sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuartileStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Arithmetic mean rounded to 2 decimal places.
///
/// An empty sequence yields 0, a documented degenerate case rather than an
/// error. Rounding happens inside the aggregate to keep report numbers
/// identical across renderers.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a numeric sequence; 0 for empty input.
///
/// Odd lengths return the middle element unrounded; even lengths return the
/// average of the two middle elements rounded to 2 decimal places.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        round2((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Count occurrences of each distinct value, ordered by descending count.
///
/// Ties keep first-encounter order (stable sort). Top-N displays iterate
/// this map in order, so the ordering is part of the contract.
pub fn frequency<T, I>(values: I) -> IndexMap<T, usize>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut counts: IndexMap<T, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Five-number summary of an ascending-sorted sequence using linear (R-7)
/// interpolation between order statistics.
///
/// For quantile `q` the position is `(n - 1) * q`; the result interpolates
/// between the values at `floor(position)` and the next index, or takes the
/// value itself at the end of the sequence. Empty input yields all zeroes.
pub fn quartiles(sorted: &[f64]) -> QuartileStats {
    if sorted.is_empty() {
        return QuartileStats::default();
    }
    QuartileStats {
        min: sorted[0],
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - pos.floor();
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_rounds_to_two_decimals() {
        assert_eq!(mean(&[1.0, 2.0]), 1.5);
        assert_eq!(mean(&[1.0, 2.0, 2.0]), 1.67);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_is_unrounded_middle() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[1.333, 1.0, 2.0]), 1.333);
    }

    #[test]
    fn test_median_even_rounds_average() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[1.0, 2.005]), 1.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_frequency_orders_by_descending_count() {
        let freq = frequency(vec!["b", "a", "a", "c", "a", "c"]);
        let entries: Vec<(&str, usize)> = freq.into_iter().collect();
        assert_eq!(entries, vec![("a", 3), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let freq = frequency(vec!["x", "y", "x", "y", "z"]);
        let keys: Vec<&str> = freq.keys().copied().collect();
        // x and y tie at 2; x was seen first.
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_quartiles_linear_interpolation() {
        let stats = quartiles(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_quartiles_single_element() {
        let stats = quartiles(&[5.0]);
        assert_eq!(
            stats,
            QuartileStats { min: 5.0, q1: 5.0, median: 5.0, q3: 5.0, max: 5.0 }
        );
    }

    #[test]
    fn test_quartiles_empty_is_all_zero() {
        assert_eq!(quartiles(&[]), QuartileStats::default());
    }
}
