//! Cumulative-probability selection over labelled weights.

use rand::Rng;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedLabel<'a> {
    pub label: &'a str,
    pub weight: f64,
}

impl<'a> WeightedLabel<'a> {
    pub fn new(label: &'a str, weight: f64) -> Self {
        Self { label, weight }
    }
}

/// Walk `items` in order and return the first label whose cumulative weight
/// exceeds `roll`.
///
/// If the weights sum to slightly less than `roll` because of float drift,
/// the last label is returned instead of failing.
///
/// # Panics
///
/// Panics if `items` is empty.
pub fn select_at<'a>(items: &[WeightedLabel<'a>], roll: f64) -> &'a str {
    assert!(!items.is_empty(), "weighted selection over an empty list");

    let mut cumulative = 0.0;
    for item in items {
        if item.weight.is_finite() && item.weight > 0.0 {
            cumulative += item.weight;
        }
        if roll < cumulative {
            return item.label;
        }
    }

    let last = items[items.len() - 1].label;
    trace!(roll, cumulative, fallback = last, "Weighted selection fell through");
    last
}

/// Draw one label, consuming a single `[0, 1)` roll from `rng`.
pub fn sample<'a>(items: &[WeightedLabel<'a>], rng: &mut impl Rng) -> &'a str {
    let roll = rng.gen::<f64>();
    select_at(items, roll)
}
