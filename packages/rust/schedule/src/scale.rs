//! Proportional scaling of baseline weights to a concrete day total.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Day total used when the completion-time text carries no integer literal.
pub const DEFAULT_TARGET_DAYS: i64 = 120;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer literal pattern"));

/// Scale a baseline weight vector to an integer day-count vector whose sum
/// approximates `target_total`.
///
/// Each element is `round(weight * target / sum(weights))`, floored at 1: a
/// step never collapses to zero duration. The result's sum can drift from
/// `target_total` by up to one day per element; no redistribution pass is
/// performed. Pure and deterministic.
///
/// A non-positive target is not rejected. The negative ratio rounds every
/// element to zero or below, so the per-element floor turns the whole vector
/// into ones.
pub fn scale_to_total(weights: &[f64], target_total: i64) -> Vec<i64> {
    let base: f64 = weights.iter().sum();
    let ratio = target_total as f64 / base;

    weights
        .iter()
        .map(|w| ((w * ratio).round() as i64).max(1))
        .collect()
}

/// Extract the target day count from free-form completion-time text
/// (e.g. `"120 ngày"`), taking the first integer literal encountered.
///
/// Falls back to [`DEFAULT_TARGET_DAYS`] when no digit sequence is present;
/// malformed input is never an error.
pub fn parse_target_days(text: &str) -> i64 {
    match FIRST_INTEGER.find(text) {
        Some(m) => m.as_str().parse::<i64>().unwrap_or_else(|_| {
            warn!(literal = m.as_str(), "integer literal out of range, using default");
            DEFAULT_TARGET_DAYS
        }),
        None => {
            warn!(text, "no integer literal in completion-time text, using default");
            DEFAULT_TARGET_DAYS
        }
    }
}
