//! Mean, median and mode over plain numeric samples.

use super::{StatsError, StatsMode};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even-length input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most common value. Ties go to the value seen first.
pub fn mode(values: &[usize]) -> Option<usize> {
    let mut counts: Vec<(usize, usize)> = Vec::new();
    for &v in values {
        match counts.iter_mut().find(|(value, _)| *value == v) {
            Some((_, count)) => *count += 1,
            None => counts.push((v, 1)),
        }
    }
    let mut best: Option<(usize, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Apply `mode` to a missing value: an error in strict mode, `None` otherwise.
pub fn require<T>(
    value: Option<T>,
    metric: &'static str,
    mode: StatsMode,
) -> Result<Option<T>, StatsError> {
    match (value, mode) {
        (Some(v), _) => Ok(Some(v)),
        (None, StatsMode::Lenient) => Ok(None),
        (None, StatsMode::Strict) => Err(StatsError::EmptyInput { metric }),
    }
}
