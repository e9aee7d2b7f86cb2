//! Order statistics shared by the ranking pass, sector statistics and the
//! benchmark calibrator.
//!
//! Empty input yields a neutral value instead of panicking. Inputs are
//! validated as finite before they get here.

use std::cmp::Ordering;

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    match data.len() {
        0 => 0.0,
        n => data.iter().sum::<f64>() / n as f64,
    }
}

/// Sample (n - 1) standard deviation; 0.0 below two observations.
pub fn std_dev(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let centre = mean(data);
    let sum_sq: f64 = data.iter().map(|x| (x - centre) * (x - centre)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Median of `data`; an even-length slice yields the mean of the two middle values.
/// Returns `None` for empty input.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sorted = sorted(data);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Value at `pct` (0-100) with linear interpolation between closest ranks.
pub fn percentile_value(data: &[f64], pct: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = sorted(data);
    let pos = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Mid-rank percentile (0-100) of `value` against its peers.
///
/// `population` must contain `value` itself exactly once for the entity being
/// ranked; that occurrence is excluded, so peers are the other members.
/// Strictly lower peers count fully, tied peers count half.
/// With no peers the percentile is neutral (50.0).
pub fn peer_percentile(value: f64, population: &[f64]) -> f64 {
    let peers = population.len().saturating_sub(1);
    if peers == 0 {
        return 50.0;
    }
    let below = population.iter().filter(|&&x| x < value).count();
    let tied = population
        .iter()
        .filter(|&&x| x == value)
        .count()
        .saturating_sub(1);
    (below as f64 + 0.5 * tied as f64) / peers as f64 * 100.0
}

/// Competition rank of `value` within `population`: 1 + number of strictly
/// higher members. Equal values share a rank.
pub fn competition_rank(value: f64, population: &[f64]) -> u32 {
    1 + population.iter().filter(|&&x| x > value).count() as u32
}
