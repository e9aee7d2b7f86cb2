use scoring_core::{Category, ScoringError};

use crate::categories::CategoryScores;
use crate::weights::WeightVector;

/// Weighted sum of the category sub-scores, clamped to [0, 100].
///
/// Fails with `CalculationError` instead of emitting a NaN composite.
pub fn composite_score(scores: &CategoryScores, weights: &WeightVector) -> Result<f64, ScoringError> {
    let total: f64 = Category::ALL
        .iter()
        .map(|&c| scores.get(c) * weights.weight(c))
        .sum();

    if !total.is_finite() {
        return Err(ScoringError::CalculationError(format!(
            "composite score is not finite ({})",
            total
        )));
    }
    Ok(total.clamp(0.0, 100.0))
}
