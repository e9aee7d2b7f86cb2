use std::sync::Arc;

use scoring_core::{FinancialMetrics, MetricsProvider, ScoringError, ScoringInput};
use serde::{Deserialize, Serialize};

use crate::benchmarks::{canonical_sector, BenchmarkRegistry};
use crate::categories::CategoryScores;
use crate::composite::composite_score;
use crate::score::FundamentalScore;
use crate::screens::{red_flags, QualityScreen};
use crate::strengths::assess;
use crate::weights::WeightVector;

/// Static description of a configured engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub engine_version: String,
    pub sectors_configured: Vec<String>,
    pub weights: WeightVector,
}

/// Turns one entity's metrics into a `FundamentalScore`.
///
/// Holds normalized weights and a shared benchmark registry. Scoring is pure
/// apart from reading the registry, so one engine can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: WeightVector,
    registry: Arc<BenchmarkRegistry>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(WeightVector::default(), Arc::new(BenchmarkRegistry::with_defaults()))
    }
}

impl ScoringEngine {
    /// Weights that do not sum to 1.0 are renormalized; malformed or all-zero
    /// weights are replaced with the defaults.
    pub fn new(weights: WeightVector, registry: Arc<BenchmarkRegistry>) -> Self {
        let weights = if !weights.is_well_formed() || weights.total() <= 0.0 {
            tracing::warn!(
                "Scoring weights {:?} are unusable; using defaults",
                weights.as_array()
            );
            WeightVector::default()
        } else if !weights.validate() {
            tracing::warn!(
                "Scoring weights sum to {:.4}; renormalizing to 1.0",
                weights.total()
            );
            let mut normalized = weights;
            normalized.normalize();
            normalized
        } else {
            weights
        };

        Self { weights, registry }
    }

    pub fn with_weights(weights: WeightVector) -> Self {
        Self::new(weights, Arc::new(BenchmarkRegistry::with_defaults()))
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn registry(&self) -> &Arc<BenchmarkRegistry> {
        &self.registry
    }

    /// Score one entity. Sparse metrics are fine; malformed input is not.
    pub fn score(&self, input: &ScoringInput) -> Result<FundamentalScore, ScoringError> {
        self.score_metrics(
            &input.symbol,
            input.sector.as_deref(),
            &input.metrics,
            input.data_quality,
        )
    }

    pub fn score_metrics(
        &self,
        symbol: &str,
        sector: Option<&str>,
        metrics: &FinancialMetrics,
        data_quality: Option<f64>,
    ) -> Result<FundamentalScore, ScoringError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ScoringError::InvalidData("symbol must not be empty".to_string()));
        }
        metrics.validate()?;
        let data_quality = resolve_data_quality(metrics, data_quality)?;

        let benchmark = self.registry.get(sector);
        let scores = CategoryScores::compute(metrics, &benchmark);
        let composite = composite_score(&scores, &self.weights)?;

        // Unknown sectors borrow the General benchmark but keep their own group
        let mut score = FundamentalScore::new(
            symbol,
            canonical_sector(sector),
            scores,
            composite,
            data_quality,
        );
        let assessment = assess(&scores);
        score.strengths = assessment.strengths;
        score.weaknesses = assessment.weaknesses;
        score.red_flags = red_flags(metrics);
        score.quality_screen = Some(QualityScreen::evaluate(metrics));

        tracing::debug!(
            "Scored {} ({}): composite {:.1}, {:?}",
            symbol,
            score.sector,
            score.composite_score(),
            score.recommendation()
        );
        Ok(score)
    }

    /// Fetch metrics from the calculator and score them.
    pub async fn score_from_provider(
        &self,
        provider: &dyn MetricsProvider,
        symbol: &str,
        sector: Option<&str>,
        data_quality: Option<f64>,
    ) -> Result<FundamentalScore, ScoringError> {
        let metrics = provider.metrics_for(symbol).await.map_err(|e| match e {
            ScoringError::MetricsUnavailable(msg) => ScoringError::MetricsUnavailable(msg),
            other => ScoringError::MetricsUnavailable(format!("{}: {}", symbol, other)),
        })?;
        self.score_metrics(symbol, sector, &metrics, data_quality)
    }

    pub fn summary(&self) -> ScoringSummary {
        ScoringSummary {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            sectors_configured: self.registry.sectors(),
            weights: self.weights,
        }
    }
}

/// Caller-supplied quality wins, then the calculator's completeness, then
/// field coverage.
fn resolve_data_quality(
    metrics: &FinancialMetrics,
    data_quality: Option<f64>,
) -> Result<f64, ScoringError> {
    match data_quality {
        Some(dq) if !dq.is_finite() || !(0.0..=100.0).contains(&dq) => Err(
            ScoringError::InvalidData(format!("data_quality {} outside 0-100", dq)),
        ),
        Some(dq) => Ok(dq),
        None => Ok(metrics
            .data_completeness
            .unwrap_or_else(|| metrics.coverage())),
    }
}
