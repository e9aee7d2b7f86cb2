//! Batch scoring with per-sector and overall ranking.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use scoring_core::stats::{competition_rank, peer_percentile};
use scoring_core::{QualityTier, ScoringInput};
use serde::{Deserialize, Serialize};

use crate::engine::ScoringEngine;
use crate::score::FundamentalScore;

/// Scores plus what was dropped along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub scores: Vec<FundamentalScore>,
    pub failed: usize,
    pub failed_symbols: Vec<String>,
}

/// Runs the engine over many entities, then ranks them against each other.
pub struct ScoringBatch {
    engine: ScoringEngine,
}

impl Default for ScoringBatch {
    fn default() -> Self {
        Self::new(ScoringEngine::default())
    }
}

impl ScoringBatch {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score and rank every input. Failing entities are skipped.
    pub fn process(&self, inputs: &[ScoringInput]) -> Vec<FundamentalScore> {
        self.process_with_report(inputs).scores
    }

    pub fn process_with_report(&self, inputs: &[ScoringInput]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for input in inputs {
            match self.engine.score(input) {
                Ok(score) => outcome.scores.push(score),
                Err(e) => {
                    tracing::warn!("Skipping {} in batch: {}", input.symbol, e);
                    outcome.failed += 1;
                    outcome.failed_symbols.push(input.symbol.clone());
                }
            }
        }

        assign_rankings(&mut outcome.scores);

        tracing::info!(
            "Scored {} of {} entities ({} failed)",
            outcome.scores.len(),
            inputs.len(),
            outcome.failed
        );
        outcome
    }
}

/// Fill sector and overall rank/percentile for every score in place.
///
/// Ranks are competition ranks (ties share the better rank). Percentiles
/// compare each score against its peers only, counting ties as half.
pub fn assign_rankings(scores: &mut [FundamentalScore]) {
    let overall: Vec<f64> = scores.iter().map(|s| s.composite_score()).collect();

    let mut by_sector: HashMap<String, Vec<f64>> = HashMap::new();
    for score in scores.iter() {
        by_sector
            .entry(score.sector.clone())
            .or_default()
            .push(score.composite_score());
    }

    for score in scores.iter_mut() {
        let value = score.composite_score();
        score.overall_rank = competition_rank(value, &overall);
        score.overall_percentile = peer_percentile(value, &overall);

        if let Some(sector) = by_sector.get(&score.sector) {
            score.sector_rank = competition_rank(value, sector);
            score.sector_percentile = peer_percentile(value, sector);
        }
    }
}

/// Best `limit` scores at or above `min_quality`, highest composite first.
/// Equal composites keep their input order.
pub fn get_top_stocks(
    scores: &[FundamentalScore],
    limit: usize,
    min_quality: QualityTier,
) -> Vec<FundamentalScore> {
    let mut eligible: Vec<FundamentalScore> = scores
        .iter()
        .filter(|s| s.quality_tier() >= min_quality)
        .cloned()
        .collect();

    eligible.sort_by(|a, b| {
        b.composite_score()
            .partial_cmp(&a.composite_score())
            .unwrap_or(Ordering::Equal)
    });
    eligible.truncate(limit);
    eligible
}

/// Highest-scoring entity per sector. On an exact tie the first one seen
/// is kept.
pub fn get_sector_leaders(scores: &[FundamentalScore]) -> BTreeMap<String, FundamentalScore> {
    let mut leaders: BTreeMap<String, FundamentalScore> = BTreeMap::new();

    for score in scores {
        let replace = leaders
            .get(&score.sector)
            .map_or(true, |current| score.composite_score() > current.composite_score());
        if replace {
            leaders.insert(score.sector.clone(), score.clone());
        }
    }

    leaders
}
