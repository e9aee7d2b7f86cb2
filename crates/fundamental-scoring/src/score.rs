use chrono::{DateTime, Utc};
use scoring_core::{QualityTier, Recommendation};
use serde::{Deserialize, Serialize};

use crate::categories::CategoryScores;
use crate::screens::QualityScreen;

/// Full scoring result for one entity.
///
/// `quality_tier` and `recommendation` are derived from the composite and the
/// data quality when the score is built (or deserialized) and are only
/// readable through accessors, so the three can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredScore")]
pub struct FundamentalScore {
    pub symbol: String,
    /// Canonical sector key
    pub sector: String,
    pub scores: CategoryScores,
    composite_score: f64,
    quality_tier: QualityTier,
    recommendation: Recommendation,
    data_quality: f64,

    pub sector_rank: u32,
    pub sector_percentile: f64,
    pub overall_rank: u32,
    pub overall_percentile: f64,

    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub red_flags: Vec<String>,
    pub quality_screen: Option<QualityScreen>,
    pub analysis_date: DateTime<Utc>,
}

impl FundamentalScore {
    /// Build a score with default ranking (rank 1, percentile 50) and empty
    /// statements. Composite and data quality are clamped to [0, 100].
    pub fn new(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        scores: CategoryScores,
        composite_score: f64,
        data_quality: f64,
    ) -> Self {
        let composite_score = composite_score.clamp(0.0, 100.0);
        let data_quality = data_quality.clamp(0.0, 100.0);
        Self {
            symbol: symbol.into(),
            sector: sector.into(),
            scores,
            composite_score,
            quality_tier: QualityTier::from_score(composite_score),
            recommendation: Recommendation::from_score(composite_score, data_quality),
            data_quality,
            sector_rank: 1,
            sector_percentile: 50.0,
            overall_rank: 1,
            overall_percentile: 50.0,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            red_flags: Vec::new(),
            quality_screen: None,
            analysis_date: Utc::now(),
        }
    }

    pub fn composite_score(&self) -> f64 {
        self.composite_score
    }

    pub fn quality_tier(&self) -> QualityTier {
        self.quality_tier
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    pub fn data_quality(&self) -> f64 {
        self.data_quality
    }

    pub fn has_red_flags(&self) -> bool {
        !self.red_flags.is_empty()
    }
}

/// Wire shape of a score. Derived fields present in the payload are ignored
/// and recomputed.
#[derive(Deserialize)]
struct StoredScore {
    symbol: String,
    sector: String,
    scores: CategoryScores,
    composite_score: f64,
    data_quality: f64,
    #[serde(default = "default_rank")]
    sector_rank: u32,
    #[serde(default = "default_percentile")]
    sector_percentile: f64,
    #[serde(default = "default_rank")]
    overall_rank: u32,
    #[serde(default = "default_percentile")]
    overall_percentile: f64,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    #[serde(default)]
    quality_screen: Option<QualityScreen>,
    #[serde(default = "Utc::now")]
    analysis_date: DateTime<Utc>,
}

fn default_rank() -> u32 {
    1
}

fn default_percentile() -> f64 {
    50.0
}

impl From<StoredScore> for FundamentalScore {
    fn from(stored: StoredScore) -> Self {
        let mut score = FundamentalScore::new(
            stored.symbol,
            stored.sector,
            stored.scores,
            stored.composite_score,
            stored.data_quality,
        );
        score.sector_rank = stored.sector_rank;
        score.sector_percentile = stored.sector_percentile;
        score.overall_rank = stored.overall_rank;
        score.overall_percentile = stored.overall_percentile;
        score.strengths = stored.strengths;
        score.weaknesses = stored.weaknesses;
        score.red_flags = stored.red_flags;
        score.quality_screen = stored.quality_screen;
        score.analysis_date = stored.analysis_date;
        score
    }
}
