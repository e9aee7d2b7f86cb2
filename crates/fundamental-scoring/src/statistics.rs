//! Descriptive statistics of composite scores per sector.

use std::collections::BTreeMap;

use scoring_core::stats::{mean, median, percentile_value, std_dev};
use scoring_core::Category;
use serde::{Deserialize, Serialize};

use crate::score::FundamentalScore;

/// Sectors with fewer members than this are not summarized.
pub const DEFAULT_MIN_SECTOR_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStatistics {
    pub sector: String,
    pub sample_size: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    /// Mean sub-score per category, in `Category::ALL` order
    pub category_means: BTreeMap<Category, f64>,
}

impl SectorStatistics {
    /// Summarize every sector with at least `min_sector_size` scores.
    pub fn from_scores(
        scores: &[FundamentalScore],
        min_sector_size: usize,
    ) -> BTreeMap<String, SectorStatistics> {
        let mut groups: BTreeMap<&str, Vec<&FundamentalScore>> = BTreeMap::new();
        for score in scores {
            groups.entry(score.sector.as_str()).or_default().push(score);
        }

        let mut result = BTreeMap::new();
        for (sector, members) in groups {
            if members.len() < min_sector_size.max(1) {
                tracing::debug!(
                    "Skipping statistics for {}: {} members (minimum {})",
                    sector,
                    members.len(),
                    min_sector_size
                );
                continue;
            }
            result.insert(sector.to_string(), Self::summarize(sector, &members));
        }
        result
    }

    fn summarize(sector: &str, members: &[&FundamentalScore]) -> Self {
        let composites: Vec<f64> = members.iter().map(|s| s.composite_score()).collect();

        let category_means = Category::ALL
            .iter()
            .map(|&c| {
                let values: Vec<f64> = members.iter().map(|s| s.scores.get(c)).collect();
                (c, mean(&values))
            })
            .collect();

        Self {
            sector: sector.to_string(),
            sample_size: members.len(),
            mean: mean(&composites),
            median: median(&composites).unwrap_or(0.0),
            std_dev: std_dev(&composites),
            min: composites.iter().copied().fold(f64::INFINITY, f64::min),
            max: composites.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            p25: percentile_value(&composites, 25.0),
            p75: percentile_value(&composites, 75.0),
            p90: percentile_value(&composites, 90.0),
            category_means,
        }
    }
}
