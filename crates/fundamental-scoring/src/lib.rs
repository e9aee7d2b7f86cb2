//! Fundamental scoring engine.
//!
//! Turns precomputed financial ratios into five sector-relative category
//! scores, a weighted composite, a quality tier and a recommendation, and
//! ranks batches of entities within their sector and overall.

pub mod batch;
pub mod benchmarks;
pub mod calibrator;
pub mod categories;
pub mod composite;
pub mod engine;
pub mod normalize;
pub mod score;
pub mod screens;
pub mod statistics;
pub mod strengths;
pub mod weights;
#[cfg(test)]
mod tests;

pub use batch::{assign_rankings, get_sector_leaders, get_top_stocks, BatchOutcome, ScoringBatch};
pub use benchmarks::{canonical_sector, BenchmarkRegistry, SectorBenchmark};
pub use calibrator::BenchmarkCalibrator;
pub use categories::CategoryScores;
pub use engine::{ScoringEngine, ScoringSummary};
pub use score::FundamentalScore;
pub use screens::{red_flags, QualityScreen};
pub use statistics::{SectorStatistics, DEFAULT_MIN_SECTOR_SIZE};
pub use strengths::Assessment;
pub use weights::WeightVector;
