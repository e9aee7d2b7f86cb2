//! Piecewise-linear curves that turn raw ratios into 0-100 scores.
//!
//! Benchmark-relative curves take the sector median as their anchor. The
//! breakpoints are empirical and kept as-is; scores are always clamped.

/// Neutral score for a category with no measurable input.
pub const NEUTRAL_SCORE: f64 = 50.0;

const MIN_BENCHMARK: f64 = 0.01;

/// Score for metrics where cheaper / lower is better (P/E, P/B, leverage).
///
/// 100 at or below `floor`, 75 at the benchmark, 20 at twice the benchmark
/// and 0 at three times the benchmark. The benchmark is raised to `floor`
/// when a sector median sits below the cheap floor.
pub fn lower_is_better(value: f64, benchmark: f64, floor: f64) -> f64 {
    let bench = benchmark.max(floor);
    let score = if value <= floor {
        100.0
    } else if value <= bench {
        100.0 - (value - floor) / (bench - floor) * 25.0
    } else if value <= 2.0 * bench {
        75.0 - (value - bench) / bench * 55.0
    } else {
        20.0 - (value - 2.0 * bench) / bench * 20.0
    };
    score.clamp(0.0, 100.0)
}

/// Score for metrics where higher is better (ROE, margins, growth).
///
/// Negative values are a hard zero. 40 at half the benchmark, 80 at the
/// benchmark, 100 from 1.5x the benchmark upward.
pub fn higher_is_better(value: f64, benchmark: f64) -> f64 {
    if value < 0.0 {
        return 0.0;
    }
    let bench = benchmark.max(MIN_BENCHMARK);
    let half = 0.5 * bench;
    let score = if value >= 1.5 * bench {
        100.0
    } else if value >= bench {
        80.0 + (value - bench) / half * 20.0
    } else if value >= half {
        40.0 + (value - half) / half * 40.0
    } else {
        value / half * 40.0
    };
    score.clamp(0.0, 100.0)
}

/// Current-ratio score on absolute breakpoints (not sector-relative).
pub fn liquidity_score(current_ratio: f64) -> f64 {
    let score = if current_ratio >= 2.0 {
        100.0
    } else if current_ratio >= 1.5 {
        80.0 + (current_ratio - 1.5) / 0.5 * 20.0
    } else if current_ratio >= 1.0 {
        40.0 + (current_ratio - 1.0) / 0.5 * 40.0
    } else {
        current_ratio * 40.0
    };
    score.clamp(0.0, 100.0)
}

/// ROE/ROA leverage multiplier scored as a band: [1.5, 3.0] is optimal.
pub fn leverage_band_score(ratio: f64) -> f64 {
    let score = if (1.5..=3.0).contains(&ratio) {
        100.0
    } else if ratio < 1.5 {
        ratio / 1.5 * 100.0
    } else {
        100.0 - (ratio - 3.0) * 20.0
    };
    score.clamp(0.0, 100.0)
}

/// Weighted average over the sub-components that were actually measured.
///
/// Missing components are skipped, not scored as zero, so the category
/// weight re-normalizes over what is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedComponents {
    weighted_sum: f64,
    weight: f64,
}

impl WeightedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, score: Option<f64>, weight: f64) -> &mut Self {
        if let Some(s) = score {
            self.weighted_sum += s * weight;
            self.weight += weight;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.weight <= 0.0
    }

    /// Re-normalized score, or neutral when nothing was measured.
    pub fn finish(&self) -> f64 {
        if self.is_empty() {
            return NEUTRAL_SCORE;
        }
        (self.weighted_sum / self.weight).clamp(0.0, 100.0)
    }
}
