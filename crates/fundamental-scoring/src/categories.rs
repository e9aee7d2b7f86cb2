//! The five category scorers. Each is a pure function of the metrics and the
//! sector benchmark returning a score in [0, 100].

use scoring_core::{Category, FinancialMetrics};

use crate::benchmarks::{SectorBenchmark, RETAIL, TECHNOLOGY};
use crate::normalize::{
    higher_is_better, leverage_band_score, liquidity_score, lower_is_better, WeightedComponents,
};

const PE_FLOOR: f64 = 8.0;
const PB_FLOOR: f64 = 0.8;
const PS_REFERENCE: f64 = 3.0;
const PS_FLOOR: f64 = 1.0;
const DE_FLOOR: f64 = 0.3;
const DEBT_EBITDA_REFERENCE: f64 = 2.5;
const DEBT_EBITDA_FLOOR: f64 = 1.0;
const DEBT_ASSETS_REFERENCE: f64 = 0.5;
const DEBT_ASSETS_FLOOR: f64 = 0.2;

/// The five sub-scores of one entity.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryScores {
    pub valuation: f64,
    pub profitability: f64,
    pub growth: f64,
    pub financial_health: f64,
    pub efficiency: f64,
}

impl CategoryScores {
    /// Score every category for one entity.
    pub fn compute(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> Self {
        Self {
            valuation: valuation_score(metrics, benchmark),
            profitability: profitability_score(metrics, benchmark),
            growth: growth_score(metrics, benchmark),
            financial_health: financial_health_score(metrics, benchmark),
            efficiency: efficiency_score(metrics, benchmark),
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Valuation => self.valuation,
            Category::Profitability => self.profitability,
            Category::Growth => self.growth,
            Category::FinancialHealth => self.financial_health,
            Category::Efficiency => self.efficiency,
        }
    }

    /// Sub-scores in `Category::ALL` order.
    pub fn as_array(&self) -> [f64; 5] {
        Category::ALL.map(|c| self.get(c))
    }
}

// Multiples are meaningless for loss makers or negative book value
fn positive_multiple(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

// Negative equity/EBITDA/assets is the worst case for leverage, not a gap
fn leverage_ratio(value: Option<f64>, reference: f64, floor: f64) -> Option<f64> {
    value.map(|v| {
        if v < 0.0 {
            0.0
        } else {
            lower_is_better(v, reference, floor)
        }
    })
}

pub fn valuation_score(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> f64 {
    let pe = positive_multiple(metrics.pe_ratio)
        .map(|v| lower_is_better(v, benchmark.pe_ratio, PE_FLOOR));
    let pb = positive_multiple(metrics.pb_ratio)
        .map(|v| lower_is_better(v, benchmark.pb_ratio, PB_FLOOR));
    let ps = positive_multiple(metrics.ps_ratio).map(|v| lower_is_better(v, PS_REFERENCE, PS_FLOOR));

    WeightedComponents::new()
        .add(pe, 0.40)
        .add(pb, 0.40)
        .add(ps, 0.20)
        .finish()
}

pub fn profitability_score(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> f64 {
    let roe = metrics.roe.map(|v| higher_is_better(v, benchmark.roe));
    let margin = metrics
        .net_margin
        .map(|v| higher_is_better(v, benchmark.net_margin));
    let roa = metrics.roa.map(|v| higher_is_better(v, benchmark.roe / 2.0));
    let ebitda = metrics
        .ebitda_margin
        .map(|v| higher_is_better(v, benchmark.net_margin * 2.0));

    WeightedComponents::new()
        .add(roe, 0.35)
        .add(margin, 0.30)
        .add(roa, 0.20)
        .add(ebitda, 0.15)
        .finish()
}

pub fn growth_score(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> f64 {
    let anchor = benchmark.revenue_growth;
    let revenue_3y = metrics.revenue_growth_3y.map(|v| higher_is_better(v, anchor));
    let earnings_3y = metrics.earnings_growth_3y.map(|v| higher_is_better(v, anchor));
    let revenue_1y = metrics.revenue_growth_1y.map(|v| higher_is_better(v, anchor));

    WeightedComponents::new()
        .add(revenue_3y, 0.40)
        .add(earnings_3y, 0.35)
        .add(revenue_1y, 0.25)
        .finish()
}

pub fn financial_health_score(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> f64 {
    let de = leverage_ratio(metrics.debt_to_equity, benchmark.debt_to_equity, DE_FLOOR);
    let liquidity = metrics.current_ratio.map(liquidity_score);
    let debt_ebitda = leverage_ratio(
        metrics.debt_to_ebitda,
        DEBT_EBITDA_REFERENCE,
        DEBT_EBITDA_FLOOR,
    );
    let debt_assets = leverage_ratio(
        metrics.debt_to_assets,
        DEBT_ASSETS_REFERENCE,
        DEBT_ASSETS_FLOOR,
    );

    WeightedComponents::new()
        .add(de, 0.35)
        .add(liquidity, 0.30)
        .add(debt_ebitda, 0.20)
        .add(debt_assets, 0.15)
        .finish()
}

pub fn efficiency_score(metrics: &FinancialMetrics, benchmark: &SectorBenchmark) -> f64 {
    let ideal = asset_turnover_ideal(&benchmark.sector);
    let turnover = metrics.asset_turnover.map(|v| higher_is_better(v, ideal));

    let leverage = match (metrics.roe, metrics.roa) {
        (Some(roe), Some(roa)) if roa > 0.0 => Some(leverage_band_score(roe / roa)),
        _ => None,
    };

    WeightedComponents::new()
        .add(turnover, 0.60)
        .add(leverage, 0.40)
        .finish()
}

/// Sector-typical asset turnover used as the efficiency anchor.
pub fn asset_turnover_ideal(sector: &str) -> f64 {
    match sector {
        RETAIL => 2.0,
        TECHNOLOGY => 1.0,
        _ => 1.2,
    }
}
