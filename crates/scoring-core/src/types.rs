use serde::{Deserialize, Serialize};

use crate::ScoringError;

/// Precomputed financial ratios for one company.
///
/// Every field is optional: `None` means "not computed / not applicable" and is
/// never the same thing as a measured zero. Percent-style ratios (ROE, ROA,
/// margins, growth) are in percent, e.g. `28.0` for 28%. `debt_to_assets` is a
/// fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialMetrics {
    // Valuation
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,

    // Profitability
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    #[serde(alias = "profit_margin")]
    pub net_margin: Option<f64>,
    pub ebitda_margin: Option<f64>,

    // Growth
    pub revenue_growth_1y: Option<f64>,
    #[serde(alias = "revenue_growth_3y_cagr")]
    pub revenue_growth_3y: Option<f64>,
    #[serde(alias = "earnings_growth_3y_cagr")]
    pub earnings_growth_3y: Option<f64>,

    // Leverage and liquidity
    pub debt_to_equity: Option<f64>,
    pub debt_to_ebitda: Option<f64>,
    pub debt_to_assets: Option<f64>,
    pub current_ratio: Option<f64>,

    // Efficiency
    pub asset_turnover: Option<f64>,

    /// Completeness reported by the calculator (0-100)
    pub data_completeness: Option<f64>,
}

impl FinancialMetrics {
    /// Named view over the fields that feed the category scorers.
    pub fn scored_fields(&self) -> [(&'static str, Option<f64>); 15] {
        [
            ("pe_ratio", self.pe_ratio),
            ("pb_ratio", self.pb_ratio),
            ("ps_ratio", self.ps_ratio),
            ("roe", self.roe),
            ("roa", self.roa),
            ("net_margin", self.net_margin),
            ("ebitda_margin", self.ebitda_margin),
            ("revenue_growth_1y", self.revenue_growth_1y),
            ("revenue_growth_3y", self.revenue_growth_3y),
            ("earnings_growth_3y", self.earnings_growth_3y),
            ("debt_to_equity", self.debt_to_equity),
            ("debt_to_ebitda", self.debt_to_ebitda),
            ("debt_to_assets", self.debt_to_assets),
            ("current_ratio", self.current_ratio),
            ("asset_turnover", self.asset_turnover),
        ]
    }

    /// Share of scored fields that are present, as a 0-100 percentage.
    pub fn coverage(&self) -> f64 {
        let fields = self.scored_fields();
        let present = fields.iter().filter(|(_, v)| v.is_some()).count();
        present as f64 / fields.len() as f64 * 100.0
    }

    /// Reject NaN and infinite values; absent fields are always fine.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, value) in self.scored_fields() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ScoringError::InvalidData(format!(
                        "{} is not a finite number",
                        name
                    )));
                }
            }
        }
        if let Some(c) = self.data_completeness {
            if !c.is_finite() || !(0.0..=100.0).contains(&c) {
                return Err(ScoringError::InvalidData(format!(
                    "data_completeness {} outside 0-100",
                    c
                )));
            }
        }
        Ok(())
    }
}

/// One entity to be scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringInput {
    pub symbol: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub metrics: FinancialMetrics,
    /// Confidence/completeness of the input (0-100)
    #[serde(default)]
    pub data_quality: Option<f64>,
}

impl ScoringInput {
    pub fn new(symbol: impl Into<String>, sector: Option<&str>, metrics: FinancialMetrics) -> Self {
        Self {
            symbol: symbol.into(),
            sector: sector.map(str::to_string),
            metrics,
            data_quality: None,
        }
    }

    pub fn with_data_quality(mut self, data_quality: f64) -> Self {
        self.data_quality = Some(data_quality);
        self
    }
}

/// The five scoring categories, in their fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Valuation,
    Profitability,
    Growth,
    FinancialHealth,
    Efficiency,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Valuation,
        Category::Profitability,
        Category::Growth,
        Category::FinancialHealth,
        Category::Efficiency,
    ];

    /// Human-readable label used in strength/weakness statements
    pub fn label(&self) -> &'static str {
        match self {
            Category::Valuation => "valuation",
            Category::Profitability => "profitability",
            Category::Growth => "growth",
            Category::FinancialHealth => "financial health",
            Category::Efficiency => "efficiency",
        }
    }
}

/// Quality classification derived from the composite score.
///
/// Variants are declared worst-first so the derived ordering reads naturally:
/// `QualityTier::Good > QualityTier::Average`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl QualityTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => QualityTier::Excellent,
            s if s >= 70.0 => QualityTier::Good,
            s if s >= 50.0 => QualityTier::Average,
            s if s >= 30.0 => QualityTier::BelowAverage,
            _ => QualityTier::Poor,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "Excellent",
            QualityTier::Good => "Good",
            QualityTier::Average => "Average",
            QualityTier::BelowAverage => "Below Average",
            QualityTier::Poor => "Poor",
        }
    }

    /// Parse a configuration value such as `"good"` or `"below_average"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "excellent" => Some(QualityTier::Excellent),
            "good" => Some(QualityTier::Good),
            "average" => Some(QualityTier::Average),
            "below_average" => Some(QualityTier::BelowAverage),
            "poor" => Some(QualityTier::Poor),
            _ => None,
        }
    }
}

/// Discrete buy/sell stance derived from the composite score and data quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Recommendation {
    /// Strong signals require both a high composite and well-measured input.
    pub fn from_score(composite: f64, data_quality: f64) -> Self {
        if composite >= 85.0 && data_quality >= 80.0 {
            Recommendation::StrongBuy
        } else if composite >= 70.0 && data_quality >= 70.0 {
            Recommendation::Buy
        } else if composite >= 30.0 {
            Recommendation::Neutral
        } else if composite >= 15.0 {
            Recommendation::Sell
        } else {
            Recommendation::StrongSell
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Neutral => "Neutral",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        }
    }
}
