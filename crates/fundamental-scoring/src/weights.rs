//! Category weight vector used by the composite score.

use std::path::Path;

use scoring_core::{Category, ScoringError};
use serde::{Deserialize, Serialize};

const SUM_TOLERANCE: f64 = 1e-3;

/// Weights of the five categories in the composite score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    pub valuation: f64,
    pub profitability: f64,
    pub growth: f64,
    pub financial_health: f64,
    pub efficiency: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            valuation: 0.25,
            profitability: 0.30,
            growth: 0.20,
            financial_health: 0.15,
            efficiency: 0.10,
        }
    }
}

impl WeightVector {
    pub fn new(
        valuation: f64,
        profitability: f64,
        growth: f64,
        financial_health: f64,
        efficiency: f64,
    ) -> Self {
        Self {
            valuation,
            profitability,
            growth,
            financial_health,
            efficiency,
        }
    }

    /// Weights in `Category::ALL` order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.valuation,
            self.profitability,
            self.growth,
            self.financial_health,
            self.efficiency,
        ]
    }

    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Valuation => self.valuation,
            Category::Profitability => self.profitability,
            Category::Growth => self.growth,
            Category::FinancialHealth => self.financial_health,
            Category::Efficiency => self.efficiency,
        }
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// True iff the weights sum to 1.0 within 0.001.
    pub fn validate(&self) -> bool {
        (self.total() - 1.0).abs() < SUM_TOLERANCE
    }

    /// Every weight finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0)
    }

    /// Rescale proportionally so the weights sum to exactly 1.0.
    /// A zero total is left untouched; callers treat it as a configuration error.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            self.valuation /= total;
            self.profitability /= total;
            self.growth /= total;
            self.financial_health /= total;
            self.efficiency /= total;
        }
    }

    /// Strict parse of a weight configuration.
    ///
    /// Accepts a flat object with the five named fields, or the same object
    /// nested under `"scoring_weights"`. Missing fields take their default.
    pub fn parse_json(json: &str) -> Result<Self, ScoringError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ScoringError::Configuration(format!("invalid weight JSON: {}", e)))?;

        let section = match value.get("scoring_weights") {
            Some(nested) => nested.clone(),
            None => value,
        };
        if !section.is_object() {
            return Err(ScoringError::Configuration(
                "weight configuration must be a JSON object".to_string(),
            ));
        }

        let weights: WeightVector = serde_json::from_value(section)
            .map_err(|e| ScoringError::Configuration(format!("invalid weight field: {}", e)))?;

        if !weights.is_well_formed() {
            return Err(ScoringError::Configuration(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.total() <= 0.0 {
            return Err(ScoringError::Configuration("weights sum to zero".to_string()));
        }
        Ok(weights)
    }

    /// Lenient parse: any failure is logged and the default vector returned.
    pub fn from_json_str(json: &str) -> Self {
        match Self::parse_json(json) {
            Ok(weights) => weights,
            Err(e) => {
                tracing::warn!("Falling back to default scoring weights: {}", e);
                Self::default()
            }
        }
    }

    /// Load weights from a JSON file, falling back to defaults on any read or
    /// parse failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let weights = Self::from_json_str(&contents);
                tracing::info!("Loaded scoring weights from {}", path.display());
                weights
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read weight config {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
