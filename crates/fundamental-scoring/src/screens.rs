//! Pass/fail quality screen and red-flag detection on raw metrics.

use scoring_core::FinancialMetrics;
use serde::{Deserialize, Serialize};

const MIN_ROE: f64 = 15.0;
const MIN_REVENUE_GROWTH: f64 = 5.0;
const MAX_DEBT_TO_EBITDA: f64 = 4.0;
const MIN_NET_MARGIN: f64 = 5.0;

const CHECKS: usize = 4;

/// Result of the four quality filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScreen {
    pub roe_above_15: bool,
    pub sustainable_growth: bool,
    pub controlled_debt: bool,
    pub stable_margins: bool,
    /// Share of passed filters (0-100)
    pub pass_rate: f64,
}

impl QualityScreen {
    /// Missing metrics fail their filter, except debt/EBITDA: no debt figure
    /// counts as controlled debt.
    pub fn evaluate(metrics: &FinancialMetrics) -> Self {
        let roe_above_15 = metrics.roe.is_some_and(|v| v >= MIN_ROE);
        let sustainable_growth = metrics
            .revenue_growth_3y
            .is_some_and(|v| v >= MIN_REVENUE_GROWTH);
        let controlled_debt = metrics
            .debt_to_ebitda
            .map_or(true, |v| v <= MAX_DEBT_TO_EBITDA);
        let stable_margins = metrics.net_margin.is_some_and(|v| v >= MIN_NET_MARGIN);

        let passed = [roe_above_15, sustainable_growth, controlled_debt, stable_margins]
            .iter()
            .filter(|&&p| p)
            .count();

        Self {
            roe_above_15,
            sustainable_growth,
            controlled_debt,
            stable_margins,
            pass_rate: passed as f64 / CHECKS as f64 * 100.0,
        }
    }

    pub fn passed_all(&self) -> bool {
        self.pass_rate >= 100.0
    }
}

/// Warning statements for metrics that signal distress.
pub fn red_flags(metrics: &FinancialMetrics) -> Vec<String> {
    let mut flags = Vec::new();

    if metrics.roe.is_some_and(|v| v < 0.0) {
        flags.push("Negative ROE".to_string());
    }
    if metrics.debt_to_ebitda.is_some_and(|v| v > 6.0) {
        flags.push("Excessive leverage".to_string());
    }
    if metrics.net_margin.is_some_and(|v| v < 0.0) {
        flags.push("Negative net margin".to_string());
    }
    if metrics.revenue_growth_3y.is_some_and(|v| v < -10.0) {
        flags.push("Sharp revenue decline".to_string());
    }

    flags
}
