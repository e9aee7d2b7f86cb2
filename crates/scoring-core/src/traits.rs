use async_trait::async_trait;
use crate::{FinancialMetrics, ScoringError};

/// Source of precomputed financial ratios (the external metrics calculator).
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn metrics_for(&self, symbol: &str) -> Result<FinancialMetrics, ScoringError>;
}
