use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Metrics unavailable: {0}")]
    MetricsUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}
