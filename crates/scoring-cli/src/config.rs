use anyhow::{Context, Result};
use scoring_core::QualityTier;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    // Input
    pub input_path: Option<String>,        // JSON array of entities
    pub weights_path: Option<String>,      // optional weight config

    // Report
    pub top_n: usize,                      // 10
    pub min_quality: QualityTier,          // average
    pub min_sector_size: usize,            // 2

    // Logging
    pub json_logging: bool,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        let min_quality_label =
            env::var("SCORING_MIN_QUALITY").unwrap_or_else(|_| "average".to_string());
        let min_quality = QualityTier::parse(&min_quality_label).with_context(|| {
            format!("SCORING_MIN_QUALITY has unknown tier '{}'", min_quality_label)
        })?;

        let config = Self {
            input_path: env::var("SCORING_INPUT").ok().filter(|p| !p.trim().is_empty()),
            weights_path: env::var("SCORING_WEIGHTS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),

            top_n: env::var("SCORING_TOP_N")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("SCORING_TOP_N must be a non-negative integer")?,
            min_quality,
            min_sector_size: env::var("SCORING_MIN_SECTOR_SIZE")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("SCORING_MIN_SECTOR_SIZE must be a non-negative integer")?,

            json_logging: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        Ok(config)
    }

    /// A path given on the command line overrides `SCORING_INPUT`.
    pub fn with_input_arg(mut self, arg: Option<String>) -> Self {
        if let Some(path) = arg {
            self.input_path = Some(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_arg_overrides_env() {
        let config = CliConfig {
            input_path: Some("from_env.json".to_string()),
            weights_path: None,
            top_n: 10,
            min_quality: QualityTier::Average,
            min_sector_size: 2,
            json_logging: false,
        };
        let config = config.with_input_arg(Some("batch.json".to_string()));
        assert_eq!(config.input_path.as_deref(), Some("batch.json"));
        assert_eq!(config.with_input_arg(None).input_path.as_deref(), Some("batch.json"));
    }
}
