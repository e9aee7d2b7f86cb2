use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use fundamental_scoring::{
    get_sector_leaders, get_top_stocks, BenchmarkRegistry, FundamentalScore, ScoringBatch,
    ScoringEngine, ScoringSummary, SectorStatistics, WeightVector,
};
use scoring_core::ScoringInput;
use serde::Serialize;

mod config;

use config::CliConfig;

#[derive(Debug, Serialize)]
struct Report {
    summary: ScoringSummary,
    scored: usize,
    failed_symbols: Vec<String>,
    scores: Vec<FundamentalScore>,
    top: Vec<FundamentalScore>,
    sector_leaders: BTreeMap<String, FundamentalScore>,
    sector_statistics: BTreeMap<String, SectorStatistics>,
}

fn init_tracing(json_logging: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr so stdout carries only the report
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read the batch from a file, or from stdin when no path is configured.
fn read_inputs(path: Option<&str>) -> Result<Vec<ScoringInput>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            buf
        }
    };
    parse_inputs(&raw)
}

fn parse_inputs(raw: &str) -> Result<Vec<ScoringInput>> {
    serde_json::from_str(raw).context("input must be a JSON array of entities")
}

fn build_report(config: &CliConfig, inputs: &[ScoringInput]) -> Report {
    let weights = match config.weights_path.as_deref() {
        Some(path) => WeightVector::load(path),
        None => WeightVector::default(),
    };
    let engine = ScoringEngine::new(weights, Arc::new(BenchmarkRegistry::with_defaults()));
    let batch = ScoringBatch::new(engine);

    let outcome = batch.process_with_report(inputs);
    let top = get_top_stocks(&outcome.scores, config.top_n, config.min_quality);
    let sector_leaders = get_sector_leaders(&outcome.scores);
    let sector_statistics = SectorStatistics::from_scores(&outcome.scores, config.min_sector_size);

    Report {
        summary: batch.engine().summary(),
        scored: outcome.scores.len(),
        failed_symbols: outcome.failed_symbols,
        scores: outcome.scores,
        top,
        sector_leaders,
        sector_statistics,
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env()?.with_input_arg(std::env::args().nth(1));
    init_tracing(config.json_logging);

    tracing::info!("Starting fundamental scoring");
    tracing::info!("  Top N: {}", config.top_n);
    tracing::info!("  Min quality: {}", config.min_quality.to_label());

    let inputs = read_inputs(config.input_path.as_deref())?;
    tracing::info!("Loaded {} entities", inputs.len());

    let report = build_report(&config, &inputs);
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::QualityTier;
    use std::io::Write;

    fn test_config(weights_path: Option<String>) -> CliConfig {
        CliConfig {
            input_path: None,
            weights_path,
            top_n: 1,
            min_quality: QualityTier::Poor,
            min_sector_size: 1,
            json_logging: false,
        }
    }

    const BATCH: &str = r#"[
        {"symbol": "TOTS3", "sector": "Tecnologia", "data_quality": 90,
         "metrics": {"pe_ratio": 6.0, "pb_ratio": 0.7, "roe": 28.0, "profit_margin": 20.0,
                     "debt_to_equity": 0.2, "revenue_growth_3y_cagr": 30.0}},
        {"symbol": "MGLU3", "sector": "Varejo", "metrics": {"pe_ratio": 40.0}},
        {"symbol": "", "sector": "Varejo"}
    ]"#;

    #[test]
    fn test_build_report() {
        let inputs = parse_inputs(BATCH).unwrap();
        let report = build_report(&test_config(None), &inputs);

        assert_eq!(report.scored, 2);
        assert_eq!(report.failed_symbols, vec!["".to_string()]);
        assert_eq!(report.top.len(), 1);
        assert_eq!(report.top[0].symbol, "TOTS3");
        assert_eq!(report.sector_leaders.len(), 2);
        assert_eq!(report.sector_statistics.len(), 2);
    }

    #[test]
    fn test_weights_file_is_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scoring_weights": {{"valuation": 2, "profitability": 2, "growth": 0, "financial_health": 0, "efficiency": 0}}}}"#).unwrap();

        let inputs = parse_inputs(BATCH).unwrap();
        let report = build_report(
            &test_config(Some(file.path().display().to_string())),
            &inputs,
        );
        assert_eq!(report.summary.weights.valuation, 0.5);
        assert_eq!(report.summary.weights.growth, 0.0);
    }

    #[test]
    fn test_rejects_non_array_input() {
        assert!(parse_inputs(r#"{"symbol": "TOTS3"}"#).is_err());
    }
}
