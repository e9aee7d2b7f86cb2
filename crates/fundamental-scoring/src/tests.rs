#[cfg(test)]
mod scoring_tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use async_trait::async_trait;
    use scoring_core::{
        FinancialMetrics, MetricsProvider, QualityTier, Recommendation, ScoringError, ScoringInput,
    };

    use crate::{
        get_sector_leaders, BenchmarkCalibrator, BenchmarkRegistry, ScoringBatch, ScoringEngine,
        WeightVector,
    };

    fn tecnologia_metrics() -> FinancialMetrics {
        FinancialMetrics {
            pe_ratio: Some(6.0),
            pb_ratio: Some(0.7),
            roe: Some(28.0),
            net_margin: Some(20.0),
            debt_to_equity: Some(0.2),
            revenue_growth_3y: Some(30.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_technology_company() {
        let engine = ScoringEngine::default();
        let input = ScoringInput::new("TOTS3", Some("Tecnologia"), tecnologia_metrics())
            .with_data_quality(85.0);
        let score = engine.score(&input).unwrap();

        assert_eq!(score.sector, "Technology");
        assert_eq!(score.scores.valuation, 100.0);
        assert!(score.scores.profitability > 90.0);
        assert_relative_eq!(score.scores.growth, 88.0, epsilon = 1e-9);
        assert_eq!(score.scores.financial_health, 100.0);
        assert_eq!(score.scores.efficiency, 50.0);

        assert!(score.composite_score() >= 70.0);
        assert_relative_eq!(score.composite_score(), 91.03, epsilon = 0.01);
        assert_eq!(score.quality_tier(), QualityTier::Excellent);
        assert_eq!(score.recommendation(), Recommendation::StrongBuy);
        assert!(score.strengths.contains(&"Excellent valuation (100.0)".to_string()));
        assert!(score.red_flags.is_empty());
        assert_eq!(score.quality_screen.map(|s| s.passed_all()), Some(true));
    }

    #[test]
    fn test_good_company_with_moderate_data_quality_is_buy() {
        let engine = ScoringEngine::default();
        let input = ScoringInput::new("TOTS3", Some("Tecnologia"), tecnologia_metrics())
            .with_data_quality(72.0);
        assert_eq!(engine.score(&input).unwrap().recommendation(), Recommendation::Buy);
    }

    #[test]
    fn test_no_metrics_scores_neutral() {
        let engine = ScoringEngine::default();
        let input = ScoringInput::new("NEW3", None, FinancialMetrics::default());
        let score = engine.score(&input).unwrap();

        for value in score.scores.as_array() {
            assert_eq!(value, 50.0);
        }
        assert_relative_eq!(score.composite_score(), 50.0, epsilon = 1e-9);
        assert_eq!(score.quality_tier(), QualityTier::Average);
        assert_eq!(score.recommendation(), Recommendation::Neutral);
        assert_eq!(score.data_quality(), 0.0);
        assert!(score.strengths.is_empty() && score.weaknesses.is_empty());
    }

    #[test]
    fn test_distressed_company() {
        let engine = ScoringEngine::default();
        let metrics = FinancialMetrics {
            pe_ratio: Some(-3.0),
            pb_ratio: Some(9.0),
            roe: Some(-12.0),
            roa: Some(-4.0),
            net_margin: Some(-8.0),
            revenue_growth_3y: Some(-18.0),
            earnings_growth_3y: Some(-30.0),
            debt_to_equity: Some(4.0),
            debt_to_ebitda: Some(9.0),
            current_ratio: Some(0.4),
            ..Default::default()
        };
        let score = engine
            .score(&ScoringInput::new("OIBR3", Some("Utilities"), metrics).with_data_quality(90.0))
            .unwrap();

        assert!(score.composite_score() < 30.0);
        assert!(score.recommendation() == Recommendation::Sell
            || score.recommendation() == Recommendation::StrongSell);
        assert_eq!(score.red_flags.len(), 4);
        assert!(score.weaknesses.iter().any(|w| w.starts_with("Weak profitability")));
    }

    #[test]
    fn test_scores_stay_in_bounds_for_extreme_inputs() {
        let engine = ScoringEngine::default();
        let extremes = [-1e9, -1.0, 0.0, 1e-9, 1.0, 1e9];
        for &v in &extremes {
            let metrics = FinancialMetrics {
                pe_ratio: Some(v),
                pb_ratio: Some(v),
                ps_ratio: Some(v),
                roe: Some(v),
                roa: Some(v),
                net_margin: Some(v),
                ebitda_margin: Some(v),
                revenue_growth_1y: Some(v),
                revenue_growth_3y: Some(v),
                earnings_growth_3y: Some(v),
                debt_to_equity: Some(v),
                debt_to_ebitda: Some(v),
                debt_to_assets: Some(v),
                current_ratio: Some(v),
                asset_turnover: Some(v),
                data_completeness: None,
            };
            let score = engine.score(&ScoringInput::new("X", Some("Retail"), metrics)).unwrap();
            for sub in score.scores.as_array() {
                assert!((0.0..=100.0).contains(&sub), "sub-score {} for input {}", sub, v);
            }
            assert!((0.0..=100.0).contains(&score.composite_score()));
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let engine = ScoringEngine::default();
        let input = ScoringInput::new("WEGE3", Some("General"), tecnologia_metrics());
        let first = engine.score(&input).unwrap();
        let second = engine.score(&input).unwrap();

        assert_eq!(first.scores, second.scores);
        assert_eq!(first.composite_score(), second.composite_score());
        assert_eq!(first.strengths, second.strengths);
        assert_eq!(first.recommendation(), second.recommendation());
    }

    #[test]
    fn test_higher_roe_never_lowers_composite() {
        let engine = ScoringEngine::default();
        let mut previous = 0.0;
        for step in 0..60 {
            let metrics = FinancialMetrics {
                roe: Some(step as f64),
                net_margin: Some(12.0),
                pe_ratio: Some(14.0),
                ..Default::default()
            };
            let composite = engine
                .score(&ScoringInput::new("X", Some("Banking"), metrics))
                .unwrap()
                .composite_score();
            assert!(composite >= previous - 1e-9, "ROE {} lowered composite", step);
            previous = composite;
        }
    }

    #[test]
    fn test_higher_roe_never_lowers_profitability() {
        let engine = ScoringEngine::default();
        let mut previous = 0.0;
        for step in -10..80 {
            let metrics = FinancialMetrics {
                roe: Some(step as f64),
                roa: Some(8.0),
                ebitda_margin: Some(30.0),
                net_margin: Some(12.0),
                ..Default::default()
            };
            let profitability = engine
                .score(&ScoringInput::new("X", Some("Banking"), metrics))
                .unwrap()
                .scores
                .profitability;
            assert!(profitability >= previous - 1e-9, "ROE {} lowered profitability", step);
            previous = profitability;
        }
    }

    #[test]
    fn test_higher_pe_never_raises_composite() {
        let engine = ScoringEngine::default();
        let mut previous = f64::INFINITY;
        for step in 1..120 {
            let metrics = FinancialMetrics {
                pe_ratio: Some(step as f64 * 0.5),
                roe: Some(15.0),
                ..Default::default()
            };
            let composite = engine
                .score(&ScoringInput::new("X", Some("Retail"), metrics))
                .unwrap()
                .composite_score();
            assert!(composite <= previous + 1e-9);
            previous = composite;
        }
    }

    #[test]
    fn test_custom_weights_change_composite() {
        let valuation_only = ScoringEngine::with_weights(WeightVector::new(1.0, 0.0, 0.0, 0.0, 0.0));
        let input = ScoringInput::new("TOTS3", Some("Technology"), tecnologia_metrics());
        assert_eq!(valuation_only.score(&input).unwrap().composite_score(), 100.0);
    }

    #[test]
    fn test_batch_end_to_end() {
        let batch = ScoringBatch::default();
        let weak = FinancialMetrics {
            pe_ratio: Some(40.0),
            roe: Some(4.0),
            net_margin: Some(2.0),
            ..Default::default()
        };
        let inputs = vec![
            ScoringInput::new("TOTS3", Some("Tecnologia"), tecnologia_metrics()),
            ScoringInput::new("LWSA3", Some("Technology"), weak.clone()),
            ScoringInput::new("MGLU3", Some("Varejo"), weak),
            ScoringInput::new("BAD", None, FinancialMetrics {
                roe: Some(f64::NAN),
                ..Default::default()
            }),
        ];
        let outcome = batch.process_with_report(&inputs);

        assert_eq!(outcome.scores.len(), 3);
        assert_eq!(outcome.failed_symbols, vec!["BAD".to_string()]);

        let tots = &outcome.scores[0];
        assert_eq!(tots.sector_rank, 1);
        assert_eq!(tots.overall_rank, 1);
        assert_eq!(tots.sector_percentile, 100.0);
        assert_eq!(tots.overall_percentile, 100.0);

        let mglu = &outcome.scores[2];
        assert_eq!(mglu.sector, "Retail");
        assert_eq!(mglu.sector_percentile, 50.0);

        let leaders = get_sector_leaders(&outcome.scores);
        assert_eq!(leaders["Technology"].symbol, "TOTS3");
        assert_eq!(leaders["Retail"].symbol, "MGLU3");
    }

    #[test]
    fn test_calibration_changes_subsequent_scores() {
        let registry = Arc::new(BenchmarkRegistry::with_defaults());
        let engine = ScoringEngine::new(WeightVector::default(), Arc::clone(&registry));
        let input = ScoringInput::new(
            "ITUB4",
            Some("Banking"),
            FinancialMetrics {
                roe: Some(18.0),
                ..Default::default()
            },
        );
        let before = engine.score(&input).unwrap().scores.profitability;

        let peers: Vec<FinancialMetrics> = [8.0, 10.0, 12.0]
            .iter()
            .map(|&roe| FinancialMetrics {
                roe: Some(roe),
                ..Default::default()
            })
            .collect();
        BenchmarkCalibrator::update(&registry, "Banking", &peers);

        let after = engine.score(&input).unwrap().scores.profitability;
        assert!(after > before);
        assert_eq!(after, 100.0);
    }

    struct StaticProvider {
        metrics: Option<FinancialMetrics>,
    }

    #[async_trait]
    impl MetricsProvider for StaticProvider {
        async fn metrics_for(&self, symbol: &str) -> Result<FinancialMetrics, ScoringError> {
            self.metrics
                .clone()
                .ok_or_else(|| ScoringError::InvalidData(format!("no filings for {}", symbol)))
        }
    }

    #[tokio::test]
    async fn test_score_from_provider() {
        let engine = ScoringEngine::default();
        let provider = StaticProvider {
            metrics: Some(tecnologia_metrics()),
        };
        let score = engine
            .score_from_provider(&provider, "TOTS3", Some("tech"), Some(85.0))
            .await
            .unwrap();
        assert_eq!(score.recommendation(), Recommendation::StrongBuy);
    }

    #[tokio::test]
    async fn test_provider_failure_is_metrics_unavailable() {
        let engine = ScoringEngine::default();
        let provider = StaticProvider { metrics: None };
        let result = engine
            .score_from_provider(&provider, "TOTS3", Some("tech"), None)
            .await;
        assert!(matches!(result, Err(ScoringError::MetricsUnavailable(_))));
    }
}
