//! Recomputes a sector's benchmark medians from an observed population.

use chrono::Utc;
use scoring_core::stats::median;
use scoring_core::FinancialMetrics;

use crate::benchmarks::{canonical_sector, BenchmarkRegistry, SectorBenchmark};

pub struct BenchmarkCalibrator;

impl BenchmarkCalibrator {
    /// Replace `sector`'s benchmark with medians over `population` and
    /// return the new entry.
    ///
    /// A metric without any usable value keeps the previous median.
    pub fn update(
        registry: &BenchmarkRegistry,
        sector: &str,
        population: &[FinancialMetrics],
    ) -> SectorBenchmark {
        let key = canonical_sector(Some(sector));
        let previous = registry.get(Some(key.as_str()));

        let pe = eligible_median(population, |m| m.pe_ratio, true);
        let pb = eligible_median(population, |m| m.pb_ratio, true);
        let roe = eligible_median(population, |m| m.roe, false);
        let margin = eligible_median(population, |m| m.net_margin, false);
        let growth = eligible_median(population, |m| m.revenue_growth_3y, false);
        let de = eligible_median(population, |m| m.debt_to_equity, false);

        let benchmark = SectorBenchmark {
            sector: key,
            pe_ratio: pe.unwrap_or(previous.pe_ratio),
            pb_ratio: pb.unwrap_or(previous.pb_ratio),
            roe: roe.unwrap_or(previous.roe),
            net_margin: margin.unwrap_or(previous.net_margin),
            revenue_growth: growth.unwrap_or(previous.revenue_growth),
            debt_to_equity: de.unwrap_or(previous.debt_to_equity),
            sample_size: population.len(),
            last_updated: Some(Utc::now()),
        };

        tracing::info!(
            "Calibrated {} benchmark from {} companies (P/E {:.2}, ROE {:.2})",
            benchmark.sector,
            benchmark.sample_size,
            benchmark.pe_ratio,
            benchmark.roe
        );
        registry.replace(benchmark.clone());
        benchmark
    }
}

fn eligible_median(
    population: &[FinancialMetrics],
    field: impl Fn(&FinancialMetrics) -> Option<f64>,
    positive_only: bool,
) -> Option<f64> {
    let values: Vec<f64> = population
        .iter()
        .filter_map(field)
        .filter(|v| v.is_finite() && (!positive_only || *v > 0.0))
        .collect();
    median(&values)
}
