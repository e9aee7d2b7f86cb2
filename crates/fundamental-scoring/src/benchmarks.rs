//! Sector benchmarks: reference medians that anchor the normalization curves.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

pub const GENERAL: &str = "General";
pub const BANKING: &str = "Banking";
pub const TECHNOLOGY: &str = "Technology";
pub const OIL_AND_GAS: &str = "Oil & Gas";
pub const RETAIL: &str = "Retail";
pub const UTILITIES: &str = "Utilities";

/// Reference medians for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmark {
    pub sector: String,
    pub pe_ratio: f64,
    pub pb_ratio: f64,
    pub roe: f64,
    pub net_margin: f64,
    pub revenue_growth: f64,
    pub debt_to_equity: f64,
    /// Number of companies the medians were computed from (0 for presets)
    pub sample_size: usize,
    /// When the medians were last recomputed (None for presets)
    pub last_updated: Option<DateTime<Utc>>,
}

impl SectorBenchmark {
    pub fn preset(
        sector: &str,
        pe_ratio: f64,
        pb_ratio: f64,
        roe: f64,
        net_margin: f64,
        revenue_growth: f64,
        debt_to_equity: f64,
    ) -> Self {
        Self {
            sector: sector.to_string(),
            pe_ratio,
            pb_ratio,
            roe,
            net_margin,
            revenue_growth,
            debt_to_equity,
            sample_size: 0,
            last_updated: None,
        }
    }

    /// Market-wide fallback used for unknown sectors.
    pub fn general() -> Self {
        Self::preset(GENERAL, 15.0, 2.0, 15.0, 10.0, 10.0, 0.8)
    }

    /// Shipped starting points. Not statistically derived; calibration replaces them.
    pub fn defaults() -> Vec<SectorBenchmark> {
        vec![
            Self::preset(BANKING, 8.0, 1.2, 23.0, 25.0, 8.0, 6.0),
            Self::preset(TECHNOLOGY, 25.0, 3.0, 20.0, 15.0, 25.0, 0.2),
            Self::preset(OIL_AND_GAS, 6.0, 1.0, 12.0, 10.0, 3.0, 0.8),
            Self::preset(RETAIL, 18.0, 2.5, 15.0, 5.0, 12.0, 0.5),
            Self::preset(UTILITIES, 12.0, 1.5, 12.0, 10.0, 5.0, 1.2),
            Self::general(),
        ]
    }
}

/// Resolve a free-form sector label to its registry key.
///
/// Known English and Portuguese aliases map onto the preset names. Any other
/// label is title-cased word by word, so "MINERAÇÃO" and "mineração" share
/// the key "Mineração". Missing or blank labels resolve to General.
pub fn canonical_sector(sector: Option<&str>) -> String {
    let label = match sector.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return GENERAL.to_string(),
    };

    let canonical = match label.to_lowercase().as_str() {
        "banking" | "banks" | "bancos" | "financeiro" | "financial services" => BANKING,
        "technology" | "tech" | "tecnologia" => TECHNOLOGY,
        "oil & gas" | "oil and gas" | "energy" | "petróleo e gás" | "petroleo e gas"
        | "petróleo" => OIL_AND_GAS,
        "retail" | "varejo" | "consumer cyclical" => RETAIL,
        "utilities" | "utilidades" | "utilidade pública" => UTILITIES,
        "general" | "geral" => GENERAL,
        _ => return title_case(label),
    };
    canonical.to_string()
}

fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sector name → benchmark map with a guaranteed General entry.
///
/// Entries are stored as `Arc` snapshots: `replace` swaps one entry under its
/// shard lock, while readers keep whatever snapshot they already fetched.
#[derive(Debug)]
pub struct BenchmarkRegistry {
    entries: DashMap<String, Arc<SectorBenchmark>>,
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BenchmarkRegistry {
    /// Registry seeded with the shipped presets.
    pub fn with_defaults() -> Self {
        Self::new(SectorBenchmark::defaults())
    }

    /// Registry from explicit entries. A General entry is added when missing,
    /// so an empty list still yields a usable registry.
    pub fn new(benchmarks: impl IntoIterator<Item = SectorBenchmark>) -> Self {
        let entries = DashMap::new();
        for mut benchmark in benchmarks {
            let key = canonical_sector(Some(benchmark.sector.as_str()));
            benchmark.sector = key.clone();
            entries.insert(key, Arc::new(benchmark));
        }
        if !entries.contains_key(GENERAL) {
            tracing::warn!("Benchmark registry has no General entry; inserting default");
            entries.insert(GENERAL.to_string(), Arc::new(SectorBenchmark::general()));
        }
        Self { entries }
    }

    /// Benchmark for `sector`, falling back to General. Never fails.
    pub fn get(&self, sector: Option<&str>) -> Arc<SectorBenchmark> {
        let key = canonical_sector(sector);
        if let Some(entry) = self.entries.get(&key) {
            return Arc::clone(entry.value());
        }
        self.general()
    }

    /// Whether a dedicated (non-fallback) entry exists for `sector`.
    pub fn contains(&self, sector: &str) -> bool {
        self.entries.contains_key(&canonical_sector(Some(sector)))
    }

    fn general(&self) -> Arc<SectorBenchmark> {
        match self.entries.get(GENERAL) {
            Some(entry) => Arc::clone(entry.value()),
            // Unreachable while the General invariant holds
            None => Arc::new(SectorBenchmark::general()),
        }
    }

    /// Insert or replace one sector's benchmark, returning the previous snapshot.
    pub fn replace(&self, mut benchmark: SectorBenchmark) -> Option<Arc<SectorBenchmark>> {
        let key = canonical_sector(Some(benchmark.sector.as_str()));
        benchmark.sector = key.clone();
        self.entries.insert(key, Arc::new(benchmark))
    }

    /// Remove a sector. The General entry cannot be removed.
    pub fn remove(&self, sector: &str) -> Option<Arc<SectorBenchmark>> {
        let key = canonical_sector(Some(sector));
        if key == GENERAL {
            return None;
        }
        self.entries.remove(&key).map(|(_, v)| v)
    }

    /// Configured sector names, sorted.
    pub fn sectors(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_six_sectors() {
        let registry = BenchmarkRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        assert!(registry.contains("General"));
    }

    #[test]
    fn test_aliases_resolve_to_presets() {
        let registry = BenchmarkRegistry::with_defaults();
        assert_eq!(registry.get(Some("Tecnologia")).sector, TECHNOLOGY);
        assert_eq!(registry.get(Some("  bancos ")).sector, BANKING);
        assert_eq!(registry.get(Some("Petróleo e Gás")).sector, OIL_AND_GAS);
        assert_eq!(registry.get(Some("VAREJO")).sector, RETAIL);
    }

    #[test]
    fn test_unknown_or_missing_sector_falls_back_to_general() {
        let registry = BenchmarkRegistry::with_defaults();
        assert_eq!(registry.get(Some("Mineração")).sector, GENERAL);
        assert_eq!(registry.get(None).sector, GENERAL);
        assert_eq!(registry.get(Some("   ")).sector, GENERAL);
    }

    #[test]
    fn test_custom_sector_lookup_ignores_case() {
        assert_eq!(canonical_sector(Some("MINERAÇÃO")), "Mineração");
        assert_eq!(canonical_sector(Some("  real   estate ")), "Real Estate");

        let registry = BenchmarkRegistry::with_defaults();
        let mut mining = SectorBenchmark::general();
        mining.sector = "Mineração".to_string();
        mining.pe_ratio = 5.0;
        registry.replace(mining);

        assert!(registry.contains("mineração"));
        let found = registry.get(Some("mineração"));
        assert_eq!(found.sector, "Mineração");
        assert_eq!(found.pe_ratio, 5.0);
    }

    #[test]
    fn test_empty_registry_still_has_general() {
        let registry = BenchmarkRegistry::new(Vec::new());
        assert_eq!(registry.len(), 1);
        assert_eq!(*registry.get(Some("Technology")), SectorBenchmark::general());
    }

    #[test]
    fn test_general_cannot_be_removed() {
        let registry = BenchmarkRegistry::with_defaults();
        assert!(registry.remove("geral").is_none());
        assert!(registry.remove("Retail").is_some());
        assert_eq!(registry.get(Some("Retail")).sector, GENERAL);
    }

    #[test]
    fn test_replace_keeps_reader_snapshot() {
        let registry = BenchmarkRegistry::with_defaults();
        let before = registry.get(Some("Technology"));

        let mut updated = (*before).clone();
        updated.pe_ratio = 30.0;
        let previous = registry.replace(updated);

        assert_eq!(previous.map(|p| p.pe_ratio), Some(25.0));
        assert_eq!(before.pe_ratio, 25.0);
        assert_eq!(registry.get(Some("tech")).pe_ratio, 30.0);
    }

    #[test]
    fn test_preset_relationships() {
        // Sanity relationships the presets were chosen to respect
        let registry = BenchmarkRegistry::with_defaults();
        let banks = registry.get(Some(BANKING));
        let tech = registry.get(Some(TECHNOLOGY));
        let oil = registry.get(Some(OIL_AND_GAS));
        let retail = registry.get(Some(RETAIL));
        let utilities = registry.get(Some(UTILITIES));

        assert!(banks.roe > tech.roe && tech.roe > utilities.roe);
        assert!(tech.pe_ratio > retail.pe_ratio && retail.pe_ratio > utilities.pe_ratio);
        assert!(utilities.pe_ratio > banks.pe_ratio && banks.pe_ratio > oil.pe_ratio);
        assert!(banks.debt_to_equity > utilities.debt_to_equity);
        assert!(retail.debt_to_equity > tech.debt_to_equity);
        assert!(tech.revenue_growth > retail.revenue_growth);
    }
}
