//! AIS-wrapped scan: consent precheck + tangent count + core scan.
//!
//! The wrapper annotates the core result with `consent_factor` and
//! `srm.pruned_tangents`. Neither value changes the scan numbers.
//!
//! In strict mode (`ScanConfig::strict_tangents`) only main edges reach the
//! scan loop. Off by default: tangents are counted, not withheld.

use std::sync::Arc;

use tricorder_core::{GraphCache, ScanConfig, ScanResult, ScanTrace, Scanner};

use crate::consent::consent_factor;
use crate::tangent::tangent_filter;

/// A scan result tagged with the seed it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AisRecord {
    pub seed: String,
    pub result: ScanResult,
}

/// Scanner that runs the AIS precheck around every scan.
#[derive(Debug, Clone, Default)]
pub struct AisScanner {
    scanner: Scanner,
}

impl AisScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            scanner: Scanner::new(config),
        }
    }

    pub fn with_cache(config: ScanConfig, cache: Arc<GraphCache>) -> Self {
        Self {
            scanner: Scanner::with_cache(config, cache),
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn config(&self) -> &ScanConfig {
        self.scanner.config()
    }

    /// Scan one seed through the wrapper.
    pub fn scan(&self, seed: &str) -> ScanResult {
        self.scan_traced(seed).0
    }

    /// Scan one seed through the wrapper and keep the trace.
    pub fn scan_traced(&self, seed: &str) -> (ScanResult, ScanTrace) {
        let config = self.scanner.config();
        let consent = consent_factor(seed);

        let map = self.scanner.relational_map(seed);
        let split = tangent_filter(&map.edges, config.tangent_thresh);
        let tangents = split.tangents.len();

        let edges = if config.strict_tangents {
            split.main
        } else {
            map.edges.clone()
        };
        let (mut result, trace) = self.scanner.scan_edges(edges);

        result.srm.pruned_tangents = Some(tangents);
        result.consent_factor = Some(consent);

        tracing::debug!(
            tangents,
            consent,
            strict = config.strict_tangents,
            iters = result.iters,
            "ais scan complete"
        );

        (result, trace)
    }

    /// Scan every seed in order.
    pub fn scan_batch<I, S>(&self, seeds: I) -> Vec<AisRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<AisRecord> = seeds
            .into_iter()
            .map(|seed| {
                let seed = seed.as_ref();
                AisRecord {
                    seed: seed.to_string(),
                    result: self.scan(seed),
                }
            })
            .collect();

        tracing::info!(seeds = records.len(), "ais batch complete");
        records
    }
}

/// One-shot AIS scan with default tunables.
pub fn ais_scan(seed: &str, domain: impl Into<tricorder_core::Domain>, max_iters: usize) -> ScanResult {
    let config = ScanConfig::default().with_domain(domain).with_max_iters(max_iters);
    AisScanner::new(config).scan(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tricorder_core::{Domain, Edge, RelationalMap};

    const SCENARIO: &str = "debug latency in software poetic rhymes";

    #[test]
    fn wrapper_annotates_without_changing_numbers() {
        let config = ScanConfig::default().with_domain(Domain::Poetic);
        let plain = Scanner::new(config.clone()).scan(SCENARIO);
        let wrapped = AisScanner::new(config).scan(SCENARIO);

        assert_eq!(wrapped.chains, plain.chains);
        assert_eq!(wrapped.iters, plain.iters);
        assert_eq!(wrapped.srm.ethics_drift, plain.srm.ethics_drift);
        assert_eq!(wrapped.srm.pruned_tangents, Some(0));
        assert_eq!(wrapped.consent_factor, Some(1.0));
        assert!(plain.consent_factor.is_none());
    }

    #[test]
    fn consent_factor_is_informational() {
        let clean = ais_scan("debug latency in software poetic rhymes", Domain::Tech, 3);
        let flagged = ais_scan("debug unconsented in no_permission poetic bias_source", Domain::Tech, 3);

        assert!((flagged.consent_factor.unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(clean.chains.hypothesis_strength, flagged.chains.hypothesis_strength);
        assert_eq!(clean.iters, flagged.iters);
    }

    #[test]
    fn tangents_counted_with_low_edge_weight() {
        let config = ScanConfig {
            edge_weight: 0.5,
            ..ScanConfig::default()
        };
        let result = AisScanner::new(config).scan(SCENARIO);
        assert_eq!(result.srm.pruned_tangents, Some(20));
    }

    #[test]
    fn strict_mode_withholds_tangents() {
        let config = ScanConfig {
            edge_weight: 0.5,
            ..ScanConfig::default()
        };
        let relaxed = AisScanner::new(config.clone()).scan_traced(SCENARIO).1;
        let strict = AisScanner::new(config.with_strict_tangents(true))
            .scan_traced(SCENARIO)
            .1;

        assert_eq!(relaxed.steps[0].edges_before, 20);
        assert_eq!(strict.steps[0].edges_before, 0);
    }

    #[test]
    fn batch_keeps_seed_order() {
        let records = AisScanner::default().scan_batch(["one two", "", "three four five"]);
        let seeds: Vec<&str> = records.iter().map(|r| r.seed.as_str()).collect();
        assert_eq!(seeds, vec!["one two", "", "three four five"]);
        assert!(records.iter().all(|r| r.result.consent_factor.is_some()));
    }

    #[test]
    fn shares_the_core_cache() {
        let cache = GraphCache::shared(4);
        let ais = AisScanner::with_cache(ScanConfig::default(), Arc::clone(&cache));
        ais.scan(SCENARIO);
        ais.scan(SCENARIO);

        assert_eq!(cache.stats().misses, 1);
        let map: Arc<RelationalMap> = ais.scanner().relational_map(SCENARIO);
        assert!(map.edges.contains(&Edge::new("debug", "latency", 0.8)));
    }
}
