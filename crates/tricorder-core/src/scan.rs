//! The scan loop.
//!
//! ```text
//! seed → relational map → [ ∇R → prune → update → converged? ]* → output
//! ```
//!
//! Each iteration computes `∇R` from the edges that survived the previous
//! iteration, prunes against that gradient, then applies the state update.
//! The loop stops after `max_iters` iterations or as soon as the convergence
//! score exceeds the threshold, whichever comes first.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::GraphCache;
use crate::config::{Domain, ScanConfig};
use crate::convergence::{convergence_score, is_converged};
use crate::graph::{Edge, GraphParams, RelationalMap};
use crate::output::{build_output, build_srm, ScanResult};
use crate::prune::prune_edges;
use crate::state::{adjust_perturbation, explore_factor, relevance_grad, StateVector, Vec3, NEUTRAL_PERTURBATION};

/// What happened in one iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStep {
    /// 1-based iteration number.
    pub iteration: usize,
    pub edges_before: usize,
    pub edges_after: usize,
    /// Gradient used for both the prune and the update.
    pub grad: Vec3,
    /// State after the update.
    pub state: StateVector,
    pub score: f64,
}

/// Per-iteration record of a scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanTrace {
    pub steps: Vec<IterationStep>,
    /// True if the loop exited on the convergence check.
    pub converged: bool,
}

impl ScanTrace {
    /// Edge counts entering the first iteration and leaving each one.
    pub fn edge_counts(&self) -> Vec<usize> {
        let mut counts = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            counts.push(first.edges_before);
        }
        counts.extend(self.steps.iter().map(|s| s.edges_after));
        counts
    }

    pub fn total_pruned(&self) -> usize {
        self.steps.iter().map(|s| s.edges_before - s.edges_after).sum()
    }
}

/// Runs scans with a fixed configuration and a graph cache.
///
/// Cheap to share: scans borrow `&self`, and the only mutable state is the
/// cache, which locks internally.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
    cache: Arc<GraphCache>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl Scanner {
    /// Scanner with a private cache sized from `config.cache_capacity`.
    pub fn new(config: ScanConfig) -> Self {
        let cache = GraphCache::shared(config.cache_capacity);
        Self { config, cache }
    }

    /// Scanner using a cache owned elsewhere.
    pub fn with_cache(config: ScanConfig, cache: Arc<GraphCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.cache
    }

    pub fn graph_params(&self) -> GraphParams {
        GraphParams {
            td_max: self.config.td_max,
            edge_cap: self.config.edge_cap,
            edge_weight: self.config.edge_weight,
        }
    }

    /// Memoized relational map for `seed`.
    pub fn relational_map(&self, seed: &str) -> Arc<RelationalMap> {
        self.cache.get_or_build(seed, self.graph_params())
    }

    /// Scan a seed.
    pub fn scan(&self, seed: &str) -> ScanResult {
        self.scan_traced(seed).0
    }

    /// Scan a seed and keep the per-iteration trace.
    pub fn scan_traced(&self, seed: &str) -> (ScanResult, ScanTrace) {
        let map = self.relational_map(seed);
        self.scan_edges(map.edges.clone())
    }

    /// Run the loop over an edge list that was built elsewhere.
    pub fn scan_edges(&self, mut edges: Vec<Edge>) -> (ScanResult, ScanTrace) {
        let config = &self.config;
        let explore = explore_factor(&config.domain);
        let perturbation = adjust_perturbation(NEUTRAL_PERTURBATION);

        let mut state = StateVector::INITIAL;
        let mut trace = ScanTrace::default();

        for iteration in 1..=config.max_iters {
            let grad = relevance_grad(&state, edges.len());

            let edges_before = edges.len();
            prune_edges(&mut edges, grad[0], config.rf_thresh);

            state = state.step(explore, grad, perturbation, config.alpha, config.beta);
            let score = convergence_score(&state);

            debug!(
                iteration,
                edges_before,
                edges_after = edges.len(),
                strength = state.strength(),
                depth = state.depth(),
                score,
                "spiral step"
            );

            trace.steps.push(IterationStep {
                iteration,
                edges_before,
                edges_after: edges.len(),
                grad,
                state,
                score,
            });

            if is_converged(score, config.convergence_threshold) {
                trace.converged = true;
                break;
            }
        }

        let result = ScanResult {
            chains: build_output(&state, &edges),
            srm: build_srm(&state),
            iters: trace.steps.len(),
            domain: config.domain.clone(),
            consent_factor: None,
        };

        debug!(
            iters = result.iters,
            converged = trace.converged,
            strength = result.chains.hypothesis_strength,
            "scan complete"
        );

        (result, trace)
    }
}

/// One-shot scan with a throwaway cache.
///
/// Equivalent to `scan(seed, domain = tech, max_iters = 3, td_max = 3)` when
/// called with the defaults.
pub fn scan(seed: &str, domain: impl Into<Domain>, max_iters: usize, td_max: usize) -> ScanResult {
    let config = ScanConfig::default()
        .with_domain(domain)
        .with_max_iters(max_iters)
        .with_td_max(td_max);
    Scanner::new(config).scan(seed)
}
