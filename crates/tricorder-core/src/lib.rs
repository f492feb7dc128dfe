//! Spiral Path Tricorder
//!
//! Turns a short text seed into a small relational graph, iterates a
//! 3-component state `[strength, depth, bias]` over it, and reports chains
//! plus SRM metrics.
//!
//! # Pipeline
//!
//! 1. **Graph**: tokens linked by adjacency, extended breadth-first up to
//!    `td_max` hops, capped at 20 edges of constant weight
//! 2. **Prune**: edges failing `w · ∇R[0] > rf_thresh` are dropped for good
//! 3. **Update**: `S' = S + α·(E·∇R) + β·A`
//! 4. **Converge**: stop once `min(1, ‖S[0..2]‖/√2) > 0.85`
//! 5. **Output**: primary chain, overlapping fork, strength and drift
//!
//! Everything is synchronous and deterministic. The only shared state is the
//! [`GraphCache`], which callers own explicitly.
//!
//! # Example
//!
//! ```
//! use tricorder_core::{scan, Domain};
//!
//! let result = scan("debug latency in software poetic rhymes", Domain::Poetic, 3, 3);
//! assert!(result.iters <= 3);
//! assert_eq!(result.srm.fire_integrity, result.chains.hypothesis_strength);
//! ```

mod cache;
mod config;
mod convergence;
mod error;
mod graph;
mod output;
mod prune;
mod scan;
mod state;

pub use cache::{CacheStats, GraphCache, GraphKey, DEFAULT_CACHE_CAPACITY};
pub use config::{Domain, ScanConfig};
pub use convergence::{convergence_score, is_converged, CONVERGENCE_THRESHOLD};
pub use error::{Error, Result};
pub use graph::{tokenize, Edge, GraphParams, RelationalMap};
pub use output::{build_output, build_srm, Chains, ForkItem, ScanResult, Srm, FORK_RANGE, PRIMARY_CHAIN_LEN};
pub use prune::{prune_edges, survives, RF_THRESH};
pub use scan::{scan, IterationStep, ScanTrace, Scanner};
pub use state::{
    adjust_perturbation, explore_factor, relevance_grad, StateVector, Vec3, EXPLORE_BASE, NEUTRAL_PERTURBATION,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_line_up() {
        let config = ScanConfig::default();
        assert_eq!(config.convergence_threshold, CONVERGENCE_THRESHOLD);
        assert_eq!(config.rf_thresh, RF_THRESH);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);

        let params = Scanner::new(config).graph_params();
        assert_eq!(params, GraphParams::default());
    }
}
