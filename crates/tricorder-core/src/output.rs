//! Scan output: chains, fork and SRM metrics.

use serde::{Deserialize, Serialize};

use crate::config::Domain;
use crate::graph::Edge;
use crate::state::StateVector;

/// Number of edges in the primary chain.
pub const PRIMARY_CHAIN_LEN: usize = 3;

/// Edge index range reinterpreted as the fork. Starts inside the primary
/// chain, so edge 2 shows up in both.
pub const FORK_RANGE: std::ops::Range<usize> = 2..4;

/// An alternate item in the fork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkItem {
    pub node: String,
    pub rel: String,
    pub weight: f64,
}

impl From<&Edge> for ForkItem {
    fn from(edge: &Edge) -> Self {
        Self {
            node: edge.source.clone(),
            rel: edge.target.clone(),
            weight: edge.weight,
        }
    }
}

/// Chains reported by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chains {
    pub primary_chain: Vec<Edge>,
    pub poetic_fork: Vec<ForkItem>,
    pub hypothesis_strength: f64,
}

/// Summary metrics derived from the final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Srm {
    /// In `[0, 1]`, lower is better.
    pub ethics_drift: f64,
    /// Same value as `hypothesis_strength`.
    pub fire_integrity: f64,
    /// Tangents quarantined before the scan. Set by the AIS path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pruned_tangents: Option<usize>,
}

/// Result of one scan. Not mutated after it is returned, except by the AIS
/// wrapper annotating it before handing it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub chains: Chains,
    pub srm: Srm,
    /// Iterations actually executed (`<= max_iters`).
    pub iters: usize,
    pub domain: Domain,
    /// Set by the AIS path only. In `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_factor: Option<f64>,
}

impl ScanResult {
    /// Pretty JSON, as printed by the CLI.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build chains from the final state and surviving edges.
///
/// Short edge lists just give shorter (possibly empty) chains.
pub fn build_output(state: &StateVector, edges: &[Edge]) -> Chains {
    let primary_chain = edges.iter().take(PRIMARY_CHAIN_LEN).cloned().collect();
    let poetic_fork = edges
        .iter()
        .skip(FORK_RANGE.start)
        .take(FORK_RANGE.len())
        .map(ForkItem::from)
        .collect();

    Chains {
        primary_chain,
        poetic_fork,
        hypothesis_strength: state.strength(),
    }
}

/// SRM metrics: `ethics_drift = min(1, 1 - |bias|)` clamped at 0, and
/// `fire_integrity = strength`.
pub fn build_srm(state: &StateVector) -> Srm {
    Srm {
        ethics_drift: (1.0 - state.bias().abs()).clamp(0.0, 1.0),
        fire_integrity: state.strength(),
        pruned_tangents: None,
    }
}
