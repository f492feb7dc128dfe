//! Relevance pruning between iterations.
//!
//! An edge survives iff `weight * ∇R[0] > rf_thresh`, where `∇R` is computed
//! from the edge set *before* this iteration's prune. Pruning only removes:
//! the edge list never grows back.

use crate::graph::Edge;

/// Default relevance threshold.
pub const RF_THRESH: f64 = 0.5;

/// Whether `edge` survives a prune against gradient component `grad0`.
pub fn survives(edge: &Edge, grad0: f64, rf_thresh: f64) -> bool {
    edge.weight * grad0 > rf_thresh
}

/// Drop every edge that fails [`survives`]. Returns how many were removed.
pub fn prune_edges(edges: &mut Vec<Edge>, grad0: f64, rf_thresh: f64) -> usize {
    let before = edges.len();
    edges.retain(|e| survives(e, grad0, rf_thresh));
    before - edges.len()
}
