//! Tangent filter.
//!
//! Edges at or below the tangent threshold (default 0.6) are quarantined as
//! tangents; the rest form the main relational graph. Runs once before the
//! scan, outside the iteration loop.

use tricorder_core::Edge;

/// Default tangent weight threshold.
pub const TANGENT_THRESH: f64 = 0.6;

/// Edges split into the main graph and quarantined tangents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TangentSplit {
    /// Weight strictly above the threshold.
    pub main: Vec<Edge>,
    /// Weight at or below the threshold.
    pub tangents: Vec<Edge>,
}

/// Partition `edges` by weight, keeping their relative order.
pub fn tangent_filter(edges: &[Edge], thresh: f64) -> TangentSplit {
    let (main, tangents) = edges.iter().cloned().partition(|e| e.weight > thresh);
    TangentSplit { main, tangents }
}
