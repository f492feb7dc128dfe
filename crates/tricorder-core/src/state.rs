//! Spiral Path state update.
//!
//! ```text
//! S_{n+1} = S_n + α·(E·∇R) + β·A
//! ```
//!
//! - `E`: exploration factor, 0.3 base plus a domain boost
//! - `∇R`: relevance gradient `[0.5·|edges|/5, 0.2, -0.1·bias]`
//! - `A`: perturbation `[0, -ln(1 + |side input|)·0.1, 0]`
//!
//! Nothing here is random: the same inputs always give the same state.

use serde::{Deserialize, Serialize};

use crate::config::Domain;

/// Side input fed to the perturbation term on every iteration.
pub const NEUTRAL_PERTURBATION: &str = "neutral_perturbation";

/// Baseline exploration before the domain boost.
pub const EXPLORE_BASE: f64 = 0.3;

/// A 3-component vector: gradient or perturbation.
pub type Vec3 = [f64; 3];

/// Scan state: `[strength, depth, bias]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector(pub Vec3);

impl Default for StateVector {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl StateVector {
    /// Fresh state at the start of every scan.
    pub const INITIAL: Self = Self([1.0, 0.0, 0.0]);

    /// Accumulated relevance / hypothesis confidence.
    pub fn strength(&self) -> f64 {
        self.0[0]
    }

    /// Perturbation-driven shift. Can go negative.
    pub fn depth(&self) -> f64 {
        self.0[1]
    }

    /// Ethics drift accumulator.
    pub fn bias(&self) -> f64 {
        self.0[2]
    }

    /// Apply one Spiral Path step.
    pub fn step(&self, explore: f64, grad: Vec3, perturbation: Vec3, alpha: f64, beta: f64) -> Self {
        let mut next = self.0;
        for i in 0..3 {
            next[i] += alpha * (explore * grad[i]) + beta * perturbation[i];
        }
        Self(next)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Exploration factor `E`: 0.5 for the poetic domain, 0.4 otherwise.
pub fn explore_factor(domain: &Domain) -> f64 {
    EXPLORE_BASE + if domain.is_poetic() { 0.2 } else { 0.1 }
}

/// Relevance gradient `∇R` from edge density and the current bias.
///
/// The third component damps bias back toward zero.
pub fn relevance_grad(state: &StateVector, edge_count: usize) -> Vec3 {
    [0.5 * edge_count as f64 / 5.0, 0.2, -0.1 * state.bias()]
}

/// Perturbation `A`: only the depth component is nonzero.
///
/// Magnitude depends on the side input's length in characters.
pub fn adjust_perturbation(side_input: &str) -> Vec3 {
    let len = side_input.chars().count() as f64;
    [0.0, -(1.0 + len).ln() * 0.1, 0.0]
}
