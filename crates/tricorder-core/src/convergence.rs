//! Convergence check on the `[strength, depth]` plane.
//!
//! ```text
//! score = min(1, ‖(strength, depth)‖ / √2)
//! ```
//!
//! Bias is left out of the stopping decision. The loop stops as soon as the
//! score is strictly greater than the threshold.

use crate::state::StateVector;

/// Default early-exit threshold.
pub const CONVERGENCE_THRESHOLD: f64 = 0.85;

/// Norm-based convergence score in `[0, 1]`.
pub fn convergence_score(state: &StateVector) -> f64 {
    let norm = state.strength().hypot(state.depth());
    (norm / std::f64::consts::SQRT_2).min(1.0)
}

/// Strictly above: a score equal to the threshold keeps iterating.
pub fn is_converged(score: f64, threshold: f64) -> bool {
    score > threshold
}
