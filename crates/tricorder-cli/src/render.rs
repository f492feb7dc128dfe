//! Human-readable rendering of scan results.

use std::fmt::Write;

use tricorder_core::{ScanResult, ScanTrace};

/// Render a result the way the `text` output format prints it.
pub fn render_text(result: &ScanResult) -> String {
    let chains = &result.chains;
    let srm = &result.srm;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== Tricorder Scan Results ===");
    let _ = writeln!(out, "Seed Domain: {}", result.domain);
    let _ = writeln!(out, "Iterations: {}", result.iters);
    let _ = writeln!(out);

    let _ = writeln!(out, "Primary Chains:");
    for edge in &chains.primary_chain {
        let _ = writeln!(out, "  {} → {} (w: {})", edge.source, edge.target, edge.weight);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Poetic/Alt Fork:");
    for fork in &chains.poetic_fork {
        let _ = writeln!(out, "  {} → {} (w: {})", fork.node, fork.rel, fork.weight);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Hypothesis Strength: {:.2}", chains.hypothesis_strength);
    let _ = writeln!(out, "SRM Ethics Drift: {:.2} (lower better)", srm.ethics_drift);
    let _ = writeln!(out, "Fire Integrity: {:.2} (higher thirstier)", srm.fire_integrity);

    if let Some(consent) = result.consent_factor {
        let _ = writeln!(out, "Consent Factor: {consent:.2}");
    }
    if let Some(tangents) = srm.pruned_tangents {
        let _ = writeln!(out, "Pruned Tangents: {tangents}");
    }

    out
}

/// Render the per-iteration trace.
pub fn render_trace(trace: &ScanTrace) -> String {
    let mut out = String::from("Iteration trace:\n");
    for step in &trace.steps {
        let _ = writeln!(
            out,
            "  #{} edges {} → {}  state [{:.4}, {:.4}, {:.4}]  score {:.4}",
            step.iteration,
            step.edges_before,
            step.edges_after,
            step.state.strength(),
            step.state.depth(),
            step.state.bias(),
            step.score,
        );
    }
    let _ = writeln!(out, "  converged: {}", trace.converged);
    out
}
