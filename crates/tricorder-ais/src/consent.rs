//! Consent precheck.
//!
//! Each marker found in the seed (case-insensitive) costs 0.2:
//!
//! ```text
//! consent_factor = 1 - 0.2 · hits
//! ```
//!
//! The factor annotates the result. It never feeds back into the scan.

/// Markers of data used without consent.
pub const CONSENT_MARKERS: [&str; 3] = ["unconsented", "no_permission", "bias_source"];

/// Penalty per marker found.
pub const CONSENT_PENALTY: f64 = 0.2;

/// Markers present in `seed`. Each marker counts once however often it
/// appears.
pub fn consent_hits(seed: &str) -> Vec<&'static str> {
    let lowered = seed.to_lowercase();
    CONSENT_MARKERS
        .iter()
        .copied()
        .filter(|marker| lowered.contains(marker))
        .collect()
}

/// Consent factor in `[0, 1]`.
pub fn consent_factor(seed: &str) -> f64 {
    let hits = consent_hits(seed);
    if !hits.is_empty() {
        tracing::warn!(markers = ?hits, "seed carries unconsented-data markers");
    }
    (1.0 - CONSENT_PENALTY * hits.len() as f64).clamp(0.0, 1.0)
}
