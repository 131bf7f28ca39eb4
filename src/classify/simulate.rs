//! Simulated classifier: a deterministic, network-free substitute with the
//! same output shape as the live path. Used for demos and for graceful
//! degradation when no credential is configured.

use super::ClassificationResult;

/// Fixed palette cycled by position. Content mirrors what the live model
/// typically returns for housing-forum titles.
const PALETTE: [(&str, &str); 5] = [
    ("positive", "great layout, signed the contract"),
    ("anxious", "buying at the peak, mortgage stress"),
    ("negative", "overpriced asking, leak complaints"),
    ("neutral", "old apartment vs. new development"),
    ("watching", "pre-sale pricing, waiting it out"),
];

/// Summary string the simulated path returns alongside the per-item results.
pub const SIMULATED_SUMMARY: &str =
    "Simulated analysis: no model was called. Sentiments cycle through a fixed \
     palette so the dashboard can be exercised offline.";

/// Produce exactly `n` results by cycling the palette modulo its size.
/// No randomness: two calls with the same `n` are bit-identical.
pub fn simulate(n: usize) -> Vec<ClassificationResult> {
    (0..n)
        .map(|i| {
            let (sentiment, keyword) = PALETTE[i % PALETTE.len()];
            ClassificationResult {
                sentiment: sentiment.to_string(),
                keyword: keyword.to_string(),
            }
        })
        .collect()
}
