//! Aggregation for the bar chart and word cloud. Counting only; the result
//! sequence itself is never re-ordered.

use std::collections::HashMap;

use crate::classify::{ClassificationResult, KEYWORD_NONE};

/// Sentiment label counts, in first-seen order. Every label is counted as-is,
/// including "not-applicable"; filtering labels would silently change the
/// displayed totals.
pub fn sentiment_counts(results: &[ClassificationResult]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in results {
        if !counts.contains_key(r.sentiment.as_str()) {
            order.push(r.sentiment.clone());
        }
        *counts.entry(r.sentiment.as_str()).or_insert(0) += 1;
    }
    order
        .into_iter()
        .map(|label| {
            let n = counts[label.as_str()];
            (label, n)
        })
        .collect()
}

/// Keyword frequencies for the word cloud. Keywords arrive comma-separated;
/// the "none" sentinel and empty fragments are skipped. Sorted by count
/// descending, then alphabetically so the output is stable.
pub fn keyword_frequencies(results: &[ClassificationResult]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in results {
        for part in r.keyword.split(',') {
            let kw = part.trim();
            if kw.is_empty() || kw == KEYWORD_NONE {
                continue;
            }
            *counts.entry(kw.to_string()).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
