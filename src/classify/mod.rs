//! Classification pipeline: prompt construction, the live model call, and the
//! normalizer that enforces the length/order contract on model output.

pub mod normalize;
pub mod prompt;
pub mod simulate;
pub mod transport;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ClassifierConfig;
use transport::Transport;

/// Sentiment used when the model reply carries fewer entries than titles.
pub const SENTIMENT_UNKNOWN: &str = "unknown";
/// Keyword used when an entry carries no keyword (also a valid model value).
pub const KEYWORD_NONE: &str = "none";
/// Sentiment filling the whole result set after a failed live call.
pub const SENTIMENT_FAILED: &str = "connection-failed";
/// Keyword paired with [`SENTIMENT_FAILED`].
pub const KEYWORD_FAILED: &str = "api-error";

/// One verdict, attached to a post by position. The sentiment vocabulary is
/// model-defined and open; membership is not validated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub sentiment: String,
    pub keyword: String,
}

impl ClassificationResult {
    /// Pad entry for replies shorter than the title count.
    pub fn padding() -> Self {
        Self {
            sentiment: SENTIMENT_UNKNOWN.to_string(),
            keyword: KEYWORD_NONE.to_string(),
        }
    }

    /// Sentinel entry filling the result set after a total failure.
    pub fn failure() -> Self {
        Self {
            sentiment: SENTIMENT_FAILED.to_string(),
            keyword: KEYWORD_FAILED.to_string(),
        }
    }
}

/// Everything the presentation layer receives from one analysis run.
///
/// `results.len()` always equals the number of input titles, whatever the
/// model did. `error` carries a diagnostic when the live call failed; the
/// results are then sentinel-filled but still fully populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    pub results: Vec<ClassificationResult>,
    pub summary: String,
    pub error: Option<String>,
    pub was_simulated: bool,
}

impl AnalysisReport {
    fn empty(was_simulated: bool) -> Self {
        Self {
            results: Vec::new(),
            summary: String::new(),
            error: None,
            was_simulated,
        }
    }
}

/// Classify an ordered title sequence, choosing the live or simulated path.
///
/// Simulation wins when `force_simulate` is set (request switch or config),
/// else when no usable credential is configured. A zero-length input returns
/// an empty report without touching the transport. One attempt only; the
/// caller owns any retry policy.
pub async fn classify_titles(
    titles: &[String],
    cfg: &ClassifierConfig,
    transport: &dyn Transport,
    force_simulate: bool,
) -> AnalysisReport {
    let simulated = force_simulate || cfg.force_simulate || !cfg.live_configured();
    counter!("classify_requests_total").increment(1);

    if titles.is_empty() {
        return AnalysisReport::empty(simulated);
    }

    if simulated {
        counter!("classify_simulated_total").increment(1);
        return AnalysisReport {
            results: simulate::simulate(titles.len()),
            summary: simulate::SIMULATED_SUMMARY.to_string(),
            error: None,
            was_simulated: true,
        };
    }

    let prompt = prompt::build_prompt(titles);
    let t0 = std::time::Instant::now();
    let outcome = transport.generate(&prompt).await;
    histogram!("classify_roundtrip_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    let normalized = normalize::normalize_reply(outcome, titles.len());
    if let Some(diag) = &normalized.error {
        counter!("classify_failures_total").increment(1);
        warn!(provider = transport.name(), error = %diag, "live classification failed");
    }

    AnalysisReport {
        results: normalized.results,
        summary: normalized.summary,
        error: normalized.error,
        was_simulated: false,
    }
}
