// tests/orchestrate.rs
//
// The orchestration contract: the caller always gets the four-tuple
// (results, summary, error, was_simulated), the simulate switch takes
// precedence over a configured credential, and n=0 never reaches the wire.

use housing_sentiment_radar::classify::simulate::simulate;
use housing_sentiment_radar::classify::transport::MockTransport;
use housing_sentiment_radar::classify::{classify_titles, SENTIMENT_FAILED};
use housing_sentiment_radar::config::ClassifierConfig;

fn titles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("title {i}")).collect()
}

fn live_config() -> ClassifierConfig {
    ClassifierConfig {
        enabled: true,
        api_key: "test-key".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn zero_titles_never_touch_the_transport() {
    // MockTransport::Unreachable panics if invoked at all.
    let report = classify_titles(&[], &live_config(), &MockTransport::Unreachable, false).await;
    assert!(report.results.is_empty());
    assert!(report.error.is_none());
}

#[tokio::test]
async fn forced_simulation_wins_over_a_usable_credential() {
    let report = classify_titles(&titles(3), &live_config(), &MockTransport::Unreachable, true).await;
    assert!(report.was_simulated);
    assert_eq!(report.results, simulate(3));
    assert!(report.error.is_none());
    assert!(!report.summary.is_empty());
}

#[tokio::test]
async fn missing_credential_degrades_to_simulation() {
    let cfg = ClassifierConfig::default(); // disabled, no key
    let report = classify_titles(&titles(7), &cfg, &MockTransport::Unreachable, false).await;
    assert!(report.was_simulated);
    assert_eq!(report.results.len(), 7);
}

#[tokio::test]
async fn config_level_force_simulate_is_honored() {
    let cfg = ClassifierConfig {
        force_simulate: true,
        ..live_config()
    };
    let report = classify_titles(&titles(2), &cfg, &MockTransport::Unreachable, false).await;
    assert!(report.was_simulated);
}

#[tokio::test]
async fn live_path_returns_the_parsed_reply() {
    // A perfectly shaped reply maps element for element.
    let reply = r#"{"summary": "calm", "details": [
        {"sentiment": "positive", "keyword": "layout"},
        {"sentiment": "negative", "keyword": "price"}
    ]}"#;
    let transport = MockTransport::Reply(reply.to_string());
    let report = classify_titles(&titles(2), &live_config(), &transport, false).await;

    assert!(!report.was_simulated);
    assert!(report.error.is_none());
    assert_eq!(report.summary, "calm");
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].sentiment, "positive");
    assert_eq!(report.results[1].keyword, "price");
}

#[tokio::test]
async fn live_path_pads_a_short_reply() {
    // 7 titles but only 4 reply entries: 4 real + 3 pads, length 7.
    let reply = r#"[
        {"sentiment": "positive", "keyword": "a"},
        {"sentiment": "negative", "keyword": "b"},
        {"sentiment": "neutral", "keyword": "c"},
        {"sentiment": "anxious", "keyword": "d"}
    ]"#;
    let transport = MockTransport::Reply(reply.to_string());
    let report = classify_titles(&titles(7), &live_config(), &transport, false).await;

    assert_eq!(report.results.len(), 7);
    assert_eq!(report.results[3].sentiment, "anxious");
    assert!(report.results[4..]
        .iter()
        .all(|r| r.sentiment == "unknown" && r.keyword == "none"));
}

#[tokio::test]
async fn live_failure_yields_sentinels_and_a_diagnostic() {
    // A timed-out call becomes a sentinel-filled set with the error set.
    let transport = MockTransport::Fail("connect timeout".to_string());
    let report = classify_titles(&titles(4), &live_config(), &transport, false).await;

    assert!(!report.was_simulated);
    assert_eq!(report.results.len(), 4);
    assert!(report.results.iter().all(|r| r.sentiment == SENTIMENT_FAILED));
    let diag = report.error.expect("diagnostic expected");
    assert!(diag.contains("connect timeout"));
}
