use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and describe every series so they
    /// show up on /metrics before their first increment.
    pub fn init(classify_timeout_ms: u64) -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("prometheus: install recorder");

        ensure_metrics_described();
        gauge!("classify_timeout_ms").set(classify_timeout_ms as f64);

        Self { handle }
    }

    /// Router exposing `/metrics` in the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("collect_posts_total", "Posts parsed from the RSS proxy.");
        describe_counter!(
            "collect_provider_errors_total",
            "Collector fetch/parse errors."
        );
        describe_histogram!("collect_parse_ms", "RSS parse time in milliseconds.");
        describe_counter!("classify_requests_total", "Analysis runs requested.");
        describe_counter!(
            "classify_simulated_total",
            "Runs served by the simulated path."
        );
        describe_counter!(
            "classify_failures_total",
            "Live runs that ended in the sentinel-filled result set."
        );
        describe_histogram!(
            "classify_roundtrip_ms",
            "Live model round-trip in milliseconds."
        );
    });
}
