//! Housing Sentiment Radar: binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, session state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use housing_sentiment_radar::api;
use housing_sentiment_radar::classify::transport::{GeminiTransport, Transport};
use housing_sentiment_radar::config::ClassifierConfig;
use housing_sentiment_radar::metrics::Metrics;

const CONFIG_PATH: &str = "config/classifier.json";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("housing_sentiment_radar=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = ClassifierConfig::load_or_default(CONFIG_PATH);
    tracing::info!(
        provider = %cfg.provider,
        enabled = cfg.enabled,
        key_len = cfg.api_key.len(),
        force_simulate = cfg.force_simulate,
        "classifier config loaded"
    );

    let metrics = Metrics::init(cfg.timeout_secs * 1_000);
    let transport: Arc<dyn Transport> = Arc::new(GeminiTransport::from_config(&cfg)?);
    let state = api::AppState::new(cfg, transport);
    let app = api::router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
