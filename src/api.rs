use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::classify::{classify_titles, transport::Transport, AnalysisReport};
use crate::collect::providers::demo::demo_posts;
use crate::collect::providers::forum_rss::{ForumRssProvider, FORUM_RSS_URL};
use crate::collect::{Post, SourceProvider};
use crate::config::ClassifierConfig;
use crate::stats;

/// Session state: one post list and at most one report derived from it.
/// Every collect action fully replaces the posts and drops the report; every
/// analyze action fully replaces the report. Nothing is merged or pooled.
#[derive(Default)]
struct Session {
    posts: Vec<Post>,
    report: Option<AnalysisReport>,
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Session>>,
    config: Arc<ClassifierConfig>,
    transport: Arc<dyn Transport>,
    /// Built once; the provider's HTTP client is reused across requests.
    collector: Arc<dyn SourceProvider>,
}

impl AppState {
    pub fn new(config: ClassifierConfig, transport: Arc<dyn Transport>) -> Self {
        let collector = Arc::new(ForumRssProvider::from_url(FORUM_RSS_URL));
        Self::with_collector(config, transport, collector)
    }

    pub fn with_collector(
        config: ClassifierConfig,
        transport: Arc<dyn Transport>,
        collector: Arc<dyn SourceProvider>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            config: Arc::new(config),
            transport,
            collector,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/posts", get(list_posts))
        .route("/collect", post(collect_live))
        .route("/collect/demo", post(collect_demo))
        .route("/analyze", post(analyze))
        .route("/report", get(report))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct CollectResp {
    count: usize,
    source: String,
    /// Set when the live fetch failed; the post list is then empty and the
    /// user can retry or load the demo fixture.
    error: Option<String>,
}

async fn collect_live(State(state): State<AppState>) -> Json<CollectResp> {
    let (posts, error) = match state.collector.fetch_latest().await {
        Ok(p) => (p, None),
        Err(e) => (Vec::new(), Some(format!("{e:#}"))),
    };
    let count = posts.len();
    replace_posts(&state, posts);
    Json(CollectResp {
        count,
        source: state.collector.name().to_string(),
        error,
    })
}

async fn collect_demo(State(state): State<AppState>) -> Json<CollectResp> {
    let posts = demo_posts();
    let count = posts.len();
    replace_posts(&state, posts);
    Json(CollectResp {
        count,
        source: "Demo".to_string(),
        error: None,
    })
}

fn replace_posts(state: &AppState, posts: Vec<Post>) {
    let mut g = state.session.write().expect("rwlock poisoned");
    g.posts = posts;
    g.report = None;
}

async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    let g = state.session.read().expect("rwlock poisoned");
    Json(g.posts.clone())
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    force_simulate: bool,
}

async fn analyze(
    State(state): State<AppState>,
    body: Option<Json<AnalyzeReq>>,
) -> Json<ReportView> {
    let force = body.map(|Json(b)| b.force_simulate).unwrap_or(false);

    // Snapshot under the lock; the guard must not live across the await.
    let posts = {
        let g = state.session.read().expect("rwlock poisoned");
        g.posts.clone()
    };
    let titles: Vec<String> = posts.iter().map(|p| p.title.clone()).collect();

    let report = classify_titles(&titles, &state.config, state.transport.as_ref(), force).await;

    {
        let mut g = state.session.write().expect("rwlock poisoned");
        g.report = Some(report.clone());
    }
    Json(report_view(&posts, &report))
}

async fn report(State(state): State<AppState>) -> Json<Option<ReportView>> {
    let (posts, report) = {
        let g = state.session.read().expect("rwlock poisoned");
        (g.posts.clone(), g.report.clone())
    };
    Json(report.map(|r| report_view(&posts, &r)))
}

/// One table row: a post joined with its verdict by position.
#[derive(serde::Serialize)]
struct ReportRow {
    title: String,
    link: String,
    source: String,
    sentiment: String,
    keyword: String,
}

#[derive(serde::Serialize)]
struct ReportView {
    rows: Vec<ReportRow>,
    summary: String,
    error: Option<String>,
    was_simulated: bool,
    sentiment_counts: Vec<(String, usize)>,
    keyword_frequencies: Vec<(String, usize)>,
}

fn report_view(posts: &[Post], report: &AnalysisReport) -> ReportView {
    let rows = posts
        .iter()
        .zip(report.results.iter())
        .map(|(p, r)| ReportRow {
            title: p.title.clone(),
            link: p.link.clone(),
            source: p.source.clone(),
            sentiment: r.sentiment.clone(),
            keyword: r.keyword.clone(),
        })
        .collect();

    ReportView {
        rows,
        summary: report.summary.clone(),
        error: report.error.clone(),
        was_simulated: report.was_simulated,
        sentiment_counts: stats::sentiment_counts(&report.results),
        keyword_frequencies: stats::keyword_frequencies(&report.results),
    }
}
