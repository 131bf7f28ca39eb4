//! Live model transport. One outbound request per analysis, bounded by the
//! configured timeout; every failure mode surfaces as an `Err` that the
//! normalizer maps to the sentinel-filled result set.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;

/// Single-attempt text generation. Callers own any retry policy.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` over REST. Requires an API key; without one the
/// orchestrator never invokes this transport.
pub struct GeminiTransport {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiTransport {
    pub fn from_config(cfg: &ClassifierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("housing-sentiment-radar/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            endpoint: GEMINI_ENDPOINT.to_string(),
        })
    }

    /// Point the transport at a different base URL (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }
        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            contents: Vec<Content<'a>>,
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: CandidateContent,
        }
        #[derive(Deserialize)]
        struct CandidateContent {
            #[serde(default)]
            parts: Vec<RespPart>,
        }
        #[derive(Deserialize)]
        struct RespPart {
            #[serde(default)]
            text: String,
        }

        if self.api_key.is_empty() {
            bail!("no API key configured");
        }

        let req = Req {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let resp = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&req)
            .send()
            .await
            .context("sending generateContent request")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("model endpoint returned status {status}");
        }

        let body: Resp = resp.json().await.context("decoding generateContent body")?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            bail!("model reply carried no text");
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Deterministic transport for tests: a canned reply or a canned failure.
pub enum MockTransport {
    Reply(String),
    Fail(String),
    /// Panics when invoked; asserts a path that must never reach the wire.
    Unreachable,
}

#[async_trait]
impl Transport for MockTransport {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        match self {
            MockTransport::Reply(s) => Ok(s.clone()),
            MockTransport::Fail(msg) => bail!("{msg}"),
            MockTransport::Unreachable => panic!("transport must not be called on this path"),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
