use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::collect::{is_announcement, normalize_title, Post, SourceProvider};

/// News-search RSS proxy scoped to the forum's housing board. The forum
/// itself has no public feed, so titles arrive through this search index.
pub const FORUM_RSS_URL: &str =
    "https://news.google.com/rss/search?q=site%3Amobile01.com+%E6%88%BF%E5%9C%B0%E7%94%A2";

const SOURCE_LABEL: &str = "Mobile01";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

pub struct ForumRssProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl ForumRssProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_url(url: &str) -> Self {
        let client = reqwest::Client::new();
        Self {
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }

    fn parse_items_from_str(s: &str) -> Result<Vec<Post>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(s);
        let rss: Rss = from_str(&xml_clean).context("parsing forum rss xml")?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = normalize_title(it.title.as_deref().unwrap_or_default());
            if title.is_empty() || is_announcement(&title) {
                continue;
            }
            out.push(Post {
                title,
                link: it.link.unwrap_or_default(),
                source: SOURCE_LABEL.to_string(),
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("collect_parse_ms").record(ms);
        counter!("collect_posts_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl SourceProvider for ForumRssProvider {
    async fn fetch_latest(&self) -> Result<Vec<Post>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_items_from_str(s),

            Mode::Http { url, client } => {
                let body = match client.get(url).send().await {
                    Ok(resp) => resp.text().await.context("forum rss .text()")?,
                    Err(e) => {
                        tracing::warn!(error = ?e, provider = SOURCE_LABEL, "provider http error");
                        counter!("collect_provider_errors_total").increment(1);
                        return Err(e).context("forum rss get()");
                    }
                };
                Self::parse_items_from_str(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        SOURCE_LABEL
    }
}

/// Feeds routinely carry HTML entities that are not valid XML entities and
/// would make quick-xml reject the whole document.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&hellip;", "...")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
