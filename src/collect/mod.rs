// src/collect/mod.rs
pub mod providers;

use anyhow::Result;

/// One collected discussion-thread reference. Position in the `Vec<Post>` is
/// the order index the classifier output is aligned to.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    /// Opaque reference URL; passed through unchanged.
    pub link: String,
    /// Provenance label, e.g. "Mobile01", "Demo".
    pub source: String,
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<Post>>;
    fn name(&self) -> &'static str;
}

/// Normalize a scraped title: decode HTML entities, strip tags, collapse
/// whitespace, trim.
pub fn normalize_title(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Forum housekeeping posts are skipped at collection time; they carry no
/// sentiment worth counting.
pub fn is_announcement(title: &str) -> bool {
    title.contains("公告") || title.to_ascii_lowercase().contains("[announcement]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_title_strips_tags_and_entities() {
        let raw = "<b>Pre-sale&nbsp;prices</b>  keep \n climbing&hellip;";
        assert_eq!(normalize_title(raw), "Pre-sale prices keep climbing…");
    }

    #[test]
    fn announcement_markers_are_detected() {
        assert!(is_announcement("【公告】版規更新"));
        assert!(is_announcement("[Announcement] board rules"));
        assert!(!is_announcement("Is now the peak?"));
    }
}
