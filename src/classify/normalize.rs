//! The single choke point turning an untrusted model reply into a typed,
//! length-checked result sequence. Nothing downstream ever sees unchecked
//! external shape, and nothing in here raises to the caller.

use anyhow::Result;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde_json::Value;

use super::{ClassificationResult, KEYWORD_NONE, SENTIMENT_UNKNOWN};

/// Outcome of normalization. `results.len()` always equals the requested
/// length. `error` is set only on total failure (transport error,
/// unparseable text, or a reply with no details array); the results are then
/// sentinel-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReply {
    pub results: Vec<ClassificationResult>,
    pub summary: String,
    pub error: Option<String>,
}

/// Normalize the transport outcome against a known target length `n`.
///
/// Idempotent and side-effect-free: the same outcome and `n` always produce
/// the same reply, and no retry happens here.
pub fn normalize_reply(outcome: Result<String>, n: usize) -> NormalizedReply {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => return total_failure(n, format!("model call failed: {e:#}")),
    };

    let cleaned = strip_code_fences(&raw);
    let value = match parse_value(&cleaned) {
        Some(v) => v,
        None => {
            return total_failure(
                n,
                format!("model reply was not parseable JSON ({} bytes)", raw.len()),
            )
        }
    };

    match extract(value) {
        Some(parsed) => NormalizedReply {
            results: reconcile(parsed.details, n),
            summary: parsed.summary.unwrap_or_default(),
            error: None,
        },
        None => total_failure(n, "model reply parsed but carried no details array".to_string()),
    }
}

/// Pad with `(unknown, none)` or truncate so the sequence is exactly `n`
/// long. Order is preserved; no sorting, no re-keying by content.
pub fn reconcile(mut entries: Vec<ClassificationResult>, n: usize) -> Vec<ClassificationResult> {
    entries.truncate(n);
    while entries.len() < n {
        entries.push(ClassificationResult::padding());
    }
    entries
}

struct ParsedReply {
    details: Vec<ClassificationResult>,
    summary: Option<String>,
}

fn parse_value(cleaned: &str) -> Option<Value> {
    serde_json::from_str(cleaned.trim())
        .ok()
        .or_else(|| slice_to_json(cleaned).and_then(|s| serde_json::from_str(s).ok()))
}

/// Drop code-fence markers (```json, ```python, bare ```) anywhere in the
/// text. Models add them despite being told not to.
fn strip_code_fences(raw: &str) -> String {
    static FENCE: OnceCell<Regex> = OnceCell::new();
    let re = FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9]*").unwrap());
    re.replace_all(raw, "").trim().to_string()
}

/// Recovery slice: from the first `[`/`{` to the matching kind of closing
/// bracket at the end. Skips leading prose the model prepended.
fn slice_to_json(s: &str) -> Option<&str> {
    let start = s.find(['[', '{'])?;
    let close = if s.as_bytes()[start] == b'[' { ']' } else { '}' };
    let end = s.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&s[start..=end])
}

/// Pull a `details`-like array out of the parsed value. A bare array is the
/// details; an object may also carry a `summary` string. Valid JSON with no
/// array anywhere (a string, an object without `details`) is a shape
/// failure, not a pad case; an empty array is still pad-only.
fn extract(value: Value) -> Option<ParsedReply> {
    let (summary, details_value) = match value {
        Value::Object(mut map) => {
            let summary = match map.remove("summary") {
                Some(Value::String(s)) => Some(s),
                _ => None,
            };
            (summary, map.remove("details").unwrap_or(Value::Null))
        }
        other => (None, other),
    };

    match details_value {
        Value::Array(items) => Some(ParsedReply {
            details: items.into_iter().map(entry_from_value).collect(),
            summary,
        }),
        _ => None,
    }
}

fn entry_from_value(v: Value) -> ClassificationResult {
    match v {
        Value::Object(mut map) => ClassificationResult {
            sentiment: string_or(map.remove("sentiment"), SENTIMENT_UNKNOWN),
            keyword: string_or(map.remove("keyword"), KEYWORD_NONE),
        },
        _ => ClassificationResult::padding(),
    }
}

fn string_or(v: Option<Value>, default: &str) -> String {
    match v {
        Some(Value::String(s)) => s,
        _ => default.to_string(),
    }
}

fn total_failure(n: usize, diagnostic: String) -> NormalizedReply {
    NormalizedReply {
        results: (0..n).map(|_| ClassificationResult::failure()).collect(),
        summary: String::new(),
        error: Some(diagnostic),
    }
}
