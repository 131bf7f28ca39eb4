// src/config.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::warn;

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

/// Classifier configuration, loaded from `config/classifier.json`.
///
/// Request-scoped switches (`force_simulate`) live here too so the core can
/// be exercised in tests without any process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub enabled: bool,
    /// "gemini" (case-insensitive).
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// "ENV" means: read from GEMINI_API_KEY.
    #[serde(default)]
    pub api_key: String,
    /// Upper bound on the single live round-trip.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Always take the simulated path, even with a usable key.
    #[serde(default)]
    pub force_simulate: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            force_simulate: false,
        }
    }
}

impl ClassifierConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: ClassifierConfig = serde_json::from_str(&data)?;

        cfg.provider = cfg.provider.to_lowercase();

        // Resolve the key if "ENV". A missing env var is not an error; it
        // just leaves the live path unconfigured and we degrade to
        // simulation.
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
            if cfg.api_key.is_empty() {
                warn!("api_key is \"ENV\" but GEMINI_API_KEY is not set; simulation only");
            }
        }

        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = default_timeout_secs();
        }

        Ok(cfg)
    }

    /// Load from `path`, falling back to safe defaults (simulation path) on
    /// any read or parse error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.as_ref().display(), error = %e, "classifier config not loaded; using defaults");
                Self::default()
            }
        }
    }

    /// True when the live path has everything it needs.
    pub fn live_configured(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_take_the_simulation_path() {
        let cfg = ClassifierConfig::default();
        assert!(!cfg.live_configured());
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn enabled_without_key_is_not_live() {
        let cfg = ClassifierConfig {
            enabled: true,
            api_key: "  ".to_string(),
            ..Default::default()
        };
        assert!(!cfg.live_configured());
    }

    #[test]
    fn enabled_with_key_is_live() {
        let cfg = ClassifierConfig {
            enabled: true,
            api_key: "k".to_string(),
            ..Default::default()
        };
        assert!(cfg.live_configured());
    }
}
