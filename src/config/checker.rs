// src/config/checker.rs
//! Checker settings loaded from TOML.
//!
//! TOML shape (every section and key is optional):
//! ```toml
//! [endpoints]
//! safe_browsing = "https://safebrowsing.googleapis.com/v4/threatMatches:find"
//! fact_check = "https://factchecktools.googleapis.com/v1alpha1/claims:search"
//! whois = "https://www.whoisxmlapi.com/whoisserver/WhoisService"
//! serpapi = "https://serpapi.com/search.json"
//! inference = "https://api-inference.huggingface.co"
//!
//! [http]
//! timeout_secs = 10
//! page_timeout_secs = 5
//!
//! [models]
//! bias_max_words = 500
//!
//! [scoring]
//! on_signal_failure = "abort"   # or "neutral"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CHECKER_CONFIG_PATH: &str = "config/checker.toml";
pub const ENV_CHECKER_CONFIG_PATH: &str = "CHECKER_CONFIG_PATH";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub endpoints: Endpoints,
    pub http: HttpSettings,
    pub models: ModelSettings,
    pub scoring: ScoringSettings,
}

/// Base URLs of the external services.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub safe_browsing: String,
    pub fact_check: String,
    pub whois: String,
    pub serpapi: String,
    pub inference: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            safe_browsing: "https://safebrowsing.googleapis.com/v4/threatMatches:find".into(),
            fact_check: "https://factchecktools.googleapis.com/v1alpha1/claims:search".into(),
            whois: "https://www.whoisxmlapi.com/whoisserver/WhoisService".into(),
            serpapi: "https://serpapi.com/search.json".into(),
            inference: "https://api-inference.huggingface.co".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Timeout for every external API request.
    pub timeout_secs: u64,
    /// Timeout for fetching the page under evaluation.
    pub page_timeout_secs: u64,
    /// User-Agent sent when fetching the page.
    pub user_agent: String,
    /// Client id reported to Safe Browsing.
    pub client_id: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            page_timeout_secs: 5,
            user_agent: "Mozilla/5.0".into(),
            client_id: "credibility-checker".into(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs.max(1))
    }
}

/// Model ids and the input-length limits applied before inference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub sentiment: String,
    pub embedding: String,
    pub relevance_max_chars: usize,
    pub bias_max_chars: usize,
    pub bias_max_words: usize,
    pub bias_min_chars: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            sentiment: "cardiffnlp/twitter-roberta-base-sentiment".into(),
            embedding: "sentence-transformers/all-MiniLM-L6-v2".into(),
            relevance_max_chars: 2000,
            bias_max_chars: 2000,
            bias_max_words: 500,
            bias_min_chars: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub on_signal_failure: FailurePolicy,
}

/// What the scorer does when content relevance or bias cannot be measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the signal error to the caller.
    #[default]
    Abort,
    /// Substitute the neutral score and record the fallback.
    Neutral,
}

impl CheckerConfig {
    /// Load from `$CHECKER_CONFIG_PATH` or `config/checker.toml`.
    /// A missing file yields the built-in defaults; a malformed one is an error.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_CHECKER_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHECKER_CONFIG_PATH));
        if !path.exists() {
            tracing::debug!(path = %path.display(), "checker config not found; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading checker config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing checker config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: CheckerConfig = toml::from_str(s)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let cfg = CheckerConfig::from_toml_str(
            r#"
[http]
page_timeout_secs = 7

[scoring]
on_signal_failure = "neutral"
"#,
        )
        .unwrap();
        assert_eq!(cfg.http.page_timeout_secs, 7);
        assert_eq!(cfg.http.timeout_secs, 10);
        assert_eq!(cfg.scoring.on_signal_failure, FailurePolicy::Neutral);
        assert_eq!(cfg.models.bias_max_words, 500);
        assert!(cfg.endpoints.whois.ends_with("WhoisService"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = CheckerConfig::from_toml_str("[scoring]\non_signal_failure = \"retry\"\n");
        assert!(err.is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_path_falls_back_then_honours_env() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CHECKER_CONFIG_PATH);

        let cfg = CheckerConfig::load_default().unwrap();
        assert_eq!(cfg.scoring.on_signal_failure, FailurePolicy::Abort);

        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[models]\nbias_min_chars = 42\n").unwrap();
        env::set_var(ENV_CHECKER_CONFIG_PATH, p.display().to_string());
        let cfg = CheckerConfig::load_default().unwrap();
        assert_eq!(cfg.models.bias_min_chars, 42);
        env::remove_var(ENV_CHECKER_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
