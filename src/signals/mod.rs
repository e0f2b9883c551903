// src/signals/mod.rs
//! Signal providers. Each one turns a URL and/or query into a sub-score in [0,100].
//!
//! Safety, domain age, popularity, fact check and citation never fail from the
//! caller's point of view: errors are logged, counted and replaced by the
//! provider's documented default. Content relevance and bias return `Result`.

pub mod bias;
pub mod citation;
pub mod domain_age;
pub mod domain_trust;
pub mod fact_check;
pub mod popularity;
pub mod relevance;
pub mod safety;
pub mod serp;

use metrics::counter;
use reqwest::Client;
use serde::Serialize;
use std::fmt;

use crate::config::{ApiCredentials, CheckerConfig};
use crate::error::SignalError;

/// Neutral midpoint substituted when a signal cannot be measured.
pub const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Safety,
    DomainAge,
    Popularity,
    ContentRelevance,
    FactCheck,
    Bias,
    Citation,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Safety => "safety",
            SignalKind::DomainAge => "domain_age",
            SignalKind::Popularity => "popularity",
            SignalKind::ContentRelevance => "content_relevance",
            SignalKind::FactCheck => "fact_check",
            SignalKind::Bias => "bias",
            SignalKind::Citation => "citation",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-score plus whether it is a real measurement or a substituted default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub score: f64,
    pub fallback: bool,
}

impl Reading {
    pub fn measured(score: f64) -> Self {
        Self {
            score,
            fallback: false,
        }
    }

    pub fn fallback(score: f64) -> Self {
        Self {
            score,
            fallback: true,
        }
    }
}

/// Everything a provider needs to reach its external service.
#[derive(Clone)]
pub struct SignalContext {
    pub http: Client,
    pub config: CheckerConfig,
    pub creds: ApiCredentials,
}

impl SignalContext {
    pub fn new(config: CheckerConfig, creds: ApiCredentials) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("credibility-checker/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http.timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            creds,
        })
    }
}

/// Host part of a URL by plain string splitting: text after the last `//`,
/// up to the next `/`. No validation; malformed input yields whatever is left.
pub fn extract_domain(url: &str) -> &str {
    let after_scheme = url.rsplit("//").next().unwrap_or(url);
    after_scheme.split('/').next().unwrap_or(after_scheme)
}

/// Resolve a provider result into a reading, logging and counting failures.
pub(crate) fn or_fallback(
    kind: SignalKind,
    res: Result<f64, SignalError>,
    default: f64,
) -> Reading {
    match res {
        Ok(score) => Reading::measured(score),
        Err(e) => {
            tracing::warn!(signal = kind.as_str(), error = %e, default, "signal fell back to default");
            counter!("signal_fallback_total", "signal" => kind.as_str()).increment(1);
            Reading::fallback(default)
        }
    }
}

/// Turn a non-2xx response into `SignalError::Status`.
pub(crate) async fn ensure_success(
    resp: reqwest::Response,
) -> Result<reqwest::Response, SignalError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SignalError::Status {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

/// Decode a JSON body, mapping failures to `SignalError::Decode`.
pub(crate) async fn decode_json<T: for<'de> serde::Deserialize<'de>>(
    resp: reqwest::Response,
) -> Result<T, SignalError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SignalError::Decode(e.to_string()))
}

/// `min(count * 10, 100)`, shared by the search-count signals.
pub(crate) fn count_score(count: usize) -> f64 {
    (count.saturating_mul(10)).min(100) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_split_out_of_the_url() {
        assert_eq!(extract_domain("https://www.bhtp.com/blog/x/"), "www.bhtp.com");
        assert_eq!(extract_domain("http://127.0.0.1:8080/article"), "127.0.0.1:8080");
        assert_eq!(extract_domain("example.org/path"), "example.org");
        assert_eq!(extract_domain("not a url"), "not a url");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn count_score_caps_at_100() {
        assert_eq!(count_score(0), 0.0);
        assert_eq!(count_score(4), 40.0);
        assert_eq!(count_score(10), 100.0);
        assert_eq!(count_score(37), 100.0);
    }

    #[test]
    fn failures_become_flagged_defaults() {
        let r = or_fallback(SignalKind::Safety, Err(SignalError::EmptyUrl), NEUTRAL_SCORE);
        assert_eq!(r, Reading::fallback(50.0));
        let r = or_fallback(SignalKind::Safety, Ok(100.0), NEUTRAL_SCORE);
        assert_eq!(r, Reading::measured(100.0));
    }
}
