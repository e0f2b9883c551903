//! SerpAPI search, shared by the popularity and citation signals.

use serde::Deserialize;

use super::{decode_json, ensure_success, SignalContext};
use crate::error::SignalError;

pub const ENGINE_GOOGLE: &str = "google";
pub const ENGINE_SCHOLAR: &str = "google_scholar";

#[derive(Debug, Deserialize)]
pub struct SerpResponse {
    #[serde(default)]
    pub organic_results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SerpResponse {
    /// Number of organic results, `None` when the field is absent.
    pub fn organic_count(&self) -> Option<usize> {
        self.organic_results.as_ref().map(Vec::len)
    }
}

/// Run one search. An `error` field in the payload is reported as `SignalError::Upstream`.
pub async fn search(ctx: &SignalContext, engine: &str, q: &str) -> Result<SerpResponse, SignalError> {
    let resp = ctx
        .http
        .get(&ctx.config.endpoints.serpapi)
        .query(&[
            ("engine", engine),
            ("q", q),
            ("api_key", ctx.creds.serp_api_key.as_str()),
        ])
        .send()
        .await?;
    let body: SerpResponse = decode_json(ensure_success(resp).await?).await?;
    if let Some(err) = &body.error {
        return Err(SignalError::Upstream(err.clone()));
    }
    Ok(body)
}
