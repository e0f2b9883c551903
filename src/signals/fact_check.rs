//! Google Fact Check Tools claim search.

use serde::Deserialize;

use super::{decode_json, ensure_success, or_fallback, Reading, SignalContext, SignalKind};
use crate::error::SignalError;

pub const TRUE_SCORE: f64 = 100.0;
pub const FALSE_SCORE: f64 = 0.0;
/// No fact-check available, or the API could not be reached.
pub const UNKNOWN_SCORE: f64 = 25.0;

#[derive(Debug, Default, Deserialize)]
pub struct ClaimSearch {
    #[serde(default)]
    pub claims: Vec<Claim>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Claim {
    #[serde(default, rename = "claimReview")]
    pub claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClaimReview {
    #[serde(default, rename = "textualRating")]
    pub textual_rating: String,
}

pub async fn score(ctx: &SignalContext, query: &str) -> Reading {
    match lookup(ctx, query).await {
        Ok(found) => Reading::measured(rate_claims(&found)),
        Err(e) => or_fallback(SignalKind::FactCheck, Err(e), UNKNOWN_SCORE),
    }
}

pub async fn lookup(ctx: &SignalContext, query: &str) -> Result<ClaimSearch, SignalError> {
    let resp = ctx
        .http
        .get(&ctx.config.endpoints.fact_check)
        .query(&[("query", query), ("key", ctx.creds.google_api_key.as_str())])
        .send()
        .await?;
    decode_json(ensure_success(resp).await?).await
}

/// Any review whose rating contains "true" wins (100); otherwise any "false" gives 0;
/// no claims or no recognisable rating gives 25.
pub fn rate_claims(found: &ClaimSearch) -> f64 {
    found
        .claims
        .iter()
        .flat_map(|c| c.claim_review.iter())
        .filter_map(|r| {
            let rating = r.textual_rating.to_lowercase();
            if rating.contains("true") {
                Some(TRUE_SCORE)
            } else if rating.contains("false") {
                Some(FALSE_SCORE)
            } else {
                None
            }
        })
        .reduce(f64::max)
        .unwrap_or(UNKNOWN_SCORE)
}
