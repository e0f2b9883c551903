//! Search popularity: how many Google results a `site:<domain>` query returns.

use super::serp::{self, ENGINE_GOOGLE};
use super::{count_score, extract_domain, or_fallback, Reading, SignalContext, SignalKind, NEUTRAL_SCORE};
use crate::error::SignalError;

pub async fn score(ctx: &SignalContext, url: &str) -> Reading {
    or_fallback(SignalKind::Popularity, lookup(ctx, url).await, NEUTRAL_SCORE)
}

pub async fn lookup(ctx: &SignalContext, url: &str) -> Result<f64, SignalError> {
    let q = format!("site:{}", extract_domain(url));
    let resp = serp::search(ctx, ENGINE_GOOGLE, &q).await?;
    Ok(count_score(resp.organic_count().unwrap_or(0)))
}
