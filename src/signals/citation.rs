//! Scholarly presence: Google Scholar results for the query.

use super::serp::{self, ENGINE_SCHOLAR};
use super::{count_score, or_fallback, Reading, SignalContext, SignalKind};
use crate::error::SignalError;

/// Score when there are no scholarly results or the search fails.
pub const NO_CITATIONS_SCORE: f64 = 0.0;

pub async fn score(ctx: &SignalContext, query: &str) -> Reading {
    match lookup(ctx, query).await {
        // No `organic_results` at all is a real "nothing found", not a failure.
        Ok(Some(count)) => Reading::measured(count_score(count)),
        Ok(None) => Reading::measured(NO_CITATIONS_SCORE),
        Err(e) => or_fallback(SignalKind::Citation, Err(e), NO_CITATIONS_SCORE),
    }
}

/// Organic result count, `None` when the response carries no results list.
pub async fn lookup(ctx: &SignalContext, query: &str) -> Result<Option<usize>, SignalError> {
    let resp = serp::search(ctx, ENGINE_SCHOLAR, query).await?;
    Ok(resp.organic_count())
}
