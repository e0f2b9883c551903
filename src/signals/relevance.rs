//! Content relevance: embedding similarity between the query and the page's paragraph text.

use crate::config::ModelSettings;
use crate::error::SignalError;
use crate::models::{cosine_similarity, Embedder};
use crate::page::{truncate_chars, Page};
use crate::scoring::round2;

/// Cosine similarity scaled to 0..=100 (two decimals). Negative similarity counts as 0.
pub async fn score(
    page: &Page,
    query: &str,
    embedder: &dyn Embedder,
    limits: &ModelSettings,
) -> Result<f64, SignalError> {
    let text = truncate_chars(&page.paragraph_text(), limits.relevance_max_chars);
    if text.trim().is_empty() {
        return Err(SignalError::NotEnoughContent { chars: 0 });
    }
    let q = embedder.embed(query).await?;
    let t = embedder.embed(&text).await?;
    let sim = cosine_similarity(&q, &t) as f64;
    Ok(round2(sim * 100.0).max(0.0))
}
