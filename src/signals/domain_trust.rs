//! Domain trust: safety, registration age and search popularity, combined 40/30/30.

use serde::Serialize;

use super::{domain_age, popularity, safety, Reading, SignalContext};
use crate::scoring::round2;

pub const W_SAFETY: f64 = 0.4;
pub const W_DOMAIN_AGE: f64 = 0.3;
pub const W_POPULARITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainTrust {
    pub score: f64,
    pub safety: Reading,
    pub domain_age: Reading,
    pub popularity: Reading,
}

/// Query the three providers in order and combine them. Fallback readings
/// take part in the formula like any other value.
pub async fn evaluate(ctx: &SignalContext, url: &str) -> DomainTrust {
    let safety = safety::score(ctx, url).await;
    let domain_age = domain_age::score(ctx, url).await;
    let popularity = popularity::score(ctx, url).await;
    DomainTrust {
        score: combine(safety.score, domain_age.score, popularity.score),
        safety,
        domain_age,
        popularity,
    }
}

pub fn combine(safety: f64, domain_age: f64, popularity: f64) -> f64 {
    round2(safety * W_SAFETY + domain_age * W_DOMAIN_AGE + popularity * W_POPULARITY)
}
