// src/checker.rs
//! `CredibilityChecker`: owns the HTTP client, credentials and models, and runs
//! the signal providers in order for one (query, URL) pair.

use metrics::{counter, histogram};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{ApiCredentials, CheckerConfig, FailurePolicy};
use crate::error::{ScoreError, SignalError};
use crate::models::{self, DynClassifier, DynEmbedder};
use crate::page;
use crate::rating::CredibilityResult;
use crate::scoring::{aggregate, RawScores, ScoreReport};
use crate::signals::{
    bias, citation, domain_trust, fact_check, relevance, SignalContext, SignalKind, NEUTRAL_SCORE,
};
use crate::telemetry::anon_id;

pub struct CredibilityChecker {
    ctx: SignalContext,
    embedder: DynEmbedder,
    classifier: DynClassifier,
}

impl CredibilityChecker {
    pub fn new(
        config: CheckerConfig,
        creds: ApiCredentials,
        embedder: DynEmbedder,
        classifier: DynClassifier,
    ) -> anyhow::Result<Self> {
        let ctx = SignalContext::new(config, creds)?;
        Ok(Self {
            ctx,
            embedder,
            classifier,
        })
    }

    /// Build from `config/checker.toml` (or `$CHECKER_CONFIG_PATH`), env credentials
    /// and the model backend selected by the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = CheckerConfig::load_default()?;
        let creds = ApiCredentials::from_env();
        let (embedder, classifier) = models::build_models(&config, &creds)?;
        info!(
            embedder = embedder.name(),
            classifier = classifier.name(),
            policy = ?config.scoring.on_signal_failure,
            "credibility checker ready"
        );
        Self::new(config, creds, embedder, classifier)
    }

    /// Score one (query, URL) pair.
    pub async fn score(&self, query: &str, url: &str) -> Result<ScoreReport, ScoreError> {
        let t0 = Instant::now();
        counter!("credibility_checks_total").increment(1);
        let res = self.score_inner(query, url).await;
        histogram!("credibility_check_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        if let Err(e) = &res {
            counter!("credibility_check_failures_total").increment(1);
            warn!(query_id = %anon_id(query), error = %e, "credibility check failed");
        }
        res
    }

    /// Score, then format for display.
    pub async fn credibility_score(&self, query: &str, url: &str) -> Result<CredibilityResult, ScoreError> {
        let report = self.score(query, url).await?;
        Ok(CredibilityResult::from_score(report.final_score))
    }

    async fn score_inner(&self, query: &str, url: &str) -> Result<ScoreReport, ScoreError> {
        let query = query.trim();
        let url = url.trim();
        if query.is_empty() {
            return Err(ScoreError::InvalidInput("query is empty"));
        }
        if url.is_empty() {
            return Err(ScoreError::InvalidInput("url is empty"));
        }

        let ctx = &self.ctx;
        let limits = &ctx.config.models;
        let query_id = anon_id(query);
        info!(%query_id, url, "credibility check started");

        let trust = domain_trust::evaluate(ctx, url).await;

        // Relevance and bias read the same page.
        let page = page::fetch(
            &ctx.http,
            url,
            ctx.config.http.page_timeout(),
            &ctx.config.http.user_agent,
        )
        .await;

        let relevance = match &page {
            Ok(p) => relevance::score(p, query, self.embedder.as_ref(), limits).await,
            Err(e) => Err(page_error(e)),
        };
        let fact = fact_check::score(ctx, query).await;
        let bias = match &page {
            Ok(p) => bias::score(p, self.classifier.as_ref(), limits).await,
            Err(e) => Err(page_error(e)),
        };
        let citation = citation::score(ctx, query).await;

        let policy = ctx.config.scoring.on_signal_failure;
        let mut fallbacks: Vec<SignalKind> = [
            (SignalKind::Safety, trust.safety.fallback),
            (SignalKind::DomainAge, trust.domain_age.fallback),
            (SignalKind::Popularity, trust.popularity.fallback),
            (SignalKind::FactCheck, fact.fallback),
            (SignalKind::Citation, citation.fallback),
        ]
        .into_iter()
        .filter_map(|(k, fell_back)| fell_back.then_some(k))
        .collect();

        let relevance_score = resolve(SignalKind::ContentRelevance, relevance, policy, &mut fallbacks)?;
        let bias_detail = match bias {
            Ok(b) => Some(b),
            Err(e) => {
                resolve(SignalKind::Bias, Err(e), policy, &mut fallbacks)?;
                None
            }
        };

        let raw = RawScores {
            domain_trust: trust.score,
            content_relevance: relevance_score,
            fact_check: fact.score,
            bias: bias_detail.map(|b| b.score).unwrap_or(NEUTRAL_SCORE),
            citation: citation.score,
        };
        let mut report = aggregate(url, &raw)?;
        report.domain_trust_breakdown = Some(trust);
        report.bias_detail = bias_detail;
        report.fallbacks = fallbacks;

        info!(
            %query_id,
            final_score = report.final_score,
            fallbacks = ?report.fallbacks,
            "credibility check finished"
        );
        Ok(report)
    }
}

/// Both page-based signals see the same fetch failure; clone what can be cloned.
fn page_error(e: &SignalError) -> SignalError {
    match e {
        SignalError::EmptyUrl => SignalError::EmptyUrl,
        SignalError::PageStatus(s) => SignalError::PageStatus(*s),
        other => SignalError::Upstream(format!("page fetch failed: {other}")),
    }
}

/// Apply the failure policy to a fallible signal.
fn resolve(
    kind: SignalKind,
    res: Result<f64, SignalError>,
    policy: FailurePolicy,
    fallbacks: &mut Vec<SignalKind>,
) -> Result<f64, ScoreError> {
    match (res, policy) {
        (Ok(v), _) => Ok(v),
        (Err(source), FailurePolicy::Abort) => Err(ScoreError::Signal { kind, source }),
        (Err(e), FailurePolicy::Neutral) => {
            warn!(signal = kind.as_str(), error = %e, "signal failed; using neutral score");
            counter!("signal_fallback_total", "signal" => kind.as_str()).increment(1);
            fallbacks.push(kind);
            Ok(NEUTRAL_SCORE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedSentiment, MapEmbedder, SentimentLabel};
    use std::sync::Arc;

    fn offline_checker() -> CredibilityChecker {
        CredibilityChecker::new(
            CheckerConfig::default(),
            ApiCredentials::default(),
            Arc::new(MapEmbedder::uniform()),
            Arc::new(FixedSentiment::new(SentimentLabel::Neutral, 0.5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_inputs_are_rejected_before_any_request() {
        let c = offline_checker();
        assert!(matches!(
            c.score("   ", "https://example.com").await,
            Err(ScoreError::InvalidInput("query is empty"))
        ));
        assert!(matches!(
            c.score("is it safe?", "").await,
            Err(ScoreError::InvalidInput("url is empty"))
        ));
    }

    #[test]
    fn neutral_policy_substitutes_and_records() {
        let mut fb = Vec::new();
        let v = resolve(
            SignalKind::Bias,
            Err(SignalError::PageStatus(500)),
            FailurePolicy::Neutral,
            &mut fb,
        )
        .unwrap();
        assert_eq!(v, NEUTRAL_SCORE);
        assert_eq!(fb, vec![SignalKind::Bias]);
    }

    #[test]
    fn abort_policy_surfaces_the_signal() {
        let mut fb = Vec::new();
        let err = resolve(
            SignalKind::ContentRelevance,
            Err(SignalError::EmptyUrl),
            FailurePolicy::Abort,
            &mut fb,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScoreError::Signal {
                kind: SignalKind::ContentRelevance,
                ..
            }
        ));
        assert!(fb.is_empty());
    }
}
