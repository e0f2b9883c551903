// src/models/mod.rs
//! Pretrained model boundary: sentence embeddings and sentiment classification.
//!
//! One inference call per input. Backends are chosen once at startup and
//! injected into `CredibilityChecker`.

pub mod hf;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{ApiCredentials, CheckerConfig};
use crate::error::ModelError;

pub use hf::{HfEmbedder, HfInference, HfSentiment};
pub use mock::{FixedSentiment, MapEmbedder};

#[async_trait]
pub trait Embedder: Send + Sync {
    /// One sentence-level embedding for `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError>;
    fn name(&self) -> &str;
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Top label and its confidence for `text`.
    async fn classify(&self, text: &str) -> Result<Sentiment, ModelError>;
    fn name(&self) -> &str;
}

pub type DynEmbedder = Arc<dyn Embedder>;
pub type DynClassifier = Arc<dyn SentimentClassifier>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Map a raw model label. The cardiffnlp checkpoint emits `LABEL_0..2`.
    pub fn from_model_label(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NEGATIVE" | "NEG" | "LABEL_0" => Self::Negative,
            "POSITIVE" | "POS" | "LABEL_2" => Self::Positive,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Confidence of `label`, in [0,1].
    pub score: f32,
}

/// Cosine similarity; 0.0 when either vector has zero norm or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Factory: build model backends according to environment and config.
///
/// * If `MODEL_BACKEND=mock`, returns deterministic offline models.
/// * Else uses the hosted inference API with `HF_API_TOKEN`.
pub fn build_models(cfg: &CheckerConfig, creds: &ApiCredentials) -> anyhow::Result<(DynEmbedder, DynClassifier)> {
    if std::env::var("MODEL_BACKEND")
        .map(|v| v.eq_ignore_ascii_case("mock"))
        .unwrap_or(false)
    {
        tracing::warn!("MODEL_BACKEND=mock: using offline mock models");
        return Ok((
            Arc::new(MapEmbedder::uniform()),
            Arc::new(FixedSentiment::new(SentimentLabel::Neutral, 0.5)),
        ));
    }

    let inference = HfInference::new(
        &cfg.endpoints.inference,
        &creds.hf_api_token,
        cfg.http.timeout(),
    )?;
    let embedder = HfEmbedder::new(inference.clone(), &cfg.models.embedding);
    let classifier = HfSentiment::new(inference, &cfg.models.sentiment);
    Ok((Arc::new(embedder), Arc::new(classifier)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.8, 0.6]) - 0.8).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn model_labels_map_to_sentiment() {
        assert_eq!(SentimentLabel::from_model_label("LABEL_0"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("label_1"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_model_label("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("whatever"), SentimentLabel::Neutral);
    }
}
