//! Deterministic offline models for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;

use super::{Embedder, Sentiment, SentimentClassifier, SentimentLabel};
use crate::error::ModelError;

/// Returns a fixed vector per exact input text, `default` otherwise.
#[derive(Clone, Debug)]
pub struct MapEmbedder {
    pub entries: HashMap<String, Vec<f32>>,
    pub default: Vec<f32>,
}

impl MapEmbedder {
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    /// Every text maps to the same vector, so relevance is always 100.
    pub fn uniform() -> Self {
        Self::new(vec![1.0, 1.0, 1.0])
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.entries.insert(text.to_string(), vector);
        self
    }
}

#[async_trait]
impl Embedder for MapEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        Ok(self.entries.get(text).unwrap_or(&self.default).clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Classifies every input the same way.
#[derive(Clone, Copy, Debug)]
pub struct FixedSentiment {
    pub fixed: Sentiment,
}

impl FixedSentiment {
    pub fn new(label: SentimentLabel, score: f32) -> Self {
        Self {
            fixed: Sentiment { label, score },
        }
    }
}

#[async_trait]
impl SentimentClassifier for FixedSentiment {
    async fn classify(&self, _text: &str) -> Result<Sentiment, ModelError> {
        Ok(self.fixed)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
