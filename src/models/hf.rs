//! Hosted inference backend (Hugging Face Inference API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Embedder, Sentiment, SentimentClassifier, SentimentLabel};
use crate::error::ModelError;

/// Shared HTTP plumbing for both model kinds.
#[derive(Clone)]
pub struct HfInference {
    http: Client,
    base_url: String,
    token: String,
}

impl HfInference {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("credibility-checker/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn post_inputs<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        input: &str,
    ) -> Result<T, ModelError> {
        #[derive(Serialize)]
        struct Options {
            wait_for_model: bool,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            inputs: &'a str,
            options: Options,
        }

        let mut req = self.http.post(format!("{}{}", self.base_url, path)).json(&Req {
            inputs: input,
            options: Options {
                wait_for_model: true,
            },
        });
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ModelError::Decode(e.to_string()))
    }
}

pub struct HfEmbedder {
    inference: HfInference,
    model: String,
}

impl HfEmbedder {
    pub fn new(inference: HfInference, model: &str) -> Self {
        Self {
            inference,
            model: model.to_string(),
        }
    }
}

/// Feature-extraction output comes back either pooled or per token.
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbeddingOut {
    Pooled(Vec<f32>),
    Tokens(Vec<Vec<f32>>),
    Batch(Vec<Vec<Vec<f32>>>),
}

impl EmbeddingOut {
    fn into_sentence(self) -> Result<Vec<f32>, ModelError> {
        let v = match self {
            EmbeddingOut::Pooled(v) => v,
            EmbeddingOut::Tokens(rows) => mean_pool(&rows),
            EmbeddingOut::Batch(mut batch) => {
                if batch.is_empty() {
                    return Err(ModelError::EmptyOutput);
                }
                mean_pool(&batch.swap_remove(0))
            }
        };
        if v.is_empty() {
            Err(ModelError::EmptyOutput)
        } else {
            Ok(v)
        }
    }
}

fn mean_pool(rows: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut acc = vec![0.0f32; first.len()];
    for row in rows {
        for (a, x) in acc.iter_mut().zip(row) {
            *a += x;
        }
    }
    let n = rows.len() as f32;
    acc.iter_mut().for_each(|a| *a /= n);
    acc
}

#[async_trait]
impl Embedder for HfEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let path = format!("/pipeline/feature-extraction/{}", self.model);
        let out: EmbeddingOut = self.inference.post_inputs(&path, text).await?;
        out.into_sentence()
    }

    fn name(&self) -> &str {
        &self.model
    }
}

pub struct HfSentiment {
    inference: HfInference,
    model: String,
}

impl HfSentiment {
    pub fn new(inference: HfInference, model: &str) -> Self {
        Self {
            inference,
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationOut {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[async_trait]
impl SentimentClassifier for HfSentiment {
    async fn classify(&self, text: &str) -> Result<Sentiment, ModelError> {
        let path = format!("/models/{}", self.model);
        let out: ClassificationOut = self.inference.post_inputs(&path, text).await?;
        let candidates = match out {
            ClassificationOut::Nested(mut v) if !v.is_empty() => v.swap_remove(0),
            ClassificationOut::Nested(_) => Vec::new(),
            ClassificationOut::Flat(v) => v,
        };
        let top = candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(ModelError::EmptyOutput)?;
        Ok(Sentiment {
            label: SentimentLabel::from_model_label(&top.label),
            score: top.score.clamp(0.0, 1.0),
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
