//! Bias/sentiment of the page text.
//!
//! The returned sub-score is the classifier's confidence in its top label,
//! scaled to 0..=100. The label-dependent lean value is computed and reported
//! alongside, but it does not feed the score.

use serde::Serialize;

use crate::config::ModelSettings;
use crate::error::SignalError;
use crate::models::{SentimentClassifier, SentimentLabel};
use crate::page::{truncate_chars, truncate_words, Page};
use crate::scoring::round2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasReading {
    /// Sub-score used by the aggregator: confidence × 100, two decimals.
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
    /// Negative text leans 60..100, positive 0..40, neutral 50.
    pub lean: f64,
}

pub async fn score(
    page: &Page,
    classifier: &dyn SentimentClassifier,
    limits: &ModelSettings,
) -> Result<BiasReading, SignalError> {
    if !page.is_ok() {
        return Err(SignalError::PageStatus(page.status));
    }
    let text = page.full_text();
    let chars = text.chars().count();
    if chars < limits.bias_min_chars {
        return Err(SignalError::NotEnoughContent { chars });
    }

    // Keep the input under the classifier's token limit.
    let text = truncate_chars(&text, limits.bias_max_chars);
    let text = truncate_words(&text, limits.bias_max_words);

    let sentiment = classifier.classify(&text).await?;
    let confidence = sentiment.score as f64;
    Ok(BiasReading {
        score: round2(confidence * 100.0),
        label: sentiment.label,
        confidence,
        lean: lean(sentiment.label, confidence),
    })
}

pub fn lean(label: SentimentLabel, confidence: f64) -> f64 {
    match label {
        SentimentLabel::Negative => 60.0 + (1.0 - confidence) * 40.0,
        SentimentLabel::Positive => 40.0 - confidence * 40.0,
        SentimentLabel::Neutral => 50.0,
    }
}
