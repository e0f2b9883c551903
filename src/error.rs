//! Typed errors for the signal providers, the model backends and the scorer.

use crate::signals::SignalKind;

/// Failure of a single signal provider.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("URL is empty")]
    EmptyUrl,

    #[error("unable to access URL (HTTP {0})")]
    PageStatus(u16),

    #[error("not enough content to analyze ({chars} chars)")]
    NotEnoughContent { chars: usize },

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("model: {0}")]
    Model(#[from] ModelError),
}

/// Failure of a pretrained model backend.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode inference output: {0}")]
    Decode(String),

    #[error("model returned no output")]
    EmptyOutput,
}

/// Failure of a whole scoring call.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("{kind} signal failed: {source}")]
    Signal {
        kind: SignalKind,
        #[source]
        source: SignalError,
    },

    #[error("{kind} score {value} is outside 0..=100")]
    OutOfRange { kind: &'static str, value: f64 },
}
