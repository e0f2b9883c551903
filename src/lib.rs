// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod checker;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod page;
pub mod rating;
pub mod scoring;
pub mod signals;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::checker::CredibilityChecker;
pub use crate::error::{ModelError, ScoreError, SignalError};
pub use crate::rating::{star_rating, CredibilityResult};
pub use crate::scoring::{aggregate, RawScores, ScoreReport, WEIGHTS};
