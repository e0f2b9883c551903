//! Credibility Checker: binary entrypoint.
//! Boots the Axum HTTP server with the form shell, JSON endpoint and metrics.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing::warn;

use credibility_checker::api::{self, AppState};
use credibility_checker::metrics::Metrics;
use credibility_checker::telemetry::init_tracing;
use credibility_checker::CredibilityChecker;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // No-op when the runtime already installed a subscriber.
    init_tracing();

    let checker = CredibilityChecker::from_env()?;
    let state = AppState {
        checker: Arc::new(checker),
    };
    let mut router = api::router(state);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "metrics disabled"),
    }

    Ok(router.into())
}
