//! HTTP surface: the two-field form shell, a JSON scoring endpoint and health.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::checker::CredibilityChecker;
use crate::error::ScoreError;
use crate::rating::CredibilityResult;
use crate::scoring::ScoreReport;

pub const MISSING_INPUT_WARNING: &str = "Please enter both a query and a URL.";
pub const SUCCESS_BANNER: &str = "Credibility Score Calculated!";

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<CredibilityChecker>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/check", post(check_form))
        .route("/api/score", post(score_json))
        .route("/health", get(|| async { "ok" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckReq {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub url: String,
}

impl CheckReq {
    fn is_complete(&self) -> bool {
        !self.query.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Serialize)]
struct ScoreResp {
    #[serde(flatten)]
    result: CredibilityResult,
    report: ScoreReport,
}

#[derive(Serialize)]
struct ErrorResp {
    error: String,
}

async fn form_page() -> Html<String> {
    Html(render_page(&CheckReq::default(), None))
}

async fn check_form(State(state): State<AppState>, Form(req): Form<CheckReq>) -> Html<String> {
    if !req.is_complete() {
        let body = format!(r#"<p class="warning">⚠️ {MISSING_INPUT_WARNING}</p>"#);
        return Html(render_page(&req, Some(body)));
    }

    let body = match state.checker.credibility_score(&req.query, &req.url).await {
        Ok(result) => render_result(&result),
        Err(e) => format!(
            r#"<p class="error">Could not score this page: {}</p>"#,
            html_escape::encode_text(&e.to_string())
        ),
    };
    Html(render_page(&req, Some(body)))
}

async fn score_json(State(state): State<AppState>, Json(req): Json<CheckReq>) -> Response {
    if !req.is_complete() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, MISSING_INPUT_WARNING.to_string());
    }
    match state.checker.score(&req.query, &req.url).await {
        Ok(report) => Json(ScoreResp {
            result: CredibilityResult::from_score(report.final_score),
            report,
        })
        .into_response(),
        Err(e @ ScoreError::InvalidInput(_)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => error_response(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResp { error })).into_response()
}

fn render_result(result: &CredibilityResult) -> String {
    format!(
        r#"<p class="success">✅ {SUCCESS_BANNER}</p>
<p><strong>Score:</strong> {} / 100</p>
<p><strong>Ratings:</strong> {}</p>
<p><strong>Explanation:</strong> {}</p>"#,
        result.display_score(),
        html_escape::encode_text(&result.ratings),
        html_escape::encode_text(&result.explanation),
    )
}

fn render_page(req: &CheckReq, body: Option<String>) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Website Credibility Checker</title></head>
<body>
<h1>🌐 Website Credibility Checker</h1>
<form method="post" action="/check">
<label>🔎 Enter your query (e.g., 'Is climate change real?'):<br>
<input type="text" name="query" size="80" value="{}"></label><br>
<label>🌍 Enter a website URL:<br>
<input type="text" name="url" size="80" value="{}"></label><br>
<button type="submit">Check Credibility</button>
</form>
{}
</body>
</html>
"#,
        html_escape::encode_double_quoted_attribute(&req.query),
        html_escape::encode_double_quoted_attribute(&req.url),
        body.unwrap_or_default(),
    )
}
