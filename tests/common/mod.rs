// tests/common/mod.rs
//
// Shared fixtures: one wiremock server plays every external API plus the page
// under evaluation, and the checker is pointed at it through its config.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use credibility_checker::config::{ApiCredentials, CheckerConfig, FailurePolicy};
use credibility_checker::models::{FixedSentiment, MapEmbedder, SentimentLabel};
use credibility_checker::signals::extract_domain;
use credibility_checker::CredibilityChecker;

pub const QUERY: &str =
    "I have just been on an international flight, can i come back home to hold my 1 month old newborn?";

pub const ARTICLE_HTML: &str = r#"<html><head><title>When is it safe to travel with a newborn?</title></head>
<body>
<h1>When is it safe to travel with a newborn?</h1>
<p>Most pediatricians recommend waiting until a baby is at least a few months old before flying.</p>
<p>After an international flight, wash your hands, change clothes and watch for symptoms before holding a newborn.</p>
</body></html>"#;

pub fn article_url(server: &MockServer) -> String {
    format!("{}/article", server.uri())
}

pub fn config_for(server: &MockServer, policy: FailurePolicy) -> CheckerConfig {
    let mut cfg = CheckerConfig::default();
    cfg.endpoints.safe_browsing = format!("{}/safe", server.uri());
    cfg.endpoints.fact_check = format!("{}/facts", server.uri());
    cfg.endpoints.whois = format!("{}/whois", server.uri());
    cfg.endpoints.serpapi = format!("{}/serp", server.uri());
    cfg.endpoints.inference = format!("{}/inference", server.uri());
    cfg.http.timeout_secs = 5;
    cfg.scoring.on_signal_failure = policy;
    cfg
}

pub fn test_creds() -> ApiCredentials {
    ApiCredentials {
        google_api_key: "g-test".into(),
        whois_api_key: "w-test".into(),
        serp_api_key: "s-test".into(),
        hf_api_token: String::new(),
    }
}

/// Query embeds to [1,0] and page text to [0.8,0.6]: relevance 80.
/// Classifier is 70% confident: bias 70.
pub fn checker_for(server: &MockServer, policy: FailurePolicy) -> CredibilityChecker {
    let embedder = MapEmbedder::new(vec![0.8, 0.6]).with(QUERY, vec![1.0, 0.0]);
    let classifier = FixedSentiment::new(SentimentLabel::Positive, 0.7);
    CredibilityChecker::new(
        config_for(server, policy),
        test_creds(),
        Arc::new(embedder),
        Arc::new(classifier),
    )
    .expect("build checker")
}

fn organic(n: usize) -> serde_json::Value {
    let rows: Vec<_> = (0..n)
        .map(|i| json!({ "position": i + 1, "title": format!("result {i}") }))
        .collect();
    json!({ "organic_results": rows })
}

pub async fn mount_page(server: &MockServer, status: u16, html: &str) {
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(status).set_body_string(html))
        .mount(server)
        .await;
}

/// Every service answers so that the raw scores come out as
/// domain_trust 100, relevance 80, fact_check 100, bias 70, citation 40.
pub async fn mount_happy_path(server: &MockServer) {
    let domain = extract_domain(&article_url(server)).to_string();

    Mock::given(method("POST"))
        .and(path("/safe"))
        .and(query_param("key", "g-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/whois"))
        .and(query_param("domainName", domain.as_str()))
        .and(query_param("outputFormat", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "WhoisRecord": { "createdDate": "1997-03-03T05:00:00Z" }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/serp"))
        .and(query_param("engine", "google"))
        .and(query_param("q", format!("site:{domain}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic(10)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/serp"))
        .and(query_param("engine", "google_scholar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic(4)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/facts"))
        .and(query_param("key", "g-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "claims": [
                { "claimReview": [ { "textualRating": "False" } ] },
                { "claimReview": [ { "textualRating": "Mostly True" } ] }
            ]
        })))
        .mount(server)
        .await;

    mount_page(server, 200, ARTICLE_HTML).await;
}

/// Safety, WHOIS, SerpAPI and Fact Check all answer 500.
pub async fn mount_broken_apis(server: &MockServer) {
    for (m, p) in [
        ("POST", "/safe"),
        ("GET", "/whois"),
        ("GET", "/serp"),
        ("GET", "/facts"),
    ] {
        Mock::given(method(m))
            .and(path(p))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(server)
            .await;
    }
}
