// src/page.rs
//! Fetch the page under evaluation and pull text out of its HTML.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::error::SignalError;

static P_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Raw page as fetched. The status is kept so each signal can decide whether
/// a non-200 body is still usable.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub status: u16,
    pub html: String,
}

impl Page {
    pub fn from_html(url: &str, status: u16, html: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            status,
            html: html.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Text of every `<p>` element, joined by a single space.
    pub fn paragraph_text(&self) -> String {
        let doc = Html::parse_document(&self.html);
        doc.select(&P_SELECTOR)
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All text nodes of the document, in order.
    pub fn full_text(&self) -> String {
        let doc = Html::parse_document(&self.html);
        doc.root_element().text().collect::<String>()
    }
}

/// GET the page with the page timeout and user agent. Any HTTP status counts as fetched.
pub async fn fetch(
    http: &Client,
    url: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<Page, SignalError> {
    if url.trim().is_empty() {
        return Err(SignalError::EmptyUrl);
    }
    let resp = http
        .get(url)
        .timeout(timeout)
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await?;
    let status = resp.status().as_u16();
    let html = resp.text().await?;
    tracing::debug!(status, bytes = html.len(), "page fetched");
    Ok(Page::from_html(url, status, html))
}

/// First `max_chars` characters (not bytes).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// First `max_words` whitespace-separated words, re-joined by single spaces.
pub fn truncate_words(s: &str, max_words: usize) -> String {
    s.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
