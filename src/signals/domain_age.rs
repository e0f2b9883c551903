//! Domain registration age from the WhoisXML API.
//!
//! Older domains score higher: ten points per year, capped at 100.

use chrono::Datelike;
use serde::Deserialize;

use super::{
    decode_json, ensure_success, extract_domain, or_fallback, Reading, SignalContext, SignalKind,
    NEUTRAL_SCORE,
};
use crate::error::SignalError;

#[derive(Deserialize)]
struct WhoisResponse {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<WhoisRecord>,
}

#[derive(Deserialize)]
struct WhoisRecord {
    #[serde(rename = "createdDate")]
    created_date: Option<String>,
}

pub async fn score(ctx: &SignalContext, url: &str) -> Reading {
    let year = chrono::Utc::now().year();
    or_fallback(SignalKind::DomainAge, lookup(ctx, url, year).await, NEUTRAL_SCORE)
}

pub async fn lookup(ctx: &SignalContext, url: &str, current_year: i32) -> Result<f64, SignalError> {
    let domain = extract_domain(url);
    let resp = ctx
        .http
        .get(&ctx.config.endpoints.whois)
        .query(&[
            ("apiKey", ctx.creds.whois_api_key.as_str()),
            ("domainName", domain),
            ("outputFormat", "json"),
        ])
        .send()
        .await?;
    let resp: WhoisResponse = decode_json(ensure_success(resp).await?).await?;

    let created = resp
        .whois_record
        .and_then(|r| r.created_date)
        .ok_or_else(|| SignalError::InvalidRecord(format!("no createdDate for {domain}")))?;
    age_score(&created, current_year)
}

/// Score a WHOIS `createdDate` such as `1997-03-03T05:00:00Z`.
/// Only the year (text before the first `-`) is used.
pub fn age_score(created_date: &str, current_year: i32) -> Result<f64, SignalError> {
    let year_part = created_date.split('-').next().unwrap_or_default().trim();
    let year: i32 = year_part
        .parse()
        .map_err(|_| SignalError::InvalidRecord(format!("unparsable createdDate {created_date:?}")))?;
    let age = (current_year - year).max(0) as f64;
    Ok((age * 10.0).min(100.0))
}
