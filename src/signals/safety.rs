//! Google Safe Browsing threat-match lookup.

use serde::{Deserialize, Serialize};

use super::{decode_json, ensure_success, or_fallback, Reading, SignalContext, SignalKind, NEUTRAL_SCORE};
use crate::error::SignalError;

pub const SAFE_SCORE: f64 = 100.0;
pub const UNSAFE_SCORE: f64 = 1.0;

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: [&'a str; 1],
    threat_entry_types: [&'a str; 1],
    threat_entries: [ThreatEntry<'a>; 1],
}

#[derive(Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct FindResponse {
    matches: Option<serde_json::Value>,
}

/// 1 when the URL matches any threat list, 100 otherwise; 50 if the lookup fails.
pub async fn score(ctx: &SignalContext, url: &str) -> Reading {
    or_fallback(SignalKind::Safety, lookup(ctx, url).await, NEUTRAL_SCORE)
}

pub async fn lookup(ctx: &SignalContext, url: &str) -> Result<f64, SignalError> {
    let body = FindRequest {
        client: ClientInfo {
            client_id: &ctx.config.http.client_id,
            client_version: env!("CARGO_PKG_VERSION"),
        },
        threat_info: ThreatInfo {
            threat_types: &THREAT_TYPES,
            platform_types: ["ANY_PLATFORM"],
            threat_entry_types: ["URL"],
            threat_entries: [ThreatEntry { url }],
        },
    };

    let resp = ctx
        .http
        .post(&ctx.config.endpoints.safe_browsing)
        .query(&[("key", ctx.creds.google_api_key.as_str())])
        .json(&body)
        .send()
        .await?;
    let resp: FindResponse = decode_json(ensure_success(resp).await?).await?;

    // Safe Browsing answers `{}` for a clean URL.
    if resp.matches.is_some() {
        Ok(UNSAFE_SCORE)
    } else {
        Ok(SAFE_SCORE)
    }
}
