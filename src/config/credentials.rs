// src/config/credentials.rs
use std::env;

pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_WHOIS_API_KEY: &str = "WHOIS_API_KEY";
pub const ENV_SERP_API_KEY: &str = "SERP_API_KEY";
pub const ENV_HF_API_TOKEN: &str = "HF_API_TOKEN";

/// API keys for the external services. Missing keys are kept empty and surface
/// later as request failures, which each provider absorbs through its fallback.
#[derive(Clone, Default)]
pub struct ApiCredentials {
    /// Safe Browsing + Fact Check Tools.
    pub google_api_key: String,
    pub whois_api_key: String,
    pub serp_api_key: String,
    /// Hosted inference for the sentiment and embedding models.
    pub hf_api_token: String,
}

impl ApiCredentials {
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).unwrap_or_default().trim().to_string();
        let creds = Self {
            google_api_key: read(ENV_GOOGLE_API_KEY),
            whois_api_key: read(ENV_WHOIS_API_KEY),
            serp_api_key: read(ENV_SERP_API_KEY),
            hf_api_token: read(ENV_HF_API_TOKEN),
        };
        // Safe diagnostics: key lengths only
        tracing::info!(
            google_key_len = creds.google_api_key.len(),
            whois_key_len = creds.whois_api_key.len(),
            serp_key_len = creds.serp_api_key.len(),
            hf_token_len = creds.hf_api_token.len(),
            "API credentials loaded"
        );
        creds
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("google_api_key", &mask(&self.google_api_key))
            .field("whois_api_key", &mask(&self.whois_api_key))
            .field("serp_api_key", &mask(&self.serp_api_key))
            .field("hf_api_token", &mask(&self.hf_api_token))
            .finish()
    }
}

fn mask(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
