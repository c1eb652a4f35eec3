//! Reputation check against Google Safe Browsing
//!
//! Binary lookup: a URL either matches a known threat list or it does not.
//! This adapter never reports `SUSPICIOUS`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::UrlCheck;
use crate::config::Config;
use crate::error::CheckError;
use crate::models::Verdict;

/// Threat categories requested on every lookup
pub const THREAT_TYPES: [&str; 5] = [
    "THREAT_TYPE_UNSPECIFIED",
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

pub const PLATFORM_TYPES: [&str; 1] = ["ANY_PLATFORM"];

pub const NO_MATCH_REASON: &str = "No threats found in the Google Safe Browsing database.";
pub const ERROR_REASON: &str = "Failed to check with Google Safe Browsing.";

// Request/Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindThreatMatchesRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: &'a [&'a str],
    threat_entry_types: &'a [&'a str],
    threat_entries: Vec<ThreatEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

/// Safe Browsing answers `{}` when nothing matched
#[derive(Debug, Default, Deserialize)]
struct FindThreatMatchesResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: String,
}

/// Google Safe Browsing v4 client
pub struct SafeBrowsingCheck {
    endpoint: String,
    api_key: String,
    client_id: String,
    http_client: reqwest::Client,
}

impl SafeBrowsingCheck {
    pub fn new(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: format!(
                "{}/v4/threatMatches:find",
                config.safe_browsing_url.trim_end_matches('/')
            ),
            api_key: config.safe_browsing_api_key.clone(),
            client_id: config.safe_browsing_client_id.clone(),
            http_client,
        }
    }

    /// Query the threat lists. Returns the threat type of the first match.
    async fn lookup(&self, url: &str) -> Result<Option<String>, CheckError> {
        let request = FindThreatMatchesRequest {
            client: ClientInfo {
                client_id: &self.client_id,
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: &THREAT_TYPES,
                platform_types: &PLATFORM_TYPES,
                threat_entry_types: &["URL"],
                threat_entries: vec![ThreatEntry { url }],
            },
        };

        let response = self.http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Safe Browsing error body: {}", body);
            return Err(CheckError::Upstream { status });
        }

        let body: FindThreatMatchesResponse = response.json().await
            .map_err(|e| CheckError::Parse(e.to_string()))?;

        Ok(body.matches.into_iter().next().map(|m| m.threat_type))
    }
}

#[async_trait]
impl UrlCheck for SafeBrowsingCheck {
    fn name(&self) -> &'static str {
        "safe_browsing"
    }

    async fn check(&self, url: &str) -> Verdict {
        match self.lookup(url).await {
            Ok(Some(threat_type)) => {
                tracing::info!("Safe Browsing match: {}", threat_type);
                Verdict::dangerous(format!("Detected as {}.", threat_type))
            }
            Ok(None) => Verdict::safe(NO_MATCH_REASON),
            Err(e) => {
                tracing::error!("Safe Browsing error: {}", e);
                Verdict::error(ERROR_REASON)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
