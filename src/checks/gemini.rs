//! Heuristic judgment via Gemini
//!
//! The model is prompted to reason about the URL's structure and answer with
//! a JSON object. The reply is untrusted text: fences are stripped, the JSON is
//! parsed, and anything that does not fit the expected shape becomes an
//! `ERROR` verdict.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::build_prompt;
use super::UrlCheck;
use crate::config::Config;
use crate::error::CheckError;
use crate::models::{Verdict, VerdictStatus};

pub const ERROR_REASON: &str = "Failed to analyze with the Gemini API.";

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Shape the model is asked to answer with
#[derive(Debug, Deserialize)]
struct JudgmentReply {
    status: String,
    #[serde(default)]
    reason: String,
}

/// Gemini generateContent client
pub struct GeminiCheck {
    endpoint: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl GeminiCheck {
    pub fn new(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.gemini_url.trim_end_matches('/'),
                config.gemini_model
            ),
            api_key: config.gemini_api_key.clone(),
            http_client,
        }
    }

    /// Send the prompt, return the model's reply text
    async fn generate(&self, prompt: &str) -> Result<String, CheckError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CheckError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Gemini error body: {}", body);
            return Err(CheckError::Upstream { status });
        }

        let body: GenerateContentResponse = response.json().await
            .map_err(|e| CheckError::Parse(e.to_string()))?;

        let text: String = body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CheckError::EmptyReply);
        }
        Ok(text)
    }
}

#[async_trait]
impl UrlCheck for GeminiCheck {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn check(&self, url: &str) -> Verdict {
        let prompt = build_prompt(url);

        let result = self.generate(&prompt).await
            .and_then(|text| parse_reply(&text));

        match result {
            Ok(verdict) => {
                tracing::info!("Gemini judgment: {}", verdict.status);
                verdict
            }
            Err(e) => {
                tracing::error!("Gemini error: {}", e);
                Verdict::error(ERROR_REASON)
            }
        }
    }
}

// ============================================================================
// REPLY PARSING
// ============================================================================

/// Parse the model's reply into a verdict
pub fn parse_reply(text: &str) -> Result<Verdict, CheckError> {
    let reply = extract_json(text)?;

    let status = VerdictStatus::from_label(&reply.status)
        .ok_or_else(|| CheckError::UnknownStatus(reply.status.clone()))?;

    let reason = reply.reason.trim();
    if reason.is_empty() {
        return Err(CheckError::Parse("reply has no reason".to_string()));
    }

    Ok(Verdict::new(status, reason))
}

fn extract_json(text: &str) -> Result<JudgmentReply, CheckError> {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<JudgmentReply>(cleaned) {
        Ok(reply) => Ok(reply),
        Err(first_err) => {
            // Fall back to the outermost braces when the model wraps the
            // object in prose
            let start = cleaned.find('{');
            let end = cleaned.rfind('}');
            match (start, end) {
                (Some(s), Some(e)) if s < e => serde_json::from_str(&cleaned[s..=e])
                    .map_err(|e| CheckError::Parse(format!("{} in reply {}", e, truncate(text, 200)))),
                _ => Err(CheckError::Parse(format!("{} in reply {}", first_err, truncate(text, 200)))),
            }
        }
    }
}

/// Strip markdown code fences (```json ... ```) from the reply
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Skip the optional language tag on the opening line
        let after_open = match rest.find('\n') {
            Some(nl) => &rest[nl + 1..],
            None => rest,
        };
        return match after_open.rfind("```") {
            Some(close) => after_open[..close].trim(),
            None => after_open.trim(),
        };
    }
    text
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
