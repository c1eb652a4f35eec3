//! Scan request/response model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::verdict::{FinalStatus, Verdict};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckUrlRequest {
    /// Missing field deserializes to empty and is rejected by the handler
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL must be between 1 and 2048 characters"))]
    pub url: String,
}

/// Merged outcome of one scan. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub input_url: String,
    pub reputation_verdict: Verdict,
    pub heuristic_verdict: Verdict,
    pub final_status: FinalStatus,
    pub final_reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUrlResponse {
    pub url: String,
    pub safe_browse: Verdict,
    pub gemini: Verdict,
    pub final_status: FinalStatus,
    pub final_reason: String,
    pub checked_at: DateTime<Utc>,
}

impl From<AggregateResult> for CheckUrlResponse {
    fn from(result: AggregateResult) -> Self {
        Self {
            url: result.input_url,
            safe_browse: result.reputation_verdict,
            gemini: result.heuristic_verdict,
            final_status: result.final_status,
            final_reason: result.final_reason,
            checked_at: Utc::now(),
        }
    }
}
