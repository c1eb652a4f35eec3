//! Upstream URL checks
//!
//! Each adapter wraps one external classifier and always answers with a
//! [`Verdict`]. Upstream failures are logged and folded into an `ERROR`
//! verdict here; they never reach the aggregator as errors.
//!
//! ## Structure
//! - `safe_browsing`: reputation lookup (Google Safe Browsing v4)
//! - `gemini`: heuristic judgment (Gemini generateContent)
//! - `prompt`: prompt template for the heuristic judgment

pub mod safe_browsing;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::models::Verdict;

pub use safe_browsing::SafeBrowsingCheck;
pub use gemini::GeminiCheck;

/// A single URL classifier
#[async_trait]
pub trait UrlCheck: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Classify `url`. Must not fail: errors become an `ERROR` verdict.
    async fn check(&self, url: &str) -> Verdict;
}
