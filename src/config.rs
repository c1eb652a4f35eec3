//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Google Safe Browsing API key
    pub safe_browsing_api_key: String,

    /// Safe Browsing base URL (overridable for tests and proxies)
    pub safe_browsing_url: String,

    /// Client id reported to Safe Browsing
    pub safe_browsing_client_id: String,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini base URL
    pub gemini_url: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3150),

            safe_browsing_api_key: env::var("GOOGLE_SAFE_BROWSING_API_KEY")
                .unwrap_or_default(),

            safe_browsing_url: env::var("SAFE_BROWSING_URL")
                .unwrap_or_else(|_| "https://safebrowsing.googleapis.com".to_string()),

            safe_browsing_client_id: env::var("SAFE_BROWSING_CLIENT_ID")
                .unwrap_or_else(|_| "linkshield".to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .unwrap_or_default(),

            gemini_url: env::var("GEMINI_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Names of the credentials that are not set
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.safe_browsing_api_key.trim().is_empty() {
            missing.push("GOOGLE_SAFE_BROWSING_API_KEY");
        }
        if self.gemini_api_key.trim().is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        missing
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing both upstreams at the given base URLs
    pub fn for_tests(safe_browsing_url: &str, gemini_url: &str) -> Self {
        Self {
            port: 0,
            safe_browsing_api_key: "sb-test-key".to_string(),
            safe_browsing_url: safe_browsing_url.to_string(),
            safe_browsing_client_id: "linkshield-test".to_string(),
            gemini_api_key: "gemini-test-key".to_string(),
            gemini_url: gemini_url.to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            request_timeout_secs: 5,
            environment: "test".to_string(),
        }
    }
}
