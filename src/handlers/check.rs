//! URL check handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::{AppState, AppError, AppResult};
use crate::models::{CheckUrlRequest, CheckUrlResponse};

/// Check a URL against both upstreams and return the merged verdict
pub async fn check_url(
    State(state): State<AppState>,
    payload: Result<Json<CheckUrlRequest>, JsonRejection>,
) -> AppResult<Json<CheckUrlResponse>> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    if req.url.trim().is_empty() {
        return Err(AppError::ValidationError("URL must not be empty.".to_string()));
    }
    req.validate()?;

    let result = state.aggregator.aggregate(&req.url).await?;

    Ok(Json(CheckUrlResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, DANGEROUS_REASON};
    use crate::checks::UrlCheck;
    use crate::models::{Verdict, VerdictStatus};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubCheck(VerdictStatus, &'static str);

    #[async_trait]
    impl UrlCheck for StubCheck {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn check(&self, _url: &str) -> Verdict {
            Verdict::new(self.0, self.1)
        }
    }

    struct PanickingCheck;

    #[async_trait]
    impl UrlCheck for PanickingCheck {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn check(&self, _url: &str) -> Verdict {
            panic!("adapter bug");
        }
    }

    fn app_with(reputation: Arc<dyn UrlCheck>, heuristic: Arc<dyn UrlCheck>) -> Router {
        crate::create_router(AppState {
            aggregator: Aggregator::new(reputation, heuristic),
        })
    }

    fn app() -> Router {
        app_with(
            Arc::new(StubCheck(VerdictStatus::Dangerous, "Detected as MALWARE.")),
            Arc::new(StubCheck(VerdictStatus::Suspicious, "Odd subdomain.")),
        )
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/check-url")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_check_url_returns_contract_shape() {
        let (status, body) = post_json(app(), r#"{"url":"http://examp1e.com/login"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "http://examp1e.com/login");
        assert_eq!(body["safeBrowse"]["status"], "DANGEROUS");
        assert_eq!(body["safeBrowse"]["reason"], "Detected as MALWARE.");
        assert_eq!(body["gemini"]["status"], "SUSPICIOUS");
        assert_eq!(body["gemini"]["reason"], "Odd subdomain.");
        assert_eq!(body["finalStatus"], "DANGEROUS");
        assert_eq!(body["finalReason"], DANGEROUS_REASON);
        assert!(body["checkedAt"].is_string());
    }

    #[tokio::test]
    async fn test_total_outage_still_answers() {
        let app = app_with(
            Arc::new(StubCheck(VerdictStatus::Error, "Failed to check with Google Safe Browsing.")),
            Arc::new(StubCheck(VerdictStatus::Error, "Failed to analyze with the Gemini API.")),
        );
        let (status, body) = post_json(app, r#"{"url":"https://example.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["safeBrowse"]["status"], "ERROR");
        assert_eq!(body["gemini"]["status"], "ERROR");
        assert_eq!(body["finalStatus"], "SAFE");
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        for payload in [r#"{"url":""}"#, r#"{"url":"   "}"#, r#"{}"#] {
            let (status, body) = post_json(app(), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
            assert_eq!(body["error"], "URL must not be empty.");
            assert_eq!(body["status"], 400);
        }
    }

    #[tokio::test]
    async fn test_overlong_url_rejected() {
        let url = format!("https://example.com/{}", "a".repeat(2100));
        let payload = serde_json::json!({ "url": url }).to_string();
        let (status, _) = post_json(app(), &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let (status, body) = post_json(app(), "url=https://example.com").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_aggregator_failure_is_internal_error() {
        let app = app_with(
            Arc::new(PanickingCheck),
            Arc::new(StubCheck(VerdictStatus::Safe, "Fine.")),
        );
        let (status, body) = post_json(app, r#"{"url":"https://example.com"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "linkshield");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
