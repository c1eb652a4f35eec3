//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    ValidationError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<crate::aggregator::AggregateError> for AppError {
    fn from(err: crate::aggregator::AggregateError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Failure inside a single upstream check.
///
/// Never leaves the adapter: every variant is folded into an `ERROR` verdict.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unrecognized status label: {0:?}")]
    UnknownStatus(String),

    #[error("upstream reply was empty")]
    EmptyReply,
}
