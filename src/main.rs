//! LinkShield Server
//!
//! Checks a URL against two independent classifiers and merges their
//! verdicts into one answer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         LINKSHIELD                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /check-url (Axum)                                      │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌────────────┐   spawn    ┌──────────────────────────────┐  │
//! │  │ Aggregator │──────────▶ │ SafeBrowsingCheck (reputation)│ │
//! │  │  (merge)   │──────────▶ │ GeminiCheck (heuristic)       │ │
//! │  └────────────┘   join     └──────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod checks;
mod aggregator;
mod handlers;
mod error;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aggregator::Aggregator;
use checks::{GeminiCheck, SafeBrowsingCheck};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "linkshield=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("LinkShield server starting...");
    tracing::info!("Gemini model: {}", config.gemini_model);

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        if config.is_production() {
            anyhow::bail!("missing credentials: {}", missing.join(", "));
        }
        tracing::warn!("Missing credentials ({}); affected checks will report ERROR", missing.join(", "));
    }

    // One HTTP client shared by both checks
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let aggregator = Aggregator::new(
        Arc::new(SafeBrowsingCheck::new(&config, http_client.clone())),
        Arc::new(GeminiCheck::new(&config, http_client)),
    );

    // Build application state
    let state = AppState { aggregator };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/check-url", post(handlers::check::check_url))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
