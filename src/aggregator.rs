//! Verdict Aggregator
//!
//! Runs the reputation and heuristic checks concurrently and merges their
//! verdicts into one final status.
//!
//! ## Merge policy (first rule that fires wins)
//! 1. Either verdict `DANGEROUS` → `DANGEROUS`
//! 2. Heuristic verdict `SUSPICIOUS` → `SUSPICIOUS`
//! 3. Otherwise → `SAFE`
//!
//! An `ERROR` verdict counts as no evidence. When both upstreams fail the
//! result is `SAFE`; this is the existing behavior and is kept as-is, but
//! callers should know it means "nothing was actually checked".

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::checks::UrlCheck;
use crate::models::{AggregateResult, FinalStatus, Verdict, VerdictStatus};

pub const DANGEROUS_REASON: &str =
    "This URL was detected as DANGEROUS. It is strongly recommended not to visit it.";
pub const SUSPICIOUS_REASON: &str =
    "This URL is suspected of being potentially unsafe. Please proceed with caution.";
pub const SAFE_REASON: &str = "This URL appears to be safe based on both checks.";

/// Aggregation failures outside the checks' own error handling
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("{check} task failed: {source}")]
    TaskFailed {
        check: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Merge two verdicts into the final status and its fixed reason
pub fn merge(reputation: &Verdict, heuristic: &Verdict) -> (FinalStatus, &'static str) {
    if reputation.is(VerdictStatus::Dangerous) || heuristic.is(VerdictStatus::Dangerous) {
        (FinalStatus::Dangerous, DANGEROUS_REASON)
    } else if heuristic.is(VerdictStatus::Suspicious) {
        (FinalStatus::Suspicious, SUSPICIOUS_REASON)
    } else {
        (FinalStatus::Safe, SAFE_REASON)
    }
}

/// Fan-out/fan-in over the two checks
#[derive(Clone)]
pub struct Aggregator {
    reputation: Arc<dyn UrlCheck>,
    heuristic: Arc<dyn UrlCheck>,
}

impl Aggregator {
    pub fn new(reputation: Arc<dyn UrlCheck>, heuristic: Arc<dyn UrlCheck>) -> Self {
        Self { reputation, heuristic }
    }

    /// Check `url` with both adapters and merge the results.
    ///
    /// Both checks are started before either is awaited. A task that panics
    /// does not cancel the other one; it is reported as `AggregateError` once
    /// both have settled.
    pub async fn aggregate(&self, url: &str) -> Result<AggregateResult, AggregateError> {
        let span = tracing::info_span!("scan", scan_id = %Uuid::new_v4());

        async {
            tracing::debug!("Scanning {}", url);

            let reputation_task = spawn_check(self.reputation.clone(), url);
            let heuristic_task = spawn_check(self.heuristic.clone(), url);

            let reputation = reputation_task.await;
            let heuristic = heuristic_task.await;

            let reputation_verdict = reputation.map_err(|source| AggregateError::TaskFailed {
                check: self.reputation.name(),
                source,
            })?;
            let heuristic_verdict = heuristic.map_err(|source| AggregateError::TaskFailed {
                check: self.heuristic.name(),
                source,
            })?;

            if reputation_verdict.is(VerdictStatus::Error) && heuristic_verdict.is(VerdictStatus::Error) {
                tracing::warn!("Both checks failed; reporting SAFE without any upstream evidence");
            }

            let (final_status, final_reason) = merge(&reputation_verdict, &heuristic_verdict);

            tracing::info!(
                "Scan complete: {} ({}: {}, {}: {})",
                final_status,
                self.reputation.name(),
                reputation_verdict.status,
                self.heuristic.name(),
                heuristic_verdict.status,
            );

            Ok::<_, AggregateError>(AggregateResult {
                input_url: url.to_string(),
                reputation_verdict,
                heuristic_verdict,
                final_status,
                final_reason: final_reason.to_string(),
            })
        }
        .instrument(span)
        .await
    }
}

fn spawn_check(check: Arc<dyn UrlCheck>, url: &str) -> tokio::task::JoinHandle<Verdict> {
    let url = url.to_string();
    tokio::spawn(
        async move { check.check(&url).await }.in_current_span(),
    )
}

// ============================================================================
// TESTS
// ============================================================================
