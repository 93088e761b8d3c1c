use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiptrack_common::Secret;
use shiptrack_engine::ReconciliationRunSummary;

/// The body returned by the reconciliation trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub success: bool,
    pub message: String,
    pub results: ReconciliationRunSummary,
    pub timestamp: DateTime<Utc>,
}

impl ReconcileResponse {
    pub fn completed(results: ReconciliationRunSummary) -> Self {
        Self {
            success: true,
            message: format!("Reconciliation run complete. {results}"),
            results,
            timestamp: Utc::now(),
        }
    }
}

/// The shared secret that callers of protected routes must present as a bearer token.
#[derive(Debug, Clone)]
pub struct CronSecret(pub Secret<String>);
