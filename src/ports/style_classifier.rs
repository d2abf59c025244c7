//! StyleClassifier port - Remote learning-style classification service.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::features::FeatureVector;
use crate::domain::style::Prediction;

/// Result of a health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn available() -> Self {
        Self {
            available: true,
            error: None,
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            available: false,
            error: Some(error.into()),
        }
    }
}

/// Classification service errors.
///
/// None of these reach callers of the classification cycle; they all
/// resolve to the heuristic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    /// Service could not be reached.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// No response within the configured bound.
    #[error("classifier timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Non-success HTTP status.
    #[error("classifier returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response missing fields, non-finite, or out of range.
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait StyleClassifier: Send + Sync {
    /// Probes the service. Never fails; problems become `available: false`.
    async fn check_health(&self) -> ServiceHealth;

    /// Exactly one prediction request.
    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError>;
}
