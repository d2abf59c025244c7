//! Request and response bodies for the learning-style API.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ClassifyOutcome, RecommendLayoutResult};
use crate::domain::behavior::SegmentOutcome;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::preference::{
    AdaptationOutcome, AdaptivePreference, AdaptiveSettings, InteractionKind, LayoutPatch,
    LayoutRecommendation,
};
use crate::domain::style::{
    ClassificationAttempt, ClassificationMethod, ClassificationTrigger, FallbackReason,
    LearningStyleProfile, ReclassificationReason,
};

// ════════════════════════════════════════════════════════════════════════════
// Behavior
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeEventRequest {
    pub session_id: String,
    /// Content mode key, e.g. `visualLearning`.
    pub mode: String,
    /// Client event time; server time when absent.
    #[serde(default)]
    pub at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub activity: String,
    #[serde(default)]
    pub at: Option<Timestamp>,
}

/// What happened to a closed segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SegmentResponse {
    Counted {
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    Expired,
    ClockSkew,
    NoOpenStart,
}

impl From<Option<SegmentOutcome>> for SegmentResponse {
    fn from(outcome: Option<SegmentOutcome>) -> Self {
        match outcome {
            Some(SegmentOutcome::Counted { duration_ms }) => Self::Counted { duration_ms },
            Some(SegmentOutcome::Expired { .. }) => Self::Expired,
            Some(SegmentOutcome::ClockSkew) => Self::ClockSkew,
            None => Self::NoOpenStart,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStartResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<SegmentResponse>,
    pub purged: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionResponse {
    pub discarded_segments: usize,
    pub cancelled_classification: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    /// Defaults to a manual request.
    #[serde(default)]
    pub trigger: Option<ClassificationTrigger>,
    /// Abandon the classification if this session ends first.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifyStatus {
    Classified,
    UpToDate,
    InsufficientEvidence,
    InProgress,
    Abandoned,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub status: ClassifyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReclassificationReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ClassificationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<ClassificationAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<LearningStyleProfile>,
}

impl ClassifyResponse {
    fn bare(status: ClassifyStatus) -> Self {
        Self {
            status,
            reason: None,
            method: None,
            attempt: None,
            fallback_reason: None,
            profile: None,
        }
    }
}

impl From<ClassifyOutcome> for ClassifyResponse {
    fn from(outcome: ClassifyOutcome) -> Self {
        match outcome {
            ClassifyOutcome::Classified(summary) => Self {
                status: ClassifyStatus::Classified,
                reason: Some(summary.reason),
                method: Some(summary.profile.classification_method()),
                attempt: Some(summary.final_state),
                fallback_reason: summary.fallback_reason,
                profile: Some(summary.profile),
            },
            ClassifyOutcome::UpToDate(profile) => Self {
                profile: Some(profile),
                ..Self::bare(ClassifyStatus::UpToDate)
            },
            ClassifyOutcome::InsufficientEvidence => Self::bare(ClassifyStatus::InsufficientEvidence),
            ClassifyOutcome::InProgress => Self::bare(ClassifyStatus::InProgress),
            ClassifyOutcome::Abandoned => Self::bare(ClassifyStatus::Abandoned),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Preferences
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPreferencesRequest {
    #[serde(default)]
    pub layout: LayoutPatch,
    #[serde(default)]
    pub settings: Option<AdaptiveSettings>,
}

/// `?fields=cardSize,sortOrder`; all fields when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearOverridesParams {
    #[serde(default)]
    pub fields: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    pub kind: InteractionKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub preference: AdaptivePreference,
    pub recommendation: LayoutRecommendation,
    pub outcome: AdaptationOutcome,
}

impl From<RecommendLayoutResult> for RecommendResponse {
    fn from(result: RecommendLayoutResult) -> Self {
        Self {
            preference: result.preference,
            recommendation: result.recommendation,
            outcome: result.outcome,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Error body: `{code, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn segment_response_is_tagged() {
        let json = serde_json::to_value(SegmentResponse::Counted { duration_ms: 500 }).unwrap();
        assert_eq!(json["status"], "counted");
        assert_eq!(json["durationMs"], 500);

        let json = serde_json::to_value(SegmentResponse::from(None)).unwrap();
        assert_eq!(json["status"], "no_open_start");
    }

    #[test]
    fn in_progress_response_is_bare() {
        let json = serde_json::to_value(ClassifyResponse::from(ClassifyOutcome::InProgress)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "in_progress" }));
    }

    #[test]
    fn mode_event_accepts_optional_time() {
        let req: ModeEventRequest = serde_json::from_value(serde_json::json!({
            "sessionId": "s-1",
            "mode": "visualLearning",
            "at": "2024-03-04T09:00:00Z"
        }))
        .unwrap();
        assert!(req.at.is_some());

        let req: ModeEventRequest =
            serde_json::from_value(serde_json::json!({ "sessionId": "s-1", "mode": "x" })).unwrap();
        assert!(req.at.is_none());
    }

    #[test]
    fn error_response_uses_code_name() {
        let err = DomainError::new(ErrorCode::ConcurrencyConflict, "busy");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "CONCURRENCY_CONFLICT");
        assert_eq!(body.message, "busy");
    }
}
