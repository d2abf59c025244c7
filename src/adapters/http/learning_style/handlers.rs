//! HTTP handlers for learning-style endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::adapters::http::middleware::CurrentUser;
use crate::application::handlers::{
    BehaviorAggregator, ClassificationOrchestrator, ClassifyLearningStyleCommand,
    ClassifyLearningStyleHandler, ClassifyOutcome, ClearManualOverridesCommand,
    GetPreferencesHandler, GetStyleProfileHandler, GetStyleProfileQuery, ManualPreferencesHandler,
    RecommendLayoutHandler, RecordInteractionHandler, SetManualPreferencesCommand,
};
use crate::application::SessionLifetimes;
use crate::domain::behavior::{ActivityKind, ContentMode};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::preference::LayoutField;
use crate::domain::style::ClassificationTrigger;

use super::dto::{
    ActivityRequest, ClassifyRequest, ClassifyResponse, ClearOverridesParams,
    EndSessionResponse, ErrorResponse, InteractionRequest, ManualPreferencesRequest,
    ModeEventRequest, ModeStartResponse, RecommendResponse, SegmentResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LearningStyleHandlers {
    behavior: Arc<BehaviorAggregator>,
    classify_handler: Arc<ClassifyLearningStyleHandler>,
    get_profile_handler: Arc<GetStyleProfileHandler>,
    orchestrator: Arc<ClassificationOrchestrator>,
    get_preferences_handler: Arc<GetPreferencesHandler>,
    recommend_handler: Arc<RecommendLayoutHandler>,
    manual_handler: Arc<ManualPreferencesHandler>,
    interaction_handler: Arc<RecordInteractionHandler>,
    lifetimes: Arc<SessionLifetimes>,
}

impl LearningStyleHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        behavior: Arc<BehaviorAggregator>,
        classify_handler: Arc<ClassifyLearningStyleHandler>,
        get_profile_handler: Arc<GetStyleProfileHandler>,
        orchestrator: Arc<ClassificationOrchestrator>,
        get_preferences_handler: Arc<GetPreferencesHandler>,
        recommend_handler: Arc<RecommendLayoutHandler>,
        manual_handler: Arc<ManualPreferencesHandler>,
        interaction_handler: Arc<RecordInteractionHandler>,
        lifetimes: Arc<SessionLifetimes>,
    ) -> Self {
        Self {
            behavior,
            classify_handler,
            get_profile_handler,
            orchestrator,
            get_preferences_handler,
            recommend_handler,
            manual_handler,
            interaction_handler,
            lifetimes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Behavior
// ════════════════════════════════════════════════════════════════════════════

/// POST /behavior/mode-start - Open a content-mode segment
pub async fn record_mode_start(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<ModeEventRequest>,
) -> Response {
    let (session_id, mode) = match parse_mode_event(&req) {
        Ok(parsed) => parsed,
        Err(e) => return handle_error(e),
    };
    let at = req.at.unwrap_or_else(Timestamp::now);

    match handlers
        .behavior
        .record_mode_start(&user_id, &session_id, mode, at)
        .await
    {
        Ok(result) => (
            StatusCode::ACCEPTED,
            Json(ModeStartResponse {
                replaced: result.replaced.map(|outcome| SegmentResponse::from(Some(outcome))),
                purged: result.purged,
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /behavior/mode-end - Close a content-mode segment
pub async fn record_mode_end(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<ModeEventRequest>,
) -> Response {
    let (session_id, mode) = match parse_mode_event(&req) {
        Ok(parsed) => parsed,
        Err(e) => return handle_error(e),
    };
    let at = req.at.unwrap_or_else(Timestamp::now);

    match handlers
        .behavior
        .record_mode_end(&user_id, &session_id, mode, at)
        .await
    {
        Ok(outcome) => (StatusCode::ACCEPTED, Json(SegmentResponse::from(outcome))).into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /behavior/activity - Count one learning activity
pub async fn record_activity(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<ActivityRequest>,
) -> Response {
    let kind: ActivityKind = match req.activity.parse() {
        Ok(kind) => kind,
        Err(e) => return handle_error(DomainError::from(e)),
    };
    let at = req.at.unwrap_or_else(Timestamp::now);

    match handlers.behavior.record_activity(&user_id, kind, at).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /sessions/:session_id/end - Discard open segments, cancel in-flight work
pub async fn end_session(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(e) => return handle_error(DomainError::from(e)),
    };

    match handlers.behavior.end_session(&user_id, &session_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(EndSessionResponse {
                discarded_segments: result.discarded_segments,
                cancelled_classification: result.signalled,
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// GET /profile - Current profile, cold start for unknown users
pub async fn get_profile(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    match handlers
        .get_profile_handler
        .handle(GetStyleProfileQuery { user_id })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /classify - Run a classification cycle
///
/// Returns 202 when another cycle for the user already holds the lock.
pub async fn classify(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    body: Option<Json<ClassifyRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let trigger = req.trigger.unwrap_or(ClassificationTrigger::Manual);

    let mut cmd = ClassifyLearningStyleCommand::new(user_id.clone(), trigger);
    if let Some(session_id) = req.session_id {
        match SessionId::new(session_id) {
            Ok(session_id) => {
                cmd = cmd.with_session(handlers.lifetimes.signal(&user_id, &session_id));
            }
            Err(e) => return handle_error(DomainError::from(e)),
        }
    }

    match handlers.classify_handler.handle(cmd).await {
        Ok(outcome) => {
            let status = match outcome {
                ClassifyOutcome::InProgress => StatusCode::ACCEPTED,
                _ => StatusCode::OK,
            };
            (status, Json(ClassifyResponse::from(outcome))).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// GET /classifier/health - Probe the remote classifier
pub async fn classifier_health(State(handlers): State<LearningStyleHandlers>) -> Response {
    let health = handlers.orchestrator.check_health().await;
    (StatusCode::OK, Json(health)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Preferences
// ════════════════════════════════════════════════════════════════════════════

/// GET /preferences - Current preferences, defaults persisted on first access
pub async fn get_preferences(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    match handlers.get_preferences_handler.handle(&user_id).await {
        Ok(preference) => (StatusCode::OK, Json(preference)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /preferences/recommend - Translate the profile and apply what is allowed
pub async fn recommend_layout(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    match handlers.recommend_handler.handle(&user_id).await {
        Ok(result) => (StatusCode::OK, Json(RecommendResponse::from(result))).into_response(),
        Err(e) => handle_error(e),
    }
}

/// PUT /preferences/manual - Set layout fields by hand and freeze them
pub async fn set_manual_preferences(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<ManualPreferencesRequest>,
) -> Response {
    let cmd = SetManualPreferencesCommand {
        user_id,
        layout: req.layout,
        settings: req.settings,
    };

    match handlers.manual_handler.set(cmd).await {
        Ok(preference) => (StatusCode::OK, Json(preference)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// DELETE /preferences/manual?fields=a,b - Unfreeze fields (all when omitted)
pub async fn clear_manual_overrides(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<ClearOverridesParams>,
) -> Response {
    let fields = match parse_layout_fields(params.fields.as_deref()) {
        Ok(fields) => fields,
        Err(e) => return handle_error(e),
    };

    match handlers
        .manual_handler
        .clear(ClearManualOverridesCommand { user_id, fields })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result.preference)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// POST /preferences/interactions - Count a UI interaction
pub async fn record_interaction(
    State(handlers): State<LearningStyleHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<InteractionRequest>,
) -> Response {
    match handlers.interaction_handler.handle(&user_id, req.kind).await {
        Ok(patterns) => (StatusCode::OK, Json(patterns)).into_response(),
        Err(e) => handle_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_mode_event(req: &ModeEventRequest) -> Result<(SessionId, ContentMode), DomainError> {
    let session_id = SessionId::new(req.session_id.clone())?;
    let mode = req.mode.parse::<ContentMode>()?;
    Ok((session_id, mode))
}

fn parse_layout_fields(raw: Option<&str>) -> Result<Vec<LayoutField>, DomainError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            LayoutField::ALL
                .into_iter()
                .find(|field| field.to_string() == name)
                .ok_or_else(|| {
                    DomainError::validation("fields", format!("Unknown layout field: {}", name))
                })
        })
        .collect()
}

fn handle_error(error: DomainError) -> Response {
    let status = match error.code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::ProfileNotFound | ErrorCode::PreferenceNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ConcurrencyConflict | ErrorCode::ClassificationInProgress => StatusCode::CONFLICT,
        ErrorCode::PersistenceFailed | ErrorCode::CacheError | ErrorCode::ClassifierUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorCode::InvalidStateTransition | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        error!(code = %error.code, error = %error, "Learning-style request failed");
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return (
                status,
                Json(ErrorResponse::internal("An unexpected error occurred")),
            )
                .into_response();
        }
    }

    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_400() {
        let response = handle_error(DomainError::validation("mode", "bad"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = handle_error(DomainError::new(ErrorCode::ConcurrencyConflict, "stale"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn persistence_failure_maps_to_503() {
        let response = handle_error(DomainError::new(ErrorCode::PersistenceFailed, "down"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let response = handle_error(DomainError::new(ErrorCode::InternalError, "boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn layout_fields_parse_from_query() {
        let fields = parse_layout_fields(Some("cardSize, sortOrder")).unwrap();
        assert_eq!(fields, vec![LayoutField::CardSize, LayoutField::SortOrder]);
    }

    #[test]
    fn missing_layout_fields_mean_all() {
        assert!(parse_layout_fields(None).unwrap().is_empty());
    }

    #[test]
    fn unknown_layout_field_is_rejected() {
        let err = parse_layout_fields(Some("cardSize,fontSize")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
