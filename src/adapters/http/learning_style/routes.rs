//! HTTP routes for learning-style endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    classifier_health, classify, clear_manual_overrides, end_session, get_preferences,
    get_profile, recommend_layout, record_activity, record_interaction, record_mode_end,
    record_mode_start, set_manual_preferences, LearningStyleHandlers,
};

/// Creates the learning-style router with all endpoints.
pub fn learning_style_routes(handlers: LearningStyleHandlers) -> Router {
    Router::new()
        .route("/behavior/mode-start", post(record_mode_start))
        .route("/behavior/mode-end", post(record_mode_end))
        .route("/behavior/activity", post(record_activity))
        .route("/sessions/:session_id/end", post(end_session))
        .route("/profile", get(get_profile))
        .route("/classify", post(classify))
        .route("/classifier/health", get(classifier_health))
        .route("/preferences", get(get_preferences))
        .route("/preferences/recommend", post(recommend_layout))
        .route(
            "/preferences/manual",
            put(set_manual_preferences).delete(clear_manual_overrides),
        )
        .route("/preferences/interactions", post(record_interaction))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::classifier::MockStyleClassifier;
    use crate::app::{Infrastructure, Services};
    use crate::config::AppConfig;

    fn app() -> Router {
        let infra = Infrastructure::in_memory(Arc::new(MockStyleClassifier::new()));
        let services = Services::build(&AppConfig::default(), infra).unwrap();
        learning_style_routes(services.handlers)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-User-Id", user);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let (status, body) = send(&app(), Method::GET, "/profile", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn unknown_user_gets_cold_start_profile() {
        let (status, body) = send(&app(), Method::GET, "/profile", Some("u-1"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["classificationMethod"], "default");
        assert_eq!(body["predictionCount"], 0);
        assert_eq!(body["dimensions"]["visualVerbal"], 0.0);
        assert_eq!(body["needsUpdate"], true);
    }

    #[tokio::test]
    async fn mode_segment_round_trip_is_counted() {
        let app = app();
        let start = json!({
            "sessionId": "s-1",
            "mode": "visualLearning",
            "at": "2024-03-04T09:00:00Z"
        });
        let end = json!({
            "sessionId": "s-1",
            "mode": "visualLearning",
            "at": "2024-03-04T09:05:00Z"
        });

        let (status, _) = send(&app, Method::POST, "/behavior/mode-start", Some("u-1"), Some(start)).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (status, body) = send(&app, Method::POST, "/behavior/mode-end", Some("u-1"), Some(end)).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "counted");
        assert_eq!(body["durationMs"], 300_000);
    }

    #[tokio::test]
    async fn mode_end_without_start_is_ignored() {
        let end = json!({ "sessionId": "s-1", "mode": "aiNarrator" });

        let (status, body) = send(&app(), Method::POST, "/behavior/mode-end", Some("u-1"), Some(end)).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "no_open_start");
    }

    #[tokio::test]
    async fn unknown_mode_is_bad_request() {
        let start = json!({ "sessionId": "s-1", "mode": "telepathy" });

        let (status, body) =
            send(&app(), Method::POST, "/behavior/mode-start", Some("u-1"), Some(start)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn unknown_activity_is_bad_request() {
        let body = json!({ "activity": "napping" });

        let (status, _) = send(&app(), Method::POST, "/behavior/activity", Some("u-1"), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn classify_without_evidence_reports_it() {
        let (status, body) = send(&app(), Method::POST, "/classify", Some("u-1"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "insufficient_evidence");
    }

    #[tokio::test]
    async fn classify_falls_back_to_heuristic_when_model_fails() {
        let app = app();
        let start = chrono::Utc::now() - chrono::Duration::hours(1);
        for i in 0..3 {
            let opened = start + chrono::Duration::minutes(10 * i);
            let closed = opened + chrono::Duration::minutes(5);
            let event = |at: chrono::DateTime<chrono::Utc>| {
                json!({ "sessionId": "s-1", "mode": "visualLearning", "at": at.to_rfc3339() })
            };
            send(&app, Method::POST, "/behavior/mode-start", Some("u-1"), Some(event(opened))).await;
            send(&app, Method::POST, "/behavior/mode-end", Some("u-1"), Some(event(closed))).await;
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/classify",
            Some("u-1"),
            Some(json!({ "trigger": "manual" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "classified");
        assert_eq!(body["method"], "heuristic");
        assert_eq!(body["profile"]["predictionCount"], 1);

        let (_, profile) = send(&app, Method::GET, "/profile", Some("u-1"), None).await;
        assert_eq!(profile["classificationMethod"], "heuristic");
    }

    #[tokio::test]
    async fn preferences_are_created_on_first_read() {
        let (status, body) = send(&app(), Method::GET, "/preferences", Some("u-1"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["cardSize"], "medium");
        assert_eq!(body["version"], 1);
    }

    #[tokio::test]
    async fn manual_layout_freezes_field_until_cleared() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/preferences/manual",
            Some("u-1"),
            Some(json!({ "layout": { "cardSize": "large" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["cardSize"], "large");
        assert_eq!(body["manualOverrides"], json!(["cardSize"]));

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/preferences/manual?fields=cardSize",
            Some("u-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["manualOverrides"], json!([]));
    }

    #[tokio::test]
    async fn empty_manual_update_is_rejected() {
        let (status, _) = send(
            &app(),
            Method::PUT,
            "/preferences/manual",
            Some("u-1"),
            Some(json!({ "layout": {} })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn interactions_are_counted() {
        let app = app();
        let body = json!({ "kind": "search" });

        send(&app, Method::POST, "/preferences/interactions", Some("u-1"), Some(body.clone())).await;
        let (status, patterns) =
            send(&app, Method::POST, "/preferences/interactions", Some("u-1"), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(patterns["searches"], 2);
    }

    #[tokio::test]
    async fn ending_unknown_session_is_harmless() {
        let (status, body) =
            send(&app(), Method::POST, "/sessions/s-9/end", Some("u-1"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["discardedSegments"], 0);
        assert_eq!(body["cancelledClassification"], false);
    }

    #[tokio::test]
    async fn classifier_health_is_reported() {
        let (status, body) = send(&app(), Method::GET, "/classifier/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
    }
}
