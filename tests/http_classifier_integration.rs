//! Integration tests for the HTTP style classifier.
//!
//! Each test starts a stub classification service on an ephemeral port and
//! points `HttpStyleClassifier` at it.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use secrecy::Secret;
use serde_json::{json, Value};

use adaptive_learning::adapters::classifier::{HttpClassifierConfig, HttpStyleClassifier};
use adaptive_learning::domain::features::FeatureVector;
use adaptive_learning::domain::style::ClassificationMethod;
use adaptive_learning::ports::{ClassifierError, StyleClassifier};

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn classifier_for(addr: SocketAddr) -> HttpStyleClassifier {
    HttpStyleClassifier::new(
        HttpClassifierConfig::new(format!("http://{}", addr))
            .with_timeout(Duration::from_millis(500))
            .with_health_timeout(Duration::from_millis(200)),
    )
    .unwrap()
}

fn scores(a: f64, b: f64, c: f64, d: f64) -> Value {
    json!({
        "activeReflective": a,
        "sensingIntuitive": b,
        "visualVerbal": c,
        "sequentialGlobal": d
    })
}

fn good_prediction() -> Value {
    json!({
        "success": true,
        "predictions": scores(5.5, -11.0, 2.2, 0.0),
        "confidence": scores(0.8, 0.9, 0.6, 0.5)
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn healthy_service_reports_available() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "healthy", "models_loaded": true })) }),
    );
    let classifier = classifier_for(serve(router).await);

    let health = classifier.check_health().await;

    assert!(health.available);
    assert!(health.error.is_none());
}

#[tokio::test]
async fn models_not_loaded_reports_unavailable() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "models_loaded": false })) }),
    );
    let classifier = classifier_for(serve(router).await);

    assert!(!classifier.check_health().await.available);
}

#[tokio::test]
async fn health_error_status_reports_unavailable() {
    let router = Router::new().route(
        "/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
    );
    let classifier = classifier_for(serve(router).await);

    let health = classifier.check_health().await;

    assert!(!health.available);
    assert!(health.error.unwrap().contains("503"));
}

#[tokio::test]
async fn unreachable_service_reports_unavailable() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let health = classifier_for(addr).check_health().await;

    assert!(!health.available);
}

// =============================================================================
// Predict
// =============================================================================

#[tokio::test]
async fn prediction_is_normalized_by_score_scale() {
    let router = Router::new().route("/predict", post(|| async { Json(good_prediction()) }));
    let classifier = classifier_for(serve(router).await);

    let prediction = classifier.predict(&FeatureVector::neutral()).await.unwrap();

    assert_eq!(prediction.method(), ClassificationMethod::Ml);
    assert_eq!(prediction.dimensions().active_reflective, 0.5);
    assert_eq!(prediction.dimensions().sensing_intuitive, -1.0);
    assert!((prediction.dimensions().visual_verbal - 0.2).abs() < 1e-9);
    assert_eq!(prediction.confidence().sensing_intuitive, 0.9);
}

#[tokio::test]
async fn features_are_posted_as_camel_case_json() {
    let router = Router::new().route(
        "/predict",
        post(|Json(body): Json<Value>| async move {
            let features = &body["features"];
            if features.get("activeModeRatio").is_some() && features.get("navigationJumps").is_some() {
                (StatusCode::OK, Json(good_prediction()))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad features" })))
            }
        }),
    );
    let classifier = classifier_for(serve(router).await);

    assert!(classifier.predict(&FeatureVector::neutral()).await.is_ok());
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let router = Router::new().route(
        "/predict",
        post(|headers: HeaderMap| async move {
            match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                Some("Bearer sekrit") => (StatusCode::OK, Json(good_prediction())),
                _ => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "no key" }))),
            }
        }),
    );
    let addr = serve(router).await;
    let classifier = HttpStyleClassifier::new(
        HttpClassifierConfig::new(format!("http://{}", addr))
            .with_api_key(Secret::new("sekrit".to_string())),
    )
    .unwrap();

    assert!(classifier.predict(&FeatureVector::neutral()).await.is_ok());
}

#[tokio::test]
async fn server_error_is_status_error() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let classifier = classifier_for(serve(router).await);

    let err = classifier.predict(&FeatureVector::neutral()).await.unwrap_err();

    assert_eq!(
        err,
        ClassifierError::Status {
            status: 500,
            body: "model crashed".to_string()
        }
    );
}

#[tokio::test]
async fn slow_service_times_out() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(good_prediction())
        }),
    );
    let classifier = classifier_for(serve(router).await);

    let err = classifier.predict(&FeatureVector::neutral()).await.unwrap_err();

    assert_eq!(err, ClassifierError::Timeout { timeout_ms: 500 });
}

#[tokio::test]
async fn out_of_range_confidence_is_malformed() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            Json(json!({
                "predictions": scores(0.0, 0.0, 0.0, 0.0),
                "confidence": scores(1.5, 0.5, 0.5, 0.5)
            }))
        }),
    );
    let classifier = classifier_for(serve(router).await);

    let err = classifier.predict(&FeatureVector::neutral()).await.unwrap_err();

    assert!(matches!(err, ClassifierError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let router = Router::new().route("/predict", post(|| async { "not json" }));
    let classifier = classifier_for(serve(router).await);

    let err = classifier.predict(&FeatureVector::neutral()).await.unwrap_err();

    assert!(matches!(err, ClassifierError::MalformedResponse(_)));
}
