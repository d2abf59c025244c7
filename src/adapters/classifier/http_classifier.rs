//! HTTP client for the remote learning-style classification service.
//!
//! `GET {base}/health` reports whether models are loaded; `POST {base}/predict`
//! takes `{ "features": FeatureVector }` and answers with per-dimension
//! scores on the service scale plus confidences.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::features::FeatureVector;
use crate::domain::style::{ClassificationMethod, Dimension, DimensionScores, Prediction};
use crate::ports::{ClassifierError, ServiceHealth, StyleClassifier};

/// Connection settings for [`HttpStyleClassifier`].
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    pub timeout: Duration,
    pub health_timeout: Duration,
    /// Service scores are divided by this to land in `[-1, 1]`.
    pub score_scale: f64,
}

impl HttpClassifierConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_millis(3_000),
            health_timeout: Duration::from_millis(1_000),
            score_scale: 11.0,
        }
    }

    pub fn with_api_key(mut self, key: Secret<String>) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn with_score_scale(mut self, scale: f64) -> Self {
        self.score_scale = scale;
        self
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureVector,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScores {
    active_reflective: Option<f64>,
    sensing_intuitive: Option<f64>,
    visual_verbal: Option<f64>,
    sequential_global: Option<f64>,
}

impl RawScores {
    fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::ActiveReflective => self.active_reflective,
            Dimension::SensingIntuitive => self.sensing_intuitive,
            Dimension::VisualVerbal => self.visual_verbal,
            Dimension::SequentialGlobal => self.sequential_global,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default, alias = "dimensions")]
    predictions: Option<RawScores>,
    #[serde(default)]
    confidence: Option<RawScores>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    models_loaded: Option<bool>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HealthResponse {
    fn into_health(self) -> ServiceHealth {
        let available = self
            .available
            .or(self.models_loaded)
            .unwrap_or_else(|| {
                matches!(self.status.as_deref(), Some("healthy") | Some("ok"))
            });
        if available {
            ServiceHealth::available()
        } else {
            ServiceHealth::unavailable(
                self.error
                    .or(self.status)
                    .unwrap_or_else(|| "models not loaded".to_string()),
            )
        }
    }
}

/// reqwest-backed [`StyleClassifier`].
#[derive(Debug, Clone)]
pub struct HttpStyleClassifier {
    config: HttpClassifierConfig,
    client: Client,
}

impl HttpStyleClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self, ClassifierError> {
        if !(config.score_scale.is_finite() && config.score_scale > 0.0) {
            return Err(ClassifierError::Unavailable(format!(
                "invalid score scale {}",
                config.score_scale
            )));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| ClassifierError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    fn map_send_error(&self, e: reqwest::Error, timeout: Duration) -> ClassifierError {
        if e.is_timeout() {
            ClassifierError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            ClassifierError::Unavailable(format!("Connection failed: {}", e))
        } else {
            ClassifierError::Unavailable(e.to_string())
        }
    }

    async fn ensure_success(response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClassifierError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Validates and normalizes a predict response.
    fn parse_prediction(&self, body: PredictResponse) -> Result<Prediction, ClassifierError> {
        if body.success == Some(false) {
            return Err(ClassifierError::MalformedResponse(
                body.error
                    .unwrap_or_else(|| "service reported success=false".to_string()),
            ));
        }
        let raw_values = body
            .predictions
            .ok_or_else(|| ClassifierError::MalformedResponse("missing predictions".into()))?;
        let raw_confidence = body
            .confidence
            .ok_or_else(|| ClassifierError::MalformedResponse("missing confidence".into()))?;

        let mut dimensions = DimensionScores::default();
        let mut confidence = DimensionScores::default();
        for dim in Dimension::ALL {
            let value = raw_values.get(dim).ok_or_else(|| {
                ClassifierError::MalformedResponse(format!("missing prediction for {}", dim))
            })?;
            let conf = raw_confidence.get(dim).ok_or_else(|| {
                ClassifierError::MalformedResponse(format!("missing confidence for {}", dim))
            })?;
            dimensions.set(dim, value / self.config.score_scale);
            confidence.set(dim, conf);
        }

        Prediction::new(dimensions, confidence, ClassificationMethod::Ml)
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl StyleClassifier for HttpStyleClassifier {
    async fn check_health(&self) -> ServiceHealth {
        let timeout = self.config.health_timeout;
        let request = self.authorize(self.client.get(self.url("health")).timeout(timeout));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return ServiceHealth::unavailable(self.map_send_error(e, timeout).to_string()),
        };
        let response = match Self::ensure_success(response).await {
            Ok(response) => response,
            Err(e) => return ServiceHealth::unavailable(e.to_string()),
        };
        match response.json::<HealthResponse>().await {
            Ok(body) => body.into_health(),
            Err(e) => ServiceHealth::unavailable(format!("unreadable health response: {}", e)),
        }
    }

    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let timeout = self.config.timeout;
        let request = self.authorize(
            self.client
                .post(self.url("predict"))
                .timeout(timeout)
                .json(&PredictRequest { features }),
        );

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(e, timeout))?;
        let response = Self::ensure_success(response).await?;
        let body: PredictResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                ClassifierError::MalformedResponse(e.to_string())
            }
        })?;
        self.parse_prediction(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classifier() -> HttpStyleClassifier {
        HttpStyleClassifier::new(HttpClassifierConfig::new("http://localhost:5000/")).unwrap()
    }

    fn parse(value: serde_json::Value) -> Result<Prediction, ClassifierError> {
        classifier().parse_prediction(serde_json::from_value(value).unwrap())
    }

    fn scores(a: f64, b: f64, c: f64, d: f64) -> serde_json::Value {
        json!({
            "activeReflective": a,
            "sensingIntuitive": b,
            "visualVerbal": c,
            "sequentialGlobal": d
        })
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(classifier().url("predict"), "http://localhost:5000/predict");
    }

    #[test]
    fn scores_are_normalized_by_scale() {
        let p = parse(json!({
            "success": true,
            "predictions": scores(11.0, -5.5, 0.0, 3.0),
            "confidence": scores(0.9, 0.8, 0.7, 0.6)
        }))
        .unwrap();
        assert_eq!(p.dimensions().active_reflective, 1.0);
        assert_eq!(p.dimensions().sensing_intuitive, -0.5);
        assert_eq!(p.confidence().sequential_global, 0.6);
        assert_eq!(p.method(), ClassificationMethod::Ml);
    }

    #[test]
    fn dimensions_alias_is_accepted() {
        let p = parse(json!({
            "dimensions": scores(0.0, 0.0, 0.0, 0.0),
            "confidence": scores(0.5, 0.5, 0.5, 0.5)
        }));
        assert!(p.is_ok());
    }

    #[test]
    fn success_false_is_malformed() {
        let err = parse(json!({"success": false, "error": "model not loaded"})).unwrap_err();
        assert_eq!(err, ClassifierError::MalformedResponse("model not loaded".into()));
    }

    #[test]
    fn missing_dimension_is_malformed() {
        let err = parse(json!({
            "predictions": {"activeReflective": 1.0, "sensingIntuitive": 1.0, "visualVerbal": 1.0},
            "confidence": scores(0.5, 0.5, 0.5, 0.5)
        }))
        .unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(msg) if msg.contains("sequentialGlobal")));
    }

    #[test]
    fn out_of_range_score_is_malformed() {
        let err = parse(json!({
            "predictions": scores(12.0, 0.0, 0.0, 0.0),
            "confidence": scores(0.5, 0.5, 0.5, 0.5)
        }))
        .unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn confidence_above_one_is_malformed() {
        let err = parse(json!({
            "predictions": scores(0.0, 0.0, 0.0, 0.0),
            "confidence": scores(1.5, 0.5, 0.5, 0.5)
        }))
        .unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn health_reads_models_loaded() {
        let body: HealthResponse =
            serde_json::from_value(json!({"status": "healthy", "models_loaded": false})).unwrap();
        assert!(!body.into_health().available);

        let body: HealthResponse = serde_json::from_value(json!({"available": true})).unwrap();
        assert!(body.into_health().available);

        let body: HealthResponse = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert!(body.into_health().available);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let config = HttpClassifierConfig::new("http://x").with_score_scale(0.0);
        assert!(HttpStyleClassifier::new(config).is_err());
    }
}
