//! Classification service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::classifier::HttpClassifierConfig;
use crate::application::handlers::OrchestratorSettings;

/// Remote classification service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the classification service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Predict request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Health probe timeout in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,

    /// Probe health before each predict call
    #[serde(default = "default_true")]
    pub health_check_before_predict: bool,

    /// Magnitude of the service's score scale
    #[serde(default = "default_score_scale")]
    pub score_scale: f64,

    /// Skip the service when the data are insufficient for the model
    #[serde(default = "default_true")]
    pub require_sufficient_data: bool,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            predict_timeout: self.timeout(),
            health_timeout: self.health_timeout(),
            health_check_before_predict: self.health_check_before_predict,
            require_sufficient_data: self.require_sufficient_data,
        }
    }

    pub fn to_http_config(&self) -> HttpClassifierConfig {
        let config = HttpClassifierConfig::new(self.base_url.clone())
            .with_timeout(self.timeout())
            .with_health_timeout(self.health_timeout())
            .with_score_scale(self.score_scale);
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CLASSIFIER__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidClassifierUrl);
        }
        if self.timeout_ms == 0 || self.timeout_ms > 60_000 {
            return Err(ValidationError::InvalidClassifierTimeout);
        }
        if self.health_timeout_ms == 0 || self.health_timeout_ms > self.timeout_ms {
            return Err(ValidationError::InvalidClassifierTimeout);
        }
        if !(self.score_scale.is_finite() && self.score_scale > 0.0) {
            return Err(ValidationError::InvalidEngineSetting(format!(
                "score_scale must be positive, got {}",
                self.score_scale
            )));
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
            health_check_before_predict: true,
            score_scale: default_score_scale(),
            require_sufficient_data: true,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    3_000
}

fn default_health_timeout_ms() -> u64 {
    1_000
}

fn default_score_scale() -> f64 {
    11.0
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.health_check_before_predict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = ClassifierConfig {
            base_url: "ftp://models".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidClassifierUrl)));
    }

    #[test]
    fn test_health_timeout_must_not_exceed_predict_timeout() {
        let config = ClassifierConfig {
            timeout_ms: 500,
            health_timeout_ms: 1_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidClassifierTimeout)));
    }

    #[test]
    fn test_http_config_carries_timeouts() {
        let config = ClassifierConfig {
            timeout_ms: 2_000,
            ..Default::default()
        }
        .to_http_config();
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.score_scale, 11.0);
        assert!(config.api_key.is_none());
    }
}
