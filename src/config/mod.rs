//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `ADAPTIVE_LEARNING`
//! prefix and nested values use a double underscore as separator.
//!
//! # Example
//!
//! ```no_run
//! use adaptive_learning::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod classifier;
mod engine;
mod error;
mod redis;
mod server;

pub use classifier::ClassifierConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use self::redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration backed by in-memory storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote classification service
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Inference engine thresholds
    #[serde(default)]
    pub engine: EngineConfig,

    /// Redis configuration (classification lock)
    #[serde(default)]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `ADAPTIVE_LEARNING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ADAPTIVE_LEARNING__CLASSIFIER__BASE_URL=...` -> `classifier.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ADAPTIVE_LEARNING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.classifier.validate()?;
        self.engine.validate()?;
        self.redis.validate()?;
        self.validate_lock_ttl()
    }

    /// The lease must outlive the slowest cycle the classifier settings allow.
    fn validate_lock_ttl(&self) -> Result<(), ValidationError> {
        let minimum = self.classifier.orchestrator_settings().minimum_lease();
        if self.engine.lock_ttl() < minimum {
            return Err(ValidationError::LockTtlTooShort {
                ttl_secs: self.engine.lock_ttl_secs,
                minimum_ms: minimum.as_millis() as u64,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("ADAPTIVE_LEARNING__SERVER__PORT");
        env::remove_var("ADAPTIVE_LEARNING__SERVER__ENVIRONMENT");
        env::remove_var("ADAPTIVE_LEARNING__CLASSIFIER__BASE_URL");
        env::remove_var("ADAPTIVE_LEARNING__ENGINE__COUNT_CAP");
        env::remove_var("ADAPTIVE_LEARNING__REDIS__URL");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.classifier.base_url, "http://localhost:5000");
        assert!(config.redis.enabled_url().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ADAPTIVE_LEARNING__SERVER__PORT", "3000");
        env::set_var("ADAPTIVE_LEARNING__CLASSIFIER__BASE_URL", "http://ml:5000");
        env::set_var("ADAPTIVE_LEARNING__ENGINE__COUNT_CAP", "25");
        env::set_var("ADAPTIVE_LEARNING__REDIS__URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.classifier.base_url, "http://ml:5000");
        assert_eq!(config.engine.count_cap, 25);
        assert_eq!(config.redis.enabled_url(), Some("redis://localhost:6379"));
    }

    #[test]
    fn test_lock_ttl_must_outlive_classifier_timeouts() {
        let mut config = AppConfig::default();
        config.classifier.timeout_ms = 40_000;
        config.classifier.health_timeout_ms = 20_000;
        config.engine.lock_ttl_secs = 30;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::LockTtlTooShort { ttl_secs: 30, minimum_ms: 65_000 })
        ));

        config.engine.lock_ttl_secs = 65;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lock_ttl_ignores_health_timeout_without_health_check() {
        let mut config = AppConfig::default();
        config.classifier.timeout_ms = 25_000;
        config.classifier.health_timeout_ms = 20_000;
        config.classifier.health_check_before_predict = false;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ADAPTIVE_LEARNING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
