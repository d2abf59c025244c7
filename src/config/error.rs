//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid classifier URL format")]
    InvalidClassifierUrl,

    #[error("Invalid classifier timeout")]
    InvalidClassifierTimeout,

    #[error("Lock TTL of {ttl_secs}s is shorter than one classification cycle ({minimum_ms}ms)")]
    LockTtlTooShort { ttl_secs: u64, minimum_ms: u64 },

    #[error("Invalid engine setting: {0}")]
    InvalidEngineSetting(String),
}

impl From<crate::domain::foundation::ValidationError> for ValidationError {
    fn from(err: crate::domain::foundation::ValidationError) -> Self {
        ValidationError::InvalidEngineSetting(err.to_string())
    }
}
