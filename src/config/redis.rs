//! Redis configuration
//!
//! Redis is optional: without a URL the classification lock stays in-process.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL; unset disables Redis
    #[serde(default)]
    pub url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Key prefix for the classification lock
    #[serde(default = "default_lock_prefix")]
    pub lock_key_prefix: String,
}

impl RedisConfig {
    /// The URL when Redis is enabled
    pub fn enabled_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.enabled_url() {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout(),
            lock_key_prefix: default_lock_prefix(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_lock_prefix() -> String {
    "adaptive_learning:classification_lock".to_string()
}
