//! Load-mutate-save with one reload on version conflict.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::preference::{AdaptivePreference, AdaptiveSettings};
use crate::ports::PreferenceRepository;

/// Shared write path for every preference handler.
#[derive(Clone)]
pub struct PreferenceWriter {
    repository: Arc<dyn PreferenceRepository>,
    defaults: AdaptiveSettings,
}

impl PreferenceWriter {
    pub fn new(repository: Arc<dyn PreferenceRepository>, defaults: AdaptiveSettings) -> Self {
        Self {
            repository,
            defaults,
        }
    }

    /// Stored preference, or an unsaved default one.
    pub async fn load(&self, user_id: &UserId) -> Result<AdaptivePreference, DomainError> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| AdaptivePreference::new(user_id.clone(), self.defaults, Timestamp::now())))
    }

    /// Applies `mutate` to the current preference and saves it. On a version
    /// conflict the preference is reloaded and `mutate` re-applied once.
    pub async fn update<T>(
        &self,
        user_id: &UserId,
        mut mutate: impl FnMut(&mut AdaptivePreference, Timestamp) -> T,
    ) -> Result<(AdaptivePreference, T), DomainError> {
        let mut retried = false;
        loop {
            let mut preference = self.load(user_id).await?;
            let output = mutate(&mut preference, Timestamp::now());
            match self.repository.save(&preference).await {
                Ok(version) => {
                    preference.mark_persisted(version);
                    return Ok((preference, output));
                }
                Err(err) if err.code == ErrorCode::ConcurrencyConflict && !retried => {
                    warn!(user_id = %user_id, "Preference write conflict; reloading once");
                    retried = true;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
