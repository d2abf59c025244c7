//! In-memory adaptive preference repository with version checks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::preference::AdaptivePreference;
use crate::ports::PreferenceRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceRepository {
    preferences: Arc<RwLock<HashMap<UserId, AdaptivePreference>>>,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdaptivePreference>, DomainError> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }

    async fn save(&self, preference: &AdaptivePreference) -> Result<u64, DomainError> {
        let mut preferences = self.preferences.write().await;
        let stored_version = preferences
            .get(preference.user_id())
            .map(|p| p.version())
            .unwrap_or(0);

        if stored_version != preference.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Preference was modified by another writer",
            )
            .with_detail("expected_version", preference.version().to_string())
            .with_detail("stored_version", stored_version.to_string()));
        }

        let next_version = stored_version + 1;
        let mut stored = preference.clone();
        stored.mark_persisted(next_version);
        preferences.insert(preference.user_id().clone(), stored);
        Ok(next_version)
    }
}
