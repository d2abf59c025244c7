//! PreferenceRepository port for adaptive preference persistence

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preference::AdaptivePreference;

/// Repository for adaptive preferences with optimistic concurrency.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdaptivePreference>, DomainError>;

    /// Writes the preference if the stored version still equals
    /// `preference.version()`, returning the new version.
    ///
    /// Fails with `ErrorCode::ConcurrencyConflict` when another writer got
    /// there first.
    async fn save(&self, preference: &AdaptivePreference) -> Result<u64, DomainError>;
}
