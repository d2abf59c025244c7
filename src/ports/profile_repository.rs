//! ProfileRepository port for learning-style profile persistence

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::style::LearningStyleProfile;

/// Repository for learning-style profiles.
///
/// Writes replace the whole document so readers never observe a partially
/// updated profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by user ID
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningStyleProfile>, DomainError>;

    /// Insert or replace the profile
    async fn save(&self, profile: &LearningStyleProfile) -> Result<(), DomainError>;
}
