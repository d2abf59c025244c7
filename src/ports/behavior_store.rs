//! BehaviorStore port for day-bucketed engagement records.

use async_trait::async_trait;

use crate::domain::behavior::{ActivityKind, BehaviorRecord, BucketKey, ContentMode};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Append/increment-only store of [`BehaviorRecord`]s.
///
/// Increments must be atomic per bucket: concurrent writers for the same
/// user never lose an update.
#[async_trait]
pub trait BehaviorStore: Send + Sync {
    /// Adds one completed segment to the bucket containing `at`,
    /// creating the bucket if needed.
    async fn add_mode_segment(
        &self,
        user_id: &UserId,
        mode: ContentMode,
        duration_ms: u64,
        at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Increments an activity counter in the bucket containing `at`.
    async fn add_activity(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Records for a user, oldest bucket first. `since` is inclusive.
    async fn records_for_user(
        &self,
        user_id: &UserId,
        since: Option<BucketKey>,
    ) -> Result<Vec<BehaviorRecord>, DomainError>;
}
