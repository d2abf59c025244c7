//! ModeSessionStore port for open mode segments.

use async_trait::async_trait;

use crate::domain::behavior::{ModeSegmentKey, OpenSegment};
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};

#[async_trait]
pub trait ModeSessionStore: Send + Sync {
    /// Stores an open segment, returning the one it replaced (if any).
    async fn open(&self, segment: OpenSegment) -> Result<Option<OpenSegment>, DomainError>;

    /// Removes and returns the open segment for a key.
    async fn close(&self, key: &ModeSegmentKey) -> Result<Option<OpenSegment>, DomainError>;

    /// Drops every segment started before `cutoff`; returns how many.
    async fn purge_started_before(&self, cutoff: Timestamp) -> Result<usize, DomainError>;

    /// Drops every open segment of a session; returns how many.
    async fn discard_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<usize, DomainError>;
}
