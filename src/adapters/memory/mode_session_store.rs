//! In-memory open segment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::behavior::{ModeSegmentKey, OpenSegment};
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::ports::ModeSessionStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryModeSessionStore {
    open: Arc<RwLock<HashMap<ModeSegmentKey, OpenSegment>>>,
}

impl InMemoryModeSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.open.read().await.len()
    }
}

#[async_trait]
impl ModeSessionStore for InMemoryModeSessionStore {
    async fn open(&self, segment: OpenSegment) -> Result<Option<OpenSegment>, DomainError> {
        let mut open = self.open.write().await;
        Ok(open.insert(segment.key.clone(), segment))
    }

    async fn close(&self, key: &ModeSegmentKey) -> Result<Option<OpenSegment>, DomainError> {
        Ok(self.open.write().await.remove(key))
    }

    async fn purge_started_before(&self, cutoff: Timestamp) -> Result<usize, DomainError> {
        let mut open = self.open.write().await;
        let before = open.len();
        open.retain(|_, segment| !segment.started_at.is_before(&cutoff));
        Ok(before - open.len())
    }

    async fn discard_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<usize, DomainError> {
        let mut open = self.open.write().await;
        let before = open.len();
        open.retain(|key, _| !(&key.user_id == user_id && &key.session_id == session_id));
        Ok(before - open.len())
    }
}
