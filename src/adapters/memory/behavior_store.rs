//! In-memory behavior store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::behavior::{ActivityKind, BehaviorRecord, BucketKey, ContentMode};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::BehaviorStore;

type Buckets = BTreeMap<BucketKey, BehaviorRecord>;

/// Buckets per user, ordered by day.
///
/// Each increment happens under one write lock, so concurrent segments for
/// the same user are never lost.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBehaviorStore {
    records: Arc<RwLock<HashMap<UserId, Buckets>>>,
}

impl InMemoryBehaviorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a whole record. Useful for seeding history.
    pub async fn insert(&self, record: BehaviorRecord) {
        let mut records = self.records.write().await;
        records
            .entry(record.user_id.clone())
            .or_default()
            .insert(record.bucket, record);
    }
}

#[async_trait]
impl BehaviorStore for InMemoryBehaviorStore {
    async fn add_mode_segment(
        &self,
        user_id: &UserId,
        mode: ContentMode,
        duration_ms: u64,
        at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records
            .entry(user_id.clone())
            .or_default()
            .entry(BucketKey::for_timestamp(&at))
            .or_insert_with(|| BehaviorRecord::new(user_id.clone(), at))
            .add_mode_segment(mode, duration_ms, at);
        Ok(())
    }

    async fn add_activity(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records
            .entry(user_id.clone())
            .or_default()
            .entry(BucketKey::for_timestamp(&at))
            .or_insert_with(|| BehaviorRecord::new(user_id.clone(), at))
            .add_activity(kind, at);
        Ok(())
    }

    async fn records_for_user(
        &self,
        user_id: &UserId,
        since: Option<BucketKey>,
    ) -> Result<Vec<BehaviorRecord>, DomainError> {
        let records = self.records.read().await;
        let Some(buckets) = records.get(user_id) else {
            return Ok(Vec::new());
        };
        let found = match since {
            Some(from) => buckets.range(from..).map(|(_, r)| r.clone()).collect(),
            None => buckets.values().cloned().collect(),
        };
        Ok(found)
    }
}
