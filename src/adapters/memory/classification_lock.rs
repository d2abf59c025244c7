//! In-process classification lock with lease expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ClassificationLock, LockLease};

#[derive(Debug, Clone)]
struct Held {
    token: String,
    expires_at: Instant,
}

/// Single-node lock. An expired lease is treated as free.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassificationLock {
    held: Arc<Mutex<HashMap<UserId, Held>>>,
}

impl InMemoryClassificationLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_held(&self, user_id: &UserId) -> bool {
        self.held
            .lock()
            .await
            .get(user_id)
            .map(|h| h.expires_at > Instant::now())
            .unwrap_or(false)
    }
}

#[async_trait]
impl ClassificationLock for InMemoryClassificationLock {
    async fn try_acquire(
        &self,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<Option<LockLease>, DomainError> {
        let mut held = self.held.lock().await;
        let now = Instant::now();
        if let Some(current) = held.get(user_id) {
            if current.expires_at > now {
                return Ok(None);
            }
        }

        let token = Uuid::new_v4().to_string();
        held.insert(
            user_id.clone(),
            Held {
                token: token.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(Some(LockLease {
            user_id: user_id.clone(),
            token,
        }))
    }

    async fn release(&self, lease: &LockLease) -> Result<(), DomainError> {
        let mut held = self.held.lock().await;
        if held
            .get(&lease.user_id)
            .map(|h| h.token == lease.token)
            .unwrap_or(false)
        {
            held.remove(&lease.user_id);
        }
        Ok(())
    }
}
