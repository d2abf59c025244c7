//! Redis-backed classification lock for multi-server deployments.
//!
//! Acquire is `SET key token NX PX ttl`; release deletes the key only if it
//! still holds our token, checked atomically in a Lua script.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ClassificationLock, LockLease};

const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

#[derive(Clone)]
pub struct RedisClassificationLock {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisClassificationLock {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: "adaptive_learning:classification_lock".to_string(),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key_for(&self, user_id: &UserId) -> String {
        format!("{}:{}", self.key_prefix, user_id)
    }
}

fn unavailable(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("classification lock unavailable: {}", e))
}

#[async_trait]
impl ClassificationLock for RedisClassificationLock {
    async fn try_acquire(
        &self,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<Option<LockLease>, DomainError> {
        let token = Uuid::new_v4().to_string();
        let ttl_ms = ttl.as_millis().max(1) as u64;
        let mut conn = self.conn.clone();

        let reply: Option<String> = redis::cmd("SET")
            .arg(self.key_for(user_id))
            .arg(&token)
            .arg("NX")
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(reply.map(|_| LockLease {
            user_id: user_id.clone(),
            token,
        }))
    }

    async fn release(&self, lease: &LockLease) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::Script::new(RELEASE_SCRIPT)
            .key(self.key_for(&lease.user_id))
            .arg(&lease.token)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisClassificationLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClassificationLock")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

