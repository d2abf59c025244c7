//! ClassificationLock port - at most one classification per user.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{DomainError, UserId};

/// Proof of holding the lock for a user.
///
/// The token distinguishes this holder from a later one after TTL expiry,
/// so a slow holder cannot release someone else's lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLease {
    pub user_id: UserId,
    pub token: String,
}

#[async_trait]
pub trait ClassificationLock: Send + Sync {
    /// Takes the lock if free. `ttl` bounds how long a crashed holder can
    /// block the user.
    async fn try_acquire(
        &self,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<Option<LockLease>, DomainError>;

    /// Releases the lease if it is still the current holder.
    async fn release(&self, lease: &LockLease) -> Result<(), DomainError>;
}
