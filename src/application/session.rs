//! Learning-session lifetimes.
//!
//! A classification started on behalf of a learning session observes that
//! session's end through a `watch` channel and abandons itself when it fires.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::domain::foundation::{SessionId, UserId};

type SessionKey = (UserId, SessionId);

/// Registry of live session signals.
#[derive(Debug, Default)]
pub struct SessionLifetimes {
    senders: Mutex<HashMap<SessionKey, watch::Sender<bool>>>,
}

impl SessionLifetimes {
    pub fn new() -> Self {
        Self::default()
    }

    fn senders(&self) -> MutexGuard<'_, HashMap<SessionKey, watch::Sender<bool>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to the end of a session.
    pub fn signal(&self, user_id: &UserId, session_id: &SessionId) -> SessionSignal {
        let mut senders = self.senders();
        senders.retain(|_, sender| sender.receiver_count() > 0);
        let sender = senders
            .entry((user_id.clone(), session_id.clone()))
            .or_insert_with(|| watch::channel(false).0);
        SessionSignal {
            receiver: sender.subscribe(),
        }
    }

    /// Fires the session's signal. Returns whether anyone was listening.
    pub fn end(&self, user_id: &UserId, session_id: &SessionId) -> bool {
        match self.senders().remove(&(user_id.clone(), session_id.clone())) {
            Some(sender) => {
                sender.send_replace(true);
                sender.receiver_count() > 0
            }
            None => false,
        }
    }

    /// Sessions with at least one subscriber.
    pub fn active(&self) -> usize {
        self.senders()
            .values()
            .filter(|sender| sender.receiver_count() > 0)
            .count()
    }
}

/// End-of-session notification for one in-flight operation.
#[derive(Debug, Clone)]
pub struct SessionSignal {
    receiver: watch::Receiver<bool>,
}

impl SessionSignal {
    pub fn is_ended(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the session ends. Never resolves if the registry drops
    /// the session without ending it.
    pub async fn ended(&mut self) {
        if self.receiver.wait_for(|ended| *ended).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
