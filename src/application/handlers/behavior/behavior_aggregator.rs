//! BehaviorAggregator - Turns mode start/end events and activity pings into
//! day-bucketed engagement counters.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::SessionLifetimes;
use crate::domain::behavior::{
    ActivityKind, ContentMode, ModeSegmentKey, OpenSegment, SegmentOutcome,
    SegmentPolicy,
};
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::ports::{BehaviorStore, ModeSessionStore};

/// Result of opening a mode segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStartResult {
    /// Outcome for a segment of the same key that was still open.
    pub replaced: Option<SegmentOutcome>,
    /// Abandoned segments purged on the way in.
    pub purged: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndSessionResult {
    pub discarded_segments: usize,
    /// Whether an in-flight classification was listening for this session.
    pub signalled: bool,
}

/// Handler for behavior events.
pub struct BehaviorAggregator {
    store: Arc<dyn BehaviorStore>,
    sessions: Arc<dyn ModeSessionStore>,
    lifetimes: Arc<SessionLifetimes>,
    policy: SegmentPolicy,
}

impl BehaviorAggregator {
    pub fn new(
        store: Arc<dyn BehaviorStore>,
        sessions: Arc<dyn ModeSessionStore>,
        lifetimes: Arc<SessionLifetimes>,
        policy: SegmentPolicy,
    ) -> Self {
        Self {
            store,
            sessions,
            lifetimes,
            policy,
        }
    }

    pub async fn record_mode_start(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        mode: ContentMode,
        at: Timestamp,
    ) -> Result<ModeStartResult, DomainError> {
        let purged = self
            .sessions
            .purge_started_before(self.policy.abandoned_before(&at))
            .await?;
        if purged > 0 {
            debug!(purged, "Purged abandoned mode segments");
        }

        let key = ModeSegmentKey::new(user_id.clone(), session_id.clone(), mode);
        let previous = self
            .sessions
            .open(OpenSegment {
                key,
                started_at: at,
            })
            .await?;

        let replaced = match previous {
            Some(open) => Some(self.settle(&open, at).await?),
            None => None,
        };

        Ok(ModeStartResult { replaced, purged })
    }

    /// Closes the matching open segment. `None` when nothing was open.
    pub async fn record_mode_end(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        mode: ContentMode,
        at: Timestamp,
    ) -> Result<Option<SegmentOutcome>, DomainError> {
        let key = ModeSegmentKey::new(user_id.clone(), session_id.clone(), mode);
        match self.sessions.close(&key).await? {
            Some(open) => self.settle(&open, at).await.map(Some),
            None => {
                debug!(
                    user_id = %user_id,
                    mode = mode.key(),
                    "Mode end without open start ignored"
                );
                Ok(None)
            }
        }
    }

    pub async fn record_activity(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        at: Timestamp,
    ) -> Result<(), DomainError> {
        self.store.add_activity(user_id, kind, at).await
    }

    /// Discards the session's open segments and cancels classifications
    /// running on its behalf.
    pub async fn end_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<EndSessionResult, DomainError> {
        let discarded_segments = self.sessions.discard_session(user_id, session_id).await?;
        let signalled = self.lifetimes.end(user_id, session_id);
        info!(
            user_id = %user_id,
            session_id = %session_id,
            discarded_segments,
            signalled,
            "Learning session ended"
        );
        Ok(EndSessionResult {
            discarded_segments,
            signalled,
        })
    }

    /// Purges every open segment older than the grace period.
    pub async fn sweep_abandoned(&self, now: Timestamp) -> Result<usize, DomainError> {
        self.sessions
            .purge_started_before(self.policy.abandoned_before(&now))
            .await
    }

    async fn settle(
        &self,
        open: &OpenSegment,
        ended_at: Timestamp,
    ) -> Result<SegmentOutcome, DomainError> {
        let outcome = self.policy.close(&open.started_at, &ended_at);
        match outcome {
            SegmentOutcome::Counted { duration_ms } => {
                self.store
                    .add_mode_segment(&open.key.user_id, open.key.mode, duration_ms, ended_at)
                    .await?;
            }
            SegmentOutcome::Expired { elapsed_ms } => {
                debug!(
                    user_id = %open.key.user_id,
                    mode = open.key.mode.key(),
                    elapsed_ms,
                    "Mode segment exceeded grace period; discarded"
                );
            }
            SegmentOutcome::ClockSkew => {
                debug!(
                    user_id = %open.key.user_id,
                    mode = open.key.mode.key(),
                    "Mode segment ended before it started; discarded"
                );
            }
        }
        Ok(outcome)
    }
}
