//! Rules for pairing mode start/end events into counted segments.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::ContentMode;
use crate::domain::foundation::{SessionId, Timestamp, UserId, ValidationError};

/// Identifies one open mode segment.
///
/// Several modes may be open at once for the same user and session; each is
/// tracked under its own key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModeSegmentKey {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub mode: ContentMode,
}

impl ModeSegmentKey {
    pub fn new(user_id: UserId, session_id: SessionId, mode: ContentMode) -> Self {
        Self {
            user_id,
            session_id,
            mode,
        }
    }
}

/// A started segment awaiting its end event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSegment {
    pub key: ModeSegmentKey,
    pub started_at: Timestamp,
}

/// Result of closing a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// Within the grace period; add to the bucket of the end time.
    Counted { duration_ms: u64 },
    /// Open longer than the grace period; discarded.
    Expired { elapsed_ms: i64 },
    /// End precedes start; discarded.
    ClockSkew,
}

/// Grace-period policy for open segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPolicy {
    grace_period: Duration,
}

impl SegmentPolicy {
    pub fn new(grace_period: Duration) -> Result<Self, ValidationError> {
        if grace_period <= Duration::zero() {
            return Err(ValidationError::out_of_range(
                "mode_grace_period_secs",
                1.0,
                f64::MAX,
                grace_period.num_seconds() as f64,
            ));
        }
        Ok(Self { grace_period })
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Decides whether a segment ending at `ended_at` counts.
    pub fn close(&self, started_at: &Timestamp, ended_at: &Timestamp) -> SegmentOutcome {
        let elapsed = ended_at.duration_since(started_at);
        if elapsed < Duration::zero() {
            return SegmentOutcome::ClockSkew;
        }
        if elapsed > self.grace_period {
            return SegmentOutcome::Expired {
                elapsed_ms: elapsed.num_milliseconds(),
            };
        }
        SegmentOutcome::Counted {
            duration_ms: elapsed.num_milliseconds().max(0) as u64,
        }
    }

    /// Starts older than this are purged without being counted.
    pub fn abandoned_before(&self, now: &Timestamp) -> Timestamp {
        now.minus(self.grace_period)
    }
}

impl Default for SegmentPolicy {
    fn default() -> Self {
        Self {
            grace_period: Duration::hours(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_datetime(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap())
    }

    #[test]
    fn segment_within_grace_is_counted() {
        let policy = SegmentPolicy::new(Duration::minutes(10)).unwrap();
        assert_eq!(
            policy.close(&at(0), &at(90)),
            SegmentOutcome::Counted { duration_ms: 90_000 }
        );
    }

    #[test]
    fn segment_exactly_at_grace_is_counted() {
        let policy = SegmentPolicy::new(Duration::minutes(10)).unwrap();
        assert!(matches!(
            policy.close(&at(0), &at(600)),
            SegmentOutcome::Counted { .. }
        ));
    }

    #[test]
    fn segment_beyond_grace_expires() {
        let policy = SegmentPolicy::new(Duration::minutes(10)).unwrap();
        assert_eq!(
            policy.close(&at(0), &at(601)),
            SegmentOutcome::Expired { elapsed_ms: 601_000 }
        );
    }

    #[test]
    fn end_before_start_is_clock_skew() {
        let policy = SegmentPolicy::default();
        assert_eq!(policy.close(&at(10), &at(5)), SegmentOutcome::ClockSkew);
    }

    #[test]
    fn zero_grace_period_is_rejected() {
        assert!(SegmentPolicy::new(Duration::zero()).is_err());
    }

    #[test]
    fn abandoned_cutoff_is_now_minus_grace() {
        let policy = SegmentPolicy::new(Duration::seconds(30)).unwrap();
        assert_eq!(policy.abandoned_before(&at(100)), at(70));
    }
}
