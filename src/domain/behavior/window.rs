//! Evidence window shared by classification and profile reads.

use chrono::Duration;

use super::{BehaviorRecord, BucketKey};
use crate::domain::foundation::{Timestamp, ValidationError};

/// How far back behavior counts, both as classifier input and as new
/// evidence for the staleness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceWindow {
    span: Duration,
}

impl EvidenceWindow {
    pub fn new(span: Duration) -> Result<Self, ValidationError> {
        if span <= Duration::zero() {
            return Err(ValidationError::out_of_range(
                "feature_window_days",
                1.0,
                f64::MAX,
                span.num_days() as f64,
            ));
        }
        Ok(Self { span })
    }

    pub fn span(&self) -> Duration {
        self.span
    }

    /// Oldest bucket inside the window.
    pub fn start(&self, now: &Timestamp) -> BucketKey {
        BucketKey::for_timestamp(&now.minus(self.span))
    }

    /// Interactions inside the window recorded on or after the day of
    /// `since` (every in-window bucket when `since` is `None`).
    ///
    /// Buckets are whole UTC days, so interactions earlier on the day of
    /// `since` count again. This can bring a re-classification forward by
    /// at most one day of evidence.
    pub fn recent_volume(
        &self,
        records: &[BehaviorRecord],
        since: Option<&Timestamp>,
        now: &Timestamp,
    ) -> u64 {
        let start = self.start(now);
        let since = since.map(BucketKey::for_timestamp);
        records
            .iter()
            .filter(|r| r.bucket >= start)
            .filter(|r| since.map_or(true, |since| r.bucket >= since))
            .map(|r| r.total_interactions())
            .sum()
    }
}

impl Default for EvidenceWindow {
    fn default() -> Self {
        Self {
            span: Duration::days(90),
        }
    }
}
