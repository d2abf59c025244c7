//! When to run a classification cycle.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::LearningStyleProfile;
use crate::domain::foundation::{Timestamp, ValidationError};

/// What asked for a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationTrigger {
    /// Opportunistic check, gated by staleness and new evidence.
    Scheduled,
    /// Explicit user or operator request; bypasses the gate.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReclassificationReason {
    NeverClassified,
    StaleWithNewEvidence,
    ManualRequest,
}

/// Staleness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclassificationPolicy {
    staleness_window: Duration,
    min_interactions: u64,
}

impl ReclassificationPolicy {
    pub fn new(staleness_window: Duration, min_interactions: u64) -> Result<Self, ValidationError> {
        if staleness_window < Duration::zero() {
            return Err(ValidationError::out_of_range(
                "staleness_window_days",
                0.0,
                f64::MAX,
                staleness_window.num_days() as f64,
            ));
        }
        Ok(Self {
            staleness_window,
            min_interactions,
        })
    }

    pub fn min_interactions(&self) -> u64 {
        self.min_interactions
    }

    /// `recent_volume` counts interactions since the last prediction.
    pub fn needs_update(
        &self,
        profile: &LearningStyleProfile,
        recent_volume: u64,
        now: Timestamp,
    ) -> bool {
        self.evaluate(profile, recent_volume, now, ClassificationTrigger::Scheduled)
            .is_some()
    }

    pub fn evaluate(
        &self,
        profile: &LearningStyleProfile,
        recent_volume: u64,
        now: Timestamp,
        trigger: ClassificationTrigger,
    ) -> Option<ReclassificationReason> {
        if trigger == ClassificationTrigger::Manual {
            return Some(ReclassificationReason::ManualRequest);
        }
        let last = match profile.last_prediction() {
            Some(last) if profile.prediction_count() > 0 => last,
            _ => return Some(ReclassificationReason::NeverClassified),
        };
        let stale = now.duration_since(&last) > self.staleness_window;
        if stale && recent_volume >= self.min_interactions {
            Some(ReclassificationReason::StaleWithNewEvidence)
        } else {
            None
        }
    }
}

impl Default for ReclassificationPolicy {
    fn default() -> Self {
        Self {
            staleness_window: Duration::days(30),
            min_interactions: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::DataQuality;
    use crate::domain::foundation::UserId;
    use crate::domain::style::{
        ClassificationMethod, DimensionScores, LearningRate, Prediction, ProfileAggregator,
    };

    fn classified_at(at: Timestamp) -> LearningStyleProfile {
        let prediction = Prediction::new(
            DimensionScores::default(),
            DimensionScores::uniform(0.5),
            ClassificationMethod::Ml,
        )
        .unwrap();
        ProfileAggregator::update_profile(
            &LearningStyleProfile::new(UserId::new("u").unwrap(), at),
            &prediction,
            LearningRate::default(),
            DataQuality::default(),
            at,
        )
    }

    #[test]
    fn never_classified_profile_needs_update() {
        let policy = ReclassificationPolicy::default();
        let profile = LearningStyleProfile::new(UserId::new("u").unwrap(), Timestamp::now());
        assert_eq!(
            policy.evaluate(&profile, 0, Timestamp::now(), ClassificationTrigger::Scheduled),
            Some(ReclassificationReason::NeverClassified)
        );
    }

    #[test]
    fn stale_profile_waits_for_enough_new_evidence() {
        let now = Timestamp::now();
        let profile = classified_at(now.minus_days(40));
        let policy = ReclassificationPolicy::new(Duration::days(30), 10).unwrap();

        assert!(!policy.needs_update(&profile, 9, now));
        assert!(policy.needs_update(&profile, 10, now));
    }

    #[test]
    fn fresh_profile_never_needs_update() {
        let now = Timestamp::now();
        let profile = classified_at(now.minus_days(5));
        assert!(!ReclassificationPolicy::default().needs_update(&profile, 1_000, now));
    }

    #[test]
    fn manual_trigger_bypasses_gate() {
        let now = Timestamp::now();
        let profile = classified_at(now);
        assert_eq!(
            ReclassificationPolicy::default().evaluate(&profile, 0, now, ClassificationTrigger::Manual),
            Some(ReclassificationReason::ManualRequest)
        );
    }

    #[test]
    fn negative_window_is_rejected() {
        assert!(ReclassificationPolicy::new(Duration::days(-1), 10).is_err());
    }
}
