//! Evidence sufficiency metrics.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Minimums for model classification and targets for the completeness score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataQualityThresholds {
    pub min_interactions: u64,
    pub min_duration_ms: u64,
    pub min_active_days: u64,
    pub target_interactions: u64,
    pub target_duration_ms: u64,
    pub target_active_days: u64,
}

impl DataQualityThresholds {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("target_interactions", self.target_interactions),
            ("target_duration_ms", self.target_duration_ms),
            ("target_active_days", self.target_active_days),
        ] {
            if value == 0 {
                return Err(ValidationError::out_of_range(field, 1.0, f64::MAX, 0.0));
            }
        }
        Ok(())
    }
}

impl Default for DataQualityThresholds {
    fn default() -> Self {
        Self {
            min_interactions: 10,
            min_duration_ms: 30_000,
            min_active_days: 1,
            target_interactions: 20,
            target_duration_ms: 300_000,
            target_active_days: 5,
        }
    }
}

/// How much evidence a profile rests on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub total_interactions: u64,
    pub total_duration_ms: u64,
    pub active_days: u64,
    /// Number of distinct content modes used.
    pub distinct_modes: u64,
    pub last_activity: Option<Timestamp>,
    /// 0-100.
    pub completeness: u8,
    pub sufficient_for_ml: bool,
}

impl DataQuality {
    pub fn has_evidence(&self) -> bool {
        self.total_interactions > 0
    }
}

/// Saturating percentage of `value` against `target`.
pub(super) fn saturating_score(value: u64, target: u64) -> f64 {
    if target == 0 {
        return 100.0;
    }
    (value as f64 / target as f64 * 100.0).min(100.0)
}
