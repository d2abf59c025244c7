//! Confidence-weighted exponential smoothing of predictions into a profile.

use serde::{Deserialize, Serialize};

use super::{Dimension, DimensionScores, LearningStyleProfile, Prediction};
use crate::domain::features::DataQuality;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Smoothing factor in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LearningRate(f64);

impl LearningRate {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(ValidationError::out_of_range("learning_rate", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for LearningRate {
    fn default() -> Self {
        Self(0.1)
    }
}

impl TryFrom<f64> for LearningRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LearningRate> for f64 {
    fn from(rate: LearningRate) -> Self {
        rate.0
    }
}

/// Sole writer of [`LearningStyleProfile`] values.
pub struct ProfileAggregator;

impl ProfileAggregator {
    /// Returns the profile advanced by one prediction.
    ///
    /// `v' = v * (1 - a) + p * a` for both values and confidences, clamped to
    /// their bounds.
    pub fn update_profile(
        profile: &LearningStyleProfile,
        prediction: &Prediction,
        rate: LearningRate,
        data_quality: DataQuality,
        now: Timestamp,
    ) -> LearningStyleProfile {
        let a = rate.value();
        let blend = |old: f64, new: f64| old * (1.0 - a) + new * a;

        let dimensions = DimensionScores::from_fn(|dim: Dimension| {
            blend(profile.dimensions().get(dim), prediction.dimensions().get(dim)).clamp(-1.0, 1.0)
        });
        let confidence = DimensionScores::from_fn(|dim: Dimension| {
            blend(profile.confidence().get(dim), prediction.confidence().get(dim)).clamp(0.0, 1.0)
        });

        let mut next = profile.clone();
        next.commit(dimensions, confidence, prediction.method(), data_quality, now);
        next
    }
}
