//! Per-user learning-style profile.

use serde::{Deserialize, Serialize};

use super::{
    ClassificationMethod, DimensionScores, DominantLabels, LabelThresholds, RecommendedMode,
};
use crate::domain::features::DataQuality;
use crate::domain::foundation::{Timestamp, UserId};

/// The persisted learning-style estimate for one user.
///
/// Created neutral with `Default` method and zero confidence. Values stay in
/// `[-1, 1]` and confidences in `[0, 1]` after every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStyleProfile {
    user_id: UserId,
    dimensions: DimensionScores,
    confidence: DimensionScores,
    classification_method: ClassificationMethod,
    last_prediction: Option<Timestamp>,
    prediction_count: u64,
    data_quality: DataQuality,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl LearningStyleProfile {
    /// Creates the cold-start profile.
    pub fn new(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            dimensions: DimensionScores::default(),
            confidence: DimensionScores::default(),
            classification_method: ClassificationMethod::Default,
            last_prediction: None,
            prediction_count: 0,
            data_quality: DataQuality::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn dimensions(&self) -> &DimensionScores {
        &self.dimensions
    }

    pub fn confidence(&self) -> &DimensionScores {
        &self.confidence
    }

    pub fn classification_method(&self) -> ClassificationMethod {
        self.classification_method
    }

    pub fn last_prediction(&self) -> Option<Timestamp> {
        self.last_prediction
    }

    pub fn prediction_count(&self) -> u64 {
        self.prediction_count
    }

    pub fn data_quality(&self) -> &DataQuality {
        &self.data_quality
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_classified(&self) -> bool {
        self.prediction_count > 0
    }

    pub fn dominant_labels(&self, thresholds: &LabelThresholds) -> DominantLabels {
        DominantLabels::from_scores(&self.dimensions, thresholds)
    }

    pub fn recommended_modes(&self, thresholds: &LabelThresholds) -> Vec<RecommendedMode> {
        RecommendedMode::rank(&self.dimensions, &self.confidence, thresholds)
    }

    pub(super) fn commit(
        &mut self,
        dimensions: DimensionScores,
        confidence: DimensionScores,
        method: ClassificationMethod,
        data_quality: DataQuality,
        now: Timestamp,
    ) {
        self.dimensions = dimensions;
        self.confidence = confidence;
        self.classification_method = method;
        self.data_quality = data_quality;
        self.last_prediction = Some(now);
        self.prediction_count = self.prediction_count.saturating_add(1);
        self.updated_at = now;
    }
}
