//! Deterministic fallback classification.

use super::{ClassificationMethod, Dimension, DimensionScores, LabelThresholds, Prediction};
use crate::domain::features::FeatureVector;
use crate::domain::foundation::ValidationError;

/// Classifies from pole ratios alone.
///
/// Each dimension becomes `+pole_value`, `-pole_value` or `0` with a fixed
/// confidence kept below typical model confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicClassifier {
    thresholds: LabelThresholds,
    pole_value: f64,
    confidence: f64,
}

impl HeuristicClassifier {
    pub fn new(
        thresholds: LabelThresholds,
        pole_value: f64,
        confidence: f64,
    ) -> Result<Self, ValidationError> {
        ValidationError::check_range("heuristic_pole_value", 0.0, 1.0, pole_value)?;
        ValidationError::check_range("heuristic_confidence", 0.0, 1.0, confidence)?;
        Ok(Self {
            thresholds,
            pole_value,
            confidence,
        })
    }

    /// Signed lean of a dimension in `[-1, 1]`: `2 * a / (a + b) - 1`.
    pub fn signed_share(features: &FeatureVector, dimension: Dimension) -> f64 {
        let (a, b) = features.pole_ratios(dimension);
        let total = a + b;
        let share = if total > 0.0 { a / total } else { 0.5 };
        (2.0 * share - 1.0).clamp(-1.0, 1.0)
    }

    pub fn classify(&self, features: &FeatureVector) -> Prediction {
        let dimensions = DimensionScores::from_fn(|dim| {
            let label = self.thresholds.label(dim, Self::signed_share(features, dim));
            if label == dim.first_pole() {
                self.pole_value
            } else if label == dim.second_pole() {
                -self.pole_value
            } else {
                0.0
            }
        });

        Prediction {
            dimensions,
            confidence: DimensionScores::uniform(self.confidence),
            method: ClassificationMethod::Heuristic,
        }
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self {
            thresholds: LabelThresholds::default(),
            pole_value: 0.5,
            confidence: 0.45,
        }
    }
}
