//! Thresholded categorical interpretation of dimension values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Dimension, DimensionScores};
use crate::domain::foundation::ValidationError;

/// A pole of a dichotomy, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleLabel {
    Active,
    Reflective,
    Sensing,
    Intuitive,
    Visual,
    Verbal,
    Sequential,
    Global,
    Balanced,
}

impl fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StyleLabel::Active => "active",
            StyleLabel::Reflective => "reflective",
            StyleLabel::Sensing => "sensing",
            StyleLabel::Intuitive => "intuitive",
            StyleLabel::Visual => "visual",
            StyleLabel::Verbal => "verbal",
            StyleLabel::Sequential => "sequential",
            StyleLabel::Global => "global",
            StyleLabel::Balanced => "balanced",
        };
        write!(f, "{}", s)
    }
}

/// The single labelling rule shared by the heuristic and the profile.
///
/// `value > t` is the first pole, `value < -t` the second, anything in
/// between is balanced. A dominance of 0.2 is the signed-scale equivalent of
/// share cut points 0.6 / 0.4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    dominance: f64,
}

impl LabelThresholds {
    pub fn new(dominance: f64) -> Result<Self, ValidationError> {
        if !(dominance > 0.0 && dominance < 1.0) {
            return Err(ValidationError::out_of_range(
                "dominance_threshold",
                0.0,
                1.0,
                dominance,
            ));
        }
        Ok(Self { dominance })
    }

    pub fn dominance(&self) -> f64 {
        self.dominance
    }

    pub fn label(&self, dimension: Dimension, value: f64) -> StyleLabel {
        if value > self.dominance {
            dimension.first_pole()
        } else if value < -self.dominance {
            dimension.second_pole()
        } else {
            StyleLabel::Balanced
        }
    }
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self { dominance: 0.2 }
    }
}

/// Dominant label per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantLabels {
    pub active_reflective: StyleLabel,
    pub sensing_intuitive: StyleLabel,
    pub visual_verbal: StyleLabel,
    pub sequential_global: StyleLabel,
}

impl DominantLabels {
    pub fn from_scores(scores: &DimensionScores, thresholds: &LabelThresholds) -> Self {
        Self {
            active_reflective: thresholds
                .label(Dimension::ActiveReflective, scores.active_reflective),
            sensing_intuitive: thresholds
                .label(Dimension::SensingIntuitive, scores.sensing_intuitive),
            visual_verbal: thresholds.label(Dimension::VisualVerbal, scores.visual_verbal),
            sequential_global: thresholds
                .label(Dimension::SequentialGlobal, scores.sequential_global),
        }
    }

    pub fn get(&self, dimension: Dimension) -> StyleLabel {
        match dimension {
            Dimension::ActiveReflective => self.active_reflective,
            Dimension::SensingIntuitive => self.sensing_intuitive,
            Dimension::VisualVerbal => self.visual_verbal,
            Dimension::SequentialGlobal => self.sequential_global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_splits_on_dominance() {
        let t = LabelThresholds::default();
        assert_eq!(t.label(Dimension::VisualVerbal, 0.21), StyleLabel::Visual);
        assert_eq!(t.label(Dimension::VisualVerbal, -0.21), StyleLabel::Verbal);
        assert_eq!(t.label(Dimension::VisualVerbal, 0.2), StyleLabel::Balanced);
        assert_eq!(t.label(Dimension::VisualVerbal, -0.2), StyleLabel::Balanced);
    }

    #[test]
    fn thresholds_reject_out_of_range() {
        assert!(LabelThresholds::new(0.0).is_err());
        assert!(LabelThresholds::new(1.0).is_err());
        assert!(LabelThresholds::new(f64::NAN).is_err());
        assert!(LabelThresholds::new(0.35).is_ok());
    }

    #[test]
    fn neutral_scores_are_all_balanced() {
        let labels = DominantLabels::from_scores(&DimensionScores::default(), &LabelThresholds::default());
        for dim in Dimension::ALL {
            assert_eq!(labels.get(dim), StyleLabel::Balanced);
        }
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&StyleLabel::Sequential).unwrap(), "\"sequential\"");
    }
}
