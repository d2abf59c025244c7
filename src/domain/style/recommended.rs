//! Learning modes to suggest from a profile's dominant poles.

use serde::Serialize;

use super::{Dimension, DimensionScores, LabelThresholds, StyleLabel};
use crate::domain::behavior::ContentMode;

/// One suggested mode, ranked by how strongly its dimension leans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedMode {
    pub mode: ContentMode,
    /// 1 is the strongest preference.
    pub priority: u8,
    pub confidence: f64,
    pub dimension: Dimension,
    pub score: f64,
}

impl RecommendedMode {
    /// One entry per dimension that has a dominant pole, strongest first.
    ///
    /// Balanced dimensions contribute nothing. Ties keep dimension order.
    pub fn rank(
        dimensions: &DimensionScores,
        confidence: &DimensionScores,
        thresholds: &LabelThresholds,
    ) -> Vec<RecommendedMode> {
        let mut modes: Vec<RecommendedMode> = dimensions
            .iter()
            .filter_map(|(dimension, score)| {
                let mode = mode_for(thresholds.label(dimension, score))?;
                Some(RecommendedMode {
                    mode,
                    priority: 0,
                    confidence: confidence.get(dimension),
                    dimension,
                    score,
                })
            })
            .collect();

        modes.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
        for (rank, mode) in modes.iter_mut().enumerate() {
            mode.priority = rank as u8 + 1;
        }
        modes
    }
}

fn mode_for(label: StyleLabel) -> Option<ContentMode> {
    match label {
        StyleLabel::Active => Some(ContentMode::ActiveLearning),
        StyleLabel::Reflective => Some(ContentMode::ReflectiveLearning),
        StyleLabel::Sensing => Some(ContentMode::SensingLearning),
        StyleLabel::Intuitive => Some(ContentMode::IntuitiveLearning),
        StyleLabel::Visual => Some(ContentMode::VisualLearning),
        StyleLabel::Verbal => Some(ContentMode::AiNarrator),
        StyleLabel::Sequential => Some(ContentMode::SequentialLearning),
        StyleLabel::Global => Some(ContentMode::GlobalLearning),
        StyleLabel::Balanced => None,
    }
}
