//! Profile to layout directives.

use serde::{Deserialize, Serialize};

use super::{AdaptiveSettings, CardSize, GridColumns, LayoutDirective, SortOrder};
use crate::domain::style::{Dimension, LabelThresholds, LearningStyleProfile, StyleLabel};

/// Directives derived from one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecommendation {
    pub directives: Vec<LayoutDirective>,
    /// Dimensions that were confident and non-balanced.
    pub contributing: Vec<Dimension>,
}

impl LayoutRecommendation {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Deterministic label-to-layout table.
///
/// Each dimension owns disjoint layout fields, so contributions never
/// conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreferenceTranslator {
    thresholds: LabelThresholds,
}

impl PreferenceTranslator {
    pub fn new(thresholds: LabelThresholds) -> Self {
        Self { thresholds }
    }

    fn directives_for(label: StyleLabel) -> Vec<LayoutDirective> {
        type D = LayoutDirective;
        match label {
            StyleLabel::Active => vec![D::CompactMode(true), D::SidebarCollapsed(true)],
            StyleLabel::Reflective => vec![D::CompactMode(false), D::SidebarCollapsed(false)],
            StyleLabel::Sensing => vec![D::ShowProgress(true)],
            StyleLabel::Intuitive => vec![D::ShowProgress(false)],
            StyleLabel::Visual => vec![D::CardSize(CardSize::Large), D::ShowThumbnails(true)],
            StyleLabel::Verbal => vec![D::CardSize(CardSize::Small), D::ShowThumbnails(false)],
            StyleLabel::Sequential => vec![
                D::SortOrder(SortOrder::Progress),
                D::GridColumns(GridColumns::Two),
            ],
            StyleLabel::Global => vec![
                D::SortOrder(SortOrder::Personalized),
                D::GridColumns(GridColumns::Four),
            ],
            StyleLabel::Balanced => vec![],
        }
    }

    pub fn recommend(
        &self,
        profile: &LearningStyleProfile,
        settings: &AdaptiveSettings,
    ) -> LayoutRecommendation {
        let labels = profile.dominant_labels(&self.thresholds);
        let threshold = settings.confidence_threshold.value();

        let mut recommendation = LayoutRecommendation::default();
        for dim in Dimension::ALL {
            let label = labels.get(dim);
            if label == StyleLabel::Balanced || profile.confidence().get(dim) < threshold {
                continue;
            }
            recommendation.directives.extend(Self::directives_for(label));
            recommendation.contributing.push(dim);
        }
        recommendation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::DataQuality;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::preference::{ConfidenceThreshold, LayoutField};
    use crate::domain::style::{
        ClassificationMethod, DimensionScores, LearningRate, Prediction, ProfileAggregator,
    };
    use std::collections::HashSet;

    fn profile(values: DimensionScores, confidence: f64) -> LearningStyleProfile {
        let prediction = Prediction::new(
            values,
            DimensionScores::uniform(confidence),
            ClassificationMethod::Ml,
        )
        .unwrap();
        ProfileAggregator::update_profile(
            &LearningStyleProfile::new(UserId::new("u").unwrap(), Timestamp::now()),
            &prediction,
            LearningRate::new(1.0).unwrap(),
            DataQuality::default(),
            Timestamp::now(),
        )
    }

    fn settings(threshold: f64) -> AdaptiveSettings {
        AdaptiveSettings::new(
            LearningRate::default(),
            ConfidenceThreshold::new(threshold).unwrap(),
            true,
        )
    }

    #[test]
    fn visual_sequential_profile_maps_to_table() {
        let values = DimensionScores {
            active_reflective: 0.0,
            sensing_intuitive: 0.0,
            visual_verbal: 0.6,
            sequential_global: 0.5,
        };
        let rec = PreferenceTranslator::default().recommend(&profile(values, 0.8), &settings(0.3));

        assert_eq!(
            rec.directives,
            vec![
                LayoutDirective::CardSize(CardSize::Large),
                LayoutDirective::ShowThumbnails(true),
                LayoutDirective::SortOrder(SortOrder::Progress),
                LayoutDirective::GridColumns(GridColumns::Two),
            ]
        );
        assert_eq!(rec.contributing, vec![Dimension::VisualVerbal, Dimension::SequentialGlobal]);
    }

    #[test]
    fn low_confidence_yields_nothing() {
        let rec = PreferenceTranslator::default()
            .recommend(&profile(DimensionScores::uniform(-0.9), 0.2), &settings(0.3));
        assert!(rec.is_empty());
    }

    #[test]
    fn cold_start_profile_yields_nothing() {
        let cold = LearningStyleProfile::new(UserId::new("u").unwrap(), Timestamp::now());
        assert!(PreferenceTranslator::default().recommend(&cold, &settings(0.1)).is_empty());
    }

    #[test]
    fn second_poles_map_to_opposite_values() {
        let rec = PreferenceTranslator::default()
            .recommend(&profile(DimensionScores::uniform(-0.9), 0.9), &settings(0.3));
        assert!(rec.directives.contains(&LayoutDirective::CompactMode(false)));
        assert!(rec.directives.contains(&LayoutDirective::ShowProgress(false)));
        assert!(rec.directives.contains(&LayoutDirective::CardSize(CardSize::Small)));
        assert!(rec.directives.contains(&LayoutDirective::GridColumns(GridColumns::Four)));
    }

    #[test]
    fn dimensions_own_disjoint_fields() {
        let rec = PreferenceTranslator::default()
            .recommend(&profile(DimensionScores::uniform(0.9), 0.9), &settings(0.3));
        let fields: HashSet<LayoutField> = rec.directives.iter().map(|d| d.field()).collect();
        assert_eq!(fields.len(), rec.directives.len());
        assert_eq!(fields.len(), LayoutField::ALL.len());
    }
}
