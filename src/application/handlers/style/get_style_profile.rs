//! GetStyleProfileHandler - Query handler for the profile read model.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::behavior::EvidenceWindow;
use crate::domain::features::DataQuality;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::style::{
    ClassificationMethod, DimensionScores, DominantLabels, LabelThresholds, LearningStyleProfile,
    ReclassificationPolicy, RecommendedMode,
};
use crate::ports::{BehaviorStore, ProfileRepository};

/// Query for a user's profile.
#[derive(Debug, Clone)]
pub struct GetStyleProfileQuery {
    pub user_id: UserId,
}

/// Profile as presented to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfileView {
    pub user_id: UserId,
    pub dimensions: DimensionScores,
    pub confidence: DimensionScores,
    pub dominant_labels: DominantLabels,
    pub recommended_modes: Vec<RecommendedMode>,
    pub classification_method: ClassificationMethod,
    pub last_prediction: Option<Timestamp>,
    pub prediction_count: u64,
    pub data_quality: DataQuality,
    pub needs_update: bool,
}

pub struct GetStyleProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    behavior: Arc<dyn BehaviorStore>,
    policy: ReclassificationPolicy,
    thresholds: LabelThresholds,
    evidence: EvidenceWindow,
}

impl GetStyleProfileHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        behavior: Arc<dyn BehaviorStore>,
        policy: ReclassificationPolicy,
        thresholds: LabelThresholds,
    ) -> Self {
        Self {
            profiles,
            behavior,
            policy,
            thresholds,
            evidence: EvidenceWindow::default(),
        }
    }

    /// Must match the classify handler's window so `needs_update` agrees
    /// with what a scheduled run decides.
    pub fn with_evidence_window(mut self, window: EvidenceWindow) -> Self {
        self.evidence = window;
        self
    }

    /// Unknown users get the cold-start profile. Nothing is written here;
    /// the first classification persists the profile.
    pub async fn handle(&self, query: GetStyleProfileQuery) -> Result<StyleProfileView, DomainError> {
        let now = Timestamp::now();
        let profile = self
            .profiles
            .find_by_user(&query.user_id)
            .await?
            .unwrap_or_else(|| LearningStyleProfile::new(query.user_id.clone(), now));

        let records = self
            .behavior
            .records_for_user(&query.user_id, Some(self.evidence.start(&now)))
            .await?;
        let recent_volume =
            self.evidence
                .recent_volume(&records, profile.last_prediction().as_ref(), &now);

        Ok(StyleProfileView {
            needs_update: self.policy.needs_update(&profile, recent_volume, now),
            dominant_labels: profile.dominant_labels(&self.thresholds),
            recommended_modes: profile.recommended_modes(&self.thresholds),
            user_id: profile.user_id().clone(),
            dimensions: *profile.dimensions(),
            confidence: *profile.confidence(),
            classification_method: profile.classification_method(),
            last_prediction: profile.last_prediction(),
            prediction_count: profile.prediction_count(),
            data_quality: profile.data_quality().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBehaviorStore, InMemoryProfileRepository};
    use crate::domain::behavior::ContentMode;
    use crate::domain::style::{
        Dimension, LearningRate, Prediction, ProfileAggregator, StyleLabel,
    };

    fn user() -> UserId {
        UserId::new("learner-3").unwrap()
    }

    fn handler(profiles: &InMemoryProfileRepository) -> GetStyleProfileHandler {
        GetStyleProfileHandler::new(
            Arc::new(profiles.clone()),
            Arc::new(InMemoryBehaviorStore::new()),
            ReclassificationPolicy::default(),
            LabelThresholds::default(),
        )
    }

    #[tokio::test]
    async fn cold_start_profile_is_neutral_and_needs_update() {
        let profiles = InMemoryProfileRepository::new();

        let view = handler(&profiles)
            .handle(GetStyleProfileQuery { user_id: user() })
            .await
            .unwrap();

        assert!(view.needs_update);
        assert_eq!(view.prediction_count, 0);
        assert_eq!(view.classification_method, ClassificationMethod::Default);
        for dim in Dimension::ALL {
            assert_eq!(view.dominant_labels.get(dim), StyleLabel::Balanced);
        }
        assert!(view.recommended_modes.is_empty());
        assert!(profiles.find_by_user(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn classified_profile_reports_labels() {
        let profiles = InMemoryProfileRepository::new();
        let now = Timestamp::now();
        let prediction = Prediction::new(
            DimensionScores::from_fn(|d| if d == Dimension::VisualVerbal { 1.0 } else { 0.0 }),
            DimensionScores::uniform(0.9),
            ClassificationMethod::Ml,
        )
        .unwrap();
        let profile = ProfileAggregator::update_profile(
            &LearningStyleProfile::new(user(), now),
            &prediction,
            LearningRate::new(0.5).unwrap(),
            DataQuality::default(),
            now,
        );
        profiles.save(&profile).await.unwrap();

        let view = handler(&profiles)
            .handle(GetStyleProfileQuery { user_id: user() })
            .await
            .unwrap();

        assert!(!view.needs_update);
        assert_eq!(view.prediction_count, 1);
        assert_eq!(view.dominant_labels.visual_verbal, StyleLabel::Visual);
        assert_eq!(view.dominant_labels.active_reflective, StyleLabel::Balanced);
        assert_eq!(view.recommended_modes.len(), 1);
        assert_eq!(view.recommended_modes[0].mode, ContentMode::VisualLearning);
        assert_eq!(view.recommended_modes[0].priority, 1);
        assert!((view.recommended_modes[0].confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn view_serializes_camel_case() {
        let now = Timestamp::now();
        let profile = LearningStyleProfile::new(user(), now);
        let view = StyleProfileView {
            user_id: user(),
            dimensions: *profile.dimensions(),
            confidence: *profile.confidence(),
            dominant_labels: profile.dominant_labels(&LabelThresholds::default()),
            recommended_modes: Vec::new(),
            classification_method: profile.classification_method(),
            last_prediction: None,
            prediction_count: 0,
            data_quality: DataQuality::default(),
            needs_update: true,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["dominantLabels"]["visualVerbal"], "balanced");
        assert_eq!(json["needsUpdate"], true);
        assert_eq!(json["recommendedModes"], serde_json::json!([]));
        assert_eq!(json["classificationMethod"], "default");
    }
}
