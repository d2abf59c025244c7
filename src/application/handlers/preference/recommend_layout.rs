//! RecommendLayoutHandler - Translates the current profile into layout
//! directives and applies them around the user's overrides.

use std::sync::Arc;

use tracing::info;

use super::PreferenceWriter;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::preference::{
    AdaptationOutcome, AdaptivePreference, LayoutRecommendation, PreferenceTranslator,
};
use crate::domain::style::LearningStyleProfile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendLayoutResult {
    pub preference: AdaptivePreference,
    pub recommendation: LayoutRecommendation,
    pub outcome: AdaptationOutcome,
}

pub struct RecommendLayoutHandler {
    profiles: Arc<dyn ProfileRepository>,
    writer: PreferenceWriter,
    translator: PreferenceTranslator,
}

impl RecommendLayoutHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        writer: PreferenceWriter,
        translator: PreferenceTranslator,
    ) -> Self {
        Self {
            profiles,
            writer,
            translator,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<RecommendLayoutResult, DomainError> {
        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| LearningStyleProfile::new(user_id.clone(), Timestamp::now()));

        let translator = self.translator;
        let (preference, (recommendation, outcome)) = self
            .writer
            .update(user_id, |preference, now| {
                let recommendation = translator.recommend(&profile, preference.adaptive_settings());
                let outcome = preference.apply_recommendation(&recommendation, now);
                (recommendation, outcome)
            })
            .await?;

        info!(
            user_id = %user_id,
            applied = outcome.applied.len(),
            deferred = outcome.deferred.len(),
            "Layout recommendation applied"
        );

        Ok(RecommendLayoutResult {
            preference,
            recommendation,
            outcome,
        })
    }
}
