//! Manual layout choices: set (freezing fields) and clear (unfreezing them).

use tracing::info;

use super::PreferenceWriter;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preference::{
    AdaptivePreference, AdaptiveSettings, LayoutField, LayoutPatch,
};

#[derive(Debug, Clone)]
pub struct SetManualPreferencesCommand {
    pub user_id: UserId,
    pub layout: LayoutPatch,
    /// Replaces the adaptive settings when present.
    pub settings: Option<AdaptiveSettings>,
}

#[derive(Debug, Clone)]
pub struct ClearManualOverridesCommand {
    pub user_id: UserId,
    /// Fields to unfreeze; empty means all.
    pub fields: Vec<LayoutField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClearManualOverridesResult {
    pub preference: AdaptivePreference,
    /// Fields that received a pending recommendation.
    pub applied: Vec<LayoutField>,
}

pub struct ManualPreferencesHandler {
    writer: PreferenceWriter,
}

impl ManualPreferencesHandler {
    pub fn new(writer: PreferenceWriter) -> Self {
        Self { writer }
    }

    pub async fn set(
        &self,
        cmd: SetManualPreferencesCommand,
    ) -> Result<AdaptivePreference, DomainError> {
        let directives = cmd.layout.directives();
        if directives.is_empty() && cmd.settings.is_none() {
            return Err(DomainError::validation(
                "layout",
                "At least one layout field or settings value is required",
            ));
        }

        let (preference, ()) = self
            .writer
            .update(&cmd.user_id, |preference, now| {
                preference.apply_manual(&directives, now);
                if let Some(settings) = cmd.settings {
                    preference.update_settings(settings, now);
                }
            })
            .await?;

        info!(
            user_id = %cmd.user_id,
            fields = directives.len(),
            "Manual layout preferences saved"
        );
        Ok(preference)
    }

    pub async fn clear(
        &self,
        cmd: ClearManualOverridesCommand,
    ) -> Result<ClearManualOverridesResult, DomainError> {
        let (preference, applied) = self
            .writer
            .update(&cmd.user_id, |preference, now| {
                preference.clear_overrides(&cmd.fields, now)
            })
            .await?;

        info!(
            user_id = %cmd.user_id,
            applied = applied.len(),
            "Manual overrides cleared"
        );
        Ok(ClearManualOverridesResult {
            preference,
            applied,
        })
    }
}
