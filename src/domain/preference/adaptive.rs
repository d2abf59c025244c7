//! Per-user adaptive preference record.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{LayoutDirective, LayoutField, LayoutPreferences, LayoutRecommendation};
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::style::LearningRate;

/// Minimum per-dimension confidence before a dimension drives the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceThreshold(f64);

impl ConfidenceThreshold {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(ValidationError::out_of_range("confidence_threshold", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self(0.3)
    }
}

impl TryFrom<f64> for ConfidenceThreshold {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceThreshold> for f64 {
    fn from(t: ConfidenceThreshold) -> Self {
        t.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSettings {
    pub learning_rate: LearningRate,
    pub confidence_threshold: ConfidenceThreshold,
    pub auto_adjust_layout: bool,
}

impl AdaptiveSettings {
    pub fn new(
        learning_rate: LearningRate,
        confidence_threshold: ConfidenceThreshold,
        auto_adjust_layout: bool,
    ) -> Self {
        Self {
            learning_rate,
            confidence_threshold,
            auto_adjust_layout,
        }
    }
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self::new(LearningRate::default(), ConfidenceThreshold::default(), true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionKind {
    Search,
    FilterUse,
    DragDrop,
    LayoutChange,
}

/// Dashboard interaction counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPatterns {
    pub searches: u64,
    pub filter_uses: u64,
    pub drag_drops: u64,
    pub layout_changes: u64,
}

impl InteractionPatterns {
    pub fn record(&mut self, kind: InteractionKind) {
        let counter = match kind {
            InteractionKind::Search => &mut self.searches,
            InteractionKind::FilterUse => &mut self.filter_uses,
            InteractionKind::DragDrop => &mut self.drag_drops,
            InteractionKind::LayoutChange => &mut self.layout_changes,
        };
        *counter = counter.saturating_add(1);
    }
}

/// What applying a recommendation did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationOutcome {
    pub applied: Vec<LayoutField>,
    /// Held back by a manual override or disabled auto-adjust.
    pub deferred: Vec<LayoutField>,
}

/// Layout choices for one user plus the bookkeeping that keeps automatic
/// and manual writers apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptivePreference {
    user_id: UserId,
    layout: LayoutPreferences,
    adaptive_settings: AdaptiveSettings,
    manual_overrides: BTreeSet<LayoutField>,
    pending: BTreeMap<LayoutField, LayoutDirective>,
    interaction_patterns: InteractionPatterns,
    last_adaptation: Option<Timestamp>,
    version: u64,
    updated_at: Timestamp,
}

impl AdaptivePreference {
    pub fn new(user_id: UserId, settings: AdaptiveSettings, now: Timestamp) -> Self {
        Self {
            user_id,
            layout: LayoutPreferences::default(),
            adaptive_settings: settings,
            manual_overrides: BTreeSet::new(),
            pending: BTreeMap::new(),
            interaction_patterns: InteractionPatterns::default(),
            last_adaptation: None,
            version: 0,
            updated_at: now,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn layout(&self) -> &LayoutPreferences {
        &self.layout
    }

    pub fn adaptive_settings(&self) -> &AdaptiveSettings {
        &self.adaptive_settings
    }

    /// True when any field is frozen by the user.
    pub fn manual_override(&self) -> bool {
        !self.manual_overrides.is_empty()
    }

    pub fn manual_overrides(&self) -> &BTreeSet<LayoutField> {
        &self.manual_overrides
    }

    pub fn pending(&self) -> &BTreeMap<LayoutField, LayoutDirective> {
        &self.pending
    }

    pub fn interaction_patterns(&self) -> &InteractionPatterns {
        &self.interaction_patterns
    }

    pub fn last_adaptation(&self) -> Option<Timestamp> {
        self.last_adaptation
    }

    /// Version last read from or written to storage.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Set by repositories after a successful write.
    pub fn mark_persisted(&mut self, version: u64) {
        self.version = version;
    }

    /// Applies user choices and freezes those fields.
    pub fn apply_manual(&mut self, directives: &[LayoutDirective], now: Timestamp) {
        for directive in directives {
            let field = directive.field();
            self.layout.apply(*directive);
            self.manual_overrides.insert(field);
            self.pending.remove(&field);
        }
        if !directives.is_empty() {
            self.interaction_patterns.record(InteractionKind::LayoutChange);
            self.updated_at = now;
        }
    }

    /// Unfreezes fields (all when `fields` is empty) and applies any
    /// recommendation that was held back for them.
    pub fn clear_overrides(&mut self, fields: &[LayoutField], now: Timestamp) -> Vec<LayoutField> {
        let targets: Vec<LayoutField> = if fields.is_empty() {
            self.manual_overrides.iter().copied().collect()
        } else {
            fields.to_vec()
        };

        let mut applied = Vec::new();
        for field in targets {
            if !self.manual_overrides.remove(&field) {
                continue;
            }
            if !self.adaptive_settings.auto_adjust_layout {
                continue;
            }
            if let Some(directive) = self.pending.remove(&field) {
                self.layout.apply(directive);
                applied.push(field);
            }
        }
        if !applied.is_empty() {
            self.last_adaptation = Some(now);
        }
        self.updated_at = now;
        applied
    }

    /// Writes automatic directives to fields the user has not frozen.
    ///
    /// Frozen fields, or every field when auto-adjust is off, keep their
    /// value and the directive is stored as pending. Pending directives for
    /// fields the recommendation no longer covers are dropped.
    pub fn apply_recommendation(
        &mut self,
        recommendation: &LayoutRecommendation,
        now: Timestamp,
    ) -> AdaptationOutcome {
        // Held-back directives the current profile no longer supports are stale.
        self.pending.retain(|field, _| {
            recommendation
                .directives
                .iter()
                .any(|directive| directive.field() == *field)
        });

        let mut outcome = AdaptationOutcome::default();
        for directive in &recommendation.directives {
            let field = directive.field();
            if self.manual_overrides.contains(&field) || !self.adaptive_settings.auto_adjust_layout
            {
                self.pending.insert(field, *directive);
                outcome.deferred.push(field);
            } else {
                self.layout.apply(*directive);
                self.pending.remove(&field);
                outcome.applied.push(field);
            }
        }
        if !outcome.applied.is_empty() {
            self.last_adaptation = Some(now);
        }
        self.updated_at = now;
        outcome
    }

    pub fn record_interaction(&mut self, kind: InteractionKind, now: Timestamp) {
        self.interaction_patterns.record(kind);
        self.updated_at = now;
    }

    pub fn update_settings(&mut self, settings: AdaptiveSettings, now: Timestamp) {
        self.adaptive_settings = settings;
        self.updated_at = now;
    }
}
