//! Inference engine tuning
//!
//! Every threshold the engine uses is configurable here; the conversions
//! build validated domain types.

use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::behavior::{EvidenceWindow, SegmentPolicy};
use crate::domain::features::{DataQualityThresholds, FeaturePipeline};
use crate::domain::preference::{AdaptiveSettings, ConfidenceThreshold, PreferenceTranslator};
use crate::domain::style::{
    HeuristicClassifier, LabelThresholds, LearningRate, ReclassificationPolicy,
};

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// `|value|` above this is a dominant label
    #[serde(default = "default_dominance_threshold")]
    pub dominance_threshold: f64,

    /// Magnitude the heuristic assigns to a dominant pole
    #[serde(default = "default_heuristic_pole_value")]
    pub heuristic_pole_value: f64,

    /// Fixed confidence of heuristic predictions
    #[serde(default = "default_heuristic_confidence")]
    pub heuristic_confidence: f64,

    /// Ceiling for count features
    #[serde(default = "default_count_cap")]
    pub count_cap: u32,

    #[serde(default = "default_staleness_window_days")]
    pub staleness_window_days: i64,

    /// Only buckets this recent feed the feature vector
    #[serde(default = "default_feature_window_days")]
    pub feature_window_days: i64,

    /// New interactions required before a stale profile is re-classified
    #[serde(default = "default_min_interactions")]
    pub min_interactions: u64,

    /// Open mode segments older than this are discarded
    #[serde(default = "default_mode_grace_period_secs")]
    pub mode_grace_period_secs: i64,

    #[serde(default = "default_learning_rate")]
    pub default_learning_rate: f64,

    #[serde(default = "default_confidence_threshold")]
    pub default_confidence_threshold: f64,

    #[serde(default = "default_true")]
    pub default_auto_adjust_layout: bool,

    /// Lease TTL for the per-user classification lock
    #[serde(default = "default_lock_ttl_secs")]
    pub lock_ttl_secs: u64,

    #[serde(default = "default_ml_min_interactions")]
    pub ml_min_interactions: u64,

    #[serde(default = "default_ml_min_duration_ms")]
    pub ml_min_duration_ms: u64,

    #[serde(default = "default_ml_min_active_days")]
    pub ml_min_active_days: u64,
}

impl EngineConfig {
    pub fn label_thresholds(&self) -> Result<LabelThresholds, ValidationError> {
        Ok(LabelThresholds::new(self.dominance_threshold)?)
    }

    pub fn heuristic(&self) -> Result<HeuristicClassifier, ValidationError> {
        Ok(HeuristicClassifier::new(
            self.label_thresholds()?,
            self.heuristic_pole_value,
            self.heuristic_confidence,
        )?)
    }

    pub fn data_quality_thresholds(&self) -> DataQualityThresholds {
        DataQualityThresholds {
            min_interactions: self.ml_min_interactions,
            min_duration_ms: self.ml_min_duration_ms,
            min_active_days: self.ml_min_active_days,
            ..DataQualityThresholds::default()
        }
    }

    pub fn feature_pipeline(&self) -> Result<FeaturePipeline, ValidationError> {
        Ok(FeaturePipeline::new(self.count_cap, self.data_quality_thresholds())?)
    }

    pub fn reclassification_policy(&self) -> Result<ReclassificationPolicy, ValidationError> {
        Ok(ReclassificationPolicy::new(
            ChronoDuration::days(self.staleness_window_days),
            self.min_interactions,
        )?)
    }

    pub fn segment_policy(&self) -> Result<SegmentPolicy, ValidationError> {
        Ok(SegmentPolicy::new(ChronoDuration::seconds(self.mode_grace_period_secs))?)
    }

    pub fn preference_translator(&self) -> Result<PreferenceTranslator, ValidationError> {
        Ok(PreferenceTranslator::new(self.label_thresholds()?))
    }

    pub fn default_adaptive_settings(&self) -> Result<AdaptiveSettings, ValidationError> {
        Ok(AdaptiveSettings::new(
            LearningRate::new(self.default_learning_rate)?,
            ConfidenceThreshold::new(self.default_confidence_threshold)?,
            self.default_auto_adjust_layout,
        ))
    }

    pub fn evidence_window(&self) -> Result<EvidenceWindow, ValidationError> {
        Ok(EvidenceWindow::new(ChronoDuration::days(self.feature_window_days))?)
    }

    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_secs)
    }

    /// Validate by building every derived domain type once
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.heuristic()?;
        self.feature_pipeline()?;
        self.reclassification_policy()?;
        self.segment_policy()?;
        self.default_adaptive_settings()?;
        self.evidence_window()?;
        if self.lock_ttl_secs == 0 {
            return Err(ValidationError::InvalidEngineSetting(
                "lock_ttl_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dominance_threshold: default_dominance_threshold(),
            heuristic_pole_value: default_heuristic_pole_value(),
            heuristic_confidence: default_heuristic_confidence(),
            count_cap: default_count_cap(),
            staleness_window_days: default_staleness_window_days(),
            feature_window_days: default_feature_window_days(),
            min_interactions: default_min_interactions(),
            mode_grace_period_secs: default_mode_grace_period_secs(),
            default_learning_rate: default_learning_rate(),
            default_confidence_threshold: default_confidence_threshold(),
            default_auto_adjust_layout: true,
            lock_ttl_secs: default_lock_ttl_secs(),
            ml_min_interactions: default_ml_min_interactions(),
            ml_min_duration_ms: default_ml_min_duration_ms(),
            ml_min_active_days: default_ml_min_active_days(),
        }
    }
}

fn default_dominance_threshold() -> f64 {
    0.2
}

fn default_heuristic_pole_value() -> f64 {
    0.5
}

fn default_heuristic_confidence() -> f64 {
    0.45
}

fn default_count_cap() -> u32 {
    50
}

fn default_staleness_window_days() -> i64 {
    30
}

fn default_feature_window_days() -> i64 {
    90
}

fn default_min_interactions() -> u64 {
    10
}

fn default_mode_grace_period_secs() -> i64 {
    2 * 60 * 60
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_confidence_threshold() -> f64 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_lock_ttl_secs() -> u64 {
    30
}

fn default_ml_min_interactions() -> u64 {
    10
}

fn default_ml_min_duration_ms() -> u64 {
    30_000
}

fn default_ml_min_active_days() -> u64 {
    1
}
