//! Pure transform from behavior records to features and data quality.

use std::collections::BTreeSet;

use super::quality::saturating_score;
use super::{DataQuality, DataQualityThresholds, FeatureVector};
use crate::domain::behavior::{ActivityEngagement, BehaviorRecord, ContentMode, ModeUsage};
use crate::domain::foundation::{Timestamp, ValidationError};

/// Splits two durations into complementary shares.
///
/// With no evidence on either side both shares are exactly 0.5.
fn pair_ratio(a_ms: u64, b_ms: u64) -> (f64, f64) {
    let total = a_ms as f64 + b_ms as f64;
    if total == 0.0 {
        return (0.5, 0.5);
    }
    (a_ms as f64 / total, b_ms as f64 / total)
}

fn share(part_ms: u64, total_ms: u64) -> f64 {
    if total_ms == 0 {
        0.0
    } else {
        part_ms as f64 / total_ms as f64
    }
}

/// Computes classifier features from a user's behavior history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePipeline {
    count_cap: u32,
    quality: DataQualityThresholds,
}

impl FeaturePipeline {
    pub fn new(count_cap: u32, quality: DataQualityThresholds) -> Result<Self, ValidationError> {
        if count_cap == 0 {
            return Err(ValidationError::out_of_range("count_cap", 1.0, u32::MAX as f64, 0.0));
        }
        quality.validate()?;
        Ok(Self { count_cap, quality })
    }

    pub fn count_cap(&self) -> u32 {
        self.count_cap
    }

    fn cap(&self, value: u64) -> u32 {
        value.min(self.count_cap as u64) as u32
    }

    /// Folds every record into a single usage/engagement pair.
    fn totals(records: &[BehaviorRecord]) -> (ModeUsage, ActivityEngagement) {
        records.iter().fold(
            (ModeUsage::default(), ActivityEngagement::default()),
            |(mut usage, mut engagement), record| {
                usage.merge(&record.mode_usage);
                engagement.merge(&record.activity_engagement);
                (usage, engagement)
            },
        )
    }

    pub fn compute_features(&self, records: &[BehaviorRecord]) -> FeatureVector {
        let (usage, act) = Self::totals(records);
        let ms = |mode: ContentMode| usage.get(mode).total_duration_ms;
        let count = |mode: ContentMode| usage.get(mode).count;

        let (active, reflective) = pair_ratio(
            ms(ContentMode::ActiveLearning),
            ms(ContentMode::ReflectiveLearning),
        );
        let (sensing, intuitive) = pair_ratio(
            ms(ContentMode::SensingLearning),
            ms(ContentMode::IntuitiveLearning),
        );
        let (visual, verbal) =
            pair_ratio(ms(ContentMode::VisualLearning), ms(ContentMode::AiNarrator));
        let (sequential, global) = pair_ratio(
            ms(ContentMode::SequentialLearning),
            ms(ContentMode::GlobalLearning),
        );

        let assistant_ms = ms(ContentMode::AssistantAsk)
            .saturating_add(ms(ContentMode::AssistantResearch))
            .saturating_add(ms(ContentMode::AssistantTextToDocs));

        FeatureVector {
            active_mode_ratio: active,
            questions_generated: self.cap(act.practice_questions_attempted),
            debates_participated: self.cap(act.discussion_participation),
            reflective_mode_ratio: reflective,
            reflections_written: self.cap(act.reflection_journal_entries),
            journal_entries: self.cap(act.reflection_journal_entries),

            ai_ask_mode_ratio: share(ms(ContentMode::AssistantAsk), assistant_ms),
            ai_research_mode_ratio: share(ms(ContentMode::AssistantResearch), assistant_ms),
            ai_text_to_docs_ratio: share(ms(ContentMode::AssistantTextToDocs), assistant_ms),

            sensing_mode_ratio: sensing,
            simulations_completed: self.cap(act.hands_on_labs_completed),
            challenges_completed: self.cap(act.quizzes_completed),
            intuitive_mode_ratio: intuitive,
            concepts_explored: self.cap(act.concept_explorations),
            patterns_discovered: self.cap(act.concept_explorations),

            visual_mode_ratio: visual,
            diagrams_viewed: self.cap(act.visual_diagrams_viewed),
            wireframes_explored: self.cap(act.visual_diagrams_viewed),
            verbal_mode_ratio: verbal,
            text_read: self.cap(count(ContentMode::AiNarrator)),
            summaries_created: self.cap(act.reflection_journal_entries / 2),

            sequential_mode_ratio: sequential,
            steps_completed: self.cap(act.sequential_steps_completed),
            linear_navigation: self.cap(count(ContentMode::SequentialLearning)),
            global_mode_ratio: global,
            overviews_viewed: self.cap(count(ContentMode::GlobalLearning)),
            navigation_jumps: self.cap(count(ContentMode::GlobalLearning)),
        }
    }

    pub fn assess_data_quality(&self, records: &[BehaviorRecord]) -> DataQuality {
        let (usage, _) = Self::totals(records);
        let total_interactions = usage.total_interactions();
        let total_duration_ms = usage.total_duration_ms();
        let active_days = records
            .iter()
            .filter(|r| r.total_interactions() > 0)
            .map(|r| r.bucket)
            .collect::<BTreeSet<_>>()
            .len() as u64;
        let last_activity: Option<Timestamp> = records.iter().map(|r| r.last_updated).max();

        let t = &self.quality;
        let completeness = (saturating_score(total_interactions, t.target_interactions)
            + saturating_score(total_duration_ms, t.target_duration_ms)
            + saturating_score(active_days, t.target_active_days))
            / 3.0;

        DataQuality {
            total_interactions,
            total_duration_ms,
            active_days,
            distinct_modes: usage.modes_used().count() as u64,
            last_activity,
            completeness: completeness.round().clamp(0.0, 100.0) as u8,
            sufficient_for_ml: total_interactions >= t.min_interactions
                && total_duration_ms >= t.min_duration_ms
                && active_days >= t.min_active_days,
        }
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self {
            count_cap: 50,
            quality: DataQualityThresholds::default(),
        }
    }
}
