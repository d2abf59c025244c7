//! Day-bucketed behavior records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActivityKind, ContentMode};
use crate::domain::foundation::{Timestamp, UserId};

/// Engagement totals for one content mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub count: u64,
    pub total_duration_ms: u64,
}

impl ModeStats {
    fn add_segment(&mut self, duration_ms: u64) {
        self.count = self.count.saturating_add(1);
        self.total_duration_ms = self.total_duration_ms.saturating_add(duration_ms);
    }

    fn merge(&mut self, other: &ModeStats) {
        self.count = self.count.saturating_add(other.count);
        self.total_duration_ms = self.total_duration_ms.saturating_add(other.total_duration_ms);
    }
}

/// Fixed-shape usage table, one entry per [`ContentMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModeUsage {
    pub ai_narrator: ModeStats,
    pub visual_learning: ModeStats,
    pub sequential_learning: ModeStats,
    pub global_learning: ModeStats,
    pub sensing_learning: ModeStats,
    pub intuitive_learning: ModeStats,
    pub active_learning: ModeStats,
    pub reflective_learning: ModeStats,
    pub assistant_ask: ModeStats,
    pub assistant_research: ModeStats,
    pub assistant_text_to_docs: ModeStats,
}

impl ModeUsage {
    pub fn get(&self, mode: ContentMode) -> &ModeStats {
        match mode {
            ContentMode::AiNarrator => &self.ai_narrator,
            ContentMode::VisualLearning => &self.visual_learning,
            ContentMode::SequentialLearning => &self.sequential_learning,
            ContentMode::GlobalLearning => &self.global_learning,
            ContentMode::SensingLearning => &self.sensing_learning,
            ContentMode::IntuitiveLearning => &self.intuitive_learning,
            ContentMode::ActiveLearning => &self.active_learning,
            ContentMode::ReflectiveLearning => &self.reflective_learning,
            ContentMode::AssistantAsk => &self.assistant_ask,
            ContentMode::AssistantResearch => &self.assistant_research,
            ContentMode::AssistantTextToDocs => &self.assistant_text_to_docs,
        }
    }

    fn get_mut(&mut self, mode: ContentMode) -> &mut ModeStats {
        match mode {
            ContentMode::AiNarrator => &mut self.ai_narrator,
            ContentMode::VisualLearning => &mut self.visual_learning,
            ContentMode::SequentialLearning => &mut self.sequential_learning,
            ContentMode::GlobalLearning => &mut self.global_learning,
            ContentMode::SensingLearning => &mut self.sensing_learning,
            ContentMode::IntuitiveLearning => &mut self.intuitive_learning,
            ContentMode::ActiveLearning => &mut self.active_learning,
            ContentMode::ReflectiveLearning => &mut self.reflective_learning,
            ContentMode::AssistantAsk => &mut self.assistant_ask,
            ContentMode::AssistantResearch => &mut self.assistant_research,
            ContentMode::AssistantTextToDocs => &mut self.assistant_text_to_docs,
        }
    }

    /// Adds one completed segment to a mode.
    pub fn add_segment(&mut self, mode: ContentMode, duration_ms: u64) {
        self.get_mut(mode).add_segment(duration_ms);
    }

    /// Folds another usage table into this one.
    pub fn merge(&mut self, other: &ModeUsage) {
        for mode in ContentMode::ALL {
            self.get_mut(mode).merge(other.get(mode));
        }
    }

    pub fn total_interactions(&self) -> u64 {
        ContentMode::ALL.iter().map(|m| self.get(*m).count).sum()
    }

    pub fn total_duration_ms(&self) -> u64 {
        ContentMode::ALL.iter().map(|m| self.get(*m).total_duration_ms).sum()
    }

    /// Modes with at least one counted segment.
    pub fn modes_used(&self) -> impl Iterator<Item = ContentMode> + '_ {
        ContentMode::ALL
            .into_iter()
            .filter(move |m| self.get(*m).count > 0)
    }
}

/// Counters for discrete learning activities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActivityEngagement {
    pub quizzes_completed: u64,
    pub practice_questions_attempted: u64,
    pub discussion_participation: u64,
    pub reflection_journal_entries: u64,
    pub visual_diagrams_viewed: u64,
    pub hands_on_labs_completed: u64,
    pub concept_explorations: u64,
    pub sequential_steps_completed: u64,
}

impl ActivityEngagement {
    pub fn get(&self, kind: ActivityKind) -> u64 {
        match kind {
            ActivityKind::QuizCompleted => self.quizzes_completed,
            ActivityKind::PracticeQuestionAttempted => self.practice_questions_attempted,
            ActivityKind::DiscussionParticipation => self.discussion_participation,
            ActivityKind::ReflectionJournalEntry => self.reflection_journal_entries,
            ActivityKind::VisualDiagramViewed => self.visual_diagrams_viewed,
            ActivityKind::HandsOnLabCompleted => self.hands_on_labs_completed,
            ActivityKind::ConceptExploration => self.concept_explorations,
            ActivityKind::SequentialStepCompleted => self.sequential_steps_completed,
        }
    }

    pub fn increment(&mut self, kind: ActivityKind) {
        self.add(kind, 1);
    }

    pub fn merge(&mut self, other: &ActivityEngagement) {
        for kind in ActivityKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    fn add(&mut self, kind: ActivityKind, amount: u64) {
        let counter = match kind {
            ActivityKind::QuizCompleted => &mut self.quizzes_completed,
            ActivityKind::PracticeQuestionAttempted => &mut self.practice_questions_attempted,
            ActivityKind::DiscussionParticipation => &mut self.discussion_participation,
            ActivityKind::ReflectionJournalEntry => &mut self.reflection_journal_entries,
            ActivityKind::VisualDiagramViewed => &mut self.visual_diagrams_viewed,
            ActivityKind::HandsOnLabCompleted => &mut self.hands_on_labs_completed,
            ActivityKind::ConceptExploration => &mut self.concept_explorations,
            ActivityKind::SequentialStepCompleted => &mut self.sequential_steps_completed,
        };
        *counter = counter.saturating_add(amount);
    }
}

/// UTC calendar day a record aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketKey(NaiveDate);

impl BucketKey {
    pub fn for_timestamp(at: &Timestamp) -> Self {
        Self(at.utc_date())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Per-user, per-day engagement record.
///
/// Only ever incremented; expiry is left to the store's retention policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorRecord {
    pub user_id: UserId,
    pub bucket: BucketKey,
    pub mode_usage: ModeUsage,
    pub activity_engagement: ActivityEngagement,
    pub first_seen: Timestamp,
    pub last_updated: Timestamp,
}

impl BehaviorRecord {
    /// Creates an empty record for the bucket containing `at`.
    pub fn new(user_id: UserId, at: Timestamp) -> Self {
        Self {
            user_id,
            bucket: BucketKey::for_timestamp(&at),
            mode_usage: ModeUsage::default(),
            activity_engagement: ActivityEngagement::default(),
            first_seen: at,
            last_updated: at,
        }
    }

    pub fn add_mode_segment(&mut self, mode: ContentMode, duration_ms: u64, at: Timestamp) {
        self.mode_usage.add_segment(mode, duration_ms);
        self.touch(at);
    }

    pub fn add_activity(&mut self, kind: ActivityKind, at: Timestamp) {
        self.activity_engagement.increment(kind);
        self.touch(at);
    }

    /// Counted mode segments in this bucket.
    pub fn total_interactions(&self) -> u64 {
        self.mode_usage.total_interactions()
    }

    fn touch(&mut self, at: Timestamp) {
        if self.last_updated.is_before(&at) {
            self.last_updated = at;
        }
    }
}
