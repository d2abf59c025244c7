//! Closed vocabularies for content modes and learning activities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A content-presentation mode a student can engage with.
///
/// The eight learning modes each belong to one pole of a dichotomy
/// (`AiNarrator` is the verbal pole). The three assistant modes only feed
/// assistant share features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContentMode {
    AiNarrator,
    VisualLearning,
    SequentialLearning,
    GlobalLearning,
    SensingLearning,
    IntuitiveLearning,
    ActiveLearning,
    ReflectiveLearning,
    AssistantAsk,
    AssistantResearch,
    AssistantTextToDocs,
}

impl ContentMode {
    pub const ALL: [ContentMode; 11] = [
        ContentMode::AiNarrator,
        ContentMode::VisualLearning,
        ContentMode::SequentialLearning,
        ContentMode::GlobalLearning,
        ContentMode::SensingLearning,
        ContentMode::IntuitiveLearning,
        ContentMode::ActiveLearning,
        ContentMode::ReflectiveLearning,
        ContentMode::AssistantAsk,
        ContentMode::AssistantResearch,
        ContentMode::AssistantTextToDocs,
    ];

    /// Canonical wire key.
    pub fn key(&self) -> &'static str {
        match self {
            ContentMode::AiNarrator => "aiNarrator",
            ContentMode::VisualLearning => "visualLearning",
            ContentMode::SequentialLearning => "sequentialLearning",
            ContentMode::GlobalLearning => "globalLearning",
            ContentMode::SensingLearning => "sensingLearning",
            ContentMode::IntuitiveLearning => "intuitiveLearning",
            ContentMode::ActiveLearning => "activeLearning",
            ContentMode::ReflectiveLearning => "reflectiveLearning",
            ContentMode::AssistantAsk => "assistantAsk",
            ContentMode::AssistantResearch => "assistantResearch",
            ContentMode::AssistantTextToDocs => "assistantTextToDocs",
        }
    }

    /// Returns true for the AI assistant modes.
    pub fn is_assistant(&self) -> bool {
        matches!(
            self,
            ContentMode::AssistantAsk
                | ContentMode::AssistantResearch
                | ContentMode::AssistantTextToDocs
        )
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Lowercases and strips separators so `"Visual Learning"`,
/// `"visual-learning"` and `"visualLearning"` compare equal.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ContentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(ValidationError::empty_field("mode"));
        }
        ContentMode::ALL
            .into_iter()
            .find(|mode| normalize(mode.key()) == wanted)
            .ok_or_else(|| ValidationError::unknown_value("mode", s))
    }
}

impl TryFrom<String> for ContentMode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentMode> for String {
    fn from(mode: ContentMode) -> Self {
        mode.key().to_string()
    }
}

/// A discrete learning activity counted per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActivityKind {
    QuizCompleted,
    PracticeQuestionAttempted,
    DiscussionParticipation,
    ReflectionJournalEntry,
    VisualDiagramViewed,
    HandsOnLabCompleted,
    ConceptExploration,
    SequentialStepCompleted,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 8] = [
        ActivityKind::QuizCompleted,
        ActivityKind::PracticeQuestionAttempted,
        ActivityKind::DiscussionParticipation,
        ActivityKind::ReflectionJournalEntry,
        ActivityKind::VisualDiagramViewed,
        ActivityKind::HandsOnLabCompleted,
        ActivityKind::ConceptExploration,
        ActivityKind::SequentialStepCompleted,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ActivityKind::QuizCompleted => "quizCompleted",
            ActivityKind::PracticeQuestionAttempted => "practiceQuestionAttempted",
            ActivityKind::DiscussionParticipation => "discussionParticipation",
            ActivityKind::ReflectionJournalEntry => "reflectionJournalEntry",
            ActivityKind::VisualDiagramViewed => "visualDiagramViewed",
            ActivityKind::HandsOnLabCompleted => "handsOnLabCompleted",
            ActivityKind::ConceptExploration => "conceptExploration",
            ActivityKind::SequentialStepCompleted => "sequentialStepCompleted",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(ValidationError::empty_field("activity"));
        }
        ActivityKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.key()) == wanted)
            .ok_or_else(|| ValidationError::unknown_value("activity", s))
    }
}

impl TryFrom<String> for ActivityKind {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.key().to_string()
    }
}
