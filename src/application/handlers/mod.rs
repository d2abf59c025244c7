//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod behavior;
pub mod preference;
pub mod style;

pub use behavior::{BehaviorAggregator, EndSessionResult, ModeStartResult};
pub use preference::{
    ClearManualOverridesCommand, ClearManualOverridesResult, GetPreferencesHandler,
    ManualPreferencesHandler, PreferenceWriter, RecommendLayoutHandler, RecommendLayoutResult,
    RecordInteractionHandler, SetManualPreferencesCommand,
};
pub use style::{
    ClassificationOrchestrator, ClassificationReport, ClassificationSummary,
    ClassifyLearningStyleCommand, ClassifyLearningStyleHandler, ClassifyOutcome,
    GetStyleProfileHandler, GetStyleProfileQuery, OrchestratorSettings, StyleProfileView,
    PERSISTENCE_MARGIN,
};
