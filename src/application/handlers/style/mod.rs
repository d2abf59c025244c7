//! Learning-style classification handlers.

mod classification_orchestrator;
mod classify_learning_style;
mod get_style_profile;

pub use classification_orchestrator::{
    ClassificationOrchestrator, ClassificationReport, OrchestratorSettings, PERSISTENCE_MARGIN,
};
pub use classify_learning_style::{
    ClassificationSummary, ClassifyLearningStyleCommand, ClassifyLearningStyleHandler,
    ClassifyOutcome,
};
pub use get_style_profile::{GetStyleProfileHandler, GetStyleProfileQuery, StyleProfileView};
