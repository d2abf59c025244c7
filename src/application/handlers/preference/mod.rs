//! Adaptive preference handlers.

mod get_preferences;
mod manual_preferences;
mod preference_writer;
mod recommend_layout;
mod record_interaction;

pub use get_preferences::GetPreferencesHandler;
pub use manual_preferences::{
    ClearManualOverridesCommand, ClearManualOverridesResult, ManualPreferencesHandler,
    SetManualPreferencesCommand,
};
pub use preference_writer::PreferenceWriter;
pub use recommend_layout::{RecommendLayoutHandler, RecommendLayoutResult};
pub use record_interaction::RecordInteractionHandler;
