//! Preference module - UI layout adaptation.
//!
//! Automatic recommendations and manual user choices both write the same
//! [`AdaptivePreference`]; manual choices win field by field.

mod adaptive;
mod layout;
mod translator;

pub use adaptive::{
    AdaptationOutcome, AdaptivePreference, AdaptiveSettings, ConfidenceThreshold,
    InteractionKind, InteractionPatterns,
};
pub use layout::{
    CardSize, GridColumns, LayoutDirective, LayoutField, LayoutPatch, LayoutPreferences,
    SortOrder,
};
pub use translator::{LayoutRecommendation, PreferenceTranslator};
