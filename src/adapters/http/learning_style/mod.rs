//! HTTP adapter for learning-style endpoints.
//!
//! Behavior ingestion, classification, profile reads and adaptive layout
//! preferences, all scoped to the caller identified by `X-User-Id`.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ActivityRequest, ClassifyRequest, ClassifyResponse, ClassifyStatus, ClearOverridesParams,
    EndSessionResponse, ErrorResponse, InteractionRequest, ManualPreferencesRequest,
    ModeEventRequest, ModeStartResponse, RecommendResponse, SegmentResponse,
};
pub use handlers::LearningStyleHandlers;
pub use routes::learning_style_routes;
