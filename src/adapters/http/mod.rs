//! HTTP adapters - REST API implementations.

pub mod learning_style;
pub mod middleware;

pub use learning_style::{learning_style_routes, LearningStyleHandlers};
