//! HTTP middleware for axum.
//!
//! - `auth` - Caller identity extractor

pub mod auth;

pub use auth::{AuthRejection, CurrentUser, USER_ID_HEADER};
