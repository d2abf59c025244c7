//! Caller identity for axum handlers.
//!
//! Authentication happens at the gateway in front of this service. The
//! gateway forwards the authenticated user in the `X-User-Id` header and
//! `CurrentUser` turns that header into a validated `UserId`.
//!
//! ```text
//! Gateway (authenticates) → X-User-Id: <id> → CurrentUser extractor → Handler
//! ```
//!
//! # Example
//!
//! ```ignore
//! async fn my_handler(CurrentUser(user_id): CurrentUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user_id)
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor that requires a caller identity.
///
/// Rejects with 401 when the header is missing, not valid UTF-8, or blank.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let raw = parts
                .headers
                .get(USER_ID_HEADER)
                .ok_or(AuthRejection::MissingIdentity)?
                .to_str()
                .map_err(|_| AuthRejection::InvalidIdentity)?;

            UserId::new(raw.trim())
                .map(CurrentUser)
                .map_err(|_| AuthRejection::InvalidIdentity)
        })
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No identity header was forwarded.
    MissingIdentity,
    /// The header was present but unusable.
    InvalidIdentity,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::MissingIdentity => "Authentication required",
            AuthRejection::InvalidIdentity => "Invalid user identity",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "UNAUTHORIZED",
                "message": message
            })),
        )
            .into_response()
    }
}
