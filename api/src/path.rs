use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use crate::error::ApiError;

/// The `{id}` segment of a `/users/{id}` route.
///
/// An id that can't even be decoded (not UTF-8 once percent-decoded) names no
/// user, so it is rejected with the same 404 an unknown id gets.
#[derive(Debug)]
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected user id");
                ApiError::UserNotFound
            })?;

        Ok(Self(id))
    }
}
