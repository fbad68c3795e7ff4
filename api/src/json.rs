use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API's error shape.
///
/// A body that is missing, not JSON, or doesn't fit `T` is a 400
/// `Validation failed`, the same response a payload that parses but breaks
/// a field rule gets.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(status = rejection.status().as_u16(), "Rejected request body");
            ApiError::ValidationFailed(rejection.body_text())
        })?;

        Ok(Self(value))
    }
}
