use axum::{Json, http::StatusCode, response::IntoResponse};
use roster_common::{caller::CallerError, params::ValidationError, views::ApiErrorResponse};
use roster_db::storage::StoreError;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Something went wrong on our end. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    CallerError(#[from] CallerError),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationFailed(err.to_string())
    }
}

impl ApiError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CallerError(ce) => match ce {
                CallerError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
                CallerError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InternalAnyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound | Self::UserNotFound => "NotFound",
            Self::ValidationFailed(_) => "ValidationFailed",
            Self::CallerError(CallerError::Unauthorized { .. }) => "Unauthorized",
            Self::Storage(_) | Self::CallerError(CallerError::Anyhow(_)) | Self::InternalAnyhow(_) => {
                "InternalError"
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "The requested resource was not found.",
            Self::UserNotFound => "User not found",
            Self::ValidationFailed(_) => "Validation failed",
            Self::CallerError(CallerError::Unauthorized { .. }) => "Unauthorized",
            Self::Storage(_) | Self::CallerError(CallerError::Anyhow(_)) | Self::InternalAnyhow(_) => {
                INTERNAL_MESSAGE
            }
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse {
            code: Some(err.code().into()),
            message: err.message().into(),

            #[cfg(debug_assertions)]
            details: Some(err.to_string()),

            #[cfg(not(debug_assertions))]
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error returned by handler: {self}");
        } else {
            tracing::debug!(status = status_code.as_u16(), "Request rejected: {self}");
        }

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(err: ApiError) -> ApiErrorResponse {
        err.into()
    }

    #[test]
    fn user_not_found_maps_to_404() {
        let err = ApiError::UserNotFound;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body(err).message, "User not found");
    }

    #[test]
    fn validation_maps_to_400() {
        let err: ApiError = ValidationError {
            field: "name",
            reason: "must not be empty",
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = body(err);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.code.as_deref(), Some("ValidationFailed"));
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let err = ApiError::CallerError(CallerError::unauthorized(None));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(body(err).message, "Unauthorized");
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let err = ApiError::InternalAnyhow(anyhow::anyhow!("connection reset"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(err).message, INTERNAL_MESSAGE);
    }
}
