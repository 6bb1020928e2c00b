//! Handler-boundary error type.
//!
//! Every failure leaves the service as `{"message": "..."}` with the status
//! picked here. Internal detail is logged, never returned.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller input malformed or missing.
    #[error("{0}")]
    Validation(String),

    /// Bad, missing or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource absent, or not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key. Reported as a plain 400, like other bad input.
    #[error("{0}")]
    Conflict(String),

    /// Third-party API failure.
    #[error("{0}")]
    Upstream(String),

    /// Store operation failure.
    #[error("{0}")]
    Persistence(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Persistence(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log a store failure and wrap it with the message shown to the caller.
    pub fn persistence(context: &str, err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "{}", context);
        ApiError::Persistence(context.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Shown for any request body that is not readable JSON of the expected shape.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "rejected request body"
        );
        ApiError::Validation(INVALID_BODY_MESSAGE.to_string())
    }
}

/// `axum::Json` whose rejections (bad syntax, wrong content type, wrong field
/// types) come back as a 400 `{message}` instead of axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
        .into_response()
}
