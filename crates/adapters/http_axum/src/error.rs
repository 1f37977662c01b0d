//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use munihub_domain::error::{PortalError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with, mapped to a status code on the way out.
#[derive(Debug)]
pub enum ApiError {
    Portal(PortalError),
    /// The request body or query string could not be decoded.
    Malformed(String),
}

impl ApiError {
    /// A path segment that is not a valid identifier.
    pub(crate) fn invalid_id(raw: &str) -> Self {
        Self::Portal(ValidationError::InvalidId(raw.to_owned()).into())
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        Self::Portal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(message) => (StatusCode::BAD_REQUEST, message),
            Self::Portal(PortalError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Portal(PortalError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Portal(PortalError::Conflict(err)) => (StatusCode::CONFLICT, err.to_string()),
            Self::Portal(PortalError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
