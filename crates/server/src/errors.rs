use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::types::ErrorBody;
use service::student::errors::StudentError;

/// REST-side wrapper mapping domain errors to HTTP responses.
///
/// `NotFound` becomes 404; anything else is an unexpected failure and
/// becomes 500. Both carry the timestamp/status/error/message body.
#[derive(Debug)]
pub struct ApiError(pub StudentError);

impl From<StudentError> for ApiError {
    fn from(err: StudentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = match &self.0 {
            StudentError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            StudentError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "unexpected failure");
        }
        let body = ErrorBody::new(status.as_u16(), reason, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
