//! HTTP error mapping.

use super::types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use bacspark_core::SparkError;
use thiserror::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The one visitor-facing rejection. Never says why.
    #[error("Invalid code. Please try again.")]
    CodeRejected,

    #[error("code must not be empty")]
    EmptyCode,

    /// Body missing, not JSON, or without a string `code` field.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("admin credentials required")]
    Unauthorized,
}

impl From<SparkError> for ApiError {
    fn from(err: SparkError) -> Self {
        match err {
            SparkError::CodeRejected => Self::CodeRejected,
            SparkError::UnknownCode(_) | SparkError::UnknownCategory(_) => {
                Self::NotFound(err.to_string())
            }
            SparkError::AlreadyUsed(_) => Self::Conflict(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::CodeRejected => StatusCode::FORBIDDEN,
            ApiError::EmptyCode | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();

        if matches!(self, ApiError::Unauthorized) {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"bacspark admin\""),
            );
        }

        response
    }
}
