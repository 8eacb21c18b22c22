//! # API Errors
//!
//! Everything that can fail inside a request handler converts to the JSON
//! error envelope `{ success: false, error: <message> }` at the handler
//! boundary. Nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not valid JSON
    #[error("Invalid JSON body: {0}")]
    Parse(String),

    /// Request body shape is wrong (missing or non-array `data`)
    #[error("{0}")]
    Validation(String),

    /// Store failure other than absence
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Handler asked for a resource outside the configured table
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::UnknownResource(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error envelope shared by every failing response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
