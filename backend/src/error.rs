//! Error type for the wall backend.
//!
//! Sanitization and follower parsing never fail, so everything here comes
//! from request shape checks, authentication, configuration or persistence.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;
use thiserror::Error;

/// Result type alias using WallError
pub type Result<T> = std::result::Result<T, WallError>;

#[derive(Debug, Error)]
pub enum WallError {
    /// Request body does not have the expected shape
    #[error("Invalid data format: {0}")]
    Structural(String),

    /// Missing or wrong admin secret
    #[error("Unauthorized")]
    Unauthorized,

    /// Backend unreachable or returned something unusable
    #[error("Failed to read data: {0}")]
    Read(String),

    /// The stored document changed since it was read
    #[error("Data was changed by someone else (expected version {expected}); reload and try again")]
    Conflict { expected: String },

    /// Remote store did not answer in time
    #[error("Remote store timed out after {0:?}")]
    Timeout(Duration),

    /// Backend refused the write or the write failed
    #[error("Failed to save data: {0}")]
    Write(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WallError {
    /// Whether a caller can reasonably re-read and try the same write again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WallError::Conflict { .. } | WallError::Timeout(_))
    }
}

impl ResponseError for WallError {
    fn status_code(&self) -> StatusCode {
        match self {
            WallError::Structural(_) => StatusCode::BAD_REQUEST,
            WallError::Unauthorized => StatusCode::UNAUTHORIZED,
            WallError::Conflict { .. } => StatusCode::CONFLICT,
            WallError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            WallError::Read(_)
            | WallError::Write(_)
            | WallError::Config(_)
            | WallError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}
