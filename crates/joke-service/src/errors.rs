//! Joke service error types.
//!
//! All request errors map to an HTTP status and a `{"error": ...}` body via
//! the `IntoResponse` impl.

use crate::models::{ErrorResponse, Language};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Error returned by request handlers.
///
/// Maps to HTTP status codes:
/// - UnsupportedLanguage: 400 Bad Request
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::UnsupportedLanguage(_) => 400,
            ApiError::Internal => 500,
        }
    }
}

/// Client-facing message listing every supported code.
fn unsupported_language_message() -> String {
    let codes: Vec<&str> = Language::ALL.iter().map(|lang| lang.code()).collect();
    match codes.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("Unsupported language. Use: {}, or {}.", rest.join(", "), last)
        }
        _ => format!("Unsupported language. Use: {}.", codes.join(", ")),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UnsupportedLanguage(code) => {
                tracing::debug!(target: "joke.api", lang = %code, "Rejected unsupported language");
                (StatusCode::BAD_REQUEST, unsupported_language_message())
            }
            ApiError::Internal => {
                tracing::error!(target: "joke.api", "Joke selection produced no result");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
