use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use std::time::Duration;

use crate::models::ErrorBody;

/// Longest cause message echoed back to clients in an error envelope.
pub const MAX_DETAIL_CHARS: usize = 200;

/// Failure of a document store call.
///
/// There is no transient/permanent distinction; callers surface it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No store handle exists (missing or unusable `DATABASE_URL`).
    Unconfigured,
    /// The store call did not finish within the configured deadline.
    Timeout(Duration),
    /// The store was reached but rejected or failed the operation.
    Store(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Unconfigured => write!(f, "Database not configured"),
            PersistenceError::Timeout(limit) => {
                write!(f, "Database call timed out after {}s", limit.as_secs_f32())
            }
            PersistenceError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Store(format!("Failed to serialize document: {}", err))
    }
}

/// Raised at startup when the document store cannot be set up.
///
/// Never fatal: the service starts without a store and reports the reason
/// through `/test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError(pub String);

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigurationError {}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Submission body could not be parsed into the expected shape.
    Rejected(JsonRejection),
    /// Body parsed but failed a field presence check.
    Validation(String),
    /// Lead could not be persisted.
    Persistence(PersistenceError),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Rejected(rejection) => write!(f, "{}", rejection.body_text()),
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Persistence(e) => write!(f, "{}", e),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into a `{"detail": ...}` envelope.
    ///
    /// Client errors are logged at warn, persistence failures at error.
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Rejected(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                rejection.status()
            }
            AppError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorBody {
            detail: truncate_chars(&self.to_string(), MAX_DETAIL_CHARS),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection)
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        AppError::Persistence(err)
    }
}

/// Cuts `text` to at most `max` characters, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Привет мир", 6), "Привет");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_persistence_error_display() {
        assert_eq!(
            PersistenceError::Unconfigured.to_string(),
            "Database not configured"
        );
        assert_eq!(
            PersistenceError::Store("connection refused".to_string()).to_string(),
            "connection refused"
        );
        assert!(PersistenceError::Timeout(Duration::from_secs(10))
            .to_string()
            .contains("timed out"));
    }

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let response = AppError::Validation("name must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_persistence_maps_to_internal_error() {
        let response = AppError::from(PersistenceError::Unconfigured).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
