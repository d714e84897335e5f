//! Error types and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Details are flattened into the response body next to `code` and `error`,
/// so a blocked shift close answers
/// `{ "code": 1002, "error": "...", "pendingCount": 3 }`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, counts, context)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Whether the error is a server-side fault whose message must not reach clients
    pub fn is_system(&self) -> bool {
        matches!(self.code.category(), ErrorCategory::System) || self.code == ErrorCode::Unknown
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Numeric error code
    pub code: u16,
    /// Human-readable message
    pub error: String,
    /// Extra context flattened into the body
    #[serde(flatten, default)]
    pub details: HashMap<String, Value>,
}

impl ErrorBody {
    /// Build the client-facing body; system errors keep only the generic message
    pub fn from_error(err: &AppError) -> Self {
        if err.is_system() {
            return Self {
                code: err.code.code(),
                error: err.code.message().to_string(),
                details: HashMap::new(),
            };
        }
        Self {
            code: err.code.code(),
            error: err.message.clone(),
            details: err.details.clone().unwrap_or_default(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorBody::from_error(&self);

        // Real cause stays in the server log
        if self.is_system() {
            tracing::error!(
                target: "internal",
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::ShiftCloseBlocked).with_detail("pendingCount", 2);
        let details = err.details.unwrap();
        assert_eq!(details.get("pendingCount").unwrap(), 2);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order 9 not found");
        assert_eq!(format!("{}", err), "Order 9 not found");
    }

    #[test]
    fn test_error_body_flattens_details() {
        let err = AppError::new(ErrorCode::ShiftCloseBlocked).with_detail("pendingCount", 1);
        let json = serde_json::to_value(ErrorBody::from_error(&err)).unwrap();
        assert_eq!(json["code"], 1002);
        assert_eq!(
            json["error"],
            "Shift cannot be closed: there are tables with pending payments"
        );
        assert_eq!(json["pendingCount"], 1);
    }

    #[test]
    fn test_error_body_hides_system_message() {
        let err = AppError::database("UNIQUE constraint failed: shift.status")
            .with_detail("sql", "INSERT INTO shift");
        let body = ErrorBody::from_error(&err);
        assert_eq!(body.code, 9002);
        assert_eq!(body.error, "Database error");
        assert!(body.details.is_empty());
    }

    #[test]
    fn test_error_body_deserialize_collects_extra_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":7002,"error":"busy","tableId":4}"#).unwrap();
        assert_eq!(body.code, 7002);
        assert_eq!(body.details.get("tableId").unwrap(), 4);
    }

    #[test]
    fn test_http_status_from_error() {
        assert_eq!(
            AppError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::new(ErrorCode::TableNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
