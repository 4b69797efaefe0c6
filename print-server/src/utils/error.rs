//! Unified error handling
//!
//! Every failure reaches the caller as JSON with a human readable message:
//!
//! | Variant | Status | When |
//! |---------|--------|------|
//! | `InvalidRequest` | 400 | required top-level fields missing |
//! | `DeviceNotFound` | 500 | no printer attached, nothing printed |
//! | `DeviceOpenFailed` | 500 | printer busy or refused to open |
//! | `PrintFailure` | 500 | composition or write failed |
//!
//! ```json
//! { "error": "Failed to print receipt", "details": "grandTotal is not a number: abc" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::printing::PrintExecutorError;
use markit_printer::PrintError;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Success response body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    /// Labels written to the printer (label jobs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printed: Option<usize>,
    /// Labels skipped by validation (label jobs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            printed: None,
            skipped: None,
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    /// Missing or malformed job payload (400)
    InvalidRequest(String),

    #[error("Printer not found: {0}")]
    /// No device attached (500)
    DeviceNotFound(String),

    #[error("Printer open failed: {0}")]
    /// Device busy or refused to open (500)
    DeviceOpenFailed(String),

    #[error("{message}: {details}")]
    /// Composition or write failure after validation (500)
    PrintFailure { message: String, details: String },
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Map an executor failure for a given job kind ("receipt", "labels", ...)
    pub fn from_job(job: &str, err: PrintExecutorError) -> Self {
        match err {
            PrintExecutorError::Device(PrintError::NotFound(msg)) => Self::DeviceNotFound(msg),
            PrintExecutorError::Device(PrintError::Busy(msg))
            | PrintExecutorError::Device(PrintError::OpenFailed(msg)) => {
                Self::DeviceOpenFailed(msg)
            }
            other => Self::PrintFailure {
                message: format!("Failed to print {}", job),
                details: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::DeviceNotFound(msg) => {
                error!(target: "printer", error = %msg, "USB printer not found");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Printer not found. Please check connection.".to_string(),
                    None,
                )
            }
            AppError::DeviceOpenFailed(msg) => {
                error!(target: "printer", error = %msg, "Error opening printer");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not open printer connection".to_string(),
                    Some(msg),
                )
            }
            AppError::PrintFailure { message, details } => {
                error!(target: "printer", error = %details, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::RenderError;

    #[test]
    fn test_device_errors_map_to_500_variants() {
        let err = AppError::from_job(
            "receipt",
            PrintExecutorError::Device(PrintError::NotFound("none".into())),
        );
        assert!(matches!(err, AppError::DeviceNotFound(_)));

        let err = AppError::from_job(
            "receipt",
            PrintExecutorError::Device(PrintError::Busy("lp0".into())),
        );
        assert!(matches!(err, AppError::DeviceOpenFailed(_)));
    }

    #[test]
    fn test_render_error_is_print_failure() {
        let err = AppError::from_job(
            "report",
            PrintExecutorError::Render(RenderError::MissingField("toDate")),
        );
        match err {
            AppError::PrintFailure { message, details } => {
                assert_eq!(message, "Failed to print report");
                assert!(details.contains("toDate"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid("Invalid bill data").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DeviceNotFound("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
