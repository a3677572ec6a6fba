//! # API Error Type
//!
//! Unified error type for bridge commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in CabSlip                                │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  send {cmd: "generate_receipt"}                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Export Error? ─── ExportError::AllAttemptsFailed ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Validation Error? ─── CoreError::Validation ───── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  {"id": 7, "error": {                                                   │
//! │     "code": "VALIDATION_ERROR",                                         │
//! │     "message": "Please enter customer name"                             │
//! │  }}                                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use cabslip_core::{CoreError, ValidationError};
use cabslip_render::ExportError;

use crate::state::ConfigError;

/// Shown when both export attempts failed.
pub const EXPORT_FAILED_MESSAGE: &str = "Error generating PDF. Please try again.";

/// API error returned from bridge commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please enter a valid ride fee"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// const reply = await bridge.send('generate_receipt');
/// if (reply.error) {
///   switch (reply.error.code) {
///     case 'VALIDATION_ERROR':
///       alert(reply.error.message);
///       break;
///     case 'EXPORT_FAILED':
///       showRetry(reply.error.message);
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The form failed the preview guard or a value was rejected
    ValidationError,

    /// The command does not apply to the current phase
    InvalidState,

    /// Both export attempts failed
    ExportFailed,

    /// Configuration could not be loaded
    ConfigError,

    /// Malformed request line, unknown command or bad arguments
    BadRequest,

    /// Unexpected failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::InvalidPhase { .. } => ApiError::new(ErrorCode::InvalidState, err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.user_message())
    }
}

/// Converts export errors to API errors.
///
/// The details go to the log; the user gets one fixed sentence.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        tracing::error!("Receipt export failed: {}", err);
        ApiError::new(ErrorCode::ExportFailed, EXPORT_FAILED_MESSAGE)
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid arguments: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_uses_alert_text() {
        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "pickupAddress".to_string(),
        })
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please enter pickup address");
    }

    #[test]
    fn test_phase_error_is_invalid_state() {
        let err: ApiError = CoreError::InvalidPhase {
            operation: "edit the form",
            phase: "previewing",
        }
        .into();

        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Cannot edit the form while previewing");
    }

    #[test]
    fn test_export_error_hides_details() {
        let err: ApiError = ExportError::AllAttemptsFailed {
            primary: Box::new(ExportError::render("font table broken")),
            fallback: Box::new(ExportError::render("disk full")),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ExportFailed);
        assert_eq!(err.message, EXPORT_FAILED_MESSAGE);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::bad_request("Unknown command: fly")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "Unknown command: fly");
    }
}
