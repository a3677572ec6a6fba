//! # Error Types
//!
//! Domain-specific error types for cabslip-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cabslip-core errors (this file)                                       │
//! │  ├── CoreError        - Session / state machine errors                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cabslip-render errors (separate crate)                                │
//! │  └── ExportError      - Rendering and document export failures         │
//! │                                                                         │
//! │  Desktop API errors (in app)                                           │
//! │  └── ApiError         - What frontend sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the error
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Form session errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The operation is not valid in the session's current phase.
    ///
    /// ## When This Occurs
    /// - Editing a field while the receipt preview is locked
    /// - Going "back" when no preview is showing
    /// - Asking for the receipt while still editing
    #[error("Cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Message suitable for a blocking alert.
    ///
    /// Validation failures surface their own wording; the `Validation error:`
    /// prefix is only for logs.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` uses the frontend's camelCase field names (`customerName`).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Invalid format (e.g., a date the picker cannot read).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }

    /// The alert text shown to the user.
    ///
    /// ## Form Guard Messages
    /// ```text
    /// customerName   → "Please enter customer name"
    /// pickupAddress  → "Please enter pickup address"
    /// dropoffAddress → "Please enter drop-off address"
    /// rideFee        → "Please enter a valid ride fee"
    /// ```
    pub fn user_message(&self) -> String {
        match (self, self.field()) {
            (ValidationError::Required { .. }, "customerName") => {
                "Please enter customer name".to_string()
            }
            (ValidationError::Required { .. }, "pickupAddress") => {
                "Please enter pickup address".to_string()
            }
            (ValidationError::Required { .. }, "dropoffAddress") => {
                "Please enter drop-off address".to_string()
            }
            (ValidationError::Required { .. } | ValidationError::MustBePositive { .. }, "rideFee") => {
                "Please enter a valid ride fee".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
