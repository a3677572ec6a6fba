//! # Validation Module
//!
//! The gate between editing a ride and previewing its receipt.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Input hints (required markers, GST 0-100)                         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                               │
//! │  ├── Type validation (deserialization, payment method)                 │
//! │  └── THIS MODULE: the preview guard                                    │
//! │                                                                         │
//! │  Numbers are never rejected for format: they coerce to zero.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabslip_core::types::{RideDefaults, RideRecord};
//! use cabslip_core::validation::validate_for_preview;
//!
//! let mut ride = RideRecord::new(&RideDefaults::default(), "05 Jan 2025", "123456");
//! assert!(validate_for_preview(&ride).is_err());
//!
//! ride.customer_name = "Asha".into();
//! ride.pickup_address = "MG Road".into();
//! ride.dropoff_address = "Airport".into();
//! ride.ride_fee = "500".into();
//! assert!(validate_for_preview(&ride).is_ok());
//! ```

use tracing::warn;

use crate::error::ValidationError;
use crate::types::{GstRate, RideRecord};
use crate::MAX_GST_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Preview Guard
// =============================================================================

/// Checks a ride before it can be frozen into a receipt.
///
/// ## Rules (first failure wins, in this order)
/// 1. `customerName` is not blank
/// 2. `pickupAddress` is not blank
/// 3. `dropoffAddress` is not blank
/// 4. `rideFee` coerces to more than zero
///
/// Blank means empty or whitespace-only.
pub fn validate_for_preview(ride: &RideRecord) -> ValidationResult<()> {
    validate_required("customerName", &ride.customer_name)?;
    validate_required("pickupAddress", &ride.pickup_address)?;
    validate_required("dropoffAddress", &ride.dropoff_address)?;

    if !ride.ride_fee.amount().is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "rideFee".to_string(),
        });
    }

    Ok(())
}

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// GST Range
// =============================================================================

/// Checks that a GST rate is within 0-100%.
///
/// Out-of-range rates are still billed as entered; callers use this to
/// warn, not to block.
pub fn validate_gst_rate(rate: GstRate) -> ValidationResult<()> {
    if rate.bps() > MAX_GST_BPS {
        return Err(ValidationError::OutOfRange {
            field: "gstPercentage".to_string(),
            min: 0,
            max: i64::from(MAX_GST_BPS / 100),
        });
    }
    Ok(())
}

/// Logs a warning when the ride's GST is outside 0-100%.
///
/// Returns `true` when the rate was in range.
pub fn check_gst_rate(ride: &RideRecord) -> bool {
    match validate_gst_rate(ride.gst_percentage.gst_rate()) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                invoice_id = %ride.invoice_id,
                gst = %ride.gst_percentage.as_str(),
                "{}",
                err
            );
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
