//! # cabslip-core: Pure Business Logic for CabSlip
//!
//! This crate is the **heart** of CabSlip. It contains the billing math and
//! the receipt form's state machine as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CabSlip Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web view)                          │   │
//! │  │      Ride form ──► Receipt preview ──► Download / Print         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines IPC                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Desktop Commands                             │   │
//! │  │    update_field, generate_receipt, download_pdf, etc.           │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────────┐  ┌────▼───────────────────┐   │
//! │  │   ★ cabslip-core (THIS CRATE) ★     │  │    cabslip-render      │   │
//! │  │                                     │◄─│  screen + A4 layouts   │   │
//! │  │  money · types · billing · session  │  │  PDF export pipeline   │   │
//! │  │  validation · invoice · receipt     │  └────────────────────────┘   │
//! │  │                                     │                               │
//! │  │  NO I/O • NO NETWORK • NO FILES     │                               │
//! │  └─────────────────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ride record, fee inputs, payment methods
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`billing`] - Subtotal, GST and headline total
//! - [`validation`] - The preview guard
//! - [`receipt`] - Frozen receipts and their warnings
//! - [`session`] - The form state machine
//! - [`invoice`] - 6-digit invoice numbers
//! - [`date`] - Ride date formatting
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cabslip_core::money::Money;
//! use cabslip_core::types::GstRate;
//!
//! let subtotal = Money::from_rupees(500);
//! let gst = subtotal.calculate_gst(GstRate::from_bps(1800));
//! assert_eq!(gst.to_string(), "₹90.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod date;
pub mod error;
pub mod invoice;
pub mod money;
pub mod receipt;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{BillSummary, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{Receipt, ReceiptWarning};
pub use session::{FormSession, FormSnapshot, Phase};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest invoice number (inclusive).
pub const INVOICE_ID_MIN: u32 = 100_000;

/// Largest invoice number (inclusive).
pub const INVOICE_ID_MAX: u32 = 999_999;

/// GST pre-filled into a new form when configuration has none.
pub const DEFAULT_GST_PERCENTAGE: &str = "18";

/// Upper bound of the GST hint (100%), in basis points.
///
/// Not enforced: higher rates are billed and only warned about.
pub const MAX_GST_BPS: u32 = 10_000;
