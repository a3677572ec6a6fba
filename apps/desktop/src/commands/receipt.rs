//! # Receipt Commands
//!
//! Preview, export and print.
//!
//! ## Receipt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  generate_receipt  ┌────────────┐  auto-export ┌────────┐ │
//! │  │ Editing  │──── (guard ok) ───►│ Previewing │─────────────►│ PDF on │ │
//! │  │          │◄── back_to_form ───│            │              │  disk  │ │
//! │  └──────────┘                    └────────────┘              └────────┘ │
//! │                                       │    │                     ▲      │
//! │                          print_receipt│    └── download_pdf ─────┘      │
//! │                                       ▼                                 │
//! │                                 responsive HTML                         │
//! │                                                                         │
//! │  An export failure never leaves Previewing: the receipt stays on        │
//! │  screen and download_pdf can try again.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use cabslip_core::{FormSnapshot, Receipt};
use cabslip_render::{render_screen, ExportOutcome};

use crate::error::ApiError;
use crate::state::{ExportState, SessionState};

/// A frozen receipt with everything needed to show it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub receipt: Receipt,
    /// Headline total, e.g. `₹590`.
    pub total_display: String,
    /// Non-blocking notices, one per receipt warning.
    pub notices: Vec<String>,
    /// Responsive on-screen rendering.
    pub html: String,
}

impl From<&Receipt> for ReceiptView {
    fn from(receipt: &Receipt) -> Self {
        ReceiptView {
            receipt: receipt.clone(),
            total_display: receipt.bill.total_display(),
            notices: receipt.warnings.iter().map(|w| w.message()).collect(),
            html: render_screen(receipt),
        }
    }
}

/// Response of `generate_receipt`.
///
/// Exactly one of `export` and `export_error` is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub preview: ReceiptView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_error: Option<ApiError>,
}

/// Document handed to the platform print dialog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintView {
    pub title: String,
    pub html: String,
}

/// Validates the form, locks it into a preview, then saves the PDF.
///
/// ## Flow
/// 1. Preview guard (first failing field is reported, nothing changes)
/// 2. Session → Previewing with a frozen receipt
/// 3. Export pipeline (settle delay, primary, one fallback)
///
/// Only step 1 fails the command. An export failure is reported in
/// `export_error` alongside the preview.
pub async fn generate_receipt(
    session: &SessionState,
    export: &ExportState,
) -> Result<GenerateResponse, ApiError> {
    debug!("generate_receipt command");
    let receipt = session.with_session_mut(|s| s.generate_receipt().cloned())?;
    let preview = ReceiptView::from(&receipt);

    match export.export(&receipt).await {
        Ok(outcome) => Ok(GenerateResponse {
            preview,
            export: Some(outcome),
            export_error: None,
        }),
        Err(e) => {
            warn!(invoice_id = %receipt.ride.invoice_id, "Preview kept after export failure");
            Ok(GenerateResponse {
                preview,
                export: None,
                export_error: Some(ApiError::from(e)),
            })
        }
    }
}

/// Returns to the editable form with every value kept.
pub fn back_to_form(session: &SessionState) -> Result<FormSnapshot, ApiError> {
    debug!("back_to_form command");
    session.with_session_mut(|s| -> Result<FormSnapshot, ApiError> {
        s.back_to_form()?;
        Ok(s.snapshot())
    })
}

/// Gets the receipt being previewed.
pub fn get_receipt(session: &SessionState) -> Result<ReceiptView, ApiError> {
    debug!("get_receipt command");
    session.with_session(|s| -> Result<ReceiptView, ApiError> { Ok(ReceiptView::from(s.receipt()?)) })
}

/// Saves the previewed receipt again.
pub async fn download_pdf(
    session: &SessionState,
    export: &ExportState,
) -> Result<ExportOutcome, ApiError> {
    debug!("download_pdf command");
    let receipt = session.with_session(|s| s.receipt().cloned())?;
    Ok(export.export(&receipt).await?)
}

/// Renders the previewed receipt for printing.
pub fn print_receipt(session: &SessionState) -> Result<PrintView, ApiError> {
    debug!("print_receipt command");
    session.with_session(|s| -> Result<PrintView, ApiError> {
        let receipt = s.receipt()?;
        Ok(PrintView {
            title: format!("Receipt {}", receipt.ride.invoice_id),
            html: render_screen(receipt),
        })
    })
}
