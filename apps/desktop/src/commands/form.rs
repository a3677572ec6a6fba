//! # Form Commands
//!
//! Editing the draft ride. Every command answers with a fresh
//! [`FormSnapshot`] so the frontend never keeps its own copy of the record.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_form ─────────────► snapshot (any phase)                          │
//! │  update_field ─────────► Editing only                                  │
//! │  set_ride_date ────────► Editing only, "2025-01-05" → "05 Jan 2025"    │
//! │  regenerate_invoice_id ► Editing only                                  │
//! │  reset_form ───────────► any phase → Editing, trip cleared             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use cabslip_core::date::parse_picker;
use cabslip_core::types::RideField;
use cabslip_core::FormSnapshot;

use crate::error::ApiError;
use crate::state::SessionState;

/// Arguments for `update_field`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFieldArgs {
    pub field: RideField,
    /// Text or a number; `null` clears the box.
    #[serde(default)]
    pub value: Value,
}

/// Arguments for `set_ride_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRideDateArgs {
    /// Date picker value, `YYYY-MM-DD`.
    pub date: String,
}

/// Raw box text for a field value.
fn field_text(value: Value) -> Result<String, ApiError> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(ApiError::bad_request(format!(
            "Field value must be text or a number, got: {}",
            other
        ))),
    }
}

/// Gets the current form.
pub fn get_form(session: &SessionState) -> FormSnapshot {
    debug!("get_form command");
    session.with_session(|s| s.snapshot())
}

/// Sets one field from what the user typed.
///
/// Numeric fields accept anything; bad numbers only turn into zero when
/// the bill is computed.
pub fn update_field(session: &SessionState, args: UpdateFieldArgs) -> Result<FormSnapshot, ApiError> {
    debug!(field = ?args.field, "update_field command");
    let value = field_text(args.value)?;

    session.with_session_mut(|s| -> Result<FormSnapshot, ApiError> {
        s.update_field(args.field, value)?;
        Ok(s.snapshot())
    })
}

/// Sets the ride date from the date picker.
pub fn set_ride_date(session: &SessionState, args: SetRideDateArgs) -> Result<FormSnapshot, ApiError> {
    debug!(date = %args.date, "set_ride_date command");
    let picked = parse_picker(&args.date)?;

    session.with_session_mut(|s| -> Result<FormSnapshot, ApiError> {
        s.set_ride_date(picked)?;
        Ok(s.snapshot())
    })
}

/// Draws a new invoice number.
pub fn regenerate_invoice_id(session: &SessionState) -> Result<FormSnapshot, ApiError> {
    debug!("regenerate_invoice_id command");
    session.with_session_mut(|s| -> Result<FormSnapshot, ApiError> {
        s.regenerate_invoice_id()?;
        Ok(s.snapshot())
    })
}

/// Starts the next receipt: clears the trip, keeps driver and company.
pub fn reset_form(session: &SessionState) -> FormSnapshot {
    debug!("reset_form command");
    session.with_session_mut(|s| {
        s.reset();
        s.snapshot()
    })
}
