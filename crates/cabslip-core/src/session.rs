//! # Form Session
//!
//! The state machine behind the receipt form.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            update_field / set_ride_date / regenerate_invoice_id         │
//! │                         ┌───────┐                                       │
//! │                         │       ▼                                       │
//! │   new ─────────►  ┌───────────────┐   generate_receipt   ┌───────────┐ │
//! │                   │    Editing    │ ───── (guard ok) ──► │Previewing │ │
//! │                   │               │ ◄──── back_to_form ─ │ (Receipt) │ │
//! │                   └───────────────┘                      └───────────┘ │
//! │                         ▲                                      │       │
//! │                         └────────────── reset ◄────────────────┘       │
//! │                              (valid from either phase)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed guard leaves the session in `Editing` with the record untouched.
//!
//! ## Example
//! ```rust
//! use cabslip_core::session::FormSession;
//! use cabslip_core::types::{RideDefaults, RideField};
//!
//! let mut session = FormSession::new(RideDefaults::default());
//! session.update_field(RideField::CustomerName, "Asha".into()).unwrap();
//! session.update_field(RideField::PickupAddress, "MG Road".into()).unwrap();
//! session.update_field(RideField::DropoffAddress, "Airport".into()).unwrap();
//! session.update_field(RideField::RideFee, "500".into()).unwrap();
//!
//! let receipt = session.generate_receipt().unwrap();
//! assert_eq!(receipt.bill.total_display(), "₹590");
//! assert!(session.is_previewing());
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::date;
use crate::error::{CoreError, CoreResult};
use crate::invoice::{generate_invoice_id, regenerate_invoice_id, InvoiceIdSource, RandomInvoiceIds};
use crate::receipt::Receipt;
use crate::types::{FeeInput, PaymentMethod, RideDefaults, RideField, RideRecord};

// =============================================================================
// Phase
// =============================================================================

/// Where the session is in the edit → preview flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing,
    Previewing(Box<Receipt>),
}

impl Phase {
    /// Lower-case name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Previewing(_) => "previewing",
        }
    }
}

/// Serializable view of a session for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub phase: &'static str,
    pub ride: RideRecord,
}

// =============================================================================
// Form Session
// =============================================================================

/// One form's worth of state: the draft ride and the current phase.
pub struct FormSession {
    ride: RideRecord,
    phase: Phase,
    ids: Box<dyn InvoiceIdSource>,
}

impl FormSession {
    /// Starts a session dated today with a random invoice number.
    pub fn new(defaults: RideDefaults) -> Self {
        Self::with_parts(defaults, date::today(), Box::new(RandomInvoiceIds))
    }

    /// Starts a session with an explicit date and invoice source.
    pub fn with_parts(
        defaults: RideDefaults,
        date: impl Into<String>,
        mut ids: Box<dyn InvoiceIdSource>,
    ) -> Self {
        let invoice_id = generate_invoice_id(ids.as_mut());
        let ride = RideRecord::new(&defaults, date, invoice_id);
        debug!(invoice_id = %ride.invoice_id, "Form session started");
        FormSession {
            ride,
            phase: Phase::Editing,
            ids,
        }
    }

    /// The current draft (or frozen) ride.
    pub fn ride(&self) -> &RideRecord {
        &self.ride
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.phase, Phase::Previewing(_))
    }

    /// Snapshot for the frontend.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            phase: self.phase.name(),
            ride: self.ride.clone(),
        }
    }

    /// The frozen receipt while previewing.
    pub fn receipt(&self) -> CoreResult<&Receipt> {
        match &self.phase {
            Phase::Previewing(receipt) => Ok(&**receipt),
            Phase::Editing => Err(CoreError::InvalidPhase {
                operation: "show the receipt",
                phase: self.phase.name(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Editing operations
    // -------------------------------------------------------------------------

    /// Sets one field from form text.
    pub fn update_field(&mut self, field: RideField, value: String) -> CoreResult<()> {
        self.require_editing("edit the form")?;
        field.apply(&mut self.ride, value)?;
        debug!(?field, "Field updated");
        Ok(())
    }

    /// Sets the ride date from the date picker.
    pub fn set_ride_date(&mut self, picked: NaiveDate) -> CoreResult<()> {
        self.require_editing("change the date")?;
        self.ride.date = date::format_ride_date(picked);
        debug!(date = %self.ride.date, "Ride date set");
        Ok(())
    }

    /// Draws a new invoice number, leaving every other field alone.
    pub fn regenerate_invoice_id(&mut self) -> CoreResult<&str> {
        self.require_editing("change the invoice number")?;
        self.ride.invoice_id = regenerate_invoice_id(self.ids.as_mut(), &self.ride.invoice_id);
        debug!(invoice_id = %self.ride.invoice_id, "Invoice number regenerated");
        Ok(&self.ride.invoice_id)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Editing → Previewing, if the ride passes validation.
    ///
    /// On failure nothing changes and the error names the first bad field.
    pub fn generate_receipt(&mut self) -> CoreResult<&Receipt> {
        self.require_editing("generate a receipt")?;

        let receipt = Receipt::issue(self.ride.clone())?;
        info!(
            invoice_id = %receipt.ride.invoice_id,
            total = receipt.bill.total_rupees,
            "Receipt generated"
        );
        self.phase = Phase::Previewing(Box::new(receipt));
        self.receipt()
    }

    /// Previewing → Editing, keeping every value.
    pub fn back_to_form(&mut self) -> CoreResult<()> {
        if !self.is_previewing() {
            return Err(CoreError::InvalidPhase {
                operation: "go back to the form",
                phase: self.phase.name(),
            });
        }
        self.phase = Phase::Editing;
        debug!("Back to form");
        Ok(())
    }

    /// Clears the trip and starts a fresh invoice, from either phase.
    ///
    /// ## Kept vs Cleared
    /// ```text
    /// kept:    date, driver, vehicle, registration, company, address,
    ///          mobile, GST
    /// cleared: customer, pickup, drop-off, all four fees, description
    /// reset:   payment → Cash, invoice → new number
    /// ```
    pub fn reset(&mut self) {
        let ride = &mut self.ride;
        ride.customer_name.clear();
        ride.pickup_address.clear();
        ride.dropoff_address.clear();
        ride.ride_fee = FeeInput::empty();
        ride.toll_fee = FeeInput::empty();
        ride.airport_charges = FeeInput::empty();
        ride.other_charges = FeeInput::empty();
        ride.other_charges_description.clear();
        ride.payment_method = PaymentMethod::Cash;
        ride.invoice_id = regenerate_invoice_id(self.ids.as_mut(), &ride.invoice_id);

        self.phase = Phase::Editing;
        info!(invoice_id = %self.ride.invoice_id, "Form reset");
    }

    fn require_editing(&self, operation: &'static str) -> CoreResult<()> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Previewing(_) => Err(CoreError::InvalidPhase {
                operation,
                phase: self.phase.name(),
            }),
        }
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("ride", &self.ride)
            .field("phase", &self.phase.name())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::receipt::ReceiptWarning;

    fn defaults() -> RideDefaults {
        RideDefaults {
            driver_name: "Ravi".to_string(),
            vehicle_type: "Sedan".to_string(),
            vehicle_reg_no: "KA01AB1234".to_string(),
            company_name: "City Cabs".to_string(),
            company_address: "12 Residency Rd".to_string(),
            mobile_number: "9800000000".to_string(),
            gst_percentage: "18".to_string(),
        }
    }

    fn session() -> FormSession {
        let mut next: u32 = 111_110;
        let ids = move || {
            next += 1;
            next
        };
        FormSession::with_parts(defaults(), "05 Jan 2025", Box::new(ids))
    }

    fn fill(session: &mut FormSession, fields: &[(RideField, &str)]) {
        for (field, value) in fields {
            session.update_field(*field, value.to_string()).unwrap();
        }
    }

    fn fill_trip(session: &mut FormSession) {
        fill(
            session,
            &[
                (RideField::CustomerName, "Asha Rao"),
                (RideField::PickupAddress, "MG Road"),
                (RideField::DropoffAddress, "Airport T2"),
                (RideField::RideFee, "500"),
            ],
        );
    }

    #[test]
    fn test_new_session_is_seeded() {
        let session = session();
        let ride = session.ride();

        assert_eq!(ride.invoice_id, "111111");
        assert_eq!(ride.date, "05 Jan 2025");
        assert_eq!(ride.driver_name, "Ravi");
        assert_eq!(ride.gst_percentage.as_str(), "18");
        assert_eq!(ride.payment_method, PaymentMethod::Cash);
        assert!(ride.ride_fee.is_blank());
        assert_eq!(session.phase(), &Phase::Editing);
    }

    #[test]
    fn test_generate_and_back() {
        let mut session = session();
        fill_trip(&mut session);

        let total = session.generate_receipt().unwrap().bill.total_display();
        assert_eq!(total, "₹590");
        assert!(session.is_previewing());

        session.back_to_form().unwrap();
        assert!(!session.is_previewing());
        assert_eq!(session.ride().customer_name, "Asha Rao");
        assert_eq!(session.ride().ride_fee.as_str(), "500");
    }

    #[test]
    fn test_guard_failure_keeps_editing() {
        let mut session = session();
        fill(
            &mut session,
            &[
                (RideField::CustomerName, "Asha"),
                (RideField::PickupAddress, "MG Road"),
                (RideField::DropoffAddress, "Airport"),
                (RideField::RideFee, ""),
            ],
        );
        let before = session.ride().clone();

        let err = session.generate_receipt().unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid ride fee");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(session.phase(), &Phase::Editing);
        assert_eq!(session.ride(), &before);
    }

    #[test]
    fn test_editing_is_locked_while_previewing() {
        let mut session = session();
        fill_trip(&mut session);
        session.generate_receipt().unwrap();

        let err = session
            .update_field(RideField::CustomerName, "Someone".to_string())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPhase { .. }));
        assert!(session.regenerate_invoice_id().is_err());
        assert!(session.generate_receipt().is_err());
        assert_eq!(session.ride().customer_name, "Asha Rao");
    }

    #[test]
    fn test_back_requires_preview() {
        let mut session = session();
        assert!(matches!(
            session.back_to_form(),
            Err(CoreError::InvalidPhase { phase: "editing", .. })
        ));
        assert!(session.receipt().is_err());
    }

    #[test]
    fn test_regenerate_invoice_id_touches_only_the_id() {
        let mut session = session();
        fill_trip(&mut session);
        let before = session.ride().clone();

        let id = session.regenerate_invoice_id().unwrap().to_string();
        assert_eq!(id, "111112");
        assert_ne!(id, before.invoice_id);

        let mut expected = before;
        expected.invoice_id = id;
        assert_eq!(session.ride(), &expected);
    }

    #[test]
    fn test_reset_clears_trip_fields_only() {
        let mut session = session();
        fill_trip(&mut session);
        fill(
            &mut session,
            &[
                (RideField::TollFee, "50"),
                (RideField::AirportCharges, "200"),
                (RideField::OtherCharges, "30"),
                (RideField::OtherChargesDescription, "Parking"),
                (RideField::PaymentMethod, "UPI"),
                (RideField::GstPercentage, "5"),
                (RideField::DriverName, "Imran"),
            ],
        );
        session.set_ride_date(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()).unwrap();
        session.generate_receipt().unwrap();
        let old_id = session.ride().invoice_id.clone();

        session.reset();
        let ride = session.ride();

        assert_eq!(session.phase(), &Phase::Editing);
        assert!(ride.customer_name.is_empty());
        assert!(ride.pickup_address.is_empty());
        assert!(ride.dropoff_address.is_empty());
        assert!(ride.ride_fee.is_blank());
        assert!(ride.toll_fee.is_blank());
        assert!(ride.airport_charges.is_blank());
        assert!(ride.other_charges.is_blank());
        assert!(ride.other_charges_description.is_empty());
        assert_eq!(ride.payment_method, PaymentMethod::Cash);
        assert_ne!(ride.invoice_id, old_id);
        assert_eq!(ride.invoice_id.len(), 6);

        assert_eq!(ride.date, "09 Mar 2025");
        assert_eq!(ride.gst_percentage.as_str(), "5");
        assert_eq!(ride.driver_name, "Imran");
        assert_eq!(ride.vehicle_type, "Sedan");
        assert_eq!(ride.vehicle_reg_no, "KA01AB1234");
        assert_eq!(ride.company_name, "City Cabs");
        assert_eq!(ride.company_address, "12 Residency Rd");
        assert_eq!(ride.mobile_number, "9800000000");
    }

    #[test]
    fn test_reset_from_editing() {
        let mut session = session();
        fill(&mut session, &[(RideField::CustomerName, "Asha")]);
        session.reset();
        assert!(session.ride().customer_name.is_empty());
        assert_eq!(session.ride().invoice_id, "111112");
    }

    #[test]
    fn test_unlisted_other_charges_preview() {
        let mut session = session();
        fill_trip(&mut session);
        fill(&mut session, &[(RideField::OtherCharges, "100")]);

        let receipt = session.generate_receipt().unwrap();
        assert_eq!(receipt.bill.total_rupees, 708);
        assert_eq!(receipt.bill.line_items.len(), 1);
        assert_eq!(
            receipt.warnings,
            vec![ReceiptWarning::UnlabeledOtherCharges {
                amount: Money::from_rupees(100)
            }]
        );
    }

    #[test]
    fn test_bad_payment_method_is_rejected() {
        let mut session = session();
        let err = session
            .update_field(RideField::PaymentMethod, "Cheque".to_string())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotAllowed { .. })
        ));
        assert_eq!(session.ride().payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = session();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["phase"], "editing");
        assert_eq!(json["ride"]["invoiceId"], "111111");
    }
}
