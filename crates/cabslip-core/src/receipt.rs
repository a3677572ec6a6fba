//! # Receipt
//!
//! A frozen ride plus its computed bill. Built once when the form passes
//! validation; every view (screen, PDF, print) reads the same value.
//!
//! ```text
//! RideRecord ──(validate_for_preview)──► Receipt { ride, bill, warnings }
//!                                           │
//!                         ┌─────────────────┼─────────────────┐
//!                         ▼                 ▼                 ▼
//!                   screen layout     export layout      file name
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::billing::BillSummary;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::RideRecord;
use crate::validation::{check_gst_rate, validate_for_preview};

/// Something odd about a receipt that does not block it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReceiptWarning {
    /// Other charges were entered without a description, so they are in the
    /// total but have no row of their own.
    UnlabeledOtherCharges { amount: Money },
    /// GST outside 0-100% was billed as entered.
    GstOutOfRange { percentage: String },
}

impl ReceiptWarning {
    /// Short text for a non-blocking notice.
    pub fn message(&self) -> String {
        match self {
            ReceiptWarning::UnlabeledOtherCharges { amount } => format!(
                "Other charges of {} are included in the total but not listed; add a description to show them",
                amount
            ),
            ReceiptWarning::GstOutOfRange { percentage } => {
                format!("GST of {}% is outside 0-100%", percentage)
            }
        }
    }
}

/// An immutable, validated receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub ride: RideRecord,
    pub bill: BillSummary,
    pub warnings: Vec<ReceiptWarning>,
}

impl Receipt {
    /// Validates and freezes a ride.
    pub fn issue(ride: RideRecord) -> Result<Self, ValidationError> {
        validate_for_preview(&ride)?;

        let bill = BillSummary::from_ride(&ride);
        let mut warnings = Vec::new();

        if bill.has_unlisted_charges() {
            warn!(
                invoice_id = %ride.invoice_id,
                amount = %bill.unlisted_other_charges,
                "Other charges have no description and are not listed"
            );
            warnings.push(ReceiptWarning::UnlabeledOtherCharges {
                amount: bill.unlisted_other_charges,
            });
        }

        if !check_gst_rate(&ride) {
            warnings.push(ReceiptWarning::GstOutOfRange {
                percentage: ride.gst_percentage.as_str().trim().to_string(),
            });
        }

        Ok(Receipt {
            ride,
            bill,
            warnings,
        })
    }

    /// Export file name without extension, e.g. `Receipt_123456_Asha Rao`.
    pub fn file_stem(&self) -> String {
        self.ride.receipt_file_stem()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RideDefaults;

    fn ride() -> RideRecord {
        let mut ride = RideRecord::new(&RideDefaults::default(), "05 Jan 2025", "123456");
        ride.customer_name = "Asha Rao".to_string();
        ride.pickup_address = "MG Road".to_string();
        ride.dropoff_address = "Airport".to_string();
        ride.ride_fee = "500".into();
        ride
    }

    #[test]
    fn test_issue_clean_receipt() {
        let receipt = Receipt::issue(ride()).unwrap();
        assert!(receipt.warnings.is_empty());
        assert_eq!(receipt.bill.total_display(), "₹590");
        assert_eq!(receipt.file_stem(), "Receipt_123456_Asha Rao");
    }

    #[test]
    fn test_unlabeled_other_charges_are_flagged() {
        let mut ride = ride();
        ride.other_charges = "100".into();
        let receipt = Receipt::issue(ride).unwrap();

        assert_eq!(receipt.bill.total_rupees, 708);
        assert_eq!(
            receipt.warnings,
            vec![ReceiptWarning::UnlabeledOtherCharges {
                amount: Money::from_rupees(100)
            }]
        );
        assert!(receipt.warnings[0].message().contains("₹100.00"));
    }

    #[test]
    fn test_out_of_range_gst_still_bills() {
        let mut ride = ride();
        ride.gst_percentage = "150".into();
        let receipt = Receipt::issue(ride).unwrap();

        assert_eq!(receipt.bill.total_rupees, 1250);
        assert!(matches!(
            receipt.warnings.as_slice(),
            [ReceiptWarning::GstOutOfRange { .. }]
        ));
    }

    #[test]
    fn test_invalid_ride_is_refused() {
        let mut ride = ride();
        ride.ride_fee = "".into();
        let err = Receipt::issue(ride).unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid ride fee");
    }

    #[test]
    fn test_warning_serializes_tagged() {
        let json = serde_json::to_value(ReceiptWarning::UnlabeledOtherCharges {
            amount: Money::from_rupees(1),
        })
        .unwrap();
        assert_eq!(json["kind"], "unlabeledOtherCharges");
        assert_eq!(json["amount"], 100);
    }
}
