//! # Billing Module
//!
//! Fee aggregation and GST for one ride.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill Calculation                                 │
//! │                                                                         │
//! │  rideFee ─────┐                                                         │
//! │  tollFee ─────┤  coerce each                                            │
//! │  airport ─────┼──────────────► subtotal (paise)                         │
//! │  other ───────┘                   │                                     │
//! │                                   ├──► gst = subtotal × bps / 10000     │
//! │  gstPercentage ──► bps ───────────┘        (display, half-up paisa)     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                 total = round(subtotal × (1 + bps/10000))  (rupees)    │
//! │                         computed once from the exact product           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use cabslip_core::billing::BillSummary;
//! use cabslip_core::types::{RideDefaults, RideRecord};
//!
//! let mut ride = RideRecord::new(&RideDefaults::default(), "05 Jan 2025", "123456");
//! ride.ride_fee = "1000".into();
//! ride.toll_fee = "50".into();
//! ride.airport_charges = "200".into();
//! ride.gst_percentage = "18".into();
//!
//! let bill = BillSummary::from_ride(&ride);
//! assert_eq!(bill.subtotal.to_plain_string(), "1250.00");
//! assert_eq!(bill.gst_amount.to_plain_string(), "225.00");
//! assert_eq!(bill.total_display(), "₹1475");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, RUPEE_SYMBOL};
use crate::types::{GstRate, RideRecord};

/// Label of the always-present fare line.
pub const TRIP_LABEL: &str = "Your Trip";
/// Label of the toll line.
pub const TOLL_LABEL: &str = "Toll Convenience Fee";
/// Label of the airport line.
pub const AIRPORT_LABEL: &str = "Airport Charges";

// =============================================================================
// Line Item
// =============================================================================

/// One row of the fare breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    fn new(label: impl Into<String>, amount: Money) -> Self {
        LineItem {
            label: label.into(),
            amount,
        }
    }
}

// =============================================================================
// Bill Summary
// =============================================================================

/// Derived billing values for a ride.
///
/// Built once per receipt; both the on-screen and export layouts read from
/// the same summary so they can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub ride_fee: Money,
    pub toll_fee: Money,
    pub airport_charges: Money,
    pub other_charges: Money,
    pub gst_rate: GstRate,
    /// Sum of the four coerced fees.
    pub subtotal: Money,
    /// GST rounded half-up to the paisa, for the breakdown row.
    pub gst_amount: Money,
    /// Headline total in whole rupees, rounded half-up from the exact sum.
    #[ts(type = "number")]
    pub total_rupees: i64,
    /// Rows to print, in order.
    pub line_items: Vec<LineItem>,
    /// Other charges counted in the subtotal but not listed (no description).
    pub unlisted_other_charges: Money,
}

impl BillSummary {
    /// Computes the bill for a ride.
    ///
    /// ## Line Item Rules
    /// - "Your Trip" always shows, even at zero
    /// - toll and airport rows show only when above zero
    /// - the other-charges row needs an amount above zero AND a description
    pub fn from_ride(ride: &RideRecord) -> Self {
        let ride_fee = ride.ride_fee.amount();
        let toll_fee = ride.toll_fee.amount();
        let airport_charges = ride.airport_charges.amount();
        let other_charges = ride.other_charges.amount();
        let gst_rate = ride.gst_percentage.gst_rate();

        // Saturates rather than wrapping when the fees are absurdly large
        let subtotal = ride_fee + toll_fee + airport_charges + other_charges;
        let gst_amount = subtotal.calculate_gst(gst_rate);
        let total_rupees = total_rupees(subtotal, gst_rate);

        let mut line_items = vec![LineItem::new(TRIP_LABEL, ride_fee)];
        if toll_fee.is_positive() {
            line_items.push(LineItem::new(TOLL_LABEL, toll_fee));
        }
        if airport_charges.is_positive() {
            line_items.push(LineItem::new(AIRPORT_LABEL, airport_charges));
        }

        let description = ride.other_charges_description.trim();
        let unlisted_other_charges = if !other_charges.is_positive() {
            Money::zero()
        } else if description.is_empty() {
            other_charges
        } else {
            line_items.push(LineItem::new(description, other_charges));
            Money::zero()
        };

        BillSummary {
            ride_fee,
            toll_fee,
            airport_charges,
            other_charges,
            gst_rate,
            subtotal,
            gst_amount,
            total_rupees,
            line_items,
            unlisted_other_charges,
        }
    }

    /// Headline amount: `₹590`.
    pub fn total_display(&self) -> String {
        format!("{}{}", RUPEE_SYMBOL, self.total_rupees)
    }

    /// Breakdown label for the GST row: `GST (18%)`.
    pub fn gst_label(&self) -> String {
        format!("GST ({}%)", self.gst_rate.percent_trimmed())
    }

    /// Note under the headline: `Includes 18.0% Taxes`.
    pub fn taxes_note(&self) -> String {
        format!("Includes {}% Taxes", self.gst_rate.percent_one_decimal())
    }

    /// Checks whether some charge is in the total without its own row.
    pub fn has_unlisted_charges(&self) -> bool {
        self.unlisted_other_charges.is_positive()
    }
}

/// `round_half_up(subtotal × (10000 + bps) / 10000)` in rupees.
///
/// 128-bit so a large subtotal times a large rate cannot overflow.
fn total_rupees(subtotal: Money, rate: GstRate) -> i64 {
    const SCALE: i128 = 100 * 10_000;
    let exact = subtotal.paise() as i128 * (10_000 + rate.bps() as i128);
    let rounded = (exact + SCALE / 2) / SCALE;
    i64::try_from(rounded).unwrap_or(i64::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================
