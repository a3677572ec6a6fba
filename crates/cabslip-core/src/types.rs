//! # Domain Types
//!
//! Core domain types used throughout CabSlip.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │     RideRecord       │   │    FeeInput     │   │    GstRate      │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  parties & vehicle   │──►│  raw form text  │   │  bps (u32)      │  │
//! │  │  route               │   │  "" | "500.50"  │   │  1800 = 18%     │  │
//! │  │  fees (FeeInput)     │   └─────────────────┘   └─────────────────┘  │
//! │  │  gst (FeeInput)      │                                               │
//! │  │  payment method      │   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │  company & contact   │   │ PaymentMethod   │   │  RideDefaults   │  │
//! │  └──────────────────────┘   │  Cash | UPI     │   │  seeds a new    │  │
//! │                             │  Card | NetBank │   │  form session   │  │
//! │                             └─────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text-First Numbers
//! Numeric form fields stay as text while the user edits them so an input
//! box can be empty. They only become numbers through [`FeeInput::amount`]
//! and [`FeeInput::gst_rate`], which coerce anything unparseable to zero.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{parse_hundredths, Money};

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// The form accepts the percentage with two decimals (`18.25`), which is
/// exactly one basis-point step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        GstRate(bps)
    }

    /// Parses a percentage typed into the form (`"18"`, `"12.5"`).
    ///
    /// Uses the same rule as fee amounts; `None` for anything unparseable.
    pub fn parse_percentage(text: &str) -> Option<Self> {
        parse_hundredths(text)
            .and_then(|bps| u32::try_from(bps).ok())
            .map(GstRate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(0)
    }

    /// Percentage with one decimal place, rounded half-up (`"18.0"`).
    ///
    /// Used in the "Includes 18.0% Taxes" note.
    pub fn percent_one_decimal(&self) -> String {
        let tenths = (u64::from(self.0) + 5) / 10;
        format!("{}.{}", tenths / 10, tenths % 10)
    }

    /// Percentage with trailing zeros trimmed (`"18"`, `"12.5"`, `"5.25"`).
    ///
    /// Used in the `GST (18%)` breakdown label.
    pub fn percent_trimmed(&self) -> String {
        let whole = self.0 / 100;
        match self.0 % 100 {
            0 => whole.to_string(),
            frac if frac % 10 == 0 => format!("{}.{}", whole, frac / 10),
            frac => format!("{}.{:02}", whole, frac),
        }
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

// =============================================================================
// Fee Input
// =============================================================================

/// Raw text of a numeric form field.
///
/// ## Wire Format
/// The frontend may send either a JSON string (`"500.50"`, `""`) or a JSON
/// number (`500.5`). Both are kept as text; serialization always emits a
/// string so an empty box round-trips as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeInput(String);

impl FeeInput {
    /// Wraps raw field text.
    pub fn new(text: impl Into<String>) -> Self {
        FeeInput(text.into())
    }

    /// An empty input box.
    pub fn empty() -> Self {
        FeeInput(String::new())
    }

    /// Returns the raw text as typed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the box is empty (ignoring whitespace).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Coerces the text to a non-negative amount; unparseable text is zero.
    ///
    /// ## Example
    /// ```rust
    /// use cabslip_core::types::FeeInput;
    /// use cabslip_core::Money;
    ///
    /// assert_eq!(FeeInput::new("250.5").amount(), Money::from_paise(25_050));
    /// assert_eq!(FeeInput::new("").amount(), Money::zero());
    /// assert_eq!(FeeInput::new("n/a").amount(), Money::zero());
    /// ```
    pub fn amount(&self) -> Money {
        Money::parse(&self.0).unwrap_or_default()
    }

    /// Coerces the text to a GST rate; unparseable text is 0%.
    pub fn gst_rate(&self) -> GstRate {
        GstRate::parse_percentage(&self.0).unwrap_or_default()
    }
}

impl From<Money> for FeeInput {
    fn from(amount: Money) -> Self {
        FeeInput(amount.to_plain_string())
    }
}

impl From<&str> for FeeInput {
    fn from(text: &str) -> Self {
        FeeInput::new(text)
    }
}

impl Serialize for FeeInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FeeInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => FeeInput(text),
            Raw::Int(n) => FeeInput(n.to_string()),
            Raw::Float(n) => FeeInput(n.to_string()),
        })
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid for the ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMethod {
    /// Every selectable method, in dropdown order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::NetBanking,
    ];

    /// Label printed on the receipt ("Paid by UPI").
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "Net Banking",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "paymentMethod".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|m| m.label().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Ride Defaults
// =============================================================================

/// Values that seed every new form and survive a reset.
///
/// Supplied by application configuration; the `Default` impl is only a
/// development fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RideDefaults {
    pub driver_name: String,
    pub vehicle_type: String,
    pub vehicle_reg_no: String,
    pub company_name: String,
    pub company_address: String,
    pub mobile_number: String,
    /// GST percentage text pre-filled into the form.
    pub gst_percentage: String,
}

impl Default for RideDefaults {
    fn default() -> Self {
        RideDefaults {
            driver_name: String::new(),
            vehicle_type: String::new(),
            vehicle_reg_no: String::new(),
            company_name: "CabSlip Taxi Service".to_string(),
            company_address: String::new(),
            mobile_number: String::new(),
            gst_percentage: crate::DEFAULT_GST_PERCENTAGE.to_string(),
        }
    }
}

// =============================================================================
// Ride Record
// =============================================================================

/// The flat record describing one ride: parties, route, and charges.
///
/// ## Lifecycle
/// ```text
/// new form ──► edited field by field ──► frozen into a Receipt ──► reset
///                                         (generate receipt)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RideRecord {
    /// Ride date as displayed ("05 Jan 2025"); opaque text downstream.
    pub date: String,
    pub driver_name: String,
    pub customer_name: String,
    pub vehicle_type: String,
    pub vehicle_reg_no: String,
    /// 6-digit invoice number.
    pub invoice_id: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    #[ts(type = "string | number")]
    pub ride_fee: FeeInput,
    #[ts(type = "string | number")]
    pub toll_fee: FeeInput,
    #[ts(type = "string | number")]
    pub airport_charges: FeeInput,
    #[ts(type = "string | number")]
    pub other_charges: FeeInput,
    pub other_charges_description: String,
    #[ts(type = "string | number")]
    pub gst_percentage: FeeInput,
    pub payment_method: PaymentMethod,
    pub company_name: String,
    pub company_address: String,
    pub mobile_number: String,
}

impl RideRecord {
    /// Creates a blank ride seeded from defaults.
    pub fn new(defaults: &RideDefaults, date: impl Into<String>, invoice_id: impl Into<String>) -> Self {
        RideRecord {
            date: date.into(),
            driver_name: defaults.driver_name.clone(),
            customer_name: String::new(),
            vehicle_type: defaults.vehicle_type.clone(),
            vehicle_reg_no: defaults.vehicle_reg_no.clone(),
            invoice_id: invoice_id.into(),
            pickup_address: String::new(),
            dropoff_address: String::new(),
            ride_fee: FeeInput::empty(),
            toll_fee: FeeInput::empty(),
            airport_charges: FeeInput::empty(),
            other_charges: FeeInput::empty(),
            other_charges_description: String::new(),
            gst_percentage: FeeInput::new(defaults.gst_percentage.clone()),
            payment_method: PaymentMethod::default(),
            company_name: defaults.company_name.clone(),
            company_address: defaults.company_address.clone(),
            mobile_number: defaults.mobile_number.clone(),
        }
    }

    /// Customer name for file names and greetings; "Customer" when blank.
    pub fn customer_display_name(&self) -> &str {
        match self.customer_name.trim() {
            "" => "Customer",
            name => name,
        }
    }

    /// Deterministic export file name without extension:
    /// `Receipt_<invoiceId>_<customer>`.
    pub fn receipt_file_stem(&self) -> String {
        format!("Receipt_{}_{}", self.invoice_id, self.customer_display_name())
    }
}

// =============================================================================
// Ride Field
// =============================================================================

/// Addressable form fields, named as the frontend names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum RideField {
    Date,
    DriverName,
    CustomerName,
    VehicleType,
    VehicleRegNo,
    InvoiceId,
    PickupAddress,
    DropoffAddress,
    RideFee,
    TollFee,
    AirportCharges,
    OtherCharges,
    OtherChargesDescription,
    GstPercentage,
    PaymentMethod,
    CompanyName,
    CompanyAddress,
    MobileNumber,
}

impl RideField {
    /// Writes `value` into the matching field of `record`.
    ///
    /// Text fields take the value verbatim; numeric fields keep it as raw
    /// text. Only the payment method can reject a value.
    pub fn apply(self, record: &mut RideRecord, value: String) -> Result<(), ValidationError> {
        match self {
            RideField::Date => record.date = value,
            RideField::DriverName => record.driver_name = value,
            RideField::CustomerName => record.customer_name = value,
            RideField::VehicleType => record.vehicle_type = value,
            RideField::VehicleRegNo => record.vehicle_reg_no = value,
            RideField::InvoiceId => record.invoice_id = value,
            RideField::PickupAddress => record.pickup_address = value,
            RideField::DropoffAddress => record.dropoff_address = value,
            RideField::RideFee => record.ride_fee = FeeInput::new(value),
            RideField::TollFee => record.toll_fee = FeeInput::new(value),
            RideField::AirportCharges => record.airport_charges = FeeInput::new(value),
            RideField::OtherCharges => record.other_charges = FeeInput::new(value),
            RideField::OtherChargesDescription => record.other_charges_description = value,
            RideField::GstPercentage => record.gst_percentage = FeeInput::new(value),
            RideField::PaymentMethod => record.payment_method = value.parse()?,
            RideField::CompanyName => record.company_name = value,
            RideField::CompanyAddress => record.company_address = value,
            RideField::MobileNumber => record.mobile_number = value,
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
