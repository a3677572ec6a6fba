//! # Money Module
//!
//! Provides the `Money` type for handling fare amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A fare of ₹1000.10 + toll ₹50.20 must print ₹1050.30, never           │
//! │  ₹1050.2999999.                                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    100010 paise + 5020 paise = 105030 paise                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabslip_core::money::Money;
//!
//! let fare = Money::from_paise(50_000); // ₹500.00
//! let toll = Money::parse("50").unwrap();
//! assert_eq!((fare + toll).paise(), 55_000);
//! assert_eq!(format!("{}", fare + toll), "₹550.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::types::GstRate;

/// Display symbol for Indian rupees.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A fare amount in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64**: far beyond any taxi fare, and `i128` is used for tax products
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Non-negative in practice**: every constructor fed by user input goes
///   through [`Money::parse`], which refuses negative text
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  FeeInput ("500") ──► Money ──┬──► BillSummary.subtotal                 │
/// │                               │          │                             │
/// │                               │          ▼                             │
/// │                               │    GST (18%) ──► total (₹590)          │
/// │                               │                                        │
/// │                               └──► Line items ("₹500.00")              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use cabslip_core::money::Money;
    ///
    /// let fare = Money::from_paise(12_550); // ₹125.50
    /// assert_eq!(fare.rupees(), 125);
    /// assert_eq!(fare.paise_part(), 50);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Parses user-entered amount text.
    ///
    /// ## Accepted Input
    /// - optional surrounding whitespace and a leading `+`
    /// - digits with an optional fractional part (`"500"`, `"99.5"`, `".75"`)
    /// - more than two fractional digits round half-up to the paisa
    ///
    /// Everything else (empty text, signs other than `+`, exponents, letters,
    /// values too large for `i64` paise) returns `None`.
    ///
    /// ## Example
    /// ```rust
    /// use cabslip_core::money::Money;
    ///
    /// assert_eq!(Money::parse("99.5"), Some(Money::from_paise(9_950)));
    /// assert_eq!(Money::parse("10.005"), Some(Money::from_paise(1_001)));
    /// assert_eq!(Money::parse("-5"), None);
    /// assert_eq!(Money::parse(""), None);
    /// ```
    pub fn parse(text: &str) -> Option<Money> {
        parse_hundredths(text).map(Money)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates GST on this amount, rounded half-up to the paisa.
    ///
    /// ## Implementation
    /// Integer math: `(paise * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5 paisa).
    ///
    /// ## Example
    /// ```rust
    /// use cabslip_core::money::Money;
    /// use cabslip_core::types::GstRate;
    ///
    /// let subtotal = Money::from_rupees(1250);
    /// let gst = subtotal.calculate_gst(GstRate::from_bps(1800));
    /// assert_eq!(gst, Money::from_rupees(225));
    /// ```
    ///
    /// A product beyond `i64` paise saturates at `i64::MAX`.
    pub fn calculate_gst(&self, rate: GstRate) -> Money {
        let gst = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money::from_paise(i64::try_from(gst).unwrap_or(i64::MAX))
    }

    /// Formats the amount without the currency symbol (`"590.00"`).
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Parses decimal text into hundredths (paise, or GST basis points).
///
/// Shared by [`Money::parse`] and [`GstRate::parse_percentage`] so fees and the
/// GST field follow one coercion rule.
pub(crate) fn parse_hundredths(text: &str) -> Option<i64> {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = i64::from(digits.next().is_some_and(|d| d >= 5));

    whole
        .checked_mul(100)?
        .checked_add(tenths * 10 + hundredths + round_up)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount the way line items print it: `₹500.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            RUPEE_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating: fees that each parse can still sum past `i64` paise.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(12_599);
        assert_eq!(money.paise(), 12_599);
        assert_eq!(money.rupees(), 125);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(50_000)), "₹500.00");
        assert_eq!(format!("{}", Money::from_paise(5)), "₹0.05");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
        assert_eq!(Money::from_paise(147_550).to_plain_string(), "1475.50");
    }

    #[test]
    fn test_parse_accepts_plain_decimals() {
        assert_eq!(Money::parse("500"), Some(Money::from_rupees(500)));
        assert_eq!(Money::parse(" 500 "), Some(Money::from_rupees(500)));
        assert_eq!(Money::parse("+12.3"), Some(Money::from_paise(1_230)));
        assert_eq!(Money::parse(".75"), Some(Money::from_paise(75)));
        assert_eq!(Money::parse("7."), Some(Money::from_rupees(7)));
        assert_eq!(Money::parse("0"), Some(Money::zero()));
    }

    #[test]
    fn test_parse_rounds_extra_fraction_half_up() {
        assert_eq!(Money::parse("10.004"), Some(Money::from_paise(1_000)));
        assert_eq!(Money::parse("10.005"), Some(Money::from_paise(1_001)));
        assert_eq!(Money::parse("0.999"), Some(Money::from_paise(100)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "   ", ".", "-5", "abc", "12abc", "1e3", "1.2.3", "₹500", "NaN"] {
            assert_eq!(Money::parse(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(Money::parse("99999999999999999999"), None);
    }

    #[test]
    fn test_gst_calculation() {
        let rate = GstRate::from_bps(1800);
        assert_eq!(Money::from_rupees(500).calculate_gst(rate), Money::from_rupees(90));

        // ₹10.01 at 18% = 180.18 paise → 180
        assert_eq!(Money::from_paise(1_001).calculate_gst(rate).paise(), 180);

        // ₹0.25 at 18% = 4.5 paise → 5 (half-up)
        assert_eq!(Money::from_paise(25).calculate_gst(rate).paise(), 5);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 0].into_iter().map(Money::from_paise).sum();
        assert_eq!(total.paise(), 350);
    }

    #[test]
    fn test_addition_saturates() {
        let huge = Money::parse("50000000000000000").unwrap();
        assert_eq!((huge + huge).paise(), i64::MAX);

        let mut total = Money::from_paise(i64::MAX - 1);
        total += Money::from_paise(10);
        assert_eq!(total.paise(), i64::MAX);

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.paise(), i64::MAX);
    }

    #[test]
    fn test_gst_saturates_on_huge_amounts() {
        let rate = GstRate::from_bps(u32::MAX);
        assert_eq!(Money::from_paise(i64::MAX).calculate_gst(rate).paise(), i64::MAX);
    }
}
