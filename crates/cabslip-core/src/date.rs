//! # Ride Dates
//!
//! Ride dates are stored as display text (`"05 Jan 2025"`). Once in the
//! record they are opaque: nothing downstream parses them back.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;

/// Display format: zero-padded day, short month, 4-digit year.
pub const RIDE_DATE_FORMAT: &str = "%d %b %Y";

/// Format the date picker sends.
pub const PICKER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar date for the receipt.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use cabslip_core::date::format_ride_date;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
/// assert_eq!(format_ride_date(date), "05 Jan 2025");
/// ```
pub fn format_ride_date(date: NaiveDate) -> String {
    date.format(RIDE_DATE_FORMAT).to_string()
}

/// Today's date in the local timezone, formatted.
pub fn today() -> String {
    format_ride_date(Local::now().date_naive())
}

/// Parses a picker value (`2025-01-05`).
pub fn parse_picker(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), PICKER_DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_ride_date(date), "31 Dec 2024");
    }

    #[test]
    fn test_parse_picker() {
        assert_eq!(
            parse_picker("2025-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
        );
        assert_eq!(parse_picker(" 2025-07-19 ").map(format_ride_date).unwrap(), "19 Jul 2025");
        assert!(parse_picker("2025-02-30").is_err());
        assert!(parse_picker("05 Jan 2025").is_err());

        let err = parse_picker("").unwrap_err();
        assert_eq!(err.field(), "date");
    }

    #[test]
    fn test_today_shape() {
        let today = today();
        let parsed = NaiveDate::parse_from_str(&today, RIDE_DATE_FORMAT);
        assert!(parsed.is_ok(), "{today}");
    }
}
