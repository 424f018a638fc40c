//! Normalization of raw query parameters.
//!
//! Dates arrive as `YYYY-MM-DD` strings and counts as free text; everything
//! is parsed here before any core component sees it, failing with
//! [`BookingError::MalformedInput`] on bad input.

use chrono::NaiveDate;

use crate::error::BookingError;

/// Parses a `YYYY-MM-DD` date parameter.
pub fn parse_date(raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::MalformedInput(format!(
            "Invalid date '{}'. Please use the YYYY-MM-DD format.",
            raw.trim()
        ))
    })
}

/// Parses a guest-count parameter; the count must be at least 1.
pub fn parse_guest_count(raw: &str) -> Result<i32, BookingError> {
    let count: i32 = raw
        .trim()
        .parse()
        .map_err(|_| BookingError::MalformedInput("Invalid number of guests.".into()))?;
    if count < 1 {
        return Err(BookingError::MalformedInput(
            "Number of guests must be at least 1.".into(),
        ));
    }
    Ok(count)
}

/// Parses raw year/month navigation parameters into integers.
///
/// Out-of-range month indexes (0, 13, ...) are accepted here; the calendar
/// applies its single-step wrap afterwards.
pub fn parse_year_month(raw_year: &str, raw_month: &str) -> Result<(i32, i32), BookingError> {
    let year: i32 = raw_year
        .trim()
        .parse()
        .map_err(|_| BookingError::MalformedInput(format!("Invalid year '{raw_year}'.")))?;
    let month: i32 = raw_month
        .trim()
        .parse()
        .map_err(|_| BookingError::MalformedInput(format!("Invalid month '{raw_month}'.")))?;
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::day;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2025-01-10").unwrap(), day(2025, 1, 10));
        assert_eq!(parse_date("  2025-01-10 ").unwrap(), day(2025, 1, 10));
    }

    #[test]
    fn rejects_other_date_formats() {
        for raw in ["10/01/2025", "2025-1-40", "yesterday", ""] {
            let err = parse_date(raw).unwrap_err();
            assert!(matches!(err, BookingError::MalformedInput(_)), "{raw:?}");
        }
    }

    #[test]
    fn guest_count_must_be_a_positive_integer() {
        assert_eq!(parse_guest_count("3").unwrap(), 3);
        assert!(parse_guest_count("0").is_err());
        assert!(parse_guest_count("-2").is_err());
        assert!(parse_guest_count("two").is_err());
        assert!(parse_guest_count("2.5").is_err());
    }

    #[test]
    fn year_month_accepts_out_of_range_months() {
        assert_eq!(parse_year_month("2024", "0").unwrap(), (2024, 0));
        assert_eq!(parse_year_month("2024", "13").unwrap(), (2024, 13));
        assert!(parse_year_month("MMXXIV", "1").is_err());
        assert!(parse_year_month("2024", "June").is_err());
    }
}
