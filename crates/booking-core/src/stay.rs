use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::BookingError;

/// Derived totals for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StayTotals {
    /// Whole nights between check-in and check-out (always >= 1).
    pub nights: i64,
    /// `price_per_night * nights`, decimal-exact.
    pub total_price: Decimal,
}

/// Computes nights and total price for a stay.
///
/// Must be re-run whenever a booking's dates or nightly price change so the
/// stored totals never go stale.
pub fn compute_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    price_per_night: Decimal,
) -> Result<StayTotals, BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidRange);
    }
    let nights = (check_out - check_in).num_days();
    Ok(StayTotals {
        nights,
        total_price: price_per_night * Decimal::from(nights),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::day;
    use rust_decimal_macros::dec;

    #[test]
    fn three_nights_at_fifty() {
        let totals = compute_stay(day(2025, 1, 10), day(2025, 1, 13), dec!(50.00)).unwrap();
        assert_eq!(totals.nights, 3);
        assert_eq!(totals.total_price, dec!(150.00));
    }

    #[test]
    fn single_night_is_valid() {
        let totals = compute_stay(day(2025, 1, 10), day(2025, 1, 11), dec!(75.25)).unwrap();
        assert_eq!(totals.nights, 1);
        assert_eq!(totals.total_price, dec!(75.25));
    }

    #[test]
    fn price_is_decimal_exact() {
        // 0.10 * 3 would drift with binary floats; Decimal must not.
        let totals = compute_stay(day(2025, 1, 1), day(2025, 1, 4), dec!(0.10)).unwrap();
        assert_eq!(totals.total_price, dec!(0.30));
    }

    #[test]
    fn zero_length_range_is_rejected() {
        let err = compute_stay(day(2025, 1, 10), day(2025, 1, 10), dec!(50.00)).unwrap_err();
        assert_eq!(err, BookingError::InvalidRange);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = compute_stay(day(2025, 1, 13), day(2025, 1, 10), dec!(50.00)).unwrap_err();
        assert_eq!(err, BookingError::InvalidRange);
    }

    #[test]
    fn spans_across_months_count_calendar_days() {
        let totals = compute_stay(day(2025, 1, 30), day(2025, 2, 2), dec!(20.00)).unwrap();
        assert_eq!(totals.nights, 3);
        assert_eq!(totals.total_price, dec!(60.00));
    }
}
