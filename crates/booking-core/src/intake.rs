use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidateEmail;

use crate::error::BookingError;
use crate::model::{Booking, Plot};
use crate::overlap::has_conflict;
use crate::pricing::PricingPolicy;
use crate::stay::compute_stay;

/// Validated pricing for a booking about to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookingQuote {
    /// Nightly price resolved for the plot.
    pub price_per_night: Decimal,
    /// Whole nights of the stay.
    pub nights: i64,
    /// `price_per_night * nights`.
    pub total_price: Decimal,
}

/// Validates a booking request against a plot and its existing bookings.
///
/// Checks fail fast in a fixed order: date range, past check-in, overlap,
/// capacity, guest email. On success returns the quote the caller persists
/// together with the new `pending` booking.
pub fn validate_booking(
    policy: &PricingPolicy,
    plot: &Plot,
    number_of_guests: i32,
    guest_email: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &[Booking],
    today: NaiveDate,
) -> Result<BookingQuote, BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidRange);
    }
    if check_in < today {
        return Err(BookingError::PastDate);
    }
    if has_conflict(plot.id, existing, check_in, check_out, None) {
        return Err(BookingError::Unavailable);
    }
    if number_of_guests > plot.capacity {
        return Err(BookingError::CapacityExceeded {
            guests: number_of_guests,
            capacity: plot.capacity,
        });
    }
    if !guest_email.validate_email() {
        return Err(BookingError::InvalidContact);
    }

    let price_per_night = policy.resolve(plot);
    let totals = compute_stay(check_in, check_out, price_per_night)?;
    Ok(BookingQuote {
        price_per_night,
        nights: totals.nights,
        total_price: totals.total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingStatus;
    use crate::testutil::{booking, day, plot};
    use rust_decimal_macros::dec;

    const EMAIL: &str = "a@b.com";

    #[test]
    fn valid_request_returns_quote() {
        let plot = plot(4, dec!(50.00));
        let quote = validate_booking(
            &PricingPolicy::default(),
            &plot,
            2,
            EMAIL,
            day(2025, 1, 10),
            day(2025, 1, 13),
            &[],
            day(2025, 1, 1),
        )
        .unwrap();
        assert_eq!(quote.price_per_night, dec!(50.00));
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_price, dec!(150.00));
    }

    #[test]
    fn overlapping_request_is_unavailable() {
        let plot = plot(4, dec!(50.00));
        let existing = vec![booking(
            plot.id,
            day(2025, 1, 10),
            day(2025, 1, 13),
            BookingStatus::Pending,
        )];
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            2,
            EMAIL,
            day(2025, 1, 12),
            day(2025, 1, 14),
            &existing,
            day(2025, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, BookingError::Unavailable);
    }

    #[test]
    fn capacity_overflow_is_rejected() {
        let plot = plot(4, dec!(50.00));
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            5,
            EMAIL,
            day(2025, 1, 10),
            day(2025, 1, 13),
            &[],
            day(2025, 1, 1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BookingError::CapacityExceeded {
                guests: 5,
                capacity: 4
            }
        );
    }

    #[test]
    fn party_matching_capacity_is_accepted() {
        let plot = plot(4, dec!(50.00));
        assert!(
            validate_booking(
                &PricingPolicy::default(),
                &plot,
                4,
                EMAIL,
                day(2025, 1, 10),
                day(2025, 1, 13),
                &[],
                day(2025, 1, 1),
            )
            .is_ok()
        );
    }

    #[test]
    fn bad_email_is_rejected_last() {
        let plot = plot(4, dec!(50.00));
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            2,
            "not-an-email",
            day(2025, 1, 10),
            day(2025, 1, 13),
            &[],
            day(2025, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, BookingError::InvalidContact);
    }

    #[test]
    fn checks_fail_fast_in_order() {
        let plot = plot(4, dec!(50.00));
        let existing = vec![booking(
            plot.id,
            day(2025, 1, 10),
            day(2025, 1, 13),
            BookingStatus::Confirmed,
        )];

        // Inverted range wins over everything else.
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            99,
            "nope",
            day(2025, 1, 13),
            day(2025, 1, 10),
            &existing,
            day(2026, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, BookingError::InvalidRange);

        // Past date wins over overlap, capacity and email.
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            99,
            "nope",
            day(2025, 1, 10),
            day(2025, 1, 13),
            &existing,
            day(2026, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, BookingError::PastDate);

        // Overlap wins over capacity and email.
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            99,
            "nope",
            day(2025, 1, 12),
            day(2025, 1, 14),
            &existing,
            day(2025, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err, BookingError::Unavailable);

        // Capacity wins over email.
        let err = validate_booking(
            &PricingPolicy::default(),
            &plot,
            99,
            "nope",
            day(2025, 2, 1),
            day(2025, 2, 3),
            &existing,
            day(2025, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::CapacityExceeded { .. }));
    }

    #[test]
    fn back_to_back_bookings_are_allowed() {
        let plot = plot(4, dec!(50.00));
        let existing = vec![booking(
            plot.id,
            day(2025, 1, 10),
            day(2025, 1, 13),
            BookingStatus::Confirmed,
        )];
        // Checking in on the existing checkout day is fine.
        assert!(
            validate_booking(
                &PricingPolicy::default(),
                &plot,
                2,
                EMAIL,
                day(2025, 1, 13),
                day(2025, 1, 15),
                &existing,
                day(2025, 1, 1),
            )
            .is_ok()
        );
    }
}
