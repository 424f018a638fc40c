use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Booking;

/// Standard half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)` iff each starts before the other ends.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `[check_in, check_out)` conflicts with any blocking booking on
/// the plot.
///
/// Cancelled and completed bookings never block. `exclude` lets an update
/// ignore the booking being edited.
pub fn has_conflict(
    plot_id: Uuid,
    bookings: &[Booking],
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<Uuid>,
) -> bool {
    bookings.iter().any(|b| {
        b.plot_id == plot_id
            && Some(b.id) != exclude
            && b.status.blocks_availability()
            && ranges_overlap(check_in, check_out, b.check_in, b.check_out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingStatus;
    use crate::testutil::{booking, day};

    #[test]
    fn partial_overlap_conflicts() {
        let plot = Uuid::new_v4();
        let existing = vec![booking(
            plot,
            day(2024, 6, 1),
            day(2024, 6, 5),
            BookingStatus::Confirmed,
        )];
        assert!(has_conflict(
            plot,
            &existing,
            day(2024, 6, 4),
            day(2024, 6, 6),
            None
        ));
    }

    #[test]
    fn checkout_day_is_free() {
        let plot = Uuid::new_v4();
        let existing = vec![booking(
            plot,
            day(2024, 6, 1),
            day(2024, 6, 5),
            BookingStatus::Confirmed,
        )];
        // New stay starting on the existing checkout day does not conflict.
        assert!(!has_conflict(
            plot,
            &existing,
            day(2024, 6, 5),
            day(2024, 6, 7),
            None
        ));
        // And a stay ending on the existing check-in day does not either.
        assert!(!has_conflict(
            plot,
            &existing,
            day(2024, 5, 28),
            day(2024, 6, 1),
            None
        ));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        let plot = Uuid::new_v4();
        let existing = vec![booking(
            plot,
            day(2024, 6, 1),
            day(2024, 6, 10),
            BookingStatus::Pending,
        )];
        // Candidate inside the existing range.
        assert!(has_conflict(
            plot,
            &existing,
            day(2024, 6, 3),
            day(2024, 6, 5),
            None
        ));
        // Candidate spanning the existing range.
        assert!(has_conflict(
            plot,
            &existing,
            day(2024, 5, 30),
            day(2024, 6, 15),
            None
        ));
    }

    #[test]
    fn cancelled_and_completed_never_block() {
        let plot = Uuid::new_v4();
        let existing = vec![
            booking(plot, day(2024, 6, 1), day(2024, 6, 5), BookingStatus::Cancelled),
            booking(plot, day(2024, 6, 1), day(2024, 6, 5), BookingStatus::Completed),
        ];
        assert!(!has_conflict(
            plot,
            &existing,
            day(2024, 6, 2),
            day(2024, 6, 4),
            None
        ));
    }

    #[test]
    fn other_plots_do_not_conflict() {
        let plot = Uuid::new_v4();
        let existing = vec![booking(
            Uuid::new_v4(),
            day(2024, 6, 1),
            day(2024, 6, 5),
            BookingStatus::Confirmed,
        )];
        assert!(!has_conflict(
            plot,
            &existing,
            day(2024, 6, 2),
            day(2024, 6, 4),
            None
        ));
    }

    #[test]
    fn excluded_booking_is_ignored() {
        let plot = Uuid::new_v4();
        let existing = vec![booking(
            plot,
            day(2024, 6, 1),
            day(2024, 6, 5),
            BookingStatus::Confirmed,
        )];
        let id = existing[0].id;
        // An update keeping the same dates must not conflict with itself.
        assert!(!has_conflict(
            plot,
            &existing,
            day(2024, 6, 1),
            day(2024, 6, 5),
            Some(id)
        ));
        // But it still conflicts with other bookings.
        assert!(has_conflict(
            plot,
            &existing,
            day(2024, 6, 1),
            day(2024, 6, 5),
            Some(Uuid::new_v4())
        ));
    }
}
