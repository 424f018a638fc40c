use chrono::NaiveDate;
use serde::Serialize;

use crate::error::BookingError;
use crate::model::Booking;
use crate::model::Plot;
use crate::overlap::has_conflict;

/// Result of an availability search: every bookable plot lands in exactly
/// one bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AvailabilitySplit {
    /// Plots free for the whole requested range.
    pub available: Vec<Plot>,
    /// Plots with at least one blocking booking in the range.
    pub conflicting: Vec<Plot>,
}

/// Partitions plots into available/conflicting for `[check_in, check_out)`.
///
/// Plots under maintenance or marked unavailable are excluded from both
/// buckets. Output order follows the input order of `plots`.
pub fn partition(
    plots: &[Plot],
    bookings: &[Booking],
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<AvailabilitySplit, BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidRange);
    }
    if check_in < today {
        return Err(BookingError::PastDate);
    }

    let mut split = AvailabilitySplit::default();
    for plot in plots.iter().filter(|p| p.is_bookable()) {
        if has_conflict(plot.id, bookings, check_in, check_out, None) {
            split.conflicting.push(plot.clone());
        } else {
            split.available.push(plot.clone());
        }
    }
    Ok(split)
}
