use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::error::BookingError;
use crate::model::Booking;

/// English month names, indexed by `month - 1`.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Availability state of a single calendar cell.
///
/// Priority for real days is past > booked > available: a past date that
/// happens to be booked is reported as past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Padding cell outside the requested month.
    OtherMonth,
    /// The date is before today.
    Past,
    /// The date is covered by a blocking booking.
    Booked,
    /// The date is open.
    Available,
}

/// One cell in the month grid. Padding cells carry `day = 0` and no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Day of month, or 0 for padding.
    pub day: u32,
    /// The calendar date, absent for padding cells.
    pub date: Option<NaiveDate>,
    /// Availability state of the cell.
    pub status: DayStatus,
    /// Whether a blocking booking covers this date.
    pub is_booked: bool,
    /// Whether the date is before today.
    pub is_past: bool,
}

impl DayCell {
    fn padding() -> Self {
        Self {
            day: 0,
            date: None,
            status: DayStatus::OtherMonth,
            is_booked: false,
            is_past: false,
        }
    }
}

/// A plot's availability calendar for one month, with navigation fields.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    /// Year of the displayed month.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u32,
    /// English name of the month.
    pub month_name: &'static str,
    /// Monday-first weeks of seven cells each.
    pub weeks: Vec<Vec<DayCell>>,
    /// Month shown when navigating backward.
    pub prev_month: u32,
    /// Year shown when navigating backward.
    pub prev_year: i32,
    /// Month shown when navigating forward.
    pub next_month: u32,
    /// Year shown when navigating forward.
    pub next_year: i32,
}

/// Applies exactly one month-navigation correction step.
///
/// Month 0 (or any value below 1) becomes December of the previous year;
/// month 13 (or any value above 12) becomes January of the next year.
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    if month < 1 {
        (year - 1, 12)
    } else if month > 12 {
        (year + 1, 1)
    } else {
        (year, month as u32)
    }
}

/// Expands every blocking booking on the plot into the set of individual
/// booked dates. The checkout day itself is never booked (half-open range).
fn booked_dates(plot_id: Uuid, bookings: &[Booking]) -> HashSet<NaiveDate> {
    let mut dates = HashSet::new();
    for b in bookings
        .iter()
        .filter(|b| b.plot_id == plot_id && b.status.blocks_availability())
    {
        let mut date = b.check_in;
        while date < b.check_out {
            dates.insert(date);
            let Some(next) = date.succ_opt() else { break };
            date = next;
        }
    }
    dates
}

/// Builds the day-by-day availability grid for one plot and month.
///
/// Read-only; callers normalize out-of-range month indexes through
/// [`normalize_month`] first.
pub fn build_month(
    plot_id: Uuid,
    bookings: &[Booking],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthView, BookingError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        BookingError::MalformedInput(format!("invalid month {month} for year {year}"))
    })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    // First of the following month always exists for a valid (year, month).
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| BookingError::MalformedInput(format!("invalid month {next_month}")))?;
    let days_in_month = (first_of_next - first).num_days() as u32;

    let booked = booked_dates(plot_id, bookings);

    let mut cells = Vec::with_capacity(42);
    let leading = first.weekday().num_days_from_monday() as usize;
    for _ in 0..leading {
        cells.push(DayCell::padding());
    }

    let mut date = first;
    for day in 1..=days_in_month {
        let is_booked = booked.contains(&date);
        let is_past = date < today;
        let status = if is_past {
            DayStatus::Past
        } else if is_booked {
            DayStatus::Booked
        } else {
            DayStatus::Available
        };
        cells.push(DayCell {
            day,
            date: Some(date),
            status,
            is_booked,
            is_past,
        });
        if let Some(next) = date.succ_opt() {
            date = next;
        }
    }

    while cells.len() % 7 != 0 {
        cells.push(DayCell::padding());
    }
    let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();

    Ok(MonthView {
        year,
        month,
        month_name: MONTH_NAMES[(month - 1) as usize],
        weeks,
        prev_month,
        prev_year,
        next_month,
        next_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingStatus;
    use crate::testutil::{booking, day};

    fn cell(view: &MonthView, date: NaiveDate) -> DayCell {
        *view
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == Some(date))
            .expect("date not in grid")
    }

    #[test]
    fn month_zero_rolls_back_to_december() {
        assert_eq!(normalize_month(2024, 0), (2023, 12));
    }

    #[test]
    fn month_thirteen_rolls_forward_to_january() {
        assert_eq!(normalize_month(2024, 13), (2025, 1));
    }

    #[test]
    fn in_range_months_are_untouched() {
        assert_eq!(normalize_month(2024, 1), (2024, 1));
        assert_eq!(normalize_month(2024, 12), (2024, 12));
    }

    #[test]
    fn correction_is_a_single_step() {
        // Far out-of-range values still land on the adjacent month; the
        // wrap is applied once, never recursively.
        assert_eq!(normalize_month(2024, -5), (2023, 12));
        assert_eq!(normalize_month(2024, 27), (2025, 1));
    }

    #[test]
    fn booking_marks_nights_but_not_checkout_day() {
        let plot_id = Uuid::new_v4();
        let bookings = vec![booking(
            plot_id,
            day(2024, 7, 10),
            day(2024, 7, 13),
            BookingStatus::Confirmed,
        )];
        let today = day(2024, 7, 1);
        let view = build_month(plot_id, &bookings, 2024, 7, today).unwrap();

        for d in 10..=12 {
            assert_eq!(cell(&view, day(2024, 7, d)).status, DayStatus::Booked);
        }
        assert_eq!(cell(&view, day(2024, 7, 13)).status, DayStatus::Available);
    }

    #[test]
    fn past_wins_over_booked() {
        let plot_id = Uuid::new_v4();
        let bookings = vec![booking(
            plot_id,
            day(2024, 7, 10),
            day(2024, 7, 13),
            BookingStatus::Confirmed,
        )];
        // Today falls inside the booked span.
        let today = day(2024, 7, 12);
        let view = build_month(plot_id, &bookings, 2024, 7, today).unwrap();

        let past_cell = cell(&view, day(2024, 7, 11));
        assert_eq!(past_cell.status, DayStatus::Past);
        assert!(past_cell.is_booked);
        assert!(past_cell.is_past);

        assert_eq!(cell(&view, day(2024, 7, 12)).status, DayStatus::Booked);
    }

    #[test]
    fn grid_is_monday_first_with_padding() {
        // July 2024 starts on a Monday and has 31 days: 5 weeks, trailing
        // padding only.
        let view = build_month(Uuid::new_v4(), &[], 2024, 7, day(2024, 7, 1)).unwrap();
        assert_eq!(view.weeks.len(), 5);
        assert_eq!(view.weeks[0][0].day, 1);
        let last_week = view.weeks.last().unwrap();
        assert_eq!(last_week[2].day, 31);
        assert_eq!(last_week[3], DayCell::padding());

        // June 2024 starts on a Saturday: five leading padding cells.
        let view = build_month(Uuid::new_v4(), &[], 2024, 6, day(2024, 6, 1)).unwrap();
        assert_eq!(view.weeks[0][4].day, 0);
        assert_eq!(view.weeks[0][5].day, 1);
    }

    #[test]
    fn every_week_has_seven_cells() {
        for month in 1..=12 {
            let view = build_month(Uuid::new_v4(), &[], 2024, month, day(2024, 1, 1)).unwrap();
            for week in &view.weeks {
                assert_eq!(week.len(), 7);
            }
        }
    }

    #[test]
    fn cancelled_bookings_do_not_mark_days() {
        let plot_id = Uuid::new_v4();
        let bookings = vec![booking(
            plot_id,
            day(2024, 7, 10),
            day(2024, 7, 13),
            BookingStatus::Cancelled,
        )];
        let view = build_month(plot_id, &bookings, 2024, 7, day(2024, 7, 1)).unwrap();
        assert_eq!(cell(&view, day(2024, 7, 10)).status, DayStatus::Available);
    }

    #[test]
    fn other_plots_do_not_mark_days() {
        let plot_id = Uuid::new_v4();
        let bookings = vec![booking(
            Uuid::new_v4(),
            day(2024, 7, 10),
            day(2024, 7, 13),
            BookingStatus::Confirmed,
        )];
        let view = build_month(plot_id, &bookings, 2024, 7, day(2024, 7, 1)).unwrap();
        assert_eq!(cell(&view, day(2024, 7, 10)).status, DayStatus::Available);
    }

    #[test]
    fn navigation_fields_wrap_at_year_boundaries() {
        let view = build_month(Uuid::new_v4(), &[], 2024, 1, day(2024, 1, 1)).unwrap();
        assert_eq!((view.prev_year, view.prev_month), (2023, 12));
        assert_eq!((view.next_year, view.next_month), (2024, 2));

        let view = build_month(Uuid::new_v4(), &[], 2024, 12, day(2024, 1, 1)).unwrap();
        assert_eq!((view.prev_year, view.prev_month), (2024, 11));
        assert_eq!((view.next_year, view.next_month), (2025, 1));
    }

    #[test]
    fn leap_february_has_29_days() {
        let view = build_month(Uuid::new_v4(), &[], 2024, 2, day(2024, 1, 1)).unwrap();
        let max_day = view.weeks.iter().flatten().map(|c| c.day).max().unwrap();
        assert_eq!(max_day, 29);
        assert_eq!(view.month_name, "February");
    }

    #[test]
    fn invalid_month_is_rejected() {
        let err = build_month(Uuid::new_v4(), &[], 2024, 0, day(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, BookingError::MalformedInput(_)));
    }
}
