//! # Booking Core
//!
//! Domain logic for the campground reservation system: the data model, the
//! availability/overlap engine, pricing, stay arithmetic, the per-plot
//! month calendar and the ordered booking-intake validation.
//!
//! Everything in this crate is a plain function over plain data. Storage,
//! HTTP and rendering live in the surrounding crates and call in with
//! already-loaded records.

/// Domain records and status enums.
pub mod model;

/// Typed, recoverable validation errors.
pub mod error;

/// Nightly-price resolution and the global price-setting fallback.
pub mod pricing;

/// Nights and total-price arithmetic.
pub mod stay;

/// Half-open interval conflict detection.
pub mod overlap;

/// Partitioning plots into available/conflicting for a date range.
pub mod availability;

/// Day-by-day month availability grids.
pub mod calendar;

/// Ordered validation for new bookings.
pub mod intake;

/// Parsing of raw query parameters.
pub mod input;

#[cfg(test)]
mod testutil;

pub use availability::{AvailabilitySplit, partition};
pub use calendar::{DayCell, DayStatus, MonthView, build_month, normalize_month};
pub use error::BookingError;
pub use intake::{BookingQuote, validate_booking};
pub use model::{Booking, BookingStatus, Plot, PlotStatus, PriceSetting};
pub use overlap::{has_conflict, ranges_overlap};
pub use pricing::PricingPolicy;
pub use stay::{StayTotals, compute_stay};
