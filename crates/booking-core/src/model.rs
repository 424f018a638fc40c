use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a camping plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    /// Open for bookings.
    Available,
    /// Temporarily closed for maintenance.
    Maintenance,
    /// Closed indefinitely.
    Unavailable,
}

impl PlotStatus {
    /// Database/string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotStatus::Available => "available",
            PlotStatus::Maintenance => "maintenance",
            PlotStatus::Unavailable => "unavailable",
        }
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(PlotStatus::Available),
            "maintenance" => Some(PlotStatus::Maintenance),
            "unavailable" => Some(PlotStatus::Unavailable),
            _ => None,
        }
    }
}

/// A bookable camping plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Unique identifier for the plot.
    pub id: Uuid,
    /// Display name of the plot.
    pub name: String,
    /// Detailed description of the plot.
    pub description: String,
    /// Size in square meters.
    pub size: Decimal,
    /// Maximum number of people.
    pub capacity: i32,
    /// Available amenities (water, electricity, fire pit, ...).
    pub amenities: String,
    /// Nightly price for this specific plot.
    pub price_per_night: Decimal,
    /// Current lifecycle status.
    pub status: PlotStatus,
    /// When the plot was created.
    pub created_at: DateTime<Utc>,
    /// When the plot was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Plot {
    /// Whether the plot can currently accept bookings.
    pub fn is_bookable(&self) -> bool {
        self.status == PlotStatus::Available
    }
}

/// A global nightly-price record, kept as a fallback for callers that
/// have no plot in hand (legacy pricing support).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSetting {
    /// Unique identifier for the setting.
    pub id: Uuid,
    /// Price per night.
    pub price_per_night: Decimal,
    /// Date from which this price applies.
    pub effective_from: NaiveDate,
    /// Whether the setting is currently active.
    pub is_active: bool,
    /// When the setting was created.
    pub created_at: DateTime<Utc>,
    /// When the setting was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted by a guest, awaiting staff confirmation.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Cancelled; the dates are released.
    Cancelled,
    /// The stay has taken place.
    Completed,
}

impl BookingStatus {
    /// Database/string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// Whether a booking in this status blocks the plot's availability.
    pub fn blocks_availability(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Whether staff may move a booking from this status to `next`.
    ///
    /// Every transition is currently permitted; the table exists so that
    /// restrictions, when introduced, are a one-line change visible in tests.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Pending, _) => true,
            (BookingStatus::Confirmed, _) => true,
            (BookingStatus::Cancelled, _) => true,
            (BookingStatus::Completed, _) => true,
        }
    }
}

/// A guest's reservation of a plot over a date range.
///
/// `check_in`/`check_out` form a half-open interval: the checkout day
/// itself is not a booked night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// The plot being booked.
    pub plot_id: Uuid,
    /// Full name of the guest.
    pub guest_name: String,
    /// Contact email of the guest.
    pub guest_email: String,
    /// Contact phone of the guest.
    pub guest_phone: String,
    /// Number of people staying.
    pub number_of_guests: i32,
    /// First booked night.
    pub check_in: NaiveDate,
    /// Departure day (not a booked night).
    pub check_out: NaiveDate,
    /// Nightly price snapshotted when the booking was created.
    pub price_per_night: Decimal,
    /// Derived: whole nights between check-in and check-out.
    pub total_nights: i32,
    /// Derived: `price_per_night * total_nights`.
    pub total_price: Decimal,
    /// Free-text requests from the guest.
    pub special_requests: String,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}
