use booking_core::{AvailabilitySplit, Booking, BookingError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Raw query parameters for the availability search.
///
/// Dates arrive as `YYYY-MM-DD` strings and are normalized by the core
/// before any date logic runs.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Requested check-in date (`YYYY-MM-DD`).
    pub check_in: Option<String>,
    /// Requested check-out date (`YYYY-MM-DD`).
    pub check_out: Option<String>,
}

/// Response structure for the availability search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Normalized check-in date.
    pub check_in: NaiveDate,
    /// Normalized check-out date.
    pub check_out: NaiveDate,
    /// Whole nights in the requested range.
    pub total_nights: i64,
    /// Plots free for the whole range / plots with a blocking booking.
    #[serde(flatten)]
    pub split: AvailabilitySplit,
}

/// Request structure for creating a new booking.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// The plot to book.
    pub plot_id: Uuid,

    /// Full name of the guest.
    #[validate(length(min = 1, message = "Guest name is required"))]
    pub guest_name: String,

    /// Contact email of the guest.
    #[validate(email(message = "A valid guest email address is required"))]
    pub guest_email: String,

    /// Contact phone of the guest.
    pub guest_phone: Option<String>,

    /// Number of people staying.
    #[validate(range(min = 1, message = "Number of guests must be at least 1"))]
    pub number_of_guests: i32,

    /// First booked night.
    pub check_in: NaiveDate,

    /// Departure day.
    pub check_out: NaiveDate,

    /// Free-text requests from the guest.
    pub special_requests: Option<String>,
}

/// Response structure for a created booking.
#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    /// The persisted booking, status `pending`.
    pub booking: Booking,
    /// Confirmation message for the guest.
    pub message: String,
}

/// Raw query parameters for the per-plot calendar. Missing values default
/// to the current month.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Requested year.
    pub year: Option<String>,
    /// Requested month; 0 and 13 wrap to the adjacent year.
    pub month: Option<String>,
}

/// Query parameters for the admin booking list.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// Restrict the listing to one status.
    pub status: Option<String>,
}

/// Response structure for the admin booking list.
#[derive(Debug, Serialize)]
pub struct ListBookingsResponse {
    /// Bookings, newest first.
    pub bookings: Vec<Booking>,
    /// Total count returned.
    pub total: i64,
}

/// Request structure for a staff status change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// New status for the booking.
    #[validate(custom(function = "validate_booking_status"))]
    pub status: String,
}

/// Request structure for a staff date change. Totals are recomputed from
/// the booking's snapshotted nightly price.
#[derive(Debug, Deserialize)]
pub struct UpdateDatesRequest {
    /// New check-in date.
    pub check_in: NaiveDate,
    /// New check-out date.
    pub check_out: NaiveDate,
}

/// Booking counts per status for the analytics summary.
#[derive(Debug, Default, Serialize)]
pub struct BookingCounts {
    /// Bookings awaiting confirmation.
    pub pending: i64,
    /// Confirmed bookings.
    pub confirmed: i64,
    /// Cancelled bookings.
    pub cancelled: i64,
    /// Completed stays.
    pub completed: i64,
}

/// Plot counts per status for the analytics summary.
#[derive(Debug, Default, Serialize)]
pub struct PlotCounts {
    /// Plots open for booking.
    pub available: i64,
    /// Plots under maintenance.
    pub maintenance: i64,
    /// Plots closed indefinitely.
    pub unavailable: i64,
}

/// Basic analytics for the admin console.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Booking counts per status.
    pub bookings: BookingCounts,
    /// Plot counts per status.
    pub plots: PlotCounts,
    /// Revenue over confirmed and completed bookings.
    pub revenue: Decimal,
    /// Nights sold over confirmed and completed bookings.
    pub nights_sold: i64,
    /// Blocking bookings checking in within the next 30 days.
    pub upcoming_check_ins: i64,
}

/// Custom error type for the reservation API.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// A core validation rule rejected the request.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No bookable plot with the requested id.
    #[error("Plot not found")]
    PlotNotFound,

    /// No booking with the requested id.
    #[error("Booking not found")]
    BookingNotFound,

    /// No price setting with the requested id.
    #[error("Price setting not found")]
    PriceSettingNotFound,

    /// The requested status transition is not permitted.
    #[error("Cannot change booking status from {from} to {to}")]
    IllegalTransition {
        /// Current status.
        from: &'static str,
        /// Requested status.
        to: &'static str,
    },

    /// A stored record held an unexpected value.
    #[error("Data format error: {0}")]
    DataFormat(String),
}

impl actix_web::ResponseError for ApiError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            ApiError::Booking(err) => {
                let code = match err {
                    BookingError::InvalidRange => "invalid_date_range",
                    BookingError::PastDate => "past_check_in",
                    BookingError::Unavailable => "unavailable",
                    BookingError::CapacityExceeded { .. } => "capacity_exceeded",
                    BookingError::InvalidContact => "invalid_contact",
                    BookingError::MalformedInput(_) => "malformed_input",
                };
                let body = serde_json::json!({ "error": code, "message": err.to_string() });
                match err {
                    BookingError::Unavailable => HttpResponse::Conflict().json(body),
                    _ => HttpResponse::BadRequest().json(body),
                }
            }
            ApiError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            ApiError::PlotNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "plot_not_found",
                "message": "Plot not found"
            })),
            ApiError::BookingNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "booking_not_found",
                "message": "Booking not found"
            })),
            ApiError::PriceSettingNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "price_setting_not_found",
                "message": "Price setting not found"
            })),
            ApiError::IllegalTransition { .. } => {
                HttpResponse::Conflict().json(serde_json::json!({
                    "error": "illegal_transition",
                    "message": self.to_string()
                }))
            }
            ApiError::DataFormat(msg) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "data_format_error",
                    "message": format!("Data format error: {}", msg)
                }))
            }
            ApiError::Database(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": "An internal error occurred"
            })),
        }
    }
}

/// Custom validation function for booking status values.
fn validate_booking_status(status: &str) -> Result<(), validator::ValidationError> {
    match status {
        "pending" | "confirmed" | "cancelled" | "completed" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_booking_status")),
    }
}
