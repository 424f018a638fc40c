use actix_web::{HttpResponse, Result, web};
use booking_core::BookingError;
use validator::Validate;

use crate::booking_service::BookingService;
use crate::booking_types::*;

/// Searches all bookable plots for availability over a date range.
pub async fn search_availability(
    pool: web::Data<sqlx::PgPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let (check_in, check_out) = match (&query.check_in, &query.check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => {
            return Err(ApiError::Booking(BookingError::MalformedInput(
                "Please select check-in and check-out dates.".into(),
            )));
        }
    };

    let booking_service = BookingService::new(pool.get_ref().clone());
    let response = booking_service
        .search_availability(check_in, check_out)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Creates a new booking in `pending` state.
pub async fn create_booking(
    pool: web::Data<sqlx::PgPool>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let booking_service = BookingService::new(pool.get_ref().clone());
    let booking = booking_service.create_booking(&request).await?;

    let message = format!(
        "Booking request submitted successfully! Booking ID: {}. \
         We will contact you soon to confirm your reservation.",
        booking.id
    );
    Ok(HttpResponse::Created().json(CreateBookingResponse { booking, message }))
}

/// Gets a booking by id (confirmation page lookup).
pub async fn get_booking(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();
    let booking_service = BookingService::new(pool.get_ref().clone());
    let booking = booking_service.get_booking(booking_id).await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// Builds the month availability calendar for a plot. Month 0 and 13 wrap
/// to the adjacent year; missing parameters default to the current month.
pub async fn plot_calendar(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, ApiError> {
    let plot_id = path.into_inner();
    let booking_service = BookingService::new(pool.get_ref().clone());
    let view = booking_service.month_view(plot_id, &query).await?;

    Ok(HttpResponse::Ok().json(view))
}
