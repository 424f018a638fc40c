//! Staff-facing handlers: plot and price management, booking oversight and
//! the analytics summary. Routing is expected to guard this scope.

use actix_web::{HttpResponse, Result, web};
use booking_core::BookingStatus;
use validator::Validate;

use crate::booking_service::BookingService;
use crate::booking_types::*;
use crate::plot_service::{PlotService, PriceService};
use crate::plot_types::*;

/// Creates a plot.
pub async fn create_plot(
    pool: web::Data<sqlx::PgPool>,
    request: web::Json<CreatePlotRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let plot_service = PlotService::new(pool.get_ref().clone());
    let plot = plot_service.create_plot(&request).await?;

    Ok(HttpResponse::Created().json(plot))
}

/// Lists every plot regardless of status.
pub async fn list_all_plots(pool: web::Data<sqlx::PgPool>) -> Result<HttpResponse, ApiError> {
    let plot_service = PlotService::new(pool.get_ref().clone());
    let plots = plot_service.list_plots(true).await?;

    let response = ListPlotsResponse {
        total: plots.len() as i64,
        plots,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Updates a plot.
pub async fn update_plot(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdatePlotRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let plot_id = path.into_inner();
    let plot_service = PlotService::new(pool.get_ref().clone());
    let plot = plot_service.update_plot(plot_id, &request).await?;

    Ok(HttpResponse::Ok().json(plot))
}

/// Deletes a plot and, through the schema, its bookings.
pub async fn delete_plot(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    let plot_id = path.into_inner();
    let plot_service = PlotService::new(pool.get_ref().clone());
    plot_service.delete_plot(plot_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Creates a global price setting.
pub async fn create_price_setting(
    pool: web::Data<sqlx::PgPool>,
    request: web::Json<CreatePriceSettingRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let price_service = PriceService::new(pool.get_ref().clone());
    let setting = price_service.create_setting(&request).await?;

    Ok(HttpResponse::Created().json(setting))
}

/// Lists all global price settings.
pub async fn list_price_settings(pool: web::Data<sqlx::PgPool>) -> Result<HttpResponse, ApiError> {
    let price_service = PriceService::new(pool.get_ref().clone());
    let price_settings = price_service.list_settings().await?;

    let response = ListPriceSettingsResponse {
        total: price_settings.len() as i64,
        price_settings,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Activates or deactivates a price setting.
pub async fn update_price_setting(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdatePriceSettingRequest>,
) -> Result<HttpResponse, ApiError> {
    let setting_id = path.into_inner();
    let price_service = PriceService::new(pool.get_ref().clone());
    let setting = price_service.set_active(setting_id, request.is_active).await?;

    Ok(HttpResponse::Ok().json(setting))
}

/// Reports the current plot-less fallback price.
pub async fn current_price(pool: web::Data<sqlx::PgPool>) -> Result<HttpResponse, ApiError> {
    let price_service = PriceService::new(pool.get_ref().clone());
    let price_per_night = price_service.current_price().await?;

    Ok(HttpResponse::Ok().json(CurrentPriceResponse { price_per_night }))
}

/// Lists bookings, newest first, optionally filtered by status.
pub async fn list_bookings(
    pool: web::Data<sqlx::PgPool>,
    query: web::Query<ListBookingsQuery>,
) -> Result<HttpResponse, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            BookingStatus::parse(raw)
                .ok_or_else(|| ApiError::Validation(format!("Invalid booking status '{raw}'")))?,
        ),
        None => None,
    };

    let booking_service = BookingService::new(pool.get_ref().clone());
    let bookings = booking_service.list_bookings(status).await?;

    let response = ListBookingsResponse {
        total: bookings.len() as i64,
        bookings,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Moves a booking to a new status.
pub async fn update_booking_status(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let booking_id = path.into_inner();
    let new_status = BookingStatus::parse(&request.status)
        .ok_or_else(|| ApiError::Validation(format!("Invalid booking status '{}'", request.status)))?;

    let booking_service = BookingService::new(pool.get_ref().clone());
    let booking = booking_service.update_status(booking_id, new_status).await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// Changes a booking's dates and recomputes its totals.
pub async fn update_booking_dates(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdateDatesRequest>,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();
    let booking_service = BookingService::new(pool.get_ref().clone());
    let booking = booking_service.update_dates(booking_id, &request).await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// Basic analytics for the admin console.
pub async fn booking_stats(pool: web::Data<sqlx::PgPool>) -> Result<HttpResponse, ApiError> {
    let booking_service = BookingService::new(pool.get_ref().clone());
    let stats = booking_service.stats_summary().await?;

    Ok(HttpResponse::Ok().json(stats))
}
