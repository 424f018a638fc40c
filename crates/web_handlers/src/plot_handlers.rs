use actix_web::{HttpResponse, Result, web};

use crate::booking_types::ApiError;
use crate::plot_service::PlotService;
use crate::plot_types::ListPlotsResponse;

/// Lists the plots currently open for booking.
pub async fn list_plots(pool: web::Data<sqlx::PgPool>) -> Result<HttpResponse, ApiError> {
    let plot_service = PlotService::new(pool.get_ref().clone());
    let plots = plot_service.list_plots(false).await?;

    let response = ListPlotsResponse {
        total: plots.len() as i64,
        plots,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Gets a single plot by id.
pub async fn get_plot(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    let plot_id = path.into_inner();
    let plot_service = PlotService::new(pool.get_ref().clone());
    let plot = plot_service.get_plot(plot_id).await?;

    Ok(HttpResponse::Ok().json(plot))
}
