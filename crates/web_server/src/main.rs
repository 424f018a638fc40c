//! Main entry point for the Campland reservation backend server.
//! This crate wires the JSON API routes and starts the HTTP server.

use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use postgres::database::*;
use web_handlers::*;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("Starting Campland reservation server...");

    // Create database connection pool
    let pool = match create_connection_pool().await {
        Ok(pool) => {
            log::info!("Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("Failed to create database pool: {}", e);
            log::error!("Make sure PostgreSQL is running and DATABASE_URL is set");
            std::process::exit(1);
        }
    };

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Server will be available at: http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    // Guest-facing routes
                    .route("/search", web::get().to(search_availability))
                    .route("/plots", web::get().to(list_plots))
                    .route("/plots/{plot_id}", web::get().to(get_plot))
                    .route("/plots/{plot_id}/calendar", web::get().to(plot_calendar))
                    .route("/bookings", web::post().to(create_booking))
                    .route("/bookings/{booking_id}", web::get().to(get_booking))
                    // Staff-facing routes
                    .service(
                        web::scope("/admin")
                            .route("/plots", web::post().to(create_plot))
                            .route("/plots", web::get().to(list_all_plots))
                            .route("/plots/{plot_id}", web::put().to(update_plot))
                            .route("/plots/{plot_id}", web::delete().to(delete_plot))
                            .route("/prices", web::post().to(create_price_setting))
                            .route("/prices", web::get().to(list_price_settings))
                            .route("/prices/current", web::get().to(current_price))
                            .route("/prices/{setting_id}", web::put().to(update_price_setting))
                            .route("/bookings", web::get().to(list_bookings))
                            .route(
                                "/bookings/{booking_id}/status",
                                web::put().to(update_booking_status),
                            )
                            .route(
                                "/bookings/{booking_id}/dates",
                                web::put().to(update_booking_dates),
                            )
                            .route("/stats", web::get().to(booking_stats)),
                    ),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
