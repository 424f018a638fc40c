use booking_core::{Plot, PlotStatus, PriceSetting, PricingPolicy};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::booking_types::ApiError;
use crate::plot_types::*;

const PLOT_COLUMNS: &str = "id, name, description, size, capacity, amenities, price_per_night, \
     status, created_at, updated_at";

/// Maps a `plots` row to the domain record.
pub(crate) fn plot_from_row(row: &PgRow) -> Result<Plot, ApiError> {
    let status_raw: String = row.get("status");
    let status = PlotStatus::parse(&status_raw)
        .ok_or_else(|| ApiError::DataFormat(format!("unknown plot status '{status_raw}'")))?;
    Ok(Plot {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        size: row.get("size"),
        capacity: row.get("capacity"),
        amenities: row.get("amenities"),
        price_per_night: row.get("price_per_night"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Service for staff-managed plot records.
pub struct PlotService {
    pool: PgPool,
}

impl PlotService {
    /// Creates a new `PlotService` with the provided connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a plot.
    pub async fn create_plot(&self, request: &CreatePlotRequest) -> Result<Plot, ApiError> {
        let status = request.status.as_deref().unwrap_or("available");
        let row = sqlx::query(&format!(
            "INSERT INTO plots (name, description, size, capacity, amenities, price_per_night, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PLOT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(request.description.as_deref().unwrap_or(""))
        .bind(request.size)
        .bind(request.capacity)
        .bind(request.amenities.as_deref().unwrap_or(""))
        .bind(request.price_per_night)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let plot = plot_from_row(&row)?;
        log::info!("Created plot {} ({})", plot.name, plot.id);
        Ok(plot)
    }

    /// Lists plots ordered by name. The public listing only shows bookable
    /// plots; the admin listing includes every status.
    pub async fn list_plots(&self, include_all: bool) -> Result<Vec<Plot>, ApiError> {
        let rows = if include_all {
            sqlx::query(&format!("SELECT {PLOT_COLUMNS} FROM plots ORDER BY name"))
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query(&format!(
                "SELECT {PLOT_COLUMNS} FROM plots WHERE status = 'available' ORDER BY name"
            ))
            .fetch_all(&self.pool)
            .await?
        };

        rows.iter().map(plot_from_row).collect()
    }

    /// Gets a plot by id.
    pub async fn get_plot(&self, plot_id: Uuid) -> Result<Plot, ApiError> {
        let row = sqlx::query(&format!("SELECT {PLOT_COLUMNS} FROM plots WHERE id = $1"))
            .bind(plot_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => plot_from_row(&row),
            None => Err(ApiError::PlotNotFound),
        }
    }

    /// Updates a plot; absent request fields keep their stored value.
    pub async fn update_plot(
        &self,
        plot_id: Uuid,
        request: &UpdatePlotRequest,
    ) -> Result<Plot, ApiError> {
        let current = self.get_plot(plot_id).await?;

        let status = match &request.status {
            Some(raw) => PlotStatus::parse(raw)
                .ok_or_else(|| ApiError::Validation(format!("Invalid plot status '{raw}'")))?,
            None => current.status,
        };

        let row = sqlx::query(&format!(
            "UPDATE plots SET name = $1, description = $2, size = $3, capacity = $4, \
             amenities = $5, price_per_night = $6, status = $7, updated_at = NOW() \
             WHERE id = $8 RETURNING {PLOT_COLUMNS}"
        ))
        .bind(request.name.as_ref().unwrap_or(&current.name))
        .bind(request.description.as_ref().unwrap_or(&current.description))
        .bind(request.size.unwrap_or(current.size))
        .bind(request.capacity.unwrap_or(current.capacity))
        .bind(request.amenities.as_ref().unwrap_or(&current.amenities))
        .bind(request.price_per_night.unwrap_or(current.price_per_night))
        .bind(status.as_str())
        .bind(plot_id)
        .fetch_one(&self.pool)
        .await?;

        plot_from_row(&row)
    }

    /// Deletes a plot (its bookings cascade).
    pub async fn delete_plot(&self, plot_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM plots WHERE id = $1")
            .bind(plot_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::PlotNotFound);
        }
        log::warn!("Deleted plot {}", plot_id);
        Ok(())
    }
}

/// Service for the global price-setting records.
pub struct PriceService {
    pool: PgPool,
    policy: PricingPolicy,
}

impl PriceService {
    /// Creates a new `PriceService` with the default pricing policy.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            policy: PricingPolicy::default(),
        }
    }

    /// Creates a price setting.
    pub async fn create_setting(
        &self,
        request: &CreatePriceSettingRequest,
    ) -> Result<PriceSetting, ApiError> {
        let effective_from = request
            .effective_from
            .unwrap_or_else(|| Utc::now().date_naive());
        let row = sqlx::query(
            "INSERT INTO price_settings (price_per_night, effective_from, is_active)
             VALUES ($1, $2, $3)
             RETURNING id, price_per_night, effective_from, is_active, created_at, updated_at",
        )
        .bind(request.price_per_night)
        .bind(effective_from)
        .bind(request.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(setting_from_row(&row))
    }

    /// Lists price settings, most recently effective first.
    pub async fn list_settings(&self) -> Result<Vec<PriceSetting>, ApiError> {
        let rows = sqlx::query(
            "SELECT id, price_per_night, effective_from, is_active, created_at, updated_at
             FROM price_settings ORDER BY effective_from DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(setting_from_row).collect())
    }

    /// Activates or deactivates a price setting.
    pub async fn set_active(&self, setting_id: Uuid, is_active: bool) -> Result<PriceSetting, ApiError> {
        let row = sqlx::query(
            "UPDATE price_settings SET is_active = $1, updated_at = NOW() WHERE id = $2
             RETURNING id, price_per_night, effective_from, is_active, created_at, updated_at",
        )
        .bind(is_active)
        .bind(setting_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(setting_from_row(&row)),
            None => Err(ApiError::PriceSettingNotFound),
        }
    }

    /// Current plot-less fallback price. Booking creation never uses this;
    /// the plot price is authoritative there.
    pub async fn current_price(&self) -> Result<Decimal, ApiError> {
        let settings = self.list_settings().await?;
        let today = Utc::now().date_naive();
        Ok(self.policy.current_global(&settings, today))
    }
}

fn setting_from_row(row: &PgRow) -> PriceSetting {
    PriceSetting {
        id: row.get("id"),
        price_per_night: row.get("price_per_night"),
        effective_from: row.get("effective_from"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
