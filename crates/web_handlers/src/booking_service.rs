use booking_core::{
    Booking, BookingError, BookingStatus, MonthView, PricingPolicy, compute_stay, has_conflict,
    input, normalize_month, partition, validate_booking,
};
use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::booking_types::*;
use crate::plot_service::plot_from_row;

const BOOKING_COLUMNS: &str = "id, plot_id, guest_name, guest_email, guest_phone, \
     number_of_guests, check_in, check_out, price_per_night, total_nights, total_price, \
     special_requests, status, created_at, updated_at";

/// Maps a `bookings` row to the domain record.
pub(crate) fn booking_from_row(row: &PgRow) -> Result<Booking, ApiError> {
    let status_raw: String = row.get("status");
    let status = BookingStatus::parse(&status_raw)
        .ok_or_else(|| ApiError::DataFormat(format!("unknown booking status '{status_raw}'")))?;
    Ok(Booking {
        id: row.get("id"),
        plot_id: row.get("plot_id"),
        guest_name: row.get("guest_name"),
        guest_email: row.get("guest_email"),
        guest_phone: row.get("guest_phone"),
        number_of_guests: row.get("number_of_guests"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        price_per_night: row.get("price_per_night"),
        total_nights: row.get("total_nights"),
        total_price: row.get("total_price"),
        special_requests: row.get("special_requests"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// The exclusion constraint on `bookings` surfaces a Postgres `23P01` when
/// two blocking bookings would overlap; report it as plain unavailability.
fn map_overlap_violation(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23P01") {
            return ApiError::Booking(BookingError::Unavailable);
        }
    }
    ApiError::Database(err)
}

/// Service for availability search, booking intake and booking management.
pub struct BookingService {
    pool: PgPool,
    policy: PricingPolicy,
}

impl BookingService {
    /// Creates a new `BookingService` with the default pricing policy.
    pub fn new(pool: PgPool) -> Self {
        Self::with_policy(pool, PricingPolicy::default())
    }

    /// Creates a new `BookingService` with an explicit pricing policy.
    pub fn with_policy(pool: PgPool, policy: PricingPolicy) -> Self {
        Self { pool, policy }
    }

    /// Searches all bookable plots for the requested date range.
    pub async fn search_availability(
        &self,
        raw_check_in: &str,
        raw_check_out: &str,
    ) -> Result<SearchResponse, ApiError> {
        let check_in = input::parse_date(raw_check_in)?;
        let check_out = input::parse_date(raw_check_out)?;
        let today = Utc::now().date_naive();

        let plot_rows = sqlx::query(
            "SELECT id, name, description, size, capacity, amenities, price_per_night, \
             status, created_at, updated_at \
             FROM plots WHERE status = 'available' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        let plots = plot_rows
            .iter()
            .map(plot_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let booking_rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE status IN ('pending', 'confirmed') AND check_in < $1 AND check_out > $2"
        ))
        .bind(check_out)
        .bind(check_in)
        .fetch_all(&self.pool)
        .await?;
        let bookings = booking_rows
            .iter()
            .map(booking_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let split = partition(&plots, &bookings, check_in, check_out, today)?;
        let total_nights = (check_out - check_in).num_days();

        log::info!(
            "Availability search {} -> {}: {} available, {} conflicting",
            check_in,
            check_out,
            split.available.len(),
            split.conflicting.len()
        );

        Ok(SearchResponse {
            check_in,
            check_out,
            total_nights,
            split,
        })
    }

    /// Creates a new booking in `pending` state.
    ///
    /// The overlap check and the insert run in one transaction that locks
    /// the plot row first, so concurrent intakes for the same plot are
    /// serialized and cannot both pass the check.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let today = Utc::now().date_naive();
        let mut tx = self.pool.begin().await?;

        let plot_row = sqlx::query(
            "SELECT id, name, description, size, capacity, amenities, price_per_night, \
             status, created_at, updated_at \
             FROM plots WHERE id = $1 AND status = 'available' FOR UPDATE",
        )
        .bind(request.plot_id)
        .fetch_optional(&mut *tx)
        .await?;
        let plot = match plot_row {
            Some(row) => plot_from_row(&row)?,
            None => return Err(ApiError::PlotNotFound),
        };

        let existing = self
            .blocking_bookings_for_plot(&mut tx, request.plot_id)
            .await?;

        let quote = validate_booking(
            &self.policy,
            &plot,
            request.number_of_guests,
            &request.guest_email,
            request.check_in,
            request.check_out,
            &existing,
            today,
        )?;

        let row = sqlx::query(&format!(
            "INSERT INTO bookings (
                plot_id, guest_name, guest_email, guest_phone, number_of_guests,
                check_in, check_out, price_per_night, total_nights, total_price,
                special_requests, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'pending')
            RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(request.plot_id)
        .bind(&request.guest_name)
        .bind(&request.guest_email)
        .bind(request.guest_phone.as_deref().unwrap_or(""))
        .bind(request.number_of_guests)
        .bind(request.check_in)
        .bind(request.check_out)
        .bind(quote.price_per_night)
        .bind(quote.nights as i32)
        .bind(quote.total_price)
        .bind(request.special_requests.as_deref().unwrap_or(""))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_overlap_violation)?;
        let booking = booking_from_row(&row)?;

        tx.commit().await?;

        log::info!(
            "Created booking {} on plot {} for {} ({} nights, total {})",
            booking.id,
            plot.name,
            booking.guest_name,
            booking.total_nights,
            booking.total_price
        );
        Ok(booking)
    }

    /// Gets a booking by id (confirmation page lookup).
    pub async fn get_booking(&self, booking_id: Uuid) -> Result<Booking, ApiError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => booking_from_row(&row),
            None => Err(ApiError::BookingNotFound),
        }
    }

    /// Lists bookings for the admin console, newest first, optionally
    /// filtered by status.
    pub async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ApiError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(booking_from_row).collect()
    }

    /// Moves a booking to a new status through the transition table.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let current = self.get_booking(booking_id).await?;
        if !current.status.can_transition_to(new_status) {
            return Err(ApiError::IllegalTransition {
                from: current.status.as_str(),
                to: new_status.as_str(),
            });
        }

        let row = sqlx::query(&format!(
            "UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(new_status.as_str())
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_overlap_violation)?;

        log::info!(
            "Booking {} status {} -> {}",
            booking_id,
            current.status.as_str(),
            new_status.as_str()
        );
        booking_from_row(&row)
    }

    /// Changes a booking's dates, re-checking the overlap (excluding the
    /// booking itself) and recomputing the derived totals from the
    /// snapshotted nightly price.
    pub async fn update_dates(
        &self,
        booking_id: Uuid,
        request: &UpdateDatesRequest,
    ) -> Result<Booking, ApiError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE"
        ))
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;
        let booking = match row {
            Some(row) => booking_from_row(&row)?,
            None => return Err(ApiError::BookingNotFound),
        };

        // Same per-plot serialization as intake.
        sqlx::query("SELECT id FROM plots WHERE id = $1 FOR UPDATE")
            .bind(booking.plot_id)
            .fetch_optional(&mut *tx)
            .await?;

        let totals = compute_stay(request.check_in, request.check_out, booking.price_per_night)?;

        let existing = self
            .blocking_bookings_for_plot(&mut tx, booking.plot_id)
            .await?;
        if has_conflict(
            booking.plot_id,
            &existing,
            request.check_in,
            request.check_out,
            Some(booking_id),
        ) {
            return Err(ApiError::Booking(BookingError::Unavailable));
        }

        let row = sqlx::query(&format!(
            "UPDATE bookings SET check_in = $1, check_out = $2, total_nights = $3, \
             total_price = $4, updated_at = NOW() WHERE id = $5 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(request.check_in)
        .bind(request.check_out)
        .bind(totals.nights as i32)
        .bind(totals.total_price)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_overlap_violation)?;
        let updated = booking_from_row(&row)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Builds the availability calendar for a bookable plot and month.
    pub async fn month_view(
        &self,
        plot_id: Uuid,
        query: &CalendarQuery,
    ) -> Result<MonthView, ApiError> {
        let today = Utc::now().date_naive();

        let plot_row = sqlx::query("SELECT id FROM plots WHERE id = $1 AND status = 'available'")
            .bind(plot_id)
            .fetch_optional(&self.pool)
            .await?;
        if plot_row.is_none() {
            return Err(ApiError::PlotNotFound);
        }

        let raw_year = query
            .year
            .clone()
            .unwrap_or_else(|| today.year().to_string());
        let raw_month = query
            .month
            .clone()
            .unwrap_or_else(|| today.month().to_string());
        let (year, month) = input::parse_year_month(&raw_year, &raw_month)?;
        let (year, month) = normalize_month(year, month);

        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE plot_id = $1 AND status IN ('pending', 'confirmed')"
        ))
        .bind(plot_id)
        .fetch_all(&self.pool)
        .await?;
        let bookings = rows
            .iter()
            .map(booking_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(booking_core::build_month(
            plot_id, &bookings, year, month, today,
        )?)
    }

    /// Basic analytics for the admin console.
    pub async fn stats_summary(&self) -> Result<StatsResponse, ApiError> {
        let today = Utc::now().date_naive();

        let mut bookings = BookingCounts::default();
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM bookings GROUP BY status")
            .fetch_all(&self.pool)
            .await?;
        for row in &rows {
            let count: i64 = row.get("count");
            match row.get::<String, _>("status").as_str() {
                "pending" => bookings.pending = count,
                "confirmed" => bookings.confirmed = count,
                "cancelled" => bookings.cancelled = count,
                "completed" => bookings.completed = count,
                other => {
                    return Err(ApiError::DataFormat(format!(
                        "unknown booking status '{other}'"
                    )));
                }
            }
        }

        let mut plots = PlotCounts::default();
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM plots GROUP BY status")
            .fetch_all(&self.pool)
            .await?;
        for row in &rows {
            let count: i64 = row.get("count");
            match row.get::<String, _>("status").as_str() {
                "available" => plots.available = count,
                "maintenance" => plots.maintenance = count,
                "unavailable" => plots.unavailable = count,
                other => {
                    return Err(ApiError::DataFormat(format!("unknown plot status '{other}'")));
                }
            }
        }

        let row = sqlx::query(
            "SELECT COALESCE(SUM(total_price), 0) AS revenue, \
             COALESCE(SUM(total_nights), 0) AS nights_sold \
             FROM bookings WHERE status IN ('confirmed', 'completed')",
        )
        .fetch_one(&self.pool)
        .await?;
        let revenue: Decimal = row.get("revenue");
        let nights_sold: i64 = row.get("nights_sold");

        let row = sqlx::query(
            "SELECT COUNT(*) AS upcoming FROM bookings \
             WHERE status IN ('pending', 'confirmed') AND check_in >= $1 AND check_in < $2",
        )
        .bind(today)
        .bind(today + Duration::days(30))
        .fetch_one(&self.pool)
        .await?;
        let upcoming_check_ins: i64 = row.get("upcoming");

        Ok(StatsResponse {
            bookings,
            plots,
            revenue,
            nights_sold,
            upcoming_check_ins,
        })
    }

    /// Loads the blocking bookings of one plot inside a transaction.
    async fn blocking_bookings_for_plot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plot_id: Uuid,
    ) -> Result<Vec<Booking>, ApiError> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE plot_id = $1 AND status IN ('pending', 'confirmed')"
        ))
        .bind(plot_id)
        .fetch_all(&mut **tx)
        .await?;
        rows.iter().map(booking_from_row).collect()
    }
}
