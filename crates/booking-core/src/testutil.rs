//! Shared fixtures for the core unit tests.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::{Booking, BookingStatus, Plot, PlotStatus, PriceSetting};

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn plot(capacity: i32, price_per_night: Decimal) -> Plot {
    let now = Utc::now();
    Plot {
        id: Uuid::new_v4(),
        name: "Riverside 1".into(),
        description: "Shaded plot by the river".into(),
        size: Decimal::new(12000, 2),
        capacity,
        amenities: "water, electricity".into(),
        price_per_night,
        status: PlotStatus::Available,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn booking(
    plot_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: BookingStatus,
) -> Booking {
    let now = Utc::now();
    let nights = (check_out - check_in).num_days();
    let price = Decimal::new(5000, 2);
    Booking {
        id: Uuid::new_v4(),
        plot_id,
        guest_name: "Ada Lovelace".into(),
        guest_email: "ada@example.com".into(),
        guest_phone: String::new(),
        number_of_guests: 2,
        check_in,
        check_out,
        price_per_night: price,
        total_nights: nights as i32,
        total_price: price * Decimal::from(nights),
        special_requests: String::new(),
        status,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn price_setting(
    price_per_night: Decimal,
    effective_from: NaiveDate,
    is_active: bool,
) -> PriceSetting {
    let now = Utc::now();
    PriceSetting {
        id: Uuid::new_v4(),
        price_per_night,
        effective_from,
        is_active,
        created_at: now,
        updated_at: now,
    }
}
