use booking_core::{Plot, PriceSetting};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request structure for creating a plot.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlotRequest {
    /// Display name of the plot.
    #[validate(length(min = 1, message = "Plot name is required"))]
    pub name: String,

    /// Detailed description of the plot.
    pub description: Option<String>,

    /// Size in square meters.
    #[validate(custom(function = "validate_positive_decimal"))]
    pub size: Decimal,

    /// Maximum number of people.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,

    /// Available amenities.
    pub amenities: Option<String>,

    /// Nightly price for this plot.
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price_per_night: Decimal,

    /// Initial status; defaults to `available`.
    #[validate(custom(function = "validate_plot_status"))]
    pub status: Option<String>,
}

/// Request structure for updating a plot. Absent fields keep their value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlotRequest {
    /// New display name.
    #[validate(length(min = 1, message = "Plot name cannot be empty"))]
    pub name: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New size in square meters.
    #[validate(custom(function = "validate_positive_decimal"))]
    pub size: Option<Decimal>,

    /// New capacity.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<i32>,

    /// New amenities.
    pub amenities: Option<String>,

    /// New nightly price.
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price_per_night: Option<Decimal>,

    /// New status.
    #[validate(custom(function = "validate_plot_status"))]
    pub status: Option<String>,
}

/// Response structure for plot listings.
#[derive(Debug, Serialize)]
pub struct ListPlotsResponse {
    /// Plots ordered by name.
    pub plots: Vec<Plot>,
    /// Total count returned.
    pub total: i64,
}

/// Request structure for creating a price setting.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePriceSettingRequest {
    /// Price per night.
    #[validate(custom(function = "validate_positive_decimal"))]
    pub price_per_night: Decimal,

    /// Date from which the price applies; defaults to today.
    pub effective_from: Option<NaiveDate>,

    /// Whether the setting is active; defaults to true.
    pub is_active: Option<bool>,
}

/// Request structure for activating or deactivating a price setting.
#[derive(Debug, Deserialize)]
pub struct UpdatePriceSettingRequest {
    /// New active flag.
    pub is_active: bool,
}

/// Response structure for price-setting listings.
#[derive(Debug, Serialize)]
pub struct ListPriceSettingsResponse {
    /// Settings, most recently effective first.
    pub price_settings: Vec<PriceSetting>,
    /// Total count returned.
    pub total: i64,
}

/// Response structure for the current plot-less fallback price.
#[derive(Debug, Serialize)]
pub struct CurrentPriceResponse {
    /// Nightly price in effect today.
    pub price_per_night: Decimal,
}

/// Custom validation function for positive money/size amounts.
fn validate_positive_decimal(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(validator::ValidationError::new("must_be_positive"))
    }
}

/// Custom validation function for plot status values.
fn validate_plot_status(status: &str) -> Result<(), validator::ValidationError> {
    match status {
        "available" | "maintenance" | "unavailable" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_plot_status")),
    }
}
