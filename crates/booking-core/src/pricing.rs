use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{Plot, PriceSetting};

/// Nightly price used when no plot price and no active price setting apply.
fn fallback_price() -> Decimal {
    Decimal::new(5000, 2) // 50.00
}

/// Pricing rules, passed explicitly to the callers that need them.
///
/// The plot-level price is authoritative for booking creation; the global
/// price-setting lookup only serves callers that have no plot in hand.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    /// Price used when no active price setting matches.
    pub default_price: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            default_price: fallback_price(),
        }
    }
}

impl PricingPolicy {
    /// Nightly price to charge for a stay on `plot`.
    pub fn resolve(&self, plot: &Plot) -> Decimal {
        plot.price_per_night
    }

    /// Current plot-less nightly price: the active setting with the latest
    /// `effective_from` on or before `today`, else the policy default.
    pub fn current_global(&self, settings: &[PriceSetting], today: NaiveDate) -> Decimal {
        settings
            .iter()
            .filter(|s| s.is_active && s.effective_from <= today)
            .max_by_key(|s| s.effective_from)
            .map(|s| s.price_per_night)
            .unwrap_or(self.default_price)
    }
}
