use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pricing configuration: service-fee rate plus the published
/// multi-hour discount tiers (hours -> percent off the base price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub service_fee_rate: f64,
    pub tier_discounts: HashMap<u32, u32>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_rate: 0.05,
            tier_discounts: {
                let mut m = HashMap::new();
                m.insert(1, 0);
                m.insert(2, 5);
                m.insert(3, 10);
                m.insert(4, 15);
                m
            },
        }
    }
}

/// Full price breakdown for a booking of `minutes` at `price_per_hour`.
/// All amounts in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub base: i64,
    pub discount_percent: u32,
    pub discount: i64,
    pub subtotal: i64,
    pub service_fee: i64,
    pub total: i64,
}

/// Duration/price calculator. The canonical duration unit is minutes;
/// tier discounts apply only to exact whole-hour durations.
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Base price: hourly rate times fractional hours, rounded.
    pub fn base_total(&self, price_per_hour: i64, minutes: u32) -> Result<i64, PricingError> {
        if price_per_hour <= 0 {
            return Err(PricingError::InvalidPrice(price_per_hour));
        }
        if minutes == 0 {
            return Err(PricingError::InvalidDuration(minutes));
        }

        Ok(((price_per_hour * minutes as i64) as f64 / 60.0).round() as i64)
    }

    /// Percent off for a whole-hour duration with a configured tier; 0 otherwise.
    pub fn tier_discount_percent(&self, minutes: u32) -> u32 {
        if minutes == 0 || minutes % 60 != 0 {
            return 0;
        }
        self.config
            .tier_discounts
            .get(&(minutes / 60))
            .copied()
            .unwrap_or(0)
    }

    /// Flat service fee added on top of the subtotal
    pub fn service_fee(&self, subtotal: i64) -> Result<i64, PricingError> {
        if subtotal < 0 {
            return Err(PricingError::InvalidPrice(subtotal));
        }
        Ok((subtotal as f64 * self.config.service_fee_rate).round() as i64)
    }

    pub fn total_with_fees(&self, subtotal: i64) -> Result<i64, PricingError> {
        Ok(subtotal + self.service_fee(subtotal)?)
    }

    /// Full breakdown: base, tier discount, subtotal, service fee, total
    pub fn quote(&self, price_per_hour: i64, minutes: u32) -> Result<Quote, PricingError> {
        let base = self.base_total(price_per_hour, minutes)?;
        let discount_percent = self.tier_discount_percent(minutes);
        let discount = ((base * discount_percent as i64) as f64 / 100.0).round() as i64;
        let subtotal = base - discount;
        let service_fee = self.service_fee(subtotal)?;

        Ok(Quote {
            base,
            discount_percent,
            discount,
            subtotal,
            service_fee,
            total: subtotal + service_fee,
        })
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Price must be positive, got {0}")]
    InvalidPrice(i64),

    #[error("Duration must be positive, got {0} minutes")]
    InvalidDuration(u32),
}
