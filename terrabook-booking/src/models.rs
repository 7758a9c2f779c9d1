use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use terrabook_catalog::pricing::{PricingEngine, PricingError};
use terrabook_catalog::TimeSlot;

use crate::payment::PaymentSelection;
use crate::user::UserInfo;

/// A date + slot + duration pick, with its computed base price.
/// Session-scoped only; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSelection {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub duration_minutes: u32,
    /// Base price in minor units (before service fee)
    pub total_price: i64,
}

impl BookingSelection {
    pub fn new(
        date: NaiveDate,
        time_slot: TimeSlot,
        duration_minutes: u32,
        pricing: &PricingEngine,
    ) -> Result<Self, PricingError> {
        let total_price = pricing.base_total(time_slot.price, duration_minutes)?;
        Ok(Self {
            date,
            time_slot,
            duration_minutes,
            total_price,
        })
    }

    /// Change the duration and recompute the total
    pub fn set_duration(
        &mut self,
        duration_minutes: u32,
        pricing: &PricingEngine,
    ) -> Result<(), PricingError> {
        self.total_price = pricing.base_total(self.time_slot.price, duration_minutes)?;
        self.duration_minutes = duration_minutes;
        Ok(())
    }
}

/// Everything accumulated across the booking steps. Owned by the
/// workflow; step components report new values through its setters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub selection: Option<BookingSelection>,
    pub user_info: Option<UserInfo>,
    pub payment: Option<PaymentSelection>,
}

impl BookingDraft {
    pub fn is_complete(&self) -> bool {
        self.selection.is_some() && self.user_info.is_some() && self.payment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(price: i64) -> TimeSlot {
        TimeSlot {
            id: "18:00".to_string(),
            time: "18:00".to_string(),
            display_time: "6:00 PM".to_string(),
            available: true,
            price,
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_selection_price_follows_duration() {
        let pricing = PricingEngine::default();
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

        let mut selection = BookingSelection::new(date, slot(150_00), 90, &pricing).unwrap();
        assert_eq!(selection.total_price, 225_00);

        selection.set_duration(120, &pricing).unwrap();
        assert_eq!(selection.duration_minutes, 120);
        assert_eq!(selection.total_price, 300_00);
    }

    #[test]
    fn test_set_duration_rejects_zero_and_keeps_state() {
        let pricing = PricingEngine::default();
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

        let mut selection = BookingSelection::new(date, slot(150_00), 60, &pricing).unwrap();
        assert!(selection.set_duration(0, &pricing).is_err());
        assert_eq!(selection.duration_minutes, 60);
        assert_eq!(selection.total_price, 150_00);
    }
}
