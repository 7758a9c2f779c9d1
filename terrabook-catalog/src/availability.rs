use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::fields::FieldCatalog;

/// Default opening hours for slot generation (inclusive)
pub const OPEN_HOUR: u32 = 6;
pub const CLOSE_HOUR: u32 = 23;

/// A bookable one-hour interval on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    /// 24-hour start time, "HH:MM"
    pub time: String,
    /// 12-hour display form, e.g. "6:00 AM"
    pub display_time: String,
    pub available: bool,
    /// Hourly rate in minor currency units
    pub price: i64,
    pub duration_minutes: u32,
}

/// Source of per-day slot availability for a field
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn get_availability(
        &self,
        field_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, AvailabilityError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Availability lookup failed: {0}")]
    Provider(String),
}

/// Mock provider: one slot per opening hour at the field's hourly rate,
/// availability drawn at random. There is no real reservation ledger
/// behind this; the draw simulates one.
pub struct MockAvailabilityProvider {
    catalog: Arc<FieldCatalog>,
    open_hour: u32,
    close_hour: u32,
    availability_probability: f64,
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockAvailabilityProvider {
    pub fn new(catalog: Arc<FieldCatalog>) -> Self {
        Self {
            catalog,
            open_hour: OPEN_HOUR,
            close_hour: CLOSE_HOUR,
            availability_probability: 0.7,
            delay: Duration::from_millis(500),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests; also drops the simulated latency
    pub fn with_seed(catalog: Arc<FieldCatalog>, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay: Duration::ZERO,
            ..Self::new(catalog)
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.availability_probability = probability;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_hours(mut self, open_hour: u32, close_hour: u32) -> Self {
        self.open_hour = open_hour;
        self.close_hour = close_hour;
        self
    }
}

#[async_trait]
impl AvailabilityProvider for MockAvailabilityProvider {
    async fn get_availability(
        &self,
        field_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, AvailabilityError> {
        let price = self
            .catalog
            .get(&field_id)
            .map_err(|_| AvailabilityError::FieldNotFound(field_id.to_string()))?
            .price_per_hour;

        // Simulated backend latency
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!(%field_id, %date, "generating mock availability");

        let mut slots = Vec::with_capacity((self.close_hour - self.open_hour + 1) as usize);
        for hour in self.open_hour..=self.close_hour {
            let available = self
                .rng
                .lock()
                .map_err(|_| AvailabilityError::Provider("rng lock poisoned".to_string()))?
                .gen_bool(self.availability_probability);

            slots.push(TimeSlot {
                id: format!("{:02}:00", hour),
                time: format!("{:02}:00", hour),
                display_time: display_time(hour),
                available,
                price,
                duration_minutes: 60,
            });
        }

        Ok(slots)
    }
}

/// 12-hour clock label for an on-the-hour slot
pub fn display_time(hour: u32) -> String {
    if hour == 0 {
        "12:00 AM".to_string()
    } else if hour < 12 {
        format!("{}:00 AM", hour)
    } else if hour == 12 {
        "12:00 PM".to_string()
    } else {
        format!("{}:00 PM", hour - 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;
    use std::collections::HashSet;

    fn catalog_with_field(price: i64) -> (Arc<FieldCatalog>, Uuid) {
        let mut catalog = FieldCatalog::new();
        let id = catalog.add(Field::new("Test Field", "Casablanca", "11x11", 4.5, price));
        (Arc::new(catalog), id)
    }

    fn any_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[tokio::test]
    async fn test_slot_count_and_span() {
        let (catalog, field_id) = catalog_with_field(150_00);
        let provider = MockAvailabilityProvider::with_seed(catalog, 7);
        let slots = provider.get_availability(field_id, any_date()).await.unwrap();

        // 18 slots covering hours 6..=23, each with a unique id
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().unwrap().time, "06:00");
        assert_eq!(slots.last().unwrap().time, "23:00");

        let ids: HashSet<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 18);
    }

    #[tokio::test]
    async fn test_slot_price_and_duration() {
        let (catalog, field_id) = catalog_with_field(120_00);
        let provider = MockAvailabilityProvider::with_seed(catalog, 1);
        let slots = provider.get_availability(field_id, any_date()).await.unwrap();

        assert!(slots.iter().all(|s| s.price == 120_00));
        assert!(slots.iter().all(|s| s.duration_minutes == 60));
    }

    #[tokio::test]
    async fn test_unknown_field_rejected() {
        let (catalog, _) = catalog_with_field(100_00);
        let provider = MockAvailabilityProvider::with_seed(catalog, 1);

        let result = provider.get_availability(Uuid::new_v4(), any_date()).await;
        assert!(matches!(result, Err(AvailabilityError::FieldNotFound(_))));
    }

    #[tokio::test]
    async fn test_probability_extremes() {
        let (catalog, field_id) = catalog_with_field(100_00);

        let always = MockAvailabilityProvider::with_seed(catalog.clone(), 3).with_probability(1.0);
        let slots = always.get_availability(field_id, any_date()).await.unwrap();
        assert!(slots.iter().all(|s| s.available));

        let never = MockAvailabilityProvider::with_seed(catalog, 3).with_probability(0.0);
        let slots = never.get_availability(field_id, any_date()).await.unwrap();
        assert!(slots.iter().all(|s| !s.available));
    }

    #[tokio::test]
    async fn test_seeded_runs_are_deterministic() {
        let (catalog, field_id) = catalog_with_field(100_00);
        let a = MockAvailabilityProvider::with_seed(catalog.clone(), 42);
        let b = MockAvailabilityProvider::with_seed(catalog, 42);

        let slots_a = a.get_availability(field_id, any_date()).await.unwrap();
        let slots_b = b.get_availability(field_id, any_date()).await.unwrap();
        assert_eq!(slots_a, slots_b);
    }

    #[tokio::test]
    async fn test_custom_hours() {
        let (catalog, field_id) = catalog_with_field(100_00);
        let provider = MockAvailabilityProvider::with_seed(catalog, 5).with_hours(8, 10);

        let slots = provider.get_availability(field_id, any_date()).await.unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].time, "08:00");
        assert_eq!(slots[2].time, "10:00");
    }

    #[test]
    fn test_display_time() {
        assert_eq!(display_time(6), "6:00 AM");
        assert_eq!(display_time(11), "11:00 AM");
        assert_eq!(display_time(12), "12:00 PM");
        assert_eq!(display_time(13), "1:00 PM");
        assert_eq!(display_time(23), "11:00 PM");
    }
}
