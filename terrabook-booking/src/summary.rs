use serde::{Deserialize, Serialize};
use terrabook_catalog::pricing::PricingEngine;
use terrabook_catalog::Field;

use crate::models::BookingSelection;

/// Price lines shown in the summary, in minor currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub unit_price: i64,
    pub hours: f64,
    pub subtotal: i64,
    pub service_fee: i64,
    pub total: i64,
}

/// Display projection of an in-progress booking. Derived data only;
/// building one has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub field_name: String,
    pub location: String,
    pub date_label: String,
    pub start_label: String,
    pub end_label: String,
    pub duration_label: String,
    pub breakdown: PriceBreakdown,
}

/// Project the accumulated step data into display form. `None` when
/// either input is still missing (the "pick a date and time" placeholder).
pub fn summarize(
    field: Option<&Field>,
    selection: Option<&BookingSelection>,
    pricing: &PricingEngine,
) -> Option<BookingSummary> {
    let field = field?;
    let selection = selection?;

    let subtotal = selection.total_price;
    let service_fee = pricing.service_fee(subtotal).unwrap_or(0);

    Some(BookingSummary {
        field_name: field.name.clone(),
        location: field.location.clone(),
        date_label: selection.date.format("%A, %-d %B %Y").to_string(),
        start_label: selection.time_slot.display_time.clone(),
        end_label: end_time_label(&selection.time_slot.time, selection.duration_minutes)
            .unwrap_or_else(|| "--:--".to_string()),
        duration_label: duration_label(selection.duration_minutes),
        breakdown: PriceBreakdown {
            unit_price: selection.time_slot.price,
            hours: selection.duration_minutes as f64 / 60.0,
            subtotal,
            service_fee,
            total: subtotal + service_fee,
        },
    })
}

/// End of the booked interval: start "HH:MM" plus the duration, hours
/// wrapped mod 24, rendered on a 12-hour clock.
pub fn end_time_label(start: &str, duration_minutes: u32) -> Option<String> {
    let (hours, minutes) = start.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    let end_minutes = minutes + duration_minutes % 60;
    let end_hours = (hours + duration_minutes / 60 + end_minutes / 60) % 24;
    let end_minutes = end_minutes % 60;

    let display_hours = match end_hours {
        0 => 12,
        1..=12 => end_hours,
        _ => end_hours - 12,
    };
    let period = if end_hours >= 12 { "PM" } else { "AM" };

    Some(format!("{:02}:{:02} {}", display_hours, end_minutes, period))
}

/// Human label for the supported durations; anything else stays in minutes
pub fn duration_label(duration_minutes: u32) -> String {
    match duration_minutes {
        60 => "1 Hour".to_string(),
        90 => "1.5 Hours".to_string(),
        120 => "2 Hours".to_string(),
        180 => "3 Hours".to_string(),
        other => format!("{} minutes", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use terrabook_catalog::TimeSlot;

    fn slot(time: &str, display: &str, price: i64) -> TimeSlot {
        TimeSlot {
            id: time.to_string(),
            time: time.to_string(),
            display_time: display.to_string(),
            available: true,
            price,
            duration_minutes: 60,
        }
    }

    fn selection(minutes: u32) -> BookingSelection {
        BookingSelection::new(
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            slot("18:00", "6:00 PM", 150_00),
            minutes,
            &PricingEngine::default(),
        )
        .unwrap()
    }

    fn field() -> Field {
        Field::new("Al Andalus Sports Field", "Casablanca, Morocco", "11x11", 4.8, 150_00)
    }

    #[test]
    fn test_placeholder_when_data_missing() {
        let pricing = PricingEngine::default();
        assert!(summarize(None, None, &pricing).is_none());
        assert!(summarize(Some(&field()), None, &pricing).is_none());
        assert!(summarize(None, Some(&selection(60)), &pricing).is_none());
    }

    #[test]
    fn test_summary_projection() {
        let pricing = PricingEngine::default();
        let summary = summarize(Some(&field()), Some(&selection(90)), &pricing).unwrap();

        assert_eq!(summary.field_name, "Al Andalus Sports Field");
        assert_eq!(summary.date_label, "Friday, 4 September 2026");
        assert_eq!(summary.start_label, "6:00 PM");
        assert_eq!(summary.end_label, "07:30 PM");
        assert_eq!(summary.duration_label, "1.5 Hours");

        // 225.00 base, 5% fee
        assert_eq!(summary.breakdown.unit_price, 150_00);
        assert_eq!(summary.breakdown.hours, 1.5);
        assert_eq!(summary.breakdown.subtotal, 225_00);
        assert_eq!(summary.breakdown.service_fee, 11_25);
        assert_eq!(summary.breakdown.total, 236_25);
    }

    #[test]
    fn test_end_time_arithmetic() {
        assert_eq!(end_time_label("06:00", 60).unwrap(), "07:00 AM");
        assert_eq!(end_time_label("11:00", 90).unwrap(), "12:30 PM");
        assert_eq!(end_time_label("12:00", 60).unwrap(), "01:00 PM");
        assert_eq!(end_time_label("22:30", 90).unwrap(), "12:00 AM");
        // Late slots wrap past midnight instead of reading "13:00 PM"
        assert_eq!(end_time_label("23:00", 120).unwrap(), "01:00 AM");
        assert!(end_time_label("not-a-time", 60).is_none());
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(duration_label(60), "1 Hour");
        assert_eq!(duration_label(90), "1.5 Hours");
        assert_eq!(duration_label(120), "2 Hours");
        assert_eq!(duration_label(180), "3 Hours");
        assert_eq!(duration_label(45), "45 minutes");
    }
}
