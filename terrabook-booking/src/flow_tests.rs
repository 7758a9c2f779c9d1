//! End-to-end run through the wizard: pick a slot, fill in the user,
//! choose cash, confirm, and get a booking reference back.

use std::sync::Arc;
use std::time::Duration;

use terrabook_catalog::pricing::PricingEngine;
use terrabook_catalog::{AvailabilityProvider, Field, FieldCatalog, MockAvailabilityProvider};

use crate::models::BookingSelection;
use crate::payment::PaymentSelection;
use crate::submitter::{MockConfirmationBackend, Submitter};
use crate::summary::summarize;
use crate::user::UserInfo;
use crate::workflow::{BookingStep, BookingWorkflow};

#[tokio::test]
async fn test_happy_path_cash_booking() {
    let pricing = PricingEngine::default();
    let field = Field::new(
        "Al Andalus Sports Field",
        "Casablanca, Morocco",
        "11x11",
        4.8,
        150_00,
    );
    let mut catalog = FieldCatalog::new();
    let field_id = catalog.add(field.clone());

    // Step 1: load availability and pick the first open slot
    let provider =
        MockAvailabilityProvider::with_seed(Arc::new(catalog), 11).with_probability(1.0);
    let date = chrono::NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
    let slots = provider.get_availability(field_id, date).await.unwrap();
    assert_eq!(slots.len(), 18);

    let slot = slots.iter().find(|s| s.available).cloned().unwrap();
    let selection = BookingSelection::new(date, slot, 120, &pricing).unwrap();
    assert_eq!(selection.total_price, 300_00);

    let mut workflow = BookingWorkflow::new();
    workflow.set_selection(selection);
    assert_eq!(workflow.advance().unwrap(), BookingStep::UserInfo);

    // Step 2: required fields plus both agreements
    workflow.set_user_info(UserInfo {
        full_name: "Ahmed Mohamed".to_string(),
        email: "ahmed.mohamed@email.com".to_string(),
        phone: "+212 6 12 34 56 78".to_string(),
        emergency_contact: Some("+212 6 87 65 43 21".to_string()),
        special_requests: None,
        agree_to_terms: true,
        agree_to_privacy: true,
    });
    assert_eq!(workflow.advance().unwrap(), BookingStep::Payment);

    // Step 3: cash needs no card details
    workflow.set_payment(PaymentSelection::Cash);
    assert_eq!(workflow.advance().unwrap(), BookingStep::Confirmation);

    // The sidebar summary is projectable before confirming
    let summary = summarize(Some(&field), workflow.draft().selection.as_ref(), &pricing).unwrap();
    assert_eq!(summary.breakdown.subtotal, 300_00);
    assert_eq!(summary.breakdown.total, 315_00);

    // Step 4: confirm
    let submitter = Submitter::new(Arc::new(MockConfirmationBackend::new(Duration::ZERO)));
    let confirmed = submitter.submit(&field, workflow.draft()).await.unwrap();

    assert!(confirmed.reference.starts_with("TB"));
    assert_eq!(confirmed.reference.len(), 10);
    assert!(confirmed.reference[2..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(confirmed.payment_method, "cash");
    assert_eq!(confirmed.field.name, field.name);
}
