use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use terrabook_booking::{BookingWorkflow, MockConfirmationBackend, Submitter};
use terrabook_catalog::pricing::PricingConfig;
use terrabook_catalog::{AvailabilityProvider, FieldCatalog, MockAvailabilityProvider, PricingEngine};
use terrabook_store::{BusinessRules, InMemorySessionStore, SessionRepository};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A live booking workflow plus the field it was opened for
pub struct WorkflowEntry {
    pub field_id: Uuid,
    pub workflow: BookingWorkflow,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FieldCatalog>,
    pub availability: Arc<dyn AvailabilityProvider>,
    pub pricing: Arc<PricingEngine>,
    pub submitter: Arc<Submitter>,
    pub session: Arc<dyn SessionRepository>,
    pub workflows: Arc<RwLock<HashMap<Uuid, WorkflowEntry>>>,
    pub business_rules: BusinessRules,
}

impl AppState {
    /// In-memory wiring for the whole app, driven by the business rules
    pub fn new(rules: BusinessRules) -> Self {
        let catalog = Arc::new(FieldCatalog::with_sample_fields());

        let availability = Arc::new(
            MockAvailabilityProvider::new(catalog.clone())
                .with_probability(rules.availability_probability)
                .with_delay(Duration::from_millis(rules.availability_delay_ms))
                .with_hours(rules.slot_open_hour, rules.slot_close_hour),
        );

        let pricing = Arc::new(PricingEngine::new(PricingConfig {
            service_fee_rate: rules.service_fee_rate,
            ..PricingConfig::default()
        }));

        let submitter = Arc::new(Submitter::new(Arc::new(MockConfirmationBackend::new(
            Duration::from_millis(rules.confirm_delay_ms),
        ))));

        Self {
            catalog,
            availability,
            pricing,
            submitter,
            session: Arc::new(InMemorySessionStore::new()),
            workflows: Arc::new(RwLock::new(HashMap::new())),
            business_rules: rules,
        }
    }
}
