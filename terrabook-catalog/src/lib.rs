pub mod availability;
pub mod fields;
pub mod pricing;

pub use availability::{AvailabilityProvider, MockAvailabilityProvider, TimeSlot};
pub use fields::{Field, FieldCatalog};
pub use pricing::{PricingConfig, PricingEngine, Quote};
