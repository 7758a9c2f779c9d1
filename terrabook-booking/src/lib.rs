pub mod models;
pub mod payment;
pub mod submitter;
pub mod summary;
pub mod user;
pub mod workflow;

#[cfg(test)]
mod flow_tests;

pub use models::{BookingDraft, BookingSelection};
pub use payment::{CardDetails, PaymentSelection};
pub use submitter::{
    BookingReference, ConfirmationBackend, ConfirmedBooking, MockConfirmationBackend, SubmitError,
    Submitter,
};
pub use summary::{summarize, BookingSummary, PriceBreakdown};
pub use user::{FieldError, UserInfo};
pub use workflow::{BookingStep, BookingWorkflow, WorkflowError};
