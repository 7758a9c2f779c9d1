use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use terrabook_catalog::Field;
use tokio::sync::oneshot;

use crate::models::{BookingDraft, BookingSelection};
use crate::payment::PaymentSelection;
use crate::user::UserInfo;

/// A fully assembled booking ready to commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub field: Field,
    pub selection: BookingSelection,
    pub user_info: UserInfo,
    pub payment: PaymentSelection,
}

/// Booking reference handed out on commit, "TB" + 8 digits
pub type BookingReference = String;

/// The success payload handed back after a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub reference: BookingReference,
    pub field: Field,
    pub selection: BookingSelection,
    pub user_info: UserInfo,
    pub payment_method: String,
}

/// Seam to whatever actually records the booking
#[async_trait]
pub trait ConfirmationBackend: Send + Sync {
    async fn commit(&self, request: &ConfirmationRequest)
        -> Result<BookingReference, SubmitError>;
}

/// Simulated backend: waits a fixed delay, then hands out a fresh
/// reference (or a generic failure when built with `failing`). No
/// retries, no idempotency; a repeated commit mints a new reference.
pub struct MockConfirmationBackend {
    delay: Duration,
    fail: bool,
}

impl MockConfirmationBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }
}

#[async_trait]
impl ConfirmationBackend for MockConfirmationBackend {
    async fn commit(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<BookingReference, SubmitError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(SubmitError::Backend(
                "Booking confirmation failed, please try again".to_string(),
            ));
        }

        let reference = generate_reference();
        tracing::info!(
            %reference,
            field = %request.field.name,
            "booking committed"
        );
        Ok(reference)
    }
}

/// "TB" + the last 8 digits of the current epoch millis. Cosmetic;
/// not checked for uniqueness and not persisted anywhere.
pub fn generate_reference() -> BookingReference {
    format!("TB{:08}", Utc::now().timestamp_millis() % 100_000_000)
}

/// Drives a draft through the confirmation backend
pub struct Submitter {
    backend: Arc<dyn ConfirmationBackend>,
}

impl Submitter {
    pub fn new(backend: Arc<dyn ConfirmationBackend>) -> Self {
        Self { backend }
    }

    /// Commit a complete draft. An incomplete draft is refused up front
    /// rather than submitted with missing fields.
    pub async fn submit(
        &self,
        field: &Field,
        draft: &BookingDraft,
    ) -> Result<ConfirmedBooking, SubmitError> {
        let request = Self::assemble(field, draft)?;
        let reference = self.backend.commit(&request).await?;

        Ok(ConfirmedBooking {
            reference,
            payment_method: request.payment.method_name().to_string(),
            field: request.field,
            selection: request.selection,
            user_info: request.user_info,
        })
    }

    /// Like `submit`, but races the commit against a cancellation
    /// signal so navigation away can abort in-flight work.
    pub async fn submit_cancellable(
        &self,
        field: &Field,
        draft: &BookingDraft,
        cancel: oneshot::Receiver<()>,
    ) -> Result<ConfirmedBooking, SubmitError> {
        tokio::select! {
            result = self.submit(field, draft) => result,
            _ = cancel => {
                tracing::debug!("submission cancelled");
                Err(SubmitError::Cancelled)
            }
        }
    }

    fn assemble(field: &Field, draft: &BookingDraft) -> Result<ConfirmationRequest, SubmitError> {
        let (Some(selection), Some(user_info), Some(payment)) = (
            draft.selection.clone(),
            draft.user_info.clone(),
            draft.payment.clone(),
        ) else {
            return Err(SubmitError::IncompleteBooking);
        };

        Ok(ConfirmationRequest {
            field: field.clone(),
            selection,
            user_info,
            payment,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Booking data is incomplete")]
    IncompleteBooking,

    #[error("{0}")]
    Backend(String),

    #[error("Submission was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use terrabook_catalog::pricing::PricingEngine;
    use terrabook_catalog::TimeSlot;

    fn complete_draft() -> BookingDraft {
        let slot = TimeSlot {
            id: "18:00".to_string(),
            time: "18:00".to_string(),
            display_time: "6:00 PM".to_string(),
            available: true,
            price: 150_00,
            duration_minutes: 60,
        };
        let selection = BookingSelection::new(
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            slot,
            90,
            &PricingEngine::default(),
        )
        .unwrap();

        BookingDraft {
            selection: Some(selection),
            user_info: Some(UserInfo {
                full_name: "Ahmed Mohamed".to_string(),
                email: "ahmed.mohamed@email.com".to_string(),
                phone: "+212 6 12 34 56 78".to_string(),
                emergency_contact: None,
                special_requests: None,
                agree_to_terms: true,
                agree_to_privacy: true,
            }),
            payment: Some(PaymentSelection::Cash),
        }
    }

    fn field() -> Field {
        Field::new("Al Andalus Sports Field", "Casablanca, Morocco", "11x11", 4.8, 150_00)
    }

    fn is_reference(s: &str) -> bool {
        s.len() == 10 && s.starts_with("TB") && s[2..].chars().all(|c| c.is_ascii_digit())
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let submitter = Submitter::new(Arc::new(MockConfirmationBackend::new(Duration::ZERO)));

        let confirmed = submitter.submit(&field(), &complete_draft()).await.unwrap();
        assert!(is_reference(&confirmed.reference));
        assert_eq!(confirmed.payment_method, "cash");
        assert_eq!(confirmed.selection.total_price, 225_00);
    }

    #[tokio::test]
    async fn test_incomplete_draft_refused() {
        let submitter = Submitter::new(Arc::new(MockConfirmationBackend::new(Duration::ZERO)));

        let mut draft = complete_draft();
        draft.user_info = None;

        let result = submitter.submit(&field(), &draft).await;
        assert!(matches!(result, Err(SubmitError::IncompleteBooking)));
    }

    #[tokio::test]
    async fn test_backend_failure_is_generic_and_retryable() {
        let backend = Arc::new(MockConfirmationBackend::failing(Duration::ZERO));
        let submitter = Submitter::new(backend);
        let draft = complete_draft();

        let result = submitter.submit(&field(), &draft).await;
        assert!(matches!(result, Err(SubmitError::Backend(_))));

        // Retry is just invoking again; same refusal, no state carried over
        let result = submitter.submit(&field(), &draft).await;
        assert!(matches!(result, Err(SubmitError::Backend(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_in_flight_submit() {
        let submitter = Submitter::new(Arc::new(MockConfirmationBackend::new(
            Duration::from_secs(3),
        )));
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let field = field();
        let draft = complete_draft();
        let submit = submitter.submit_cancellable(&field, &draft, cancel_rx);
        tokio::pin!(submit);

        // Nothing resolves yet while the backend delay is pending
        tokio::select! {
            biased;
            _ = &mut submit => panic!("submit resolved before cancellation"),
            _ = async {} => {}
        }

        cancel_tx.send(()).unwrap();
        let result = submit.await;
        assert!(matches!(result, Err(SubmitError::Cancelled)));
    }

    #[tokio::test]
    async fn test_repeated_submits_each_mint_a_reference() {
        let submitter = Submitter::new(Arc::new(MockConfirmationBackend::new(Duration::ZERO)));
        let field = field();
        let draft = complete_draft();

        let first = submitter.submit(&field, &draft).await.unwrap();
        let second = submitter.submit(&field, &draft).await.unwrap();
        assert!(is_reference(&first.reference));
        assert!(is_reference(&second.reference));
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert!(is_reference(&reference));
    }
}
