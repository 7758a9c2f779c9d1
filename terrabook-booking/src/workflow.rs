use serde::{Deserialize, Serialize};

use crate::models::BookingDraft;

/// The four stages of the booking wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStep {
    DateTime,
    UserInfo,
    Payment,
    Confirmation,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::DateTime,
        BookingStep::UserInfo,
        BookingStep::Payment,
        BookingStep::Confirmation,
    ];

    /// 1-based position shown to the user ("Step N of 4")
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::DateTime => 1,
            BookingStep::UserInfo => 2,
            BookingStep::Payment => 3,
            BookingStep::Confirmation => 4,
        }
    }

    fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::DateTime => Some(BookingStep::UserInfo),
            BookingStep::UserInfo => Some(BookingStep::Payment),
            BookingStep::Payment => Some(BookingStep::Confirmation),
            BookingStep::Confirmation => None,
        }
    }

    fn previous(&self) -> Option<BookingStep> {
        match self {
            BookingStep::DateTime => None,
            BookingStep::UserInfo => Some(BookingStep::DateTime),
            BookingStep::Payment => Some(BookingStep::UserInfo),
            BookingStep::Confirmation => Some(BookingStep::Payment),
        }
    }
}

/// Per-step completeness predicate over the accumulated draft
pub type StepPredicate = Box<dyn Fn(&BookingDraft) -> bool + Send + Sync>;

/// The step gate: a linear four-state machine over the booking draft.
/// Forward transitions are gated by the current step's predicate;
/// earlier steps are never re-validated once passed, and step data is
/// retained across back/forward navigation.
pub struct BookingWorkflow {
    step: BookingStep,
    draft: BookingDraft,
    predicates: [StepPredicate; 4],
}

impl BookingWorkflow {
    /// Workflow with the standard gating rules:
    /// selection present -> user info valid -> payment valid -> always.
    pub fn new() -> Self {
        Self::with_predicates([
            Box::new(|draft: &BookingDraft| draft.selection.is_some()),
            Box::new(|draft: &BookingDraft| {
                draft.user_info.as_ref().is_some_and(|u| u.is_valid())
            }),
            Box::new(|draft: &BookingDraft| {
                draft.payment.as_ref().is_some_and(|p| p.is_valid())
            }),
            Box::new(|_| true),
        ])
    }

    /// Workflow with injected predicates, one per step in order
    pub fn with_predicates(predicates: [StepPredicate; 4]) -> Self {
        Self {
            step: BookingStep::DateTime,
            draft: BookingDraft::default(),
            predicates,
        }
    }

    pub fn current_step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn set_selection(&mut self, selection: crate::models::BookingSelection) {
        self.draft.selection = Some(selection);
    }

    pub fn set_user_info(&mut self, user_info: crate::user::UserInfo) {
        self.draft.user_info = Some(user_info);
    }

    pub fn set_payment(&mut self, payment: crate::payment::PaymentSelection) {
        self.draft.payment = Some(payment);
    }

    /// Whether the current step's predicate holds
    pub fn can_advance(&self) -> bool {
        self.predicates[(self.step.number() - 1) as usize](&self.draft)
    }

    /// Move forward one step. The step is left unchanged on refusal.
    pub fn advance(&mut self) -> Result<BookingStep, WorkflowError> {
        let next = self.step.next().ok_or(WorkflowError::AtFinalStep)?;
        if !self.can_advance() {
            return Err(WorkflowError::StepIncomplete { step: self.step });
        }
        tracing::debug!(from = self.step.number(), to = next.number(), "advancing step");
        self.step = next;
        Ok(self.step)
    }

    /// Move back one step; a no-op at the first step
    pub fn retreat(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Take the draft out for submission
    pub fn into_draft(self) -> BookingDraft {
        self.draft
    }
}

impl Default for BookingWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Step {} is incomplete", step.number())]
    StepIncomplete { step: BookingStep },

    #[error("Already at the confirmation step")]
    AtFinalStep,
}
