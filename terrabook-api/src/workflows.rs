use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use terrabook_booking::{
    summarize, BookingSelection, BookingStep, BookingSummary, BookingWorkflow, ConfirmedBooking,
    FieldError, PaymentSelection, SubmitError, UserInfo,
};
use terrabook_catalog::TimeSlot;

use crate::error::AppError;
use crate::state::{AppState, WorkflowEntry};

#[derive(Debug, Deserialize)]
struct CreateWorkflowRequest {
    field_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    date: NaiveDate,
    time_slot: TimeSlot,
    duration_minutes: u32,
}

#[derive(Debug, Serialize)]
struct WorkflowDetail {
    workflow_id: Uuid,
    field_id: Uuid,
    step: u8,
    step_name: BookingStep,
    can_advance: bool,
    summary: Option<BookingSummary>,
}

#[derive(Debug, Serialize)]
struct UserInfoResponse {
    valid: bool,
    errors: Vec<FieldError>,
    can_advance: bool,
}

#[derive(Debug, Serialize)]
struct PaymentResponse {
    valid: bool,
    can_advance: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/workflows", post(create_workflow))
        .route("/v1/workflows/{id}", get(get_workflow))
        .route("/v1/workflows/{id}/selection", put(put_selection))
        .route("/v1/workflows/{id}/user-info", put(put_user_info))
        .route("/v1/workflows/{id}/payment", put(put_payment))
        .route("/v1/workflows/{id}/next", post(next_step))
        .route("/v1/workflows/{id}/previous", post(previous_step))
        .route("/v1/workflows/{id}/confirm", post(confirm_workflow))
}

fn detail(state: &AppState, workflow_id: Uuid, entry: &WorkflowEntry) -> WorkflowDetail {
    let field = state.catalog.get(&entry.field_id).ok();
    let summary = summarize(
        field,
        entry.workflow.draft().selection.as_ref(),
        &state.pricing,
    );

    WorkflowDetail {
        workflow_id,
        field_id: entry.field_id,
        step: entry.workflow.current_step().number(),
        step_name: entry.workflow.current_step(),
        can_advance: entry.workflow.can_advance(),
        summary,
    }
}

fn workflow_not_found(id: Uuid) -> AppError {
    AppError::NotFoundError(format!("Workflow not found: {}", id))
}

async fn create_workflow(
    State(state): State<AppState>,
    Json(req): Json<CreateWorkflowRequest>,
) -> Result<Json<WorkflowDetail>, AppError> {
    state
        .catalog
        .get(&req.field_id)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;

    let workflow_id = Uuid::new_v4();
    let entry = WorkflowEntry {
        field_id: req.field_id,
        workflow: BookingWorkflow::new(),
    };
    let response = detail(&state, workflow_id, &entry);

    state.workflows.write().await.insert(workflow_id, entry);
    tracing::info!(%workflow_id, field_id = %req.field_id, "workflow opened");

    Ok(Json(response))
}

async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowDetail>, AppError> {
    let workflows = state.workflows.read().await;
    let entry = workflows.get(&id).ok_or_else(|| workflow_not_found(id))?;
    Ok(Json(detail(&state, id, entry)))
}

async fn put_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<WorkflowDetail>, AppError> {
    if !req.time_slot.available {
        return Err(AppError::ValidationError(
            "Time slot is not available".to_string(),
        ));
    }

    let selection = BookingSelection::new(req.date, req.time_slot, req.duration_minutes, &state.pricing)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let mut workflows = state.workflows.write().await;
    let entry = workflows.get_mut(&id).ok_or_else(|| workflow_not_found(id))?;
    entry.workflow.set_selection(selection);

    Ok(Json(detail(&state, id, entry)))
}

async fn put_user_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(user_info): Json<UserInfo>,
) -> Result<Json<UserInfoResponse>, AppError> {
    let errors = user_info.validate().err().unwrap_or_default();

    // The draft keeps whatever was entered; the step gate decides later
    let mut workflows = state.workflows.write().await;
    let entry = workflows.get_mut(&id).ok_or_else(|| workflow_not_found(id))?;
    entry.workflow.set_user_info(user_info);

    Ok(Json(UserInfoResponse {
        valid: errors.is_empty(),
        errors,
        can_advance: entry.workflow.can_advance(),
    }))
}

async fn put_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payment): Json<PaymentSelection>,
) -> Result<Json<PaymentResponse>, AppError> {
    let valid = payment.is_valid();

    let mut workflows = state.workflows.write().await;
    let entry = workflows.get_mut(&id).ok_or_else(|| workflow_not_found(id))?;
    entry.workflow.set_payment(payment);

    Ok(Json(PaymentResponse {
        valid,
        can_advance: entry.workflow.can_advance(),
    }))
}

async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowDetail>, AppError> {
    let mut workflows = state.workflows.write().await;
    let entry = workflows.get_mut(&id).ok_or_else(|| workflow_not_found(id))?;

    entry
        .workflow
        .advance()
        .map_err(|e| AppError::ConflictError(e.to_string()))?;

    Ok(Json(detail(&state, id, entry)))
}

async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowDetail>, AppError> {
    let mut workflows = state.workflows.write().await;
    let entry = workflows.get_mut(&id).ok_or_else(|| workflow_not_found(id))?;

    entry.workflow.retreat();
    Ok(Json(detail(&state, id, entry)))
}

async fn confirm_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConfirmedBooking>, AppError> {
    // Snapshot the draft so the commit runs without holding the lock
    let (field_id, draft, step) = {
        let workflows = state.workflows.read().await;
        let entry = workflows.get(&id).ok_or_else(|| workflow_not_found(id))?;
        (
            entry.field_id,
            entry.workflow.draft().clone(),
            entry.workflow.current_step(),
        )
    };

    if step != BookingStep::Confirmation {
        return Err(AppError::ConflictError(
            "Workflow has not reached the confirmation step".to_string(),
        ));
    }

    let field = state
        .catalog
        .get(&field_id)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?
        .clone();

    let confirmed = state
        .submitter
        .submit(&field, &draft)
        .await
        .map_err(|e| match e {
            SubmitError::IncompleteBooking => AppError::ConflictError(e.to_string()),
            SubmitError::Backend(msg) => AppError::InternalServerError(msg),
            SubmitError::Cancelled => AppError::InternalServerError(e.to_string()),
        })?;

    // A confirmed workflow is finished; drop it from the live set
    state.workflows.write().await.remove(&id);
    tracing::info!(workflow_id = %id, reference = %confirmed.reference, "booking confirmed");

    Ok(Json(confirmed))
}
