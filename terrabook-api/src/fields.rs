use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use terrabook_catalog::availability::AvailabilityError;
use terrabook_catalog::pricing::Quote;
use terrabook_catalog::{Field, TimeSlot};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct FieldDetail {
    #[serde(flatten)]
    field: Field,
    is_favorite: bool,
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct AvailabilityResponse {
    field_id: Uuid,
    date: NaiveDate,
    slots: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize)]
struct QuoteQuery {
    minutes: u32,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    currency: String,
    #[serde(flatten)]
    quote: Quote,
}

#[derive(Debug, Serialize)]
struct FavoriteResponse {
    field_id: Uuid,
    is_favorite: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/fields", get(list_fields))
        .route("/v1/fields/{id}", get(get_field))
        .route("/v1/fields/{id}/availability", get(get_availability))
        .route("/v1/fields/{id}/quote", get(get_quote))
        .route(
            "/v1/fields/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
}

async fn list_fields(State(state): State<AppState>) -> Json<Vec<Field>> {
    Json(state.catalog.list().into_iter().cloned().collect())
}

async fn get_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FieldDetail>, AppError> {
    let field = state
        .catalog
        .get(&id)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?
        .clone();

    Ok(Json(FieldDetail {
        is_favorite: state.session.is_favorite(id),
        field,
    }))
}

async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let slots = state
        .availability
        .get_availability(id, query.date)
        .await
        .map_err(|e| match e {
            AvailabilityError::FieldNotFound(_) => AppError::NotFoundError(e.to_string()),
            AvailabilityError::Provider(_) => AppError::InternalServerError(e.to_string()),
        })?;

    Ok(Json(AvailabilityResponse {
        field_id: id,
        date: query.date,
        slots,
    }))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, AppError> {
    let field = state
        .catalog
        .get(&id)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;

    let quote = state
        .pricing
        .quote(field.price_per_hour, query.minutes)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(Json(QuoteResponse {
        currency: field.currency.clone(),
        quote,
    }))
}

async fn add_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, AppError> {
    state
        .catalog
        .get(&id)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;

    state.session.add_favorite(id);
    Ok(Json(FavoriteResponse {
        field_id: id,
        is_favorite: true,
    }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, AppError> {
    state.session.remove_favorite(id);
    Ok(Json(FavoriteResponse {
        field_id: id,
        is_favorite: false,
    }))
}
