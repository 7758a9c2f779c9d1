use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use terrabook_store::SessionUser;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    full_name: String,
    email: String,
    phone: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    user: Option<SessionUser>,
    favorites: Vec<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/session", get(get_session))
        .route("/v1/session/login", post(login))
        .route("/v1/session/logout", post(logout))
}

async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.session.current_user(),
        favorites: state.session.favorites(),
    })
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    if req.full_name.trim().is_empty() || req.email.trim().is_empty() || req.phone.trim().is_empty()
    {
        return Err(AppError::ValidationError(
            "Full name, email and phone are required".to_string(),
        ));
    }

    let user = SessionUser {
        id: Uuid::new_v4(),
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
    };
    state.session.set_current_user(user.clone());

    Ok(Json(user))
}

async fn logout(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.session.clear();
    Json(json!({ "status": "logged_out" }))
}
