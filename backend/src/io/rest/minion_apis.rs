//! # REST API for Minions
//!
//! Sign-in and the overview of a minion's chores.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::CreateMinionRequest;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Create a router for minion related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sign_in))
        .route("/:minion_id", get(get_minion))
        .route("/:minion_id/overview", get(get_overview))
}

/// Find or create the minion with the given email
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<CreateMinionRequest>,
) -> impl IntoResponse {
    info!("POST /api/minions - email: {}", request.email);

    match state.minion_service.find_or_create(&request.email, &request.name).await {
        Ok(minion) => (StatusCode::OK, Json(minion)).into_response(),
        Err(e) => error_response("Error signing in", e),
    }
}

pub async fn get_minion(
    State(state): State<AppState>,
    Path(minion_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/minions/{}", minion_id);

    match state.minion_service.get(minion_id).await {
        Ok(Some(minion)) => (StatusCode::OK, Json(minion)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Minion not found").into_response(),
        Err(e) => error_response("Error retrieving minion", e),
    }
}

/// Catch up on missed days and return today's, this week's and overdue chores
pub async fn get_overview(
    State(state): State<AppState>,
    Path(minion_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/minions/{}/overview", minion_id);

    let _guard = state.minion_locks.lock(minion_id).await;
    match state.overview_service.overview(minion_id).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => error_response("Error building overview", e),
    }
}
