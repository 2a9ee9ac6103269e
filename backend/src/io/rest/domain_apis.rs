//! # REST API for Domains
//!
//! Endpoints for creating, joining and deleting a minion's domains.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use shared::CreateDomainRequest;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Domain routes, nested below `/minions`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:minion_id/domains", post(create_domain))
        .route("/:minion_id/domains/:domain_id", delete(delete_domain))
        .route("/:minion_id/domains/:domain_id/join", post(join_domain))
}

pub async fn create_domain(
    State(state): State<AppState>,
    Path(minion_id): Path<i64>,
    Json(request): Json<CreateDomainRequest>,
) -> impl IntoResponse {
    info!("POST /api/minions/{}/domains - name: {}", minion_id, request.name);

    match state.domain_service.create(minion_id, &request.name).await {
        Ok(domain) => (StatusCode::CREATED, Json(domain)).into_response(),
        Err(e) => error_response("Error creating domain", e),
    }
}

pub async fn delete_domain(
    State(state): State<AppState>,
    Path((minion_id, domain_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("DELETE /api/minions/{}/domains/{}", minion_id, domain_id);

    match state.domain_service.delete(minion_id, domain_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error deleting domain", e),
    }
}

pub async fn join_domain(
    State(state): State<AppState>,
    Path((minion_id, domain_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("POST /api/minions/{}/domains/{}/join", minion_id, domain_id);

    match state.domain_service.join(minion_id, domain_id).await {
        Ok(domain) => (StatusCode::OK, Json(domain)).into_response(),
        Err(e) => error_response("Error joining domain", e),
    }
}
