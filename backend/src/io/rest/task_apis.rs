//! # REST API for Task Templates

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::CreateTaskRequest;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Task routes, nested below `/domains`
pub fn router() -> Router<AppState> {
    Router::new().route("/:domain_id/tasks", get(list_tasks).post(create_task))
}

/// The domain's templates split into daily and weekly ones
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(domain_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/domains/{}/tasks", domain_id);

    match state.task_service.domain_tasks(domain_id).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => error_response("Error listing tasks", e),
    }
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(domain_id): Path<i64>,
    Json(request): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    info!("POST /api/domains/{}/tasks - request: {:?}", domain_id, request);

    match state.task_service.create(domain_id, request).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => error_response("Error creating task", e),
    }
}
