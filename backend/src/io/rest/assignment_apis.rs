//! # REST API for Assignments
//!
//! Finishing a chore, or handing it back undone.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use shared::CompleteAssignmentRequest;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Assignment routes, nested below `/minions`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:minion_id/assignments/:assignment_id/done", post(complete_assignment))
        .route("/:minion_id/assignments/:assignment_id/return", post(return_assignment))
}

pub async fn complete_assignment(
    State(state): State<AppState>,
    Path((minion_id, assignment_id)): Path<(i64, i64)>,
    Json(request): Json<CompleteAssignmentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/minions/{}/assignments/{}/done - return_task: {}",
        minion_id, assignment_id, request.return_task
    );

    let _guard = state.minion_locks.lock(minion_id).await;
    match state
        .assignment_actions
        .complete(minion_id, assignment_id, request.return_task)
        .await
    {
        Ok(assignment) => (StatusCode::OK, Json(assignment)).into_response(),
        Err(e) => error_response("Error completing assignment", e),
    }
}

pub async fn return_assignment(
    State(state): State<AppState>,
    Path((minion_id, assignment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("POST /api/minions/{}/assignments/{}/return", minion_id, assignment_id);

    let _guard = state.minion_locks.lock(minion_id).await;
    match state.assignment_actions.return_assignment(minion_id, assignment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error returning assignment", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shuffle::InOrder;
    use crate::storage::{AssignmentStorage, DbConnection, DomainStorage, MinionStorage, Storage, TaskStorage};
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use chrono::NaiveDate;
    use serde_json::json;
    use shared::{Task, TaskAssignment};
    use std::sync::Arc;
    use tower::util::ServiceExt; // for `oneshot`

    struct TestApp {
        app: Router,
        storage: Storage,
        minion: i64,
        other: i64,
        assignment: i64,
    }

    async fn setup_test_app() -> TestApp {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let storage = Storage::sqlite(db);
        let day = NaiveDate::from_ymd_opt(2019, 1, 10).unwrap();

        let minion = storage.minions.find_or_create_minion("m@example.com", "M").await.unwrap();
        let other = storage.minions.find_or_create_minion("o@example.com", "O").await.unwrap();
        let domain = storage.domains.create_domain(minion.id, "House", day).await.unwrap();
        let task = storage
            .tasks
            .create_task(&Task {
                id: 0,
                domain_id: domain.id,
                name: "Dishes".to_string(),
                weekly: false,
                count: 1,
                description: None,
            })
            .await
            .unwrap();
        let assignment = storage
            .assignments
            .insert_assignment(&TaskAssignment::new(task, minion.id, day))
            .await
            .unwrap();

        TestApp {
            app: router().with_state(AppState::new(storage.clone(), Arc::new(InOrder))),
            storage,
            minion: minion.id,
            other: other.id,
            assignment,
        }
    }

    async fn post(app: &Router, uri: String, body: Option<serde_json::Value>) -> StatusCode {
        let builder = Request::builder().method(Method::POST).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_complete_assignment() {
        let t = setup_test_app().await;

        let status = post(
            &t.app,
            format!("/{}/assignments/{}/done", t.minion, t.assignment),
            Some(json!({ "return_task": true })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let stored = t.storage.assignments.get_assignment(t.assignment).await.unwrap().unwrap();
        assert!(stored.status.is_completed());
    }

    #[tokio::test]
    async fn test_complete_someone_elses_assignment() {
        let t = setup_test_app().await;

        let status = post(
            &t.app,
            format!("/{}/assignments/{}/done", t.other, t.assignment),
            Some(json!({ "return_task": false })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_return_assignment() {
        let t = setup_test_app().await;

        let status = post(&t.app, format!("/{}/assignments/{}/return", t.minion, t.assignment), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let status = post(&t.app, format!("/{}/assignments/{}/return", t.minion, t.assignment), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
