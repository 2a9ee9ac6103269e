//! # REST API Interface Layer
//!
//! HTTP endpoints of the chore scheduler, all nested under `/api`:
//!
//! - `POST /minions`, `GET /minions/:id`, `GET /minions/:id/overview`
//! - `POST /minions/:id/domains`, `DELETE /minions/:id/domains/:domain_id`,
//!   `POST /minions/:id/domains/:domain_id/join`
//! - `GET /domains/:domain_id/tasks`, `POST /domains/:domain_id/tasks`
//! - `POST /minions/:id/assignments/:assignment_id/done`,
//!   `POST /minions/:id/assignments/:assignment_id/return`
//!
//! Domain errors become status codes in [`error_response`].

pub mod assignment_apis;
pub mod domain_apis;
pub mod locks;
pub mod minion_apis;
pub mod task_apis;

pub use locks::MinionLocks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tracing::{error, warn};

use crate::domain::{SchedulerError, ValidationError};
use crate::AppState;

/// All API routes, relative to `/api`
pub fn api_router() -> Router<AppState> {
    let minions = minion_apis::router()
        .merge(domain_apis::router())
        .merge(assignment_apis::router());

    Router::new()
        .nest("/minions", minions)
        .nest("/domains", task_apis::router())
}

/// Status code for a failed service call
pub fn status_for(e: &anyhow::Error) -> StatusCode {
    if let Some(validation) = e.downcast_ref::<ValidationError>() {
        return match validation {
            ValidationError::NotDomainOwner { .. } | ValidationError::NotAssignee(_) => StatusCode::FORBIDDEN,
            ValidationError::DomainNotFound(_)
            | ValidationError::MinionNotFound(_)
            | ValidationError::AssignmentNotFound(_) => StatusCode::NOT_FOUND,
            ValidationError::NotPending(_) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
    }
    if let Some(SchedulerError::Consistency { .. }) = e.downcast_ref::<SchedulerError>() {
        return StatusCode::CONFLICT;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Log a failed service call and turn it into a response.
///
/// Storage failures are reported with `what` only; everything else carries
/// the error message.
pub fn error_response(what: &str, e: anyhow::Error) -> Response {
    let status = status_for(&e);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("{}: {:?}", what, e);
        (status, what.to_string()).into_response()
    } else {
        warn!("{}: {}", what, e);
        (status, e.to_string()).into_response()
    }
}
