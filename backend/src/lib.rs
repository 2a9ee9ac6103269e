//! # Taskmaster Backend
//!
//! Hands out household chores, one per domain per day, to every member of a
//! domain.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API under /api)
//!     ↓
//! Domain Layer (scheduling engine, management services)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```
//!
//! The binary in `main.rs` loads the [`config::AppConfig`], builds an
//! [`AppState`] with [`initialize_backend`] and serves [`create_router`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AssignmentActions, AssignmentService, DomainService, MinionService, OverviewService, RandomShuffler, Shuffler,
    TaskService,
};
use crate::io::rest::MinionLocks;
use crate::storage::{DbConnection, Storage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub minion_service: MinionService,
    pub domain_service: DomainService,
    pub task_service: TaskService,
    pub assignment_service: AssignmentService,
    pub assignment_actions: AssignmentActions,
    pub overview_service: OverviewService,
    pub minion_locks: MinionLocks,
}

impl AppState {
    pub fn new(storage: Storage, shuffler: Arc<dyn Shuffler>) -> Self {
        let assignment_service = AssignmentService::new(storage.clone(), shuffler);
        Self {
            minion_service: MinionService::new(&storage),
            domain_service: DomainService::new(storage.clone()),
            task_service: TaskService::new(storage.clone()),
            assignment_actions: AssignmentActions::new(&storage),
            overview_service: OverviewService::new(storage, assignment_service.clone()),
            assignment_service,
            minion_locks: MinionLocks::default(),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let storage = Storage::sqlite(db);

    Ok(AppState::new(storage, Arc::new(RandomShuffler)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
