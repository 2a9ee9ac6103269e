//! # Storage Module
//!
//! Persistence for minions, domains, task templates and assignments.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`repositories`] are the production implementation. A
//! [`Storage`] bundles one implementation of each trait so services can be
//! built from a single value and tests can replace individual parts.

pub mod connection;
pub mod repositories;
pub mod traits;

use std::sync::Arc;

pub use connection::DbConnection;
pub use repositories::{AssignmentRepository, DomainRepository, MinionRepository, TaskRepository};
pub use traits::{AssignmentStorage, DomainStorage, MinionStorage, TaskStorage};

/// The storage collaborator handed to the domain services
#[derive(Clone)]
pub struct Storage {
    pub minions: Arc<dyn MinionStorage>,
    pub domains: Arc<dyn DomainStorage>,
    pub tasks: Arc<dyn TaskStorage>,
    pub assignments: Arc<dyn AssignmentStorage>,
}

impl Storage {
    /// SQLite repositories sharing one connection pool
    pub fn sqlite(db: DbConnection) -> Self {
        Self {
            minions: Arc::new(MinionRepository::new(db.clone())),
            domains: Arc::new(DomainRepository::new(db.clone())),
            tasks: Arc::new(TaskRepository::new(db.clone())),
            assignments: Arc::new(AssignmentRepository::new(db)),
        }
    }
}
