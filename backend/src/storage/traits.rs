//! # Storage Traits
//!
//! The interfaces the domain layer consumes. Services hold these as trait
//! objects so tests can swap any of them for a double.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{Domain, Minion, Task, TaskAssignment};

#[async_trait]
pub trait MinionStorage: Send + Sync {
    /// Load the minion with this email, creating it on first sight
    async fn find_or_create_minion(&self, email: &str, name: &str) -> Result<Minion>;

    async fn get_minion(&self, minion_id: i64) -> Result<Option<Minion>>;

    /// All minions ordered by id
    async fn list_minions(&self) -> Result<Vec<Minion>>;

    /// Returns false when no such minion exists
    async fn rename_minion(&self, minion_id: i64, name: &str) -> Result<bool>;
}

#[async_trait]
pub trait DomainStorage: Send + Sync {
    /// Create a domain owned by `owner`; its reset date starts at `today`
    async fn create_domain(&self, owner: i64, name: &str, today: NaiveDate) -> Result<Domain>;

    async fn get_domain(&self, domain_id: i64) -> Result<Option<Domain>>;

    /// Domains the minion owns or has joined
    async fn domains_for_minion(&self, minion_id: i64) -> Result<Vec<Domain>>;

    /// Delete a domain together with its tasks and their assignments
    async fn delete_domain(&self, domain_id: i64) -> Result<()>;

    /// Add a member to a domain; joining twice is a no-op
    async fn join_domain(&self, domain_id: i64, minion_id: i64) -> Result<()>;

    /// Remove every completed assignment of the domain's tasks and set the
    /// domain's `last_reset_date` to `today`
    async fn reset_completed_tasks(&self, domain_id: i64, today: NaiveDate) -> Result<u64>;
}

#[async_trait]
pub trait TaskStorage: Send + Sync {
    /// Store a new template, returning it with its id
    async fn create_task(&self, task: &Task) -> Result<Task>;

    /// All templates of a domain with their configured counts
    async fn tasks_for_domain(&self, domain_id: i64) -> Result<Vec<Task>>;

    /// Templates of a domain that still have cards left this month.
    ///
    /// `count` is the configured count minus the stashed (retired) assignments
    /// and minus the cards other minions hold as pending. `minion_id`'s own
    /// pending assignments are left in; templates with nothing left are omitted.
    async fn available_tasks_for_domain(&self, domain_id: i64, minion_id: i64) -> Result<Vec<Task>>;
}

#[async_trait]
pub trait AssignmentStorage: Send + Sync {
    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<TaskAssignment>>;

    /// A minion's assignments across all domains, oldest first.
    /// Completed ones are only included when `include_completed` is set.
    async fn assignments_for_minion(&self, minion_id: i64, include_completed: bool) -> Result<Vec<TaskAssignment>>;

    /// Persist a new assignment, returning its id
    async fn insert_assignment(&self, assignment: &TaskAssignment) -> Result<i64>;

    /// Write back `assigned_on` and `status`
    async fn update_assignment(&self, assignment: &TaskAssignment) -> Result<()>;

    /// Returns false when nothing was deleted
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
}
