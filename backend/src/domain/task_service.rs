use anyhow::Result;
use shared::{CreateTaskRequest, DomainTasksResponse, Task};
use tracing::info;

use super::error::{validate_name, ValidationError};
use crate::storage::Storage;

/// Service for the chore templates of a domain
#[derive(Clone)]
pub struct TaskService {
    storage: Storage,
}

impl TaskService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Add a template to a domain
    pub async fn create(&self, domain_id: i64, request: CreateTaskRequest) -> Result<Task> {
        let name = validate_name(&request.name)?;
        if request.count == 0 {
            return Err(ValidationError::ZeroCount.into());
        }
        if self.storage.domains.get_domain(domain_id).await?.is_none() {
            return Err(ValidationError::DomainNotFound(domain_id).into());
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let task = Task {
            id: 0,
            domain_id,
            name,
            weekly: request.weekly,
            count: request.count,
            description,
        };
        let task = self.storage.tasks.create_task(&task).await?;

        info!(
            "Created task {} ({}) in domain {}: count {}, weekly {}",
            task.id, task.name, domain_id, task.count, task.weekly
        );
        Ok(task)
    }

    /// A domain's templates, daily ones first
    pub async fn domain_tasks(&self, domain_id: i64) -> Result<DomainTasksResponse> {
        let domain = self
            .storage
            .domains
            .get_domain(domain_id)
            .await?
            .ok_or(ValidationError::DomainNotFound(domain_id))?;

        let (weekly, daily): (Vec<Task>, Vec<Task>) = self
            .storage
            .tasks
            .tasks_for_domain(domain_id)
            .await?
            .into_iter()
            .partition(|t| t.weekly);

        Ok(DomainTasksResponse { domain, daily, weekly })
    }
}
