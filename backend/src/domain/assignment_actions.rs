//! What a minion can do with a chore it was handed: finish it, or give it
//! back untouched.

use anyhow::Result;
use shared::{AssignmentStatus, TaskAssignment};
use std::sync::Arc;
use tracing::info;

use super::error::ValidationError;
use crate::storage::{AssignmentStorage, Storage};

#[derive(Clone)]
pub struct AssignmentActions {
    assignments: Arc<dyn AssignmentStorage>,
}

impl AssignmentActions {
    pub fn new(storage: &Storage) -> Self {
        Self {
            assignments: storage.assignments.clone(),
        }
    }

    /// Mark a pending assignment as done.
    ///
    /// With `return_to_pool` the chore can be handed out again this month,
    /// otherwise it stays retired until the domain's next reset.
    pub async fn complete(&self, minion_id: i64, assignment_id: i64, return_to_pool: bool) -> Result<TaskAssignment> {
        let mut assignment = self.pending_assignment(minion_id, assignment_id).await?;

        assignment.status = if return_to_pool {
            AssignmentStatus::DoneAndAvailable
        } else {
            AssignmentStatus::DoneAndStashed
        };
        self.assignments.update_assignment(&assignment).await?;

        info!(
            "Minion {} completed assignment {} ({}), status {}",
            minion_id, assignment_id, assignment.task.name, assignment.status
        );
        Ok(assignment)
    }

    /// Give a pending assignment back without doing it
    pub async fn return_assignment(&self, minion_id: i64, assignment_id: i64) -> Result<()> {
        let assignment = self.pending_assignment(minion_id, assignment_id).await?;

        self.assignments.delete_assignment(assignment.id).await?;
        info!("Minion {} returned assignment {} ({})", minion_id, assignment_id, assignment.task.name);
        Ok(())
    }

    async fn pending_assignment(&self, minion_id: i64, assignment_id: i64) -> Result<TaskAssignment> {
        let assignment = self
            .assignments
            .get_assignment(assignment_id)
            .await?
            .ok_or(ValidationError::AssignmentNotFound(assignment_id))?;

        if assignment.minion_id != minion_id {
            return Err(ValidationError::NotAssignee(assignment_id).into());
        }
        if !assignment.is_pending() {
            return Err(ValidationError::NotPending(assignment_id).into());
        }
        Ok(assignment)
    }
}
