use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use sqlx::{sqlite::SqliteRow, Row};
use shared::{AssignmentStatus, Task, TaskAssignment};

use crate::storage::connection::DbConnection;
use crate::storage::traits::AssignmentStorage;

const ASSIGNMENT_SELECT: &str = r#"
    SELECT ta.id, ta.task_id, ta.minion_id, ta.assigned_on, ta.status,
           t.domain_id, t.name, t.weekly, t.count, t.description
    FROM task_assignments AS ta
    JOIN tasks AS t ON ta.task_id = t.id
"#;

/// Repository for task assignment operations
#[derive(Clone)]
pub struct AssignmentRepository {
    db: DbConnection,
}

impl AssignmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_assignment(row: &SqliteRow, today: NaiveDate) -> Result<TaskAssignment> {
    let status: String = row.try_get("status")?;
    let count: i64 = row.try_get("count")?;
    let assigned_on: NaiveDate = row.try_get("assigned_on")?;

    let task = Task {
        id: row.try_get("task_id")?,
        domain_id: row.try_get("domain_id")?,
        name: row.try_get("name")?,
        weekly: row.try_get("weekly")?,
        count: u32::try_from(count)?,
        description: row.try_get("description")?,
    };

    Ok(TaskAssignment {
        id: row.try_get("id")?,
        task,
        minion_id: row.try_get("minion_id")?,
        assigned_on,
        status: status.parse::<AssignmentStatus>()?,
        age_in_days: (today - assigned_on).num_days(),
    })
}

#[async_trait]
impl AssignmentStorage for AssignmentRepository {
    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<TaskAssignment>> {
        let sql = format!("{} WHERE ta.id = ?", ASSIGNMENT_SELECT);
        let row = sqlx::query(&sql)
            .bind(assignment_id)
            .fetch_optional(self.db.pool())
            .await?;

        let today = Local::now().date_naive();
        row.as_ref().map(|r| row_to_assignment(r, today)).transpose()
    }

    async fn assignments_for_minion(&self, minion_id: i64, include_completed: bool) -> Result<Vec<TaskAssignment>> {
        let sql = if include_completed {
            format!("{} WHERE ta.minion_id = ? ORDER BY ta.assigned_on ASC, ta.id ASC", ASSIGNMENT_SELECT)
        } else {
            format!(
                "{} WHERE ta.minion_id = ? AND ta.status = 'pending' ORDER BY ta.assigned_on ASC, ta.id ASC",
                ASSIGNMENT_SELECT
            )
        };

        let rows = sqlx::query(&sql)
            .bind(minion_id)
            .fetch_all(self.db.pool())
            .await?;

        let today = Local::now().date_naive();
        rows.iter().map(|r| row_to_assignment(r, today)).collect()
    }

    async fn insert_assignment(&self, assignment: &TaskAssignment) -> Result<i64> {
        if assignment.is_no_task() {
            bail!("refusing to store a placeholder assignment");
        }

        let result = sqlx::query(
            r#"
            INSERT INTO task_assignments (task_id, minion_id, assigned_on, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(assignment.task.id)
        .bind(assignment.minion_id)
        .bind(assignment.assigned_on)
        .bind(assignment.status.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_assignment(&self, assignment: &TaskAssignment) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE task_assignments
            SET assigned_on = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(assignment.assigned_on)
        .bind(assignment.status.as_str())
        .bind(assignment.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM task_assignments WHERE id = ?")
            .bind(assignment_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::{DomainRepository, MinionRepository, TaskRepository};
    use crate::storage::traits::{DomainStorage, MinionStorage, TaskStorage};

    async fn setup_test() -> (AssignmentRepository, Task, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let minion = MinionRepository::new(db.clone())
            .find_or_create_minion("gardener@example.com", "Gardener")
            .await
            .unwrap();
        let domain = DomainRepository::new(db.clone())
            .create_domain(minion.id, "Garden", NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
            .await
            .unwrap();
        let task = TaskRepository::new(db.clone())
            .create_task(&Task {
                id: 0,
                domain_id: domain.id,
                name: "Water plants".to_string(),
                weekly: true,
                count: 4,
                description: None,
            })
            .await
            .unwrap();
        (AssignmentRepository::new(db), task, minion.id)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_assignment() {
        let (repo, task, minion_id) = setup_test().await;

        let id = repo
            .insert_assignment(&TaskAssignment::new(task.clone(), minion_id, day(5)))
            .await
            .expect("Failed to insert assignment");

        let loaded = repo.get_assignment(id).await.unwrap().expect("assignment should exist");
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.task, task);
        assert_eq!(loaded.assigned_on, day(5));
        assert_eq!(loaded.status, AssignmentStatus::Pending);
        assert_eq!(loaded.age_in_days, (Local::now().date_naive() - day(5)).num_days());
    }

    #[tokio::test]
    async fn test_refuses_no_task() {
        let (repo, _task, minion_id) = setup_test().await;
        let result = repo.insert_assignment(&TaskAssignment::no_task(minion_id, day(5))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_assignments_for_minion_filters_completed() {
        let (repo, task, minion_id) = setup_test().await;

        let first = repo.insert_assignment(&TaskAssignment::new(task.clone(), minion_id, day(3))).await.unwrap();
        repo.insert_assignment(&TaskAssignment::new(task.clone(), minion_id, day(2))).await.unwrap();

        let mut done = repo.get_assignment(first).await.unwrap().unwrap();
        done.status = AssignmentStatus::DoneAndAvailable;
        repo.update_assignment(&done).await.unwrap();

        let pending = repo.assignments_for_minion(minion_id, false).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].assigned_on, day(2));

        let all = repo.assignments_for_minion(minion_id, true).await.unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|a| a.assigned_on).collect();
        assert_eq!(dates, vec![day(2), day(3)]);

        assert!(repo.assignments_for_minion(minion_id + 1, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_assignment() {
        let (repo, task, minion_id) = setup_test().await;
        let id = repo.insert_assignment(&TaskAssignment::new(task, minion_id, day(7))).await.unwrap();

        assert!(repo.delete_assignment(id).await.unwrap());
        assert!(!repo.delete_assignment(id).await.unwrap());
        assert!(repo.get_assignment(id).await.unwrap().is_none());
    }
}
