use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};
use shared::Task;
use tracing::error;

use crate::storage::connection::DbConnection;
use crate::storage::traits::TaskStorage;

/// Repository for task template operations
#[derive(Clone)]
pub struct TaskRepository {
    db: DbConnection,
}

impl TaskRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_task(row: &SqliteRow, count_column: &str) -> Result<Task> {
    let count: i64 = row.try_get(count_column)?;
    Ok(Task {
        id: row.try_get("id")?,
        domain_id: row.try_get("domain_id")?,
        name: row.try_get("name")?,
        weekly: row.try_get("weekly")?,
        count: u32::try_from(count)?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl TaskStorage for TaskRepository {
    async fn create_task(&self, task: &Task) -> Result<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (domain_id, name, weekly, count, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.domain_id)
        .bind(&task.name)
        .bind(task.weekly)
        .bind(i64::from(task.count))
        .bind(&task.description)
        .execute(self.db.pool())
        .await?;

        Ok(Task {
            id: result.last_insert_rowid(),
            ..task.clone()
        })
    }

    async fn tasks_for_domain(&self, domain_id: i64) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, domain_id, name, weekly, count, description
            FROM tasks
            WHERE domain_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(domain_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(|row| row_to_task(row, "count")).collect()
    }

    async fn available_tasks_for_domain(&self, domain_id: i64, minion_id: i64) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.domain_id, t.name, t.weekly, t.description,
                   t.count - COALESCE(ta.used, 0) AS available
            FROM tasks t
            LEFT JOIN (
                SELECT task_id, COUNT(*) AS used
                FROM task_assignments
                WHERE status = 'done_and_stashed'
                   OR (status = 'pending' AND minion_id != ?)
                GROUP BY task_id
            ) ta ON ta.task_id = t.id
            WHERE t.domain_id = ?
            ORDER BY t.id ASC
            "#,
        )
        .bind(minion_id)
        .bind(domain_id)
        .fetch_all(self.db.pool())
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            let available: i64 = row.try_get("available")?;
            if available < 0 {
                error!("Available count below 0 ({}) for domain {}", available, domain_id);
                return Err(anyhow!(
                    "more stashed and handed out assignments than cards for a task in domain {}",
                    domain_id
                ));
            }
            if available == 0 {
                continue;
            }
            result.push(row_to_task(row, "available")?);
        }

        Ok(result)
    }
}
