use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};
use shared::Domain;
use tracing::info;

use crate::storage::connection::DbConnection;
use crate::storage::traits::DomainStorage;

const DOMAIN_COLUMNS: &str = r#"
    d.id, d.owner, d.name, d.last_reset_date,
    (SELECT COUNT(*) FROM tasks t WHERE t.domain_id = d.id) AS task_count
"#;

/// Repository for domain operations
#[derive(Clone)]
pub struct DomainRepository {
    db: DbConnection,
}

impl DomainRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_domain(row: &SqliteRow) -> Result<Domain> {
    Ok(Domain {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        last_reset_date: row.try_get("last_reset_date")?,
        task_count: row.try_get("task_count")?,
    })
}

#[async_trait]
impl DomainStorage for DomainRepository {
    async fn create_domain(&self, owner: i64, name: &str, today: NaiveDate) -> Result<Domain> {
        let result = sqlx::query(
            r#"
            INSERT INTO domains (owner, name, last_reset_date)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(owner)
        .bind(name)
        .bind(today)
        .execute(self.db.pool())
        .await?;

        Ok(Domain {
            id: result.last_insert_rowid(),
            owner,
            name: name.to_string(),
            last_reset_date: today,
            task_count: 0,
        })
    }

    async fn get_domain(&self, domain_id: i64) -> Result<Option<Domain>> {
        let sql = format!("SELECT {} FROM domains d WHERE d.id = ?", DOMAIN_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(domain_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_domain).transpose()
    }

    async fn domains_for_minion(&self, minion_id: i64) -> Result<Vec<Domain>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM domains d
            WHERE d.owner = ?
               OR d.id IN (SELECT domain_id FROM domain_members WHERE minion_id = ?)
            ORDER BY d.id ASC
            "#,
            DOMAIN_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(minion_id)
            .bind(minion_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_domain).collect()
    }

    async fn delete_domain(&self, domain_id: i64) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            DELETE FROM task_assignments
            WHERE task_id IN (SELECT id FROM tasks WHERE domain_id = ?)
            "#,
        )
        .bind(domain_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM tasks WHERE domain_id = ?")
            .bind(domain_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM domain_members WHERE domain_id = ?")
            .bind(domain_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM domains WHERE id = ?")
            .bind(domain_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn join_domain(&self, domain_id: i64, minion_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO domain_members (domain_id, minion_id)
            VALUES (?, ?)
            "#,
        )
        .bind(domain_id)
        .bind(minion_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn reset_completed_tasks(&self, domain_id: i64, today: NaiveDate) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM task_assignments
            WHERE status != 'pending'
              AND task_id IN (SELECT id FROM tasks WHERE domain_id = ?)
            "#,
        )
        .bind(domain_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("UPDATE domains SET last_reset_date = ? WHERE id = ?")
            .bind(today)
            .bind(domain_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Reset {} completed assignments for domain {}", deleted, domain_id);
        Ok(deleted)
    }
}
