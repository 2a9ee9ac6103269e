use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};
use shared::Minion;
use tracing::info;

use crate::storage::connection::DbConnection;
use crate::storage::traits::MinionStorage;

/// Repository for minion operations
#[derive(Clone)]
pub struct MinionRepository {
    db: DbConnection,
}

impl MinionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_minion(row: &SqliteRow) -> Result<Minion> {
    Ok(Minion {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
    })
}

#[async_trait]
impl MinionStorage for MinionRepository {
    async fn find_or_create_minion(&self, email: &str, name: &str) -> Result<Minion> {
        let inserted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO minions (email, name)
            VALUES (?, ?)
            "#,
        )
        .bind(email)
        .bind(name)
        .execute(self.db.pool())
        .await?;

        if inserted.rows_affected() > 0 {
            info!("Created minion {} ({})", name, email);
        }

        let row = sqlx::query(
            r#"
            SELECT id, name, email
            FROM minions
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_one(self.db.pool())
        .await?;

        row_to_minion(&row)
    }

    async fn get_minion(&self, minion_id: i64) -> Result<Option<Minion>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email
            FROM minions
            WHERE id = ?
            "#,
        )
        .bind(minion_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_minion).transpose()
    }

    async fn list_minions(&self) -> Result<Vec<Minion>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email
            FROM minions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_minion).collect()
    }

    async fn rename_minion(&self, minion_id: i64, name: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE minions SET name = ? WHERE id = ?")
            .bind(name)
            .bind(minion_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
