//! World group persistence and CRUD operations

use anyhow::Result;
use sqlx::SqlitePool;

use super::WorldGroup;

/// Group storage with database backing
pub struct GroupStore {
    pool: SqlitePool,
}

impl GroupStore {
    /// Create a new group store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a group definition
    pub async fn upsert(&self, group: &WorldGroup) -> Result<()> {
        let worlds = serde_json::to_string(&group.worlds)?;
        let shares = serde_json::to_string(&group.shares)?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO world_groups (name, worlds, shares, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET worlds = ?, shares = ?, updated_at = ?
            "#,
        )
        .bind(&group.name)
        .bind(&worlds)
        .bind(&shares)
        .bind(&updated_at)
        .bind(&worlds)
        .bind(&shares)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a group by name
    pub async fn get(&self, name: &str) -> Result<Option<WorldGroup>> {
        let row: Option<GroupRow> = sqlx::query_as(
            "SELECT name, worlds, shares FROM world_groups WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.into_group()?)),
            None => Ok(None),
        }
    }

    /// Load every stored group definition
    pub async fn load_all(&self) -> Result<Vec<WorldGroup>> {
        let rows: Vec<GroupRow> =
            sqlx::query_as("SELECT name, worlds, shares FROM world_groups ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.into_group()).collect()
    }

    /// Delete a group definition
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM world_groups WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row for a group
#[derive(sqlx::FromRow)]
struct GroupRow {
    name: String,
    worlds: String,
    shares: String,
}

impl GroupRow {
    fn into_group(self) -> Result<WorldGroup> {
        Ok(WorldGroup {
            name: self.name,
            worlds: serde_json::from_str(&self.worlds)?,
            shares: serde_json::from_str(&self.shares)?,
        })
    }
}
