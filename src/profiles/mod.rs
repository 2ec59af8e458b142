//! Stashed inventory profiles
//!
//! When a player leaves a world group, their inventory is stored here under
//! the group's profile key and restored next time they enter a world of
//! that group. Worlds outside any group use an implicit `world:<name>` key
//! so nothing is ever lost crossing into ungrouped territory.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::debug;

use crate::inventory::Inventory;

/// Profile key for a named world group
pub fn group_key(group: &str) -> String {
    format!("group:{}", group)
}

/// Profile key for a world that belongs to no group
pub fn world_key(world: &str) -> String {
    format!("world:{}", world)
}

/// Per-(profile key, player) inventory snapshots with database backing
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Create a new profile store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a player's inventory snapshot under a profile key
    pub async fn save(&self, key: &str, player: &str, inventory: &Inventory) -> Result<()> {
        let serialized = serde_json::to_string(inventory)?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO player_profiles (id, profile_key, player, inventory, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(profile_key, player) DO UPDATE SET inventory = ?, updated_at = ?
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(key)
        .bind(player)
        .bind(&serialized)
        .bind(&updated_at)
        .bind(&serialized)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Stored profile {} for player {}", key, player);
        Ok(())
    }

    /// Load a player's snapshot for a profile key, if one was stored
    pub async fn load(&self, key: &str, player: &str) -> Result<Option<Inventory>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT inventory FROM player_profiles WHERE profile_key = ? AND player = ?",
        )
        .bind(key)
        .bind(player)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((serialized,)) => Ok(Some(serde_json::from_str(&serialized)?)),
            None => Ok(None),
        }
    }

    /// Delete a stored snapshot. Returns true if one existed.
    pub async fn delete(&self, key: &str, player: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM player_profiles WHERE profile_key = ? AND player = ?")
                .bind(key)
                .bind(player)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
