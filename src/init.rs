//! Database initialization module
//!
//! Provides one-time setup functionality for the worldvault_init tool.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::db::Database;
use crate::groups::{GroupManager, GroupStore};

const STARTER_SETTINGS: &str = "\
# worldvault settings
debug = 0
optional_shares = []
default_group = \"default\"
group_new_worlds = false
";

/// Initialize a new grouping database
///
/// Creates the SQLite file, runs migrations, and seeds the default world
/// group. Fails if the file already exists.
pub async fn init_database(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "Database file already exists: {}. Remove it first or use a different path.",
            path.display()
        );
    }

    info!("Creating new database at {}", path.display());

    let path_str = path
        .to_str()
        .context("database path is not valid UTF-8")?;
    let db = Database::new(Some(path_str)).await?;

    let groups = GroupManager::new(GroupStore::new(db.pool().clone()));
    groups.ensure_default().await?;

    info!("Database initialization complete");
    Ok(())
}

/// Write a starter settings file. Fails if the file already exists.
pub fn write_starter_settings(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Settings file already exists: {}", path.display());
    }

    std::fs::write(path, STARTER_SETTINGS)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote starter settings to {}", path.display());
    Ok(())
}
