//! World groups - named sets of worlds sharing one inventory state
//!
//! Group names follow DNS-label-style naming:
//! - 1-64 characters
//! - Lowercase alphanumeric, hyphens, underscores
//! - Must start and end with alphanumeric

mod store;

pub use store::GroupStore;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::sharing::ShareSet;

/// Name of the group created on first start
pub const DEFAULT_GROUP: &str = "default";

/// Worlds seeded into the default group on a fresh database
pub const DEFAULT_WORLDS: [&str; 3] = ["world", "world_nether", "world_the_end"];

/// Group operation errors
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("invalid group name '{0}': must be 1-64 lowercase alphanumeric/'-'/'_' characters starting and ending alphanumeric")]
    InvalidName(String),

    #[error("no group named '{0}'")]
    UnknownGroup(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

static GROUP_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9_-]*[a-z0-9])?$").unwrap());

/// Validate and normalize a group name to lowercase
pub fn validate_group_name(name: &str) -> Result<String, GroupError> {
    let normalized = name.to_lowercase();
    if normalized.is_empty() || normalized.len() > 64 || !GROUP_NAME_REGEX.is_match(&normalized) {
        return Err(GroupError::InvalidName(name.to_string()));
    }
    Ok(normalized)
}

/// A named collection of worlds sharing one inventory state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGroup {
    pub name: String,
    /// Member world identifiers; may be empty
    pub worlds: BTreeSet<String>,
    /// Data categories shared within this group
    pub shares: ShareSet,
}

impl WorldGroup {
    /// Create an empty group
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            worlds: BTreeSet::new(),
            shares: ShareSet::new(),
        }
    }

    pub fn contains_world(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    /// Human-readable one-line summary
    pub fn describe(&self) -> String {
        let worlds = if self.worlds.is_empty() {
            "none".to_string()
        } else {
            self.worlds.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        format!(
            "Group: {} | Worlds: {} | Shares: {}",
            self.name,
            worlds,
            self.shares.describe()
        )
    }
}

/// Manages world group definitions, cached in memory and persisted in SQLite
pub struct GroupManager {
    groups: RwLock<HashMap<String, WorldGroup>>,
    store: GroupStore,
}

impl GroupManager {
    /// Create a manager over the given store; call `load` before use
    pub fn new(store: GroupStore) -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Replace the in-memory map with the stored definitions.
    /// Returns the number of groups loaded.
    pub async fn load(&self) -> Result<usize, GroupError> {
        let loaded = self.store.load_all().await?;
        let count = loaded.len();

        let mut groups = self.groups.write().await;
        groups.clear();
        for group in loaded {
            groups.insert(group.name.clone(), group);
        }

        info!("Loaded {} world group(s)", count);
        Ok(count)
    }

    /// Create the default group with the conventional worlds if missing
    pub async fn ensure_default(&self) -> Result<(), GroupError> {
        if self.group(DEFAULT_GROUP).await.is_some() {
            return Ok(());
        }

        let mut group = WorldGroup::new(DEFAULT_GROUP);
        group.worlds = DEFAULT_WORLDS.iter().map(|w| w.to_string()).collect();
        group.shares = ShareSet::all();

        self.store.upsert(&group).await?;
        self.groups
            .write()
            .await
            .insert(group.name.clone(), group);

        info!("Created default world group");
        Ok(())
    }

    /// Get a snapshot of a group by name
    pub async fn group(&self, name: &str) -> Option<WorldGroup> {
        self.groups.read().await.get(name).cloned()
    }

    /// Names of all known groups, sorted
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// One-line summary of a group, if it exists
    pub async fn describe(&self, name: &str) -> Option<String> {
        self.groups.read().await.get(name).map(|g| g.describe())
    }

    /// Find the group containing a world
    pub async fn group_for_world(&self, world: &str) -> Option<String> {
        self.groups
            .read()
            .await
            .values()
            .find(|g| g.contains_world(world))
            .map(|g| g.name.clone())
    }

    /// Add a world to a group, creating the group if it doesn't exist
    pub async fn add_world(&self, world: &str, group_name: &str) -> Result<(), GroupError> {
        let name = validate_group_name(group_name)?;

        let mut updated = match self.group(&name).await {
            Some(g) => g,
            None => WorldGroup::new(&name),
        };
        if !updated.worlds.insert(world.to_string()) {
            return Ok(());
        }

        // Persist before publishing the change
        self.store.upsert(&updated).await?;
        self.groups.write().await.insert(name.clone(), updated);

        debug!("Added world '{}' to group '{}'", world, name);
        Ok(())
    }

    /// Remove a world from a group.
    /// Returns true if the world was present. Removing a world that is not
    /// in the group is a no-op, and a group left with no worlds remains
    /// defined and queryable.
    pub async fn remove_world(&self, world: &str, group_name: &str) -> Result<bool, GroupError> {
        let name = validate_group_name(group_name)?;

        let mut updated = self
            .group(&name)
            .await
            .ok_or_else(|| GroupError::UnknownGroup(name.clone()))?;
        if !updated.worlds.remove(world) {
            return Ok(false);
        }

        self.store.upsert(&updated).await?;
        self.groups.write().await.insert(name.clone(), updated);

        debug!("Removed world '{}' from group '{}'", world, name);
        Ok(true)
    }
}
