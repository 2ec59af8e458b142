//! worldvault - per-world-group inventory sharing engine
//!
//! World groups tie sets of worlds to one shared inventory state per
//! player. The engine routes host commands, keeps runtime configuration
//! overrides, migrates inventories between players, and swaps stashed
//! profiles when a player crosses group boundaries.

pub mod commands;
pub mod config;
pub mod db;
pub mod groups;
pub mod host;
pub mod init;
pub mod inventory;
pub mod migration;
pub mod profiles;
pub mod sharing;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use commands::CommandRouter;
use config::{ConfigStore, PluginSettings};
use db::Database;
use groups::{GroupManager, GroupStore};
use host::{CommandSender, PlayerDirectory};
use inventory::Inventory;
use migration::MigrationService;
use profiles::ProfileStore;

/// Engine configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// SQLite database path; None = in-memory
    pub db_path: Option<String>,
    /// Settings TOML path; None = built-in defaults
    pub settings_path: Option<PathBuf>,
}

/// The assembled engine instance
pub struct Engine {
    db: Arc<Database>,
    config: Arc<ConfigStore>,
    groups: Arc<GroupManager>,
    profiles: Arc<ProfileStore>,
    players: Arc<dyn PlayerDirectory>,
    router: CommandRouter,
}

impl Engine {
    /// Assemble an engine over the host's player directory
    pub async fn new(config: Config, players: Arc<dyn PlayerDirectory>) -> Result<Self> {
        let settings = PluginSettings::load(config.settings_path.as_deref())?;
        let db = Arc::new(Database::new(config.db_path.as_deref()).await?);

        let config_store = Arc::new(ConfigStore::new(settings));
        let groups = Arc::new(GroupManager::new(GroupStore::new(db.pool().clone())));
        groups.load().await?;
        groups.ensure_default().await?;

        let profiles = Arc::new(ProfileStore::new(db.pool().clone()));
        let migration = Arc::new(MigrationService::new(players.clone()));
        let router = CommandRouter::new(
            config_store.clone(),
            groups.clone(),
            migration,
            config.settings_path.clone(),
        );

        info!("worldvault engine ready");
        Ok(Self {
            db,
            config: config_store,
            groups,
            profiles,
            players,
            router,
        })
    }

    /// Host command callback; see [`CommandRouter::on_command`]
    pub async fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &str,
        label: &str,
        args: &[&str],
    ) -> bool {
        self.router.on_command(sender, command, label, args).await
    }

    /// Reload settings and group definitions from disk, preserving the
    /// runtime overrides. Returns the number of groups loaded.
    pub async fn reload(&self) -> Result<usize> {
        self.router.reload().await
    }

    /// Swap inventory profiles when a player moves between worlds.
    /// Movement within one group (or within the same ungrouped world) is a
    /// no-op. Otherwise the current inventory is stashed under the source
    /// profile and replaced by the destination's stored profile, or an
    /// empty inventory when none exists. The stash write happens before
    /// the live inventory is touched, so a storage failure changes nothing.
    pub async fn handle_world_change(
        &self,
        player_name: &str,
        from_world: &str,
        to_world: &str,
    ) -> Result<()> {
        let from_key = match self.groups.group_for_world(from_world).await {
            Some(group) => profiles::group_key(&group),
            None => profiles::world_key(from_world),
        };
        let to_key = match self.groups.group_for_world(to_world).await {
            Some(group) => profiles::group_key(&group),
            None => profiles::world_key(to_world),
        };

        if from_key == to_key {
            return Ok(());
        }

        let player = self
            .players
            .player(player_name)
            .ok_or_else(|| anyhow::anyhow!("player not found: {}", player_name))?;

        self.profiles
            .save(&from_key, player_name, &player.inventory())
            .await?;

        let restored = self
            .profiles
            .load(&to_key, player_name)
            .await?
            .unwrap_or_else(Inventory::new);
        player.set_inventory(restored);

        info!(
            "Swapped inventory profile for '{}': {} -> {}",
            player_name, from_key, to_key
        );
        Ok(())
    }

    /// Get the runtime configuration store
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Get the world group manager
    pub fn groups(&self) -> &GroupManager {
        &self.groups
    }

    /// Get the profile store
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Get the database handle
    pub fn db(&self) -> Arc<Database> {
        self.db.clone()
    }
}
