//! Command routing
//!
//! Receives command invocations from the host and dispatches by subcommand
//! name. All outcomes, including failures, are reported to the invoking
//! sender; nothing here panics or propagates errors to the host.
//!
//! The router answers to its primary root name and a short alias, and both
//! route identically. Unknown root names are not ours: `on_command`
//! returns false so the host can fall through to another handler.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ConfigStore, PluginSettings};
use crate::groups::{GroupError, GroupManager};
use crate::host::CommandSender;
use crate::migration::MigrationService;
use crate::sharing::ShareKind;

/// Primary root command name
pub const ROOT_COMMAND: &str = "worldvault";

/// Short alias root, routed identically
pub const ROOT_ALIAS: &str = "wv";

const USAGE: &[&str] = &[
    "worldvault commands:",
    "  debug <level>             set debug verbosity",
    "  reload                    reload settings and world groups",
    "  info <group>              show a group's worlds and shares",
    "  list                      list world groups",
    "  toggle <share>            flip an optional share on or off",
    "  addworld <world> <group>  add a world to a group",
    "  rmworld <world> <group>   remove a world from a group",
    "  migrate <from> <to>       move a player's inventory to another player",
];

/// Dispatches host command invocations to the engine services
pub struct CommandRouter {
    config: Arc<ConfigStore>,
    groups: Arc<GroupManager>,
    migration: Arc<MigrationService>,
    settings_path: Option<PathBuf>,
}

impl CommandRouter {
    pub fn new(
        config: Arc<ConfigStore>,
        groups: Arc<GroupManager>,
        migration: Arc<MigrationService>,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            groups,
            migration,
            settings_path,
        }
    }

    /// Host command callback. Returns true when `command` is one of our
    /// root names (the invocation was handled, even if it only produced a
    /// usage message), false when the command belongs to someone else.
    pub async fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &str,
        _label: &str,
        args: &[&str],
    ) -> bool {
        let root = command.to_lowercase();
        if root != ROOT_COMMAND && root != ROOT_ALIAS {
            return false;
        }

        debug!("Dispatching '{}' from {}: {:?}", root, sender.name(), args);
        self.dispatch(sender, args).await;
        true
    }

    /// Reload settings and group definitions from disk.
    /// Runtime overrides (debug level, optional shares) are preserved.
    /// Returns the number of groups loaded.
    pub async fn reload(&self) -> anyhow::Result<usize> {
        let settings = PluginSettings::load(self.settings_path.as_deref())?;
        self.config.reload(settings);
        let count = self.groups.load().await?;
        Ok(count)
    }

    async fn dispatch(&self, sender: &dyn CommandSender, args: &[&str]) {
        match args {
            ["debug", level] => match level.parse::<i32>() {
                Ok(level) => {
                    self.config.set_global_debug(level);
                    sender.send_message(&format!("Debug level set to {}", level));
                }
                Err(_) => {
                    sender.send_message(&format!("'{}' is not a debug level", level));
                }
            },
            ["reload"] => match self.reload().await {
                Ok(count) => {
                    sender.send_message(&format!("Reloaded {} world group(s)", count));
                }
                Err(e) => {
                    warn!("Reload failed: {:#}", e);
                    sender.send_message(&format!("Reload failed: {}", e));
                }
            },
            ["info", group] => match self.groups.describe(group).await {
                Some(summary) => sender.send_message(&summary),
                None => sender.send_message(&format!("No group named '{}'", group)),
            },
            ["list"] => {
                let names = self.groups.names().await;
                if names.is_empty() {
                    sender.send_message("No world groups defined");
                } else {
                    sender.send_message(&format!("Groups: {}", names.join(", ")));
                }
            }
            ["toggle", share] => match share.parse::<ShareKind>() {
                Ok(kind) => {
                    let enabled = self.config.toggle_share(kind);
                    sender.send_message(&format!(
                        "Optional share '{}' {}",
                        kind,
                        if enabled { "enabled" } else { "disabled" }
                    ));
                }
                Err(e) => sender.send_message(&e.to_string()),
            },
            ["addworld", world, group] => match self.groups.add_world(world, group).await {
                Ok(()) => {
                    sender.send_message(&format!("Added world '{}' to group '{}'", world, group));
                }
                Err(e) => self.report_group_error(sender, "addworld", e),
            },
            ["rmworld", world, group] => match self.groups.remove_world(world, group).await {
                Ok(true) => {
                    sender
                        .send_message(&format!("Removed world '{}' from group '{}'", world, group));
                }
                Ok(false) => {
                    sender.send_message(&format!(
                        "World '{}' is not in group '{}', nothing to do",
                        world, group
                    ));
                }
                Err(e) => self.report_group_error(sender, "rmworld", e),
            },
            ["migrate", from, to] => match self.migration.migrate(from, to).await {
                Ok(()) => {
                    sender.send_message(&format!("Migrated inventory from '{}' to '{}'", from, to));
                }
                Err(e) => sender.send_message(&format!("Migration failed: {}", e)),
            },
            _ => self.send_usage(sender),
        }
    }

    fn report_group_error(&self, sender: &dyn CommandSender, op: &str, err: GroupError) {
        match err {
            GroupError::Storage(e) => {
                warn!("{} failed: {:#}", op, e);
                sender.send_message("Failed to update group, see server log");
            }
            other => sender.send_message(&other.to_string()),
        }
    }

    fn send_usage(&self, sender: &dyn CommandSender) {
        for line in USAGE {
            sender.send_message(line);
        }
    }
}
