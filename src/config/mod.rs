//! Plugin configuration
//!
//! Two layers:
//! - `PluginSettings`: file-backed defaults, loaded from TOML with
//!   `WORLDVAULT_` environment overrides
//! - `ConfigStore`: runtime state commands mutate (debug level, optional
//!   shares), seeded from settings once at startup
//!
//! Invariant: `reload` replaces the settings snapshot but never touches
//! the runtime overrides, which take precedence over stored defaults.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::sharing::{ShareKind, ShareSet};

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] figment::Error),
}

/// File-backed plugin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Default debug verbosity (0 = off)
    pub debug: i32,
    /// Optional share kinds enabled by default
    pub optional_shares: Vec<ShareKind>,
    /// Group that newly seen worlds fall into when `group_new_worlds` is set
    pub default_group: String,
    /// Whether worlds without an explicit group join the default group
    pub group_new_worlds: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            debug: 0,
            optional_shares: Vec::new(),
            default_group: crate::groups::DEFAULT_GROUP.to_string(),
            group_new_worlds: false,
        }
    }
}

impl PluginSettings {
    /// Load settings from an optional TOML file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut figment = Figment::from(Serialized::defaults(PluginSettings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let settings = figment.merge(Env::prefixed("WORLDVAULT_")).extract()?;
        Ok(settings)
    }
}

struct State {
    settings: PluginSettings,
    global_debug: i32,
    optional_shares: ShareSet,
}

/// Runtime configuration shared across the engine
pub struct ConfigStore {
    state: RwLock<State>,
}

impl ConfigStore {
    /// Create a store seeded from the given settings
    pub fn new(settings: PluginSettings) -> Self {
        let global_debug = settings.debug;
        let optional_shares = settings.optional_shares.iter().copied().collect();
        Self {
            state: RwLock::new(State {
                settings,
                global_debug,
                optional_shares,
            }),
        }
    }

    /// Current debug verbosity
    pub fn global_debug(&self) -> i32 {
        self.state.read().global_debug
    }

    /// Set debug verbosity; survives `reload`
    pub fn set_global_debug(&self, level: i32) {
        self.state.write().global_debug = level;
        debug!("Global debug level set to {}", level);
    }

    /// Snapshot of the enabled optional shares
    pub fn optional_shares(&self) -> ShareSet {
        self.state.read().optional_shares.clone()
    }

    /// Flip an optional share, returning the new membership (true = on)
    pub fn toggle_share(&self, kind: ShareKind) -> bool {
        let enabled = self.state.write().optional_shares.toggle(kind);
        debug!(
            "Optional share '{}' is now {}",
            kind,
            if enabled { "enabled" } else { "disabled" }
        );
        enabled
    }

    /// Whether a kind participates in sharing: always-on kinds do, optional
    /// kinds only once toggled on
    pub fn is_share_enabled(&self, kind: ShareKind) -> bool {
        !kind.is_optional() || self.state.read().optional_shares.contains(kind)
    }

    /// Snapshot of the file-backed settings
    pub fn settings(&self) -> PluginSettings {
        self.state.read().settings.clone()
    }

    /// Replace the settings snapshot. The runtime overrides (debug level,
    /// optional shares) are left untouched.
    pub fn reload(&self, settings: PluginSettings) {
        self.state.write().settings = settings;
        debug!("Settings reloaded");
    }
}
