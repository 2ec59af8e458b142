//! Shareable data categories
//!
//! A share kind names one category of player data that a world group can
//! keep in common across its worlds:
//! - Always-on kinds (inventory, health, ...) are shared whenever a group
//!   lists them
//! - Optional kinds (economy) additionally require a global opt-in via the
//!   `toggle` command

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A category of player data that can be shared within a world group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShareKind {
    /// Inventory contents (storage and armor slots)
    Inventory,
    /// Health points
    Health,
    /// Hunger and saturation
    Hunger,
    /// Experience level and progress
    Experience,
    /// Bed respawn location
    BedSpawn,
    /// Economy balance (optional, off unless toggled on)
    Economy,
}

impl ShareKind {
    /// All known share kinds, in canonical order
    pub const ALL: [ShareKind; 6] = [
        ShareKind::Inventory,
        ShareKind::Health,
        ShareKind::Hunger,
        ShareKind::Experience,
        ShareKind::BedSpawn,
        ShareKind::Economy,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareKind::Inventory => "inventory",
            ShareKind::Health => "health",
            ShareKind::Hunger => "hunger",
            ShareKind::Experience => "experience",
            ShareKind::BedSpawn => "bed_spawn",
            ShareKind::Economy => "economy",
        }
    }

    /// Optional kinds are inert until globally enabled with `toggle`
    pub fn is_optional(&self) -> bool {
        matches!(self, ShareKind::Economy)
    }
}

impl fmt::Display for ShareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareKind {
    type Err = UnknownShare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inventory" => Ok(ShareKind::Inventory),
            "health" => Ok(ShareKind::Health),
            "hunger" => Ok(ShareKind::Hunger),
            "experience" | "exp" => Ok(ShareKind::Experience),
            "bed_spawn" | "bedspawn" => Ok(ShareKind::BedSpawn),
            "economy" => Ok(ShareKind::Economy),
            _ => Err(UnknownShare(s.to_string())),
        }
    }
}

/// Error for share names that don't match any kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown share kind: {0}")]
pub struct UnknownShare(pub String);

/// An ordered set of share kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareSet(BTreeSet<ShareKind>);

impl ShareSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing every kind (used for the default group)
    pub fn all() -> Self {
        Self(ShareKind::ALL.into_iter().collect())
    }

    pub fn contains(&self, kind: ShareKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn insert(&mut self, kind: ShareKind) -> bool {
        self.0.insert(kind)
    }

    pub fn remove(&mut self, kind: ShareKind) -> bool {
        self.0.remove(&kind)
    }

    /// Flip membership, returning the new state (true = now present)
    pub fn toggle(&mut self, kind: ShareKind) -> bool {
        if self.0.remove(&kind) {
            false
        } else {
            self.0.insert(kind);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ShareKind> + '_ {
        self.0.iter().copied()
    }

    /// Comma-separated canonical names, "none" when empty
    pub fn describe(&self) -> String {
        if self.0.is_empty() {
            return "none".to_string();
        }
        self.0
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<ShareKind> for ShareSet {
    fn from_iter<I: IntoIterator<Item = ShareKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
