//! Host capability interfaces
//!
//! The engine never talks to a game server directly. The host supplies:
//! - a command sender to report results to
//! - a player directory resolving names to live players
//! - per-player inventory access (snapshot in, whole replacement out)
//!
//! `MemoryHost` is a lightweight in-memory implementation used by the
//! bundled console binary and by the test suite.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::inventory::Inventory;

/// Something that issued a command and can receive feedback
pub trait CommandSender: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver one line of feedback to the sender
    fn send_message(&self, message: &str);
}

/// A live player with an inventory
pub trait PlayerHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Snapshot of the current inventory contents
    fn inventory(&self) -> Inventory;

    /// Replace the entire inventory
    fn set_inventory(&self, inventory: Inventory);
}

/// Lookup of connected players by name
pub trait PlayerDirectory: Send + Sync {
    fn player(&self, name: &str) -> Option<Arc<dyn PlayerHandle>>;
}

/// In-memory player backing `MemoryHost`
pub struct MemoryPlayer {
    name: String,
    inventory: Mutex<Inventory>,
}

impl MemoryPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inventory: Mutex::new(Inventory::new()),
        }
    }
}

impl PlayerHandle for MemoryPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn inventory(&self) -> Inventory {
        self.inventory.lock().clone()
    }

    fn set_inventory(&self, inventory: Inventory) {
        *self.inventory.lock() = inventory;
    }
}

/// In-memory host with a mutable player roster
#[derive(Default)]
pub struct MemoryHost {
    players: RwLock<HashMap<String, Arc<MemoryPlayer>>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to the roster, returning its handle
    pub fn add_player(&self, name: &str) -> Arc<MemoryPlayer> {
        let player = Arc::new(MemoryPlayer::new(name));
        self.players
            .write()
            .insert(name.to_string(), player.clone());
        player
    }

    /// Remove a player from the roster
    pub fn remove_player(&self, name: &str) -> bool {
        self.players.write().remove(name).is_some()
    }
}

impl PlayerDirectory for MemoryHost {
    fn player(&self, name: &str) -> Option<Arc<dyn PlayerHandle>> {
        self.players
            .read()
            .get(name)
            .map(|p| p.clone() as Arc<dyn PlayerHandle>)
    }
}

/// Command sender writing feedback to stdout, for the console binary
pub struct ConsoleSender;

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }

    fn send_message(&self, message: &str) {
        println!("{}", message);
    }
}
