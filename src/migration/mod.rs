//! Inventory migration between players
//!
//! Moves one player's entire inventory onto another player and clears the
//! source. The destination's previous contents are discarded, never merged.
//!
//! Atomicity: the source snapshot is validated in full before either side
//! is written, and migrations touching a common player (as source or
//! destination) serialize on per-player locks acquired in name order.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::host::PlayerDirectory;
use crate::inventory::Inventory;

/// Migration failures; none of these leave partial state behind
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("source and destination are the same player")]
    SamePlayer,

    #[error("invalid stack in slot {slot}, refusing to migrate")]
    InvalidStack { slot: u32 },
}

/// Moves inventories between live players
pub struct MigrationService {
    players: Arc<dyn PlayerDirectory>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MigrationService {
    /// Create a service resolving players through the given directory
    pub fn new(players: Arc<dyn PlayerDirectory>) -> Self {
        Self {
            players,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create the lock guarding one player's inventory
    async fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Move `from`'s entire inventory to `to`, clearing `from`.
    /// Fails closed: on any error both inventories keep their
    /// pre-migration contents.
    pub async fn migrate(&self, from: &str, to: &str) -> Result<(), MigrateError> {
        if from == to {
            return Err(MigrateError::SamePlayer);
        }

        // Lock both players in lexicographic order so overlapping
        // migrations serialize instead of deadlocking
        let (first, second) = if from < to { (from, to) } else { (to, from) };
        let _first_guard = self.lock_for(first).await.lock_owned().await;
        let _second_guard = self.lock_for(second).await.lock_owned().await;

        let source = self
            .players
            .player(from)
            .ok_or_else(|| MigrateError::PlayerNotFound(from.to_string()))?;
        let dest = self
            .players
            .player(to)
            .ok_or_else(|| MigrateError::PlayerNotFound(to.to_string()))?;

        // Validate every slot before any write
        let snapshot = source.inventory();
        for (slot, stack) in snapshot.iter() {
            if !stack.is_valid() {
                return Err(MigrateError::InvalidStack { slot });
            }
        }

        let moved = snapshot.len();
        dest.set_inventory(snapshot);
        source.set_inventory(Inventory::new());

        info!(
            "Migrated {} stack(s) from '{}' to '{}'",
            moved, from, to
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, PlayerHandle};
    use crate::inventory::{ItemStack, Material};

    fn host_with(players: &[&str]) -> Arc<MemoryHost> {
        let host = Arc::new(MemoryHost::new());
        for name in players {
            host.add_player(name);
        }
        host
    }

    #[tokio::test]
    async fn test_migrate_moves_everything() {
        let host = host_with(&["alice", "bob"]);
        let service = MigrationService::new(host.clone());

        let mut inv = Inventory::new();
        inv.set_item(3, ItemStack::new(Material::Bow, 1));
        inv.set_item(13, ItemStack::new(Material::Dirt, 64));
        host.player("alice").unwrap().set_inventory(inv.clone());

        service.migrate("alice", "bob").await.unwrap();

        assert!(host.player("alice").unwrap().inventory().is_empty());
        assert_eq!(host.player("bob").unwrap().inventory(), inv);
    }

    #[tokio::test]
    async fn test_migrate_discards_destination_contents() {
        let host = host_with(&["alice", "bob"]);
        let service = MigrationService::new(host.clone());

        let mut src = Inventory::new();
        src.set_item(0, ItemStack::new(Material::Apple, 5));
        host.player("alice").unwrap().set_inventory(src.clone());

        let mut dst = Inventory::new();
        dst.set_item(20, ItemStack::new(Material::Stone, 64));
        host.player("bob").unwrap().set_inventory(dst);

        service.migrate("alice", "bob").await.unwrap();

        let bob = host.player("bob").unwrap().inventory();
        assert_eq!(bob, src);
        assert!(bob.item(20).is_none());
    }

    #[tokio::test]
    async fn test_migrate_empty_source() {
        let host = host_with(&["alice", "bob"]);
        let service = MigrationService::new(host.clone());

        let mut dst = Inventory::new();
        dst.set_item(0, ItemStack::new(Material::Torch, 8));
        host.player("bob").unwrap().set_inventory(dst);

        service.migrate("alice", "bob").await.unwrap();
        assert!(host.player("bob").unwrap().inventory().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_unknown_player() {
        let host = host_with(&["alice"]);
        let service = MigrationService::new(host.clone());

        let mut inv = Inventory::new();
        inv.set_item(0, ItemStack::new(Material::Apple, 1));
        host.player("alice").unwrap().set_inventory(inv.clone());

        let err = service.migrate("alice", "ghost").await.unwrap_err();
        assert!(matches!(err, MigrateError::PlayerNotFound(_)));

        // No partial mutation
        assert_eq!(host.player("alice").unwrap().inventory(), inv);
    }

    #[tokio::test]
    async fn test_migrate_to_self_rejected() {
        let host = host_with(&["alice"]);
        let service = MigrationService::new(host.clone());

        let err = service.migrate("alice", "alice").await.unwrap_err();
        assert!(matches!(err, MigrateError::SamePlayer));
    }

    #[tokio::test]
    async fn test_invalid_stack_fails_closed() {
        let host = host_with(&["alice", "bob"]);
        let service = MigrationService::new(host.clone());

        let mut src = Inventory::new();
        src.set_item(0, ItemStack::new(Material::Apple, 3));
        src.set_item(1, ItemStack::new(Material::Bow, 7)); // over max stack
        host.player("alice").unwrap().set_inventory(src.clone());

        let mut dst = Inventory::new();
        dst.set_item(5, ItemStack::new(Material::Stone, 1));
        host.player("bob").unwrap().set_inventory(dst.clone());

        let err = service.migrate("alice", "bob").await.unwrap_err();
        assert!(matches!(err, MigrateError::InvalidStack { slot: 1 }));

        // Both sides untouched
        assert_eq!(host.player("alice").unwrap().inventory(), src);
        assert_eq!(host.player("bob").unwrap().inventory(), dst);
    }

    #[tokio::test]
    async fn test_overlapping_migrations_conserve_items() {
        let host = host_with(&["alice", "bob"]);
        let service = Arc::new(MigrationService::new(host.clone()));

        let mut inv = Inventory::new();
        for slot in 0..5 {
            inv.set_item(slot, ItemStack::new(Material::Apple, 1));
        }
        host.player("alice").unwrap().set_inventory(inv);

        // Ping-pong the inventory concurrently. Serialized migrations move
        // the inventory as a unit, so the stacks either all sit on one side
        // or were wiped by a migrate from an empty source; a partial or
        // duplicated layout means the locks failed.
        let mut handles = Vec::new();
        for i in 0..10 {
            let service = service.clone();
            let (from, to) = if i % 2 == 0 {
                ("alice", "bob")
            } else {
                ("bob", "alice")
            };
            handles.push(tokio::spawn(async move {
                let _ = service.migrate(from, to).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let alice = host.player("alice").unwrap().inventory().len();
        let bob = host.player("bob").unwrap().inventory().len();
        assert!(
            (alice == 5 && bob == 0) || (alice == 0 && bob == 5) || (alice == 0 && bob == 0),
            "stacks split or duplicated: alice={} bob={}",
            alice,
            bob
        );
    }
}
