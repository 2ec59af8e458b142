//! Profile swap scenarios
//!
//! A player crossing from one world group to another gets their inventory
//! stashed and the destination group's profile restored.

mod common;

use common::{filler_inventory, VaultTest};
use worldvault::host::PlayerHandle;
use worldvault::inventory::{Inventory, ItemStack, Material};

#[tokio::test]
async fn test_world_change_between_groups_swaps() {
    let vault = VaultTest::start().await.expect("Failed to start harness");
    vault
        .engine
        .groups()
        .add_world("mining_world", "mining")
        .await
        .unwrap();

    let alice = vault.host.add_player("alice");
    alice.set_inventory(filler_inventory());

    // Leaving the default group: inventory stashed, no mining profile yet
    vault
        .engine
        .handle_world_change("alice", "world", "mining_world")
        .await
        .unwrap();
    assert!(alice.inventory().is_empty());

    // Pick something up in the mining group
    let mut pick = Inventory::new();
    pick.set_item(0, ItemStack::new(Material::Stone, 12));
    alice.set_inventory(pick.clone());

    // Coming back restores the stashed default-group inventory
    vault
        .engine
        .handle_world_change("alice", "mining_world", "world_nether")
        .await
        .unwrap();
    assert_eq!(alice.inventory(), filler_inventory());

    // And the mining profile kept what was left behind
    let stored = vault
        .engine
        .profiles()
        .load(&worldvault::profiles::group_key("mining"), "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, pick);
}

#[tokio::test]
async fn test_world_change_within_group_is_noop() {
    let vault = VaultTest::start().await.expect("Failed to start harness");

    let alice = vault.host.add_player("alice");
    alice.set_inventory(filler_inventory());

    // world and world_nether are both in the default group
    vault
        .engine
        .handle_world_change("alice", "world", "world_nether")
        .await
        .unwrap();

    assert_eq!(alice.inventory(), filler_inventory());
}

#[tokio::test]
async fn test_world_change_between_ungrouped_worlds() {
    let vault = VaultTest::start().await.expect("Failed to start harness");

    let alice = vault.host.add_player("alice");
    alice.set_inventory(filler_inventory());

    // Neither world is in any group: each gets its own implicit profile
    vault
        .engine
        .handle_world_change("alice", "limbo_one", "limbo_two")
        .await
        .unwrap();
    assert!(alice.inventory().is_empty());

    let stashed = vault
        .engine
        .profiles()
        .load(&worldvault::profiles::world_key("limbo_one"), "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stashed, filler_inventory());
}

#[tokio::test]
async fn test_world_change_unknown_player_errors() {
    let vault = VaultTest::start().await.expect("Failed to start harness");

    let result = vault
        .engine
        .handle_world_change("ghost", "world", "limbo")
        .await;
    assert!(result.is_err());
}
