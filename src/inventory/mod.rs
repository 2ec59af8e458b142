//! Player inventory model
//!
//! Inventories are sparse slot maps, serializable so they can be stashed
//! in group profiles and swapped between players. Slot layout follows the
//! usual player grid: 36 storage slots followed by 4 armor slots.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Number of storage slots (hotbar + main grid)
pub const STORAGE_SLOTS: u32 = 36;

/// Total slot count including armor
pub const INVENTORY_SLOTS: u32 = 40;

/// Free-form item metadata (display name, enchantments, pages, ...)
pub type Properties = HashMap<String, serde_json::Value>;

/// Item material kinds known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Bow,
    Dirt,
    Stone,
    Apple,
    Torch,
    IronHelmet,
    LeatherBoots,
    WrittenBook,
    DiamondSword,
}

impl Material {
    /// Largest legal stack for this material
    pub fn max_stack(&self) -> u32 {
        match self {
            Material::Dirt | Material::Stone | Material::Apple | Material::Torch => 64,
            Material::Bow
            | Material::IronHelmet
            | Material::LeatherBoots
            | Material::WrittenBook
            | Material::DiamondSword => 1,
        }
    }
}

/// A stack of items in one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
    /// Extra item data; empty for plain items
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta: Properties,
}

impl ItemStack {
    /// Create a plain stack with no metadata
    pub fn new(material: Material, amount: u32) -> Self {
        Self {
            material,
            amount,
            meta: Properties::new(),
        }
    }

    /// Set a metadata property
    pub fn set_meta(&mut self, key: &str, value: serde_json::Value) {
        self.meta.insert(key.to_string(), value);
    }

    /// Stack is within the material's legal size
    pub fn is_valid(&self) -> bool {
        self.amount >= 1 && self.amount <= self.material.max_stack()
    }
}

/// A player inventory: sparse map from slot index to stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    slots: BTreeMap<u32, ItemStack>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a stack in a slot, replacing any previous contents.
    /// Out-of-range slots are dropped with a warning rather than kept,
    /// so a corrupt profile cannot grow phantom slots.
    pub fn set_item(&mut self, slot: u32, stack: ItemStack) {
        if slot >= INVENTORY_SLOTS {
            tracing::warn!("Ignoring item in out-of-range slot {}", slot);
            return;
        }
        self.slots.insert(slot, stack);
    }

    /// Get the stack in a slot, if any
    pub fn item(&self, slot: u32) -> Option<&ItemStack> {
        self.slots.get(&slot)
    }

    /// Remove and return the stack in a slot
    pub fn take_item(&mut self, slot: u32) -> Option<ItemStack> {
        self.slots.remove(&slot)
    }

    /// Remove all items
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Iterate occupied slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ItemStack)> {
        self.slots.iter().map(|(slot, stack)| (*slot, stack))
    }

    /// Every stack is within its material's legal size
    pub fn is_valid(&self) -> bool {
        self.slots.values().all(|stack| stack.is_valid())
    }
}

impl FromIterator<(u32, ItemStack)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (u32, ItemStack)>>(iter: I) -> Self {
        let mut inv = Inventory::new();
        for (slot, stack) in iter {
            inv.set_item(slot, stack);
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut inv = Inventory::new();
        inv.set_item(3, ItemStack::new(Material::Bow, 1));
        inv.set_item(13, ItemStack::new(Material::Dirt, 64));

        assert_eq!(inv.len(), 2);
        assert_eq!(inv.item(3).unwrap().material, Material::Bow);
        assert_eq!(inv.item(13).unwrap().amount, 64);
        assert!(inv.item(4).is_none());
    }

    #[test]
    fn test_out_of_range_slot_dropped() {
        let mut inv = Inventory::new();
        inv.set_item(INVENTORY_SLOTS, ItemStack::new(Material::Stone, 1));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut inv = Inventory::new();
        inv.set_item(0, ItemStack::new(Material::Apple, 12));
        assert!(!inv.is_empty());

        inv.clear();
        assert!(inv.is_empty());
        assert_eq!(inv, Inventory::new());
    }

    #[test]
    fn test_stack_validation() {
        assert!(ItemStack::new(Material::Dirt, 64).is_valid());
        assert!(!ItemStack::new(Material::Dirt, 65).is_valid());
        assert!(!ItemStack::new(Material::Bow, 2).is_valid());
        assert!(!ItemStack::new(Material::Stone, 0).is_valid());

        let mut inv = Inventory::new();
        inv.set_item(0, ItemStack::new(Material::Dirt, 32));
        assert!(inv.is_valid());
        inv.set_item(1, ItemStack::new(Material::Bow, 5));
        assert!(!inv.is_valid());
    }

    #[test]
    fn test_meta_round_trip() {
        let mut book = ItemStack::new(Material::WrittenBook, 1);
        book.set_meta("title", serde_json::json!("Journal"));
        book.set_meta("pages", serde_json::json!(["day one"]));

        let mut inv = Inventory::new();
        inv.set_item(1, book);

        let json = serde_json::to_string(&inv).unwrap();
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inv);
        assert_eq!(
            back.item(1).unwrap().meta.get("title"),
            Some(&serde_json::json!("Journal"))
        );
    }
}
