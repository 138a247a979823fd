//! Inventory - Items carried by the player

use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of something the player can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemId {
    /// Opens the chest with the same number
    Key(u32),
    /// Unlocks the portal
    Scroll,
    Potion(Element),
}

impl ItemId {
    /// Only potions stack; keys and scrolls take one slot each
    pub fn is_stackable(&self) -> bool {
        matches!(self, ItemId::Potion(_))
    }

    /// Keys and scrolls belong to a single dungeon
    pub fn is_dungeon_bound(&self) -> bool {
        matches!(self, ItemId::Key(_) | ItemId::Scroll)
    }

    /// Default display name
    pub fn default_name(&self) -> String {
        match self {
            ItemId::Key(n) => format!("Key{}", n),
            ItemId::Scroll => "Magical Scroll".to_string(),
            ItemId::Potion(element) => format!("{} Potion", element),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Key(n) => write!(f, "Key{}", n),
            ItemId::Scroll => f.write_str("scroll"),
            ItemId::Potion(element) => write!(f, "{}Potion", element.name().to_lowercase()),
        }
    }
}

/// One inventory slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: ItemId,
    pub display_name: String,
    pub quantity: u32,
}

impl InventoryEntry {
    /// Display text, e.g. `Fire Potion x2`
    pub fn label(&self) -> String {
        if self.quantity > 1 {
            format!("{} x{}", self.display_name, self.quantity)
        } else {
            self.display_name.clone()
        }
    }
}

/// Ordered collection of carried items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item, stacking potions onto an existing slot
    pub fn add(&mut self, id: ItemId, display_name: impl Into<String>) {
        if id.is_stackable() {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
                entry.quantity += 1;
                return;
            }
        }
        self.entries.push(InventoryEntry {
            id,
            display_name: display_name.into(),
            quantity: 1,
        });
    }

    /// Remove one item. Returns false if none was held.
    pub fn remove_one(&mut self, id: ItemId) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        if self.entries[index].quantity > 1 {
            self.entries[index].quantity -= 1;
        } else {
            self.entries.remove(index);
        }
        true
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn quantity(&self, id: ItemId) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.id == id)
            .map(|e| e.quantity)
            .sum()
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Potion slots, in pickup order
    pub fn potions(&self) -> Vec<InventoryEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.id, ItemId::Potion(_)))
            .cloned()
            .collect()
    }

    /// Drop keys and scrolls, keeping potions
    pub fn strip_dungeon_items(&mut self) {
        self.entries.retain(|e| !e.id.is_dungeon_bound());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display text for the whole inventory
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return "Empty".to_string();
        }
        self.entries
            .iter()
            .map(InventoryEntry::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
