//! Entities - Player, enemies and map objects

mod combatant;
mod enemy;
mod inventory;
mod item;
mod player;

pub use combatant::{CombatStats, Combatant, Subject};
pub use enemy::{Enemy, EnemyKind, Movement};
pub use inventory::{Inventory, InventoryEntry, ItemId};
pub use item::{Chest, ChestLoot, InteractionError, Item, Key};
pub use player::{Player, PlayerStats, STARTING_SPELLS};
