//! dungeon_core - Engine for a grid-based elemental dungeon crawler
//!
//! This library provides:
//! - DungeonMap: Procedural grid generation and enemy movement AI
//! - Battle: Turn-based elemental spell combat with status effects
//! - Progression: XP, levels, spell unlocks and dungeon transitions
//! - GameSession: A single-owner game driven by input and `tick` calls
//!
//! Presentation is left to the host through [`GameObserver`].

pub mod combat;
pub mod config;
pub mod dungeon;
pub mod entity;
pub mod observer;
pub mod prelude;
pub mod progression;
pub mod session;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use combat::{Battle, BattleState, PlayerAction, Strike, TurnReport};
pub use config::{ConfigError, GameConstants};
pub use dungeon::{DungeonMap, Encounter, GridSnapshot, ItemOutcome, Tile, TileView};
pub use entity::{
    Chest, ChestLoot, Combatant, Enemy, EnemyKind, InteractionError, Inventory, InventoryEntry,
    Item, ItemId, Movement, Player, PlayerStats,
};
pub use observer::{EventLog, GameEvent, GameObserver, NullObserver};
pub use progression::{LevelUp, XpSource};
pub use session::{ActionError, BattleOptions, GameSession, MovementClock};
pub use status::{StatusEffect, StatusKind};
pub use types::{CastSide, Direction, Element, Matchup, Position, Side};
