//! Prelude module for convenient imports
//!
//! ```rust
//! use dungeon_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CastSide, Direction, Element, Position, Side};

// Session
pub use crate::session::{ActionError, BattleOptions, GameSession};

// Entities
pub use crate::entity::{Combatant, Enemy, EnemyKind, InventoryEntry, ItemId, Player, PlayerStats};

// Combat
pub use crate::combat::{BattleState, TurnReport};

// Dungeon
pub use crate::dungeon::{Encounter, GridSnapshot, ItemOutcome, TileView};

// Presentation
pub use crate::observer::{EventLog, GameObserver, NullObserver};
pub use crate::status::{StatusEffect, StatusKind};

// Config
pub use crate::config::GameConstants;
