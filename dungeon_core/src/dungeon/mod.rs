//! Dungeon - The grid, its inhabitants and what happens on each tile

mod interaction;
mod map;
mod movement;

pub use interaction::{use_item, Encounter, ItemOutcome};
pub use map::{DungeonMap, GridSnapshot, PlacementCounts, Tile, TileView};
pub use movement::{closest_key, move_enemies, try_move_enemy, MoveResult};
