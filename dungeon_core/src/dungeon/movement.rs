//! Enemy movement AI, run once per movement tick

use super::map::{DungeonMap, Tile};
use crate::entity::Movement;
use crate::types::{Direction, Position};
use rand::seq::SliceRandom;
use rand::Rng;

/// What happened when an enemy tried to step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved(Position),
    /// Off the grid or onto an occupied tile; the enemy stays put
    Blocked,
    /// The step would land on the player; the enemy stays put and a battle
    /// should start
    Bumped,
}

/// Try to step the enemy at list index `index` one tile in `direction`
pub fn try_move_enemy(
    map: &mut DungeonMap,
    index: usize,
    direction: Direction,
    player: Position,
) -> MoveResult {
    let Some(&(_, from)) = map.enemies().get(index) else {
        return MoveResult::Blocked;
    };
    let Some(to) = from.step(direction, map.size()) else {
        return MoveResult::Blocked;
    };
    if to == player {
        return MoveResult::Bumped;
    }
    if map.tile_at(to) != Some(Tile::Empty) {
        return MoveResult::Blocked;
    }
    if map.relocate_enemy(index, to) {
        MoveResult::Moved(to)
    } else {
        MoveResult::Blocked
    }
}

/// Nearest key on the floor by Manhattan distance; ties go to the earliest
/// placed key
pub fn closest_key(map: &DungeonMap, from: Position) -> Option<Position> {
    map.key_positions()
        .into_iter()
        .min_by_key(|key| from.manhattan(*key))
}

/// Direction an enemy wants to move this tick, or `None` to stay put
fn choose_direction(
    map: &DungeonMap,
    index: usize,
    player: Position,
    rng: &mut impl Rng,
) -> Option<Direction> {
    let (enemy, at) = &map.enemies()[index];
    match enemy.movement {
        Movement::Random => Direction::all().choose(rng).copied(),
        Movement::Chase => Some(Direction::toward(*at, player)),
        Movement::Guard => {
            if enemy.is_guarding {
                return None;
            }
            closest_key(map, *at).map(|key| Direction::toward(*at, key))
        }
    }
}

/// Move every enemy one step
///
/// Returns the position of the first enemy that walked into the player, if
/// any. The other enemies still take their step this tick.
pub fn move_enemies(
    map: &mut DungeonMap,
    player: Position,
    rng: &mut impl Rng,
) -> Option<Position> {
    let mut bumped = None;
    for index in 0..map.enemies().len() {
        let Some(direction) = choose_direction(map, index, player, rng) else {
            continue;
        };

        match try_move_enemy(map, index, direction, player) {
            MoveResult::Bumped => {
                let at = map.enemies()[index].1;
                log::debug!("Enemy at {} walked into the player", at);
                bumped.get_or_insert(at);
            }
            MoveResult::Moved(to) => latch_guard(map, index, to),
            MoveResult::Blocked => {
                let at = map.enemies()[index].1;
                latch_guard(map, index, at);
            }
        }
    }
    bumped
}

/// Latch a guard that has reached its key
///
/// Keys sit on their own tile and enemies never step onto objects, so a
/// guard counts as holding a key once it stands on an adjacent tile.
fn latch_guard(map: &mut DungeonMap, index: usize, at: Position) {
    if map.enemies[index].0.movement != Movement::Guard {
        return;
    }
    if let Some(key) = closest_key(map, at) {
        if at.manhattan(key) <= 1 {
            let enemy = &mut map.enemies[index].0;
            enemy.is_guarding = true;
            log::debug!("{} is now guarding the key at {}", enemy.title(), key);
        }
    }
}
