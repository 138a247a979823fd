//! DungeonMap - Grid occupancy and procedural generation

use crate::config::GameConstants;
use crate::entity::{Chest, Enemy, EnemyKind, Item, Key};
use crate::types::Position;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Empty,
    Enemy,
    Key,
    Chest,
    Portal,
    Wall,
}

/// A cell as drawn by a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileView {
    Empty,
    Player,
    Goblin,
    Orc,
    Dragon,
    Key,
    Chest,
    Portal,
    Wall,
}

impl TileView {
    pub fn icon(&self) -> &'static str {
        match self {
            TileView::Empty => "·",
            TileView::Player => "🧙",
            TileView::Goblin => "👺",
            TileView::Orc => "🧟",
            TileView::Dragon => "🐉",
            TileView::Key => "🔑",
            TileView::Chest => "📦",
            TileView::Portal => "🌀",
            TileView::Wall => "🧱",
        }
    }
}

/// Drawable copy of the grid, with the player on its tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: usize,
    pub player: Position,
    pub rows: Vec<Vec<TileView>>,
}

impl GridSnapshot {
    pub fn at(&self, position: Position) -> Option<TileView> {
        self.rows.get(position.x)?.get(position.y).copied()
    }
}

/// How many of each thing a freshly generated dungeon asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementCounts {
    pub enemies: usize,
    pub pairs: usize,
    pub walls: usize,
}

impl PlacementCounts {
    /// Roll counts for a dungeon at `player_level`, clamped to `free_tiles`
    ///
    /// Space is handed out as the portal, the minimum wall count, key/chest
    /// pairs, enemies, then any walls above the minimum. The smallest valid
    /// grid (3x3, eight free tiles) always fits the portal, two walls and
    /// one pair.
    pub fn roll(
        player_level: u32,
        free_tiles: usize,
        constants: &GameConstants,
        rng: &mut impl Rng,
    ) -> Self {
        let generation = &constants.generation;
        let level = player_level as usize;

        let enemies = rng.gen_range(0..level + 2) + 1;
        let extra_pairs = if generation.levels_per_extra_pair == 0 {
            0
        } else {
            (player_level / generation.levels_per_extra_pair) as usize
        };
        let pairs = rng.gen_range(0..generation.max_base_pairs.max(1)) + 1 + extra_pairs;
        let walls = rng.gen_range(generation.min_walls..=generation.max_walls);

        let requested = PlacementCounts {
            enemies,
            pairs,
            walls,
        };

        let mut room = free_tiles.saturating_sub(1);
        let min_walls = generation.min_walls.min(walls).min(room);
        room -= min_walls;
        let pairs = pairs.min(room / 2);
        room -= pairs * 2;
        let enemies = enemies.min(room);
        room -= enemies;
        let walls = min_walls + (walls - min_walls).min(room);

        let counts = PlacementCounts {
            enemies,
            pairs,
            walls,
        };
        if counts != requested {
            log::warn!(
                "Placement shortfall on {} free tiles: wanted {:?}, placing {:?}",
                free_tiles,
                requested,
                counts
            );
        }
        counts
    }
}

/// The dungeon grid and everything standing on it
///
/// `grid` and the two entity lists always agree: every listed enemy or
/// object has the matching tile kind at its position, and every non-empty
/// tile is backed by exactly one list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonMap {
    size: usize,
    grid: Vec<Vec<Tile>>,
    pub(crate) enemies: Vec<(Enemy, Position)>,
    objects: Vec<(Item, Position)>,
}

impl DungeonMap {
    /// An empty `size`×`size` map
    pub fn new(size: usize) -> Self {
        DungeonMap {
            size,
            grid: vec![vec![Tile::Empty; size]; size],
            enemies: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Generate a dungeon for a player at `player_level`
    ///
    /// Placement order is enemies, keys, chests, portal, walls. Every entity
    /// lands on a uniformly chosen empty tile other than `spawn`.
    pub fn generate(
        size: usize,
        player_level: u32,
        spawn: Position,
        constants: &GameConstants,
        rng: &mut impl Rng,
    ) -> Self {
        let mut map = DungeonMap::new(size);
        let mut free: Vec<Position> = (0..size)
            .flat_map(|x| (0..size).map(move |y| Position::new(x, y)))
            .filter(|p| *p != spawn)
            .collect();

        let counts = PlacementCounts::roll(player_level, free.len(), constants, rng);

        for _ in 0..counts.enemies {
            let Some(position) = take_free(&mut free, rng) else { break };
            let kind = EnemyKind::all()[rng.gen_range(0..EnemyKind::all().len())];
            let enemy = Enemy::spawn(kind, player_level, constants, rng);
            map.place_enemy(enemy, position);
        }

        for key_type in 1..=counts.pairs as u32 {
            if let Some(position) = take_free(&mut free, rng) {
                map.place_object(Item::Key(Key { key_type }), position);
            }
        }

        let scroll_chest = if counts.pairs > 0 {
            rng.gen_range(1..=counts.pairs as u32)
        } else {
            0
        };
        for key_type in 1..=counts.pairs as u32 {
            let Some(position) = take_free(&mut free, rng) else { break };
            let contains_scroll = key_type == scroll_chest;
            let name = if contains_scroll {
                "Scroll Chest".to_string()
            } else {
                constants
                    .names
                    .chests
                    .choose(rng)
                    .cloned()
                    .unwrap_or_else(|| format!("Chest{}", key_type))
            };
            map.place_object(Item::Chest(Chest::new(key_type, name, contains_scroll)), position);
        }

        if let Some(position) = take_free(&mut free, rng) {
            map.place_object(Item::Portal, position);
        }

        for _ in 0..counts.walls {
            let Some(position) = take_free(&mut free, rng) else { break };
            map.place_object(Item::Wall, position);
        }

        log::debug!(
            "Generated {}x{} dungeon for level {}: {} enemies, {} key/chest pairs, {} walls",
            size,
            size,
            player_level,
            map.enemies.len(),
            counts.pairs,
            map.count(Tile::Wall)
        );
        map
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Tile kind at `position`, or `None` off the grid
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.grid.get(position.x)?.get(position.y).copied()
    }

    /// Put an enemy on an empty tile. Returns false if the tile is taken.
    pub fn place_enemy(&mut self, enemy: Enemy, position: Position) -> bool {
        if self.tile_at(position) != Some(Tile::Empty) {
            return false;
        }
        self.grid[position.x][position.y] = Tile::Enemy;
        self.enemies.push((enemy, position));
        true
    }

    /// Put an object on an empty tile. Returns false if the tile is taken.
    pub fn place_object(&mut self, item: Item, position: Position) -> bool {
        if self.tile_at(position) != Some(Tile::Empty) {
            return false;
        }
        self.grid[position.x][position.y] = match &item {
            Item::Key(_) => Tile::Key,
            Item::Chest(_) => Tile::Chest,
            Item::Portal => Tile::Portal,
            Item::Wall => Tile::Wall,
        };
        self.objects.push((item, position));
        true
    }

    pub fn enemies(&self) -> &[(Enemy, Position)] {
        &self.enemies
    }

    pub fn objects(&self) -> &[(Item, Position)] {
        &self.objects
    }

    pub fn enemy_at(&self, position: Position) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|(_, p)| *p == position)
            .map(|(enemy, _)| enemy)
    }

    pub fn enemy_at_mut(&mut self, position: Position) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|(_, p)| *p == position)
            .map(|(enemy, _)| enemy)
    }

    pub fn object_at(&self, position: Position) -> Option<&Item> {
        self.objects
            .iter()
            .find(|(_, p)| *p == position)
            .map(|(item, _)| item)
    }

    pub fn object_at_mut(&mut self, position: Position) -> Option<&mut Item> {
        self.objects
            .iter_mut()
            .find(|(_, p)| *p == position)
            .map(|(item, _)| item)
    }

    /// Take the enemy off the map and clear its tile
    pub fn remove_enemy(&mut self, position: Position) -> Option<Enemy> {
        let index = self.enemies.iter().position(|(_, p)| *p == position)?;
        let (enemy, _) = self.enemies.remove(index);
        self.grid[position.x][position.y] = Tile::Empty;
        Some(enemy)
    }

    /// Take the object off the map and clear its tile
    pub fn remove_object(&mut self, position: Position) -> Option<Item> {
        let index = self.objects.iter().position(|(_, p)| *p == position)?;
        let (item, _) = self.objects.remove(index);
        self.grid[position.x][position.y] = Tile::Empty;
        Some(item)
    }

    /// Move the enemy at list index `index` onto an empty tile
    pub(crate) fn relocate_enemy(&mut self, index: usize, to: Position) -> bool {
        if self.tile_at(to) != Some(Tile::Empty) {
            return false;
        }
        let Some(from) = self.enemies.get(index).map(|(_, p)| *p) else {
            return false;
        };
        self.grid[from.x][from.y] = Tile::Empty;
        self.grid[to.x][to.y] = Tile::Enemy;
        self.enemies[index].1 = to;
        true
    }

    /// Positions of keys still on the floor
    pub fn key_positions(&self) -> Vec<Position> {
        self.objects
            .iter()
            .filter(|(item, _)| matches!(item, Item::Key(_)))
            .map(|(_, p)| *p)
            .collect()
    }

    /// Number of tiles of the given kind
    pub fn count(&self, tile: Tile) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| **t == tile)
            .count()
    }

    /// Drawable copy of the grid with the player on `player`
    pub fn snapshot(&self, player: Position) -> GridSnapshot {
        let mut rows: Vec<Vec<TileView>> = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        Tile::Empty => TileView::Empty,
                        // filled in from the enemy list below
                        Tile::Enemy => TileView::Empty,
                        Tile::Key => TileView::Key,
                        Tile::Chest => TileView::Chest,
                        Tile::Portal => TileView::Portal,
                        Tile::Wall => TileView::Wall,
                    })
                    .collect()
            })
            .collect();

        for (enemy, p) in &self.enemies {
            rows[p.x][p.y] = match enemy.kind {
                EnemyKind::Goblin => TileView::Goblin,
                EnemyKind::Orc => TileView::Orc,
                EnemyKind::Dragon => TileView::Dragon,
            };
        }
        if self.in_bounds(player) {
            rows[player.x][player.y] = TileView::Player;
        }

        GridSnapshot {
            size: self.size,
            player,
            rows,
        }
    }
}

fn take_free(free: &mut Vec<Position>, rng: &mut impl Rng) -> Option<Position> {
    if free.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..free.len());
    Some(free.swap_remove(index))
}
