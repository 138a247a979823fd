//! Core types shared across the dungeon crawler

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spell element, used both for attacks and potions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Lightning,
}

impl Element {
    /// Get all elements in declaration order
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Water,
            Element::Earth,
            Element::Air,
            Element::Lightning,
        ]
    }

    /// The two elements this element overpowers
    pub fn beats(&self) -> [Element; 2] {
        match self {
            Element::Fire => [Element::Air, Element::Lightning],
            Element::Water => [Element::Fire, Element::Earth],
            Element::Earth => [Element::Lightning, Element::Air],
            Element::Air => [Element::Water, Element::Earth],
            Element::Lightning => [Element::Water, Element::Fire],
        }
    }

    /// Check whether this element overpowers `other`
    pub fn overpowers(&self, other: Element) -> bool {
        self.beats().contains(&other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Lightning => "Lightning",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Element::Fire => "🔥",
            Element::Water => "💧",
            Element::Earth => "🌍",
            Element::Air => "💨",
            Element::Lightning => "⚡",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of pitting the player's element against the enemy's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matchup {
    PlayerWins,
    EnemyWins,
    Tie,
}

/// Which side of a battle something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// Where a cast animation is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastSide {
    Player,
    Enemy,
    /// Both spells collided (tie)
    Center,
}

impl From<Side> for CastSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => CastSide::Player,
            Side::Enemy => CastSide::Enemy,
        }
    }
}

/// Cardinal movement direction
///
/// Rows grow downward: `Up` decreases `x`, `Left` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Row/column offset of one step in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Greedy step from `from` toward `to`, resolving the axis with the larger
    /// delta first. Ties go to the column axis.
    pub fn toward(from: Position, to: Position) -> Direction {
        let dx = to.x as i64 - from.x as i64;
        let dy = to.y as i64 - from.y as i64;
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if dy > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Grid coordinate: `x` is the row, `y` the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Neighbouring position one step away, or `None` if it leaves a
    /// `size`×`size` grid
    pub fn step(&self, direction: Direction, size: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 || x >= size as i64 || y >= size as i64 {
            return None;
        }
        Some(Position::new(x as usize, y as usize))
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
