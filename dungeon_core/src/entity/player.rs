//! Player - The hero exploring the dungeon

use super::combatant::{CombatStats, Combatant, Subject};
use super::inventory::Inventory;
use crate::config::PlayerConstants;
use crate::types::{Element, Position};
use serde::{Deserialize, Serialize};

/// Spells every new player knows
pub const STARTING_SPELLS: [Element; 3] = [Element::Fire, Element::Water, Element::Earth];

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    /// Total XP earned; never reset on level-up
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub inventory: Inventory,
    /// Known spells in the order they were learned
    spells: Vec<Element>,
    pub position: Position,
    /// Set once the portal has been unlocked
    pub can_progress: bool,
    pub stats: CombatStats,
}

impl Player {
    /// Create a level 1 player standing on `spawn`
    pub fn new(constants: &PlayerConstants, spawn: Position) -> Self {
        Player {
            name: constants.name.clone(),
            level: 1,
            xp: 0,
            xp_to_next_level: constants.xp_to_next_level,
            inventory: Inventory::new(),
            spells: STARTING_SPELLS.to_vec(),
            position: spawn,
            can_progress: false,
            stats: CombatStats::new(
                constants.health,
                constants.attack,
                constants.defense,
                constants.critical_chance,
            ),
        }
    }

    pub fn spells(&self) -> &[Element] {
        &self.spells
    }

    pub fn knows(&self, spell: Element) -> bool {
        self.spells.contains(&spell)
    }

    /// Learn a spell. Returns false if it was already known.
    pub fn learn(&mut self, spell: Element) -> bool {
        if self.knows(spell) {
            return false;
        }
        self.spells.push(spell);
        true
    }

    /// Snapshot of the numbers shown on the stats panel
    pub fn snapshot(&self) -> PlayerStats {
        PlayerStats {
            name: self.name.clone(),
            level: self.level,
            health: self.stats.health,
            max_health: self.stats.max_health,
            attack: self.stats.current_attack,
            defense: self.stats.current_defense,
            xp: self.xp,
            xp_to_next_level: self.xp_to_next_level,
        }
    }
}

impl Combatant for Player {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn subject(&self) -> Subject<'_> {
        Subject::Player
    }
}

/// Player numbers for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: f64,
    pub defense: f64,
    pub xp: u32,
    pub xp_to_next_level: u32,
}
