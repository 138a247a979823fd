//! Game constants configuration

use super::ConfigError;
use crate::entity::EnemyKind;
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    /// Width and height of every generated dungeon
    pub grid_size: usize,
    /// Tile the player starts on in every dungeon
    pub spawn: Position,
    pub player: PlayerConstants,
    pub leveling: LevelingConstants,
    pub xp: XpConstants,
    pub movement: MovementConstants,
    pub combat: CombatConstants,
    pub status: StatusConstants,
    pub loot: LootConstants,
    pub generation: GenerationConstants,
    pub enemies: EnemyTemplates,
    pub names: NameConstants,
}

impl Default for GameConstants {
    fn default() -> Self {
        GameConstants {
            grid_size: 7,
            spawn: Position::new(3, 3),
            player: PlayerConstants::default(),
            leveling: LevelingConstants::default(),
            xp: XpConstants::default(),
            movement: MovementConstants::default(),
            combat: CombatConstants::default(),
            status: StatusConstants::default(),
            loot: LootConstants::default(),
            generation: GenerationConstants::default(),
            enemies: EnemyTemplates::default(),
            names: NameConstants::default(),
        }
    }
}

impl GameConstants {
    /// Constants shipped with the crate (`config/constants.toml`)
    pub fn bundled() -> Self {
        let toml = include_str!("../../config/constants.toml");
        super::parse_constants(toml).unwrap_or_else(|e| {
            log::warn!("Bundled constants rejected, using defaults: {}", e);
            GameConstants::default()
        })
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 {
            return Err(ConfigError::ValidationError(format!(
                "grid_size must be at least 3, got {}",
                self.grid_size
            )));
        }
        if self.spawn.x >= self.grid_size || self.spawn.y >= self.grid_size {
            return Err(ConfigError::ValidationError(format!(
                "spawn {} lies outside a {}x{} grid",
                self.spawn, self.grid_size, self.grid_size
            )));
        }
        if self.generation.min_walls > self.generation.max_walls {
            return Err(ConfigError::ValidationError(format!(
                "min_walls ({}) exceeds max_walls ({})",
                self.generation.min_walls, self.generation.max_walls
            )));
        }
        let chances = [
            ("loot.potion_chance", self.loot.potion_chance),
            ("player.critical_chance", self.player.critical_chance),
            ("enemies.goblin.critical_chance", self.enemies.goblin.critical_chance),
            ("enemies.orc.critical_chance", self.enemies.orc.critical_chance),
            ("enemies.dragon.critical_chance", self.enemies.dragon.critical_chance),
        ];
        for (name, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within [0, 1], got {}",
                    name, chance
                )));
            }
        }
        if self.movement.min_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "movement.min_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Base stats for an enemy kind
    pub fn enemy_template(&self, kind: EnemyKind) -> &EnemyTemplate {
        match kind {
            EnemyKind::Goblin => &self.enemies.goblin,
            EnemyKind::Orc => &self.enemies.orc,
            EnemyKind::Dragon => &self.enemies.dragon,
        }
    }
}

/// Starting values for a new player
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConstants {
    pub name: String,
    pub health: u32,
    pub attack: f64,
    pub defense: f64,
    pub critical_chance: f64,
    pub xp_to_next_level: u32,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            name: "Hero".to_string(),
            health: 100,
            attack: 10.0,
            defense: 5.0,
            critical_chance: 0.1,
            xp_to_next_level: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConstants {
    pub attack_per_level: f64,
    pub defense_per_level: f64,
    pub health_per_level: u32,
    /// Multiplier applied to the XP threshold after each level-up
    pub xp_growth: f64,
}

impl Default for LevelingConstants {
    fn default() -> Self {
        LevelingConstants {
            attack_per_level: 5.0,
            defense_per_level: 3.0,
            health_per_level: 20,
            xp_growth: 1.5,
        }
    }
}

/// XP rewards, each computed as `base + per_level * level`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XpConstants {
    pub enemy_base: u32,
    pub enemy_per_level: u32,
    pub discovery_base: u32,
    pub discovery_per_level: u32,
    pub dungeon_base: u32,
    pub dungeon_per_level: u32,
}

impl Default for XpConstants {
    fn default() -> Self {
        XpConstants {
            enemy_base: 50,
            enemy_per_level: 10,
            discovery_base: 10,
            discovery_per_level: 2,
            dungeon_base: 100,
            dungeon_per_level: 20,
        }
    }
}

/// Enemy movement pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConstants {
    pub base_interval_ms: u64,
    pub per_level_ms: u64,
    pub min_interval_ms: u64,
}

impl Default for MovementConstants {
    fn default() -> Self {
        MovementConstants {
            base_interval_ms: 1000,
            per_level_ms: 100,
            min_interval_ms: 500,
        }
    }
}

impl MovementConstants {
    /// Interval between enemy moves: `max(base - level * step, min)`
    pub fn interval_for_level(&self, level: u32) -> u64 {
        self.base_interval_ms
            .saturating_sub(level as u64 * self.per_level_ms)
            .max(self.min_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConstants {
    /// Floor applied to every hit
    pub min_damage: f64,
    pub critical_multiplier: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            min_damage: 5.0,
            critical_multiplier: 2,
        }
    }
}

/// Status effect magnitudes and potion durations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConstants {
    /// Fraction of max health lost per burn tick
    pub burn_fraction: f64,
    pub stun_attack_multiplier: f64,
    pub shield_defense_multiplier: f64,
    pub wind_shear_defense_multiplier: f64,
    pub burn_turns: u32,
    pub freeze_turns: u32,
    pub stun_turns: u32,
    pub shield_turns: u32,
    pub wind_shear_turns: u32,
}

impl Default for StatusConstants {
    fn default() -> Self {
        StatusConstants {
            burn_fraction: 0.05,
            stun_attack_multiplier: 0.5,
            shield_defense_multiplier: 1.5,
            wind_shear_defense_multiplier: 0.75,
            burn_turns: 3,
            freeze_turns: 1,
            stun_turns: 2,
            shield_turns: 3,
            wind_shear_turns: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConstants {
    /// Chance that an ordinary chest holds a potion
    pub potion_chance: f64,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants { potion_chance: 0.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConstants {
    pub min_walls: usize,
    pub max_walls: usize,
    /// Base key/chest pairs are `1..=max_base_pairs`
    pub max_base_pairs: usize,
    /// One extra key/chest pair per this many player levels
    pub levels_per_extra_pair: u32,
}

impl Default for GenerationConstants {
    fn default() -> Self {
        GenerationConstants {
            min_walls: 2,
            max_walls: 7,
            max_base_pairs: 2,
            levels_per_extra_pair: 2,
        }
    }
}

/// Base stats per enemy kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplates {
    pub goblin: EnemyTemplate,
    pub orc: EnemyTemplate,
    pub dragon: EnemyTemplate,
}

impl Default for EnemyTemplates {
    fn default() -> Self {
        EnemyTemplates {
            goblin: EnemyTemplate::new(50, 10.0, 5.0, &["Gorbash", "Snaggle", "Blarg", "Threk"]),
            orc: EnemyTemplate::new(80, 15.0, 10.0, &["Gorok", "Mogor", "Urk", "Brug"]),
            dragon: EnemyTemplate::new(150, 25.0, 20.0, &["Smaug", "Fafnir", "Drako", "Ancalagon"]),
        }
    }
}

/// Stats for one enemy kind, scaled by the player's level at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub health: u32,
    pub attack: f64,
    pub defense: f64,
    #[serde(default = "default_health_per_level")]
    pub health_per_level: u32,
    #[serde(default = "default_attack_per_level")]
    pub attack_per_level: f64,
    #[serde(default = "default_defense_per_level")]
    pub defense_per_level: f64,
    #[serde(default = "default_enemy_crit")]
    pub critical_chance: f64,
    /// Pool of display names; the kind name is used when empty
    #[serde(default)]
    pub names: Vec<String>,
}

fn default_health_per_level() -> u32 {
    10
}
fn default_attack_per_level() -> f64 {
    2.0
}
fn default_defense_per_level() -> f64 {
    1.5
}
fn default_enemy_crit() -> f64 {
    0.1
}

impl EnemyTemplate {
    fn new(health: u32, attack: f64, defense: f64, names: &[&str]) -> Self {
        EnemyTemplate {
            health,
            attack,
            defense,
            health_per_level: default_health_per_level(),
            attack_per_level: default_attack_per_level(),
            defense_per_level: default_defense_per_level(),
            critical_chance: default_enemy_crit(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Flavour names for keys and chests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConstants {
    pub keys: Vec<String>,
    pub chests: Vec<String>,
}

impl Default for NameConstants {
    fn default() -> Self {
        let keys = [
            "The Key of Solomon",
            "The Key of Thoth",
            "The Silver Key of Yggdrasil",
            "The Key of Olympus",
            "The Key of Hades",
            "The Lunar Key of the Moon",
            "The Celestial Key of Orion",
        ];
        let chests = [
            "Chest of the Pharaohs",
            "Chest of Arcane Wizards",
            "Chest of Forgotten Kings",
            "Chest of the Eternal Flame",
            "Chest of the Naga Queen",
            "Chest of the Ancient Dragons",
            "Chest of the Lost Gods",
        ];
        NameConstants {
            keys: keys.iter().map(|s| s.to_string()).collect(),
            chests: chests.iter().map(|s| s.to_string()).collect(),
        }
    }
}
