//! Progression - XP, levels, spell unlocks and dungeon transitions

use crate::config::{GameConstants, LevelingConstants, MovementConstants, XpConstants};
use crate::dungeon::DungeonMap;
use crate::entity::{InteractionError, ItemId, Player};
use crate::observer::GameObserver;
use crate::types::Element;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Something the player earns XP for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpSource {
    /// Defeating an enemy
    Enemy,
    /// Picking up a key or opening a chest
    Discovery,
    /// Clearing a dungeon through the portal
    Dungeon,
}

impl XpSource {
    /// XP awarded to a player at `level`
    pub fn amount(&self, level: u32, xp: &XpConstants) -> u32 {
        match self {
            XpSource::Enemy => xp.enemy_base + level * xp.enemy_per_level,
            XpSource::Discovery => xp.discovery_base + level * xp.discovery_per_level,
            XpSource::Dungeon => xp.dungeon_base + level * xp.dungeon_per_level,
        }
    }

    fn message(&self, amount: u32) -> String {
        match self {
            XpSource::Enemy => format!("You defeated the enemy and gained {} XP!", amount),
            XpSource::Discovery => format!("You gained {} XP for your discovery!", amount),
            XpSource::Dungeon => format!(
                "Congratulations! You cleared the dungeon and gained {} XP!",
                amount
            ),
        }
    }
}

/// A level gained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    /// Level reached
    pub level: u32,
    /// Spells learned on reaching it
    pub learned: Vec<Element>,
}

/// Award XP for `source`
///
/// XP is cumulative. At most one level is gained per award, even if the new
/// total clears several thresholds.
pub fn gain_xp(
    player: &mut Player,
    source: XpSource,
    constants: &GameConstants,
    obs: &mut dyn GameObserver,
) -> Option<LevelUp> {
    let amount = source.amount(player.level, &constants.xp);
    player.xp += amount;
    obs.on_status_message(&source.message(amount));
    obs.on_player_stats_changed(&player.snapshot());

    if player.xp >= player.xp_to_next_level {
        Some(level_up(player, &constants.leveling, obs))
    } else {
        None
    }
}

/// Raise the player one level: stronger, fully healed, maybe a new spell
pub fn level_up(
    player: &mut Player,
    leveling: &LevelingConstants,
    obs: &mut dyn GameObserver,
) -> LevelUp {
    player.level += 1;

    let stats = &mut player.stats;
    stats.base_attack += leveling.attack_per_level;
    stats.base_defense += leveling.defense_per_level;
    stats.current_attack = stats.base_attack;
    stats.current_defense = stats.base_defense;
    stats.max_health += leveling.health_per_level;
    stats.heal_full();
    player.xp_to_next_level = (player.xp_to_next_level as f64 * leveling.xp_growth).floor() as u32;

    log::info!(
        "{} reached level {} (next at {} XP)",
        player.name,
        player.level,
        player.xp_to_next_level
    );
    obs.on_status_message(&format!(
        "Level up! You are now level {}. Your attack and defense have increased!",
        player.level
    ));
    obs.on_player_stats_changed(&player.snapshot());

    let learned = unlock_spells(player, obs);
    LevelUp {
        level: player.level,
        learned,
    }
}

/// Spell granted on reaching a level
pub fn spell_for_level(level: u32) -> Option<Element> {
    match level {
        2 => Some(Element::Air),
        3 => Some(Element::Lightning),
        _ => None,
    }
}

/// Teach every spell the player's level entitles them to. Spells already
/// known are skipped.
pub fn unlock_spells(player: &mut Player, obs: &mut dyn GameObserver) -> Vec<Element> {
    let mut learned = Vec::new();
    for level in 2..=player.level {
        if let Some(spell) = spell_for_level(level) {
            if player.learn(spell) {
                obs.on_status_message(&format!("You have learned the {} spell!", spell));
                learned.push(spell);
            }
        }
    }
    obs.on_spellbook_changed(player.spells());
    learned
}

/// Enemy movement period for a player at `level`, in milliseconds
pub fn movement_interval(level: u32, movement: &MovementConstants) -> u64 {
    movement.interval_for_level(level)
}

/// Leave through the portal into dungeon number `next_dungeon`
///
/// Consumes the scroll, drops every key, clears status effects and puts the
/// player back on the spawn tile. Level, stats, spells and potions carry
/// over. Refuses without a scroll and changes nothing.
pub fn enter_next_dungeon(
    player: &mut Player,
    next_dungeon: u32,
    constants: &GameConstants,
    rng: &mut impl Rng,
    obs: &mut dyn GameObserver,
) -> Result<DungeonMap, InteractionError> {
    if !player.inventory.remove_one(ItemId::Scroll) {
        return Err(InteractionError::PortalSealed);
    }

    player.inventory.strip_dungeon_items();
    player.stats.clear_effects();
    player.position = constants.spawn;
    player.can_progress = false;

    let map = DungeonMap::generate(
        constants.grid_size,
        player.level,
        constants.spawn,
        constants,
        rng,
    );
    log::info!(
        "Entering dungeon {} at level {} with {} enemies",
        next_dungeon,
        player.level,
        map.enemies().len()
    );

    obs.on_map_changed(&map.snapshot(player.position));
    obs.on_inventory_changed(player.inventory.entries());
    obs.on_status_message(&format!("Welcome to Dungeon {}!", next_dungeon));
    Ok(map)
}
