//! Element matchups, damage and critical hits

use super::result::Strike;
use crate::config::CombatConstants;
use crate::entity::CombatStats;
use crate::types::{Element, Matchup};
use rand::Rng;

/// Decide which spell overpowers the other
///
/// Only the player's list of beaten elements is consulted. Fire/Lightning
/// and Earth/Air beat each other, so the player wins either way; Fire/Earth
/// and Air/Lightning beat neither, so the enemy wins either way.
pub fn determine_outcome(player: Element, enemy: Element) -> Matchup {
    if player == enemy {
        Matchup::Tie
    } else if player.overpowers(enemy) {
        Matchup::PlayerWins
    } else {
        Matchup::EnemyWins
    }
}

/// Base hit damage: `max(min_damage, floor(attack - defense))`
pub fn calculate_damage(
    attacker: &CombatStats,
    defender: &CombatStats,
    constants: &CombatConstants,
) -> u32 {
    let raw = (attacker.current_attack - defender.current_defense).floor();
    raw.max(constants.min_damage) as u32
}

/// Roll a critical hit with probability `chance`
pub fn is_critical_hit(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

/// Resolve one attack: base damage, one critical roll, then health loss
pub fn strike(
    attacker: &CombatStats,
    defender: &mut CombatStats,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> Strike {
    let base = calculate_damage(attacker, defender, constants);
    let critical = is_critical_hit(attacker.critical_chance, rng);
    let damage = if critical {
        base * constants.critical_multiplier
    } else {
        base
    };
    let health_lost = defender.take_damage(damage);
    Strike {
        damage,
        critical,
        health_lost,
        killing_blow: !defender.is_alive(),
    }
}
