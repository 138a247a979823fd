//! Combatant - Shared combat state for players and enemies

use crate::status::{StatusEffect, StatusKind};
use serde::{Deserialize, Serialize};

/// Health, attack, defense and active effects of anything that fights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatStats {
    /// Always within `0..=max_health`
    pub health: u32,
    pub max_health: u32,
    pub base_attack: f64,
    pub base_defense: f64,
    /// Attack after status modifiers (recomputed every status pass)
    pub current_attack: f64,
    /// Defense after status modifiers (recomputed every status pass)
    pub current_defense: f64,
    /// Probability in `[0, 1]` of landing a critical hit
    pub critical_chance: f64,
    /// Active effects in the order they were applied
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
}

impl CombatStats {
    /// Create stats at full health with no active effects
    pub fn new(max_health: u32, attack: f64, defense: f64, critical_chance: f64) -> Self {
        CombatStats {
            health: max_health,
            max_health,
            base_attack: attack,
            base_defense: defense,
            current_attack: attack,
            current_defense: defense,
            critical_chance,
            status_effects: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage, clamping at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore health to the maximum
    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    /// Health as a percentage of max health (0-100)
    pub fn health_percent(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn add_effect(&mut self, effect: StatusEffect) {
        self.status_effects.push(effect);
    }

    pub fn has_effect(&self, kind: StatusKind) -> bool {
        self.status_effects.iter().any(|e| e.kind == kind)
    }

    pub fn is_frozen(&self) -> bool {
        self.has_effect(StatusKind::Freeze)
    }

    pub fn clear_effects(&mut self) {
        self.status_effects.clear();
        self.current_attack = self.base_attack;
        self.current_defense = self.base_defense;
    }
}

/// How battle text refers to a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    /// Second person ("You suffer...")
    Player,
    /// Third person by name ("Urk suffers...")
    Enemy(&'a str),
}

impl<'a> Subject<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Subject::Player => "You",
            Subject::Enemy(name) => name,
        }
    }

    pub fn possessive(&self) -> String {
        match self {
            Subject::Player => "Your".to_string(),
            Subject::Enemy(name) => format!("{}'s", name),
        }
    }

    /// Pick the verb form agreeing with this subject
    pub fn verb(&self, second_person: &'a str, third_person: &'a str) -> &'a str {
        match self {
            Subject::Player => second_person,
            Subject::Enemy(_) => third_person,
        }
    }
}

/// Anything that can take part in a battle
pub trait Combatant {
    fn stats(&self) -> &CombatStats;

    /// How battle text refers to this combatant
    fn subject(&self) -> Subject<'_>;

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }

    fn is_frozen(&self) -> bool {
        self.stats().is_frozen()
    }

    fn health_percent(&self) -> f64 {
        self.stats().health_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut stats = CombatStats::new(50, 10.0, 5.0, 0.1);
        assert_eq!(stats.take_damage(20), 20);
        assert_eq!(stats.health, 30);
        assert_eq!(stats.take_damage(100), 30);
        assert_eq!(stats.health, 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_health_percent() {
        let mut stats = CombatStats::new(80, 10.0, 5.0, 0.1);
        stats.take_damage(20);
        assert!((stats.health_percent() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_effects_restores_base() {
        let mut stats = CombatStats::new(80, 10.0, 5.0, 0.1);
        stats.add_effect(StatusEffect::new(StatusKind::Freeze, 1));
        stats.current_attack = 2.0;
        assert!(stats.is_frozen());

        stats.clear_effects();
        assert!(!stats.is_frozen());
        assert!((stats.current_attack - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_subject_phrasing() {
        assert_eq!(Subject::Player.possessive(), "Your");
        assert_eq!(Subject::Enemy("Smaug").possessive(), "Smaug's");
        assert_eq!(Subject::Enemy("Smaug").verb("are", "is"), "is");
    }
}
