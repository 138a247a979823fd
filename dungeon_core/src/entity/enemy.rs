//! Enemy - Monsters roaming the dungeon

use super::combatant::{CombatStats, Combatant, Subject};
use crate::config::GameConstants;
use crate::types::Element;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enemy species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> &'static [EnemyKind] {
        &[EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// How this kind moves between ticks
    pub fn movement(&self) -> Movement {
        match self {
            EnemyKind::Goblin => Movement::Random,
            EnemyKind::Orc => Movement::Chase,
            EnemyKind::Dragon => Movement::Guard,
        }
    }

    /// Elements this kind casts from
    pub fn spell_candidates(&self) -> &'static [Element] {
        match self {
            EnemyKind::Dragon => &[Element::Fire, Element::Earth, Element::Air],
            EnemyKind::Goblin => &[Element::Earth, Element::Water],
            EnemyKind::Orc => &[Element::Earth, Element::Fire],
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enemy movement behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// Step in a random cardinal direction
    Random,
    /// Step toward the player
    Chase,
    /// Walk to the nearest key and stay there
    Guard,
}

/// A monster instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub kind: EnemyKind,
    pub movement: Movement,
    /// Latched once a guarding enemy reaches its key
    pub is_guarding: bool,
    pub stats: CombatStats,
}

impl Enemy {
    /// Spawn an enemy scaled to the player's current level
    ///
    /// Stats are fixed at creation; later level-ups do not affect this instance.
    pub fn spawn(
        kind: EnemyKind,
        player_level: u32,
        constants: &GameConstants,
        rng: &mut impl Rng,
    ) -> Self {
        let template = constants.enemy_template(kind);
        let level = player_level as f64;
        let name = template
            .names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| kind.name().to_string());

        Enemy {
            name,
            kind,
            movement: kind.movement(),
            is_guarding: false,
            stats: CombatStats::new(
                template.health + player_level * template.health_per_level,
                template.attack + level * template.attack_per_level,
                template.defense + level * template.defense_per_level,
                template.critical_chance,
            ),
        }
    }

    /// Pick this turn's element uniformly from the kind's candidates
    pub fn choose_spell(&self, rng: &mut impl Rng) -> Element {
        let candidates = self.kind.spell_candidates();
        candidates[rng.gen_range(0..candidates.len())]
    }

    /// Name with species, e.g. `Urk the Orc`
    pub fn title(&self) -> String {
        format!("{} the {}", self.name, self.kind)
    }
}

impl Combatant for Enemy {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn subject(&self) -> Subject<'_> {
        Subject::Enemy(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn make_test_rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(12345)
    }

    #[test]
    fn test_spawn_scales_with_level() {
        let constants = GameConstants::default();
        let mut rng = make_test_rng();

        let orc = Enemy::spawn(EnemyKind::Orc, 3, &constants, &mut rng);

        assert_eq!(orc.stats.max_health, 110);
        assert_eq!(orc.stats.health, 110);
        assert!((orc.stats.base_attack - 21.0).abs() < f64::EPSILON);
        assert!((orc.stats.base_defense - 14.5).abs() < f64::EPSILON);
        assert_eq!(orc.movement, Movement::Chase);
        assert!(constants.enemies.orc.names.contains(&orc.name));
    }

    #[test]
    fn test_dragon_guards() {
        let constants = GameConstants::default();
        let dragon = Enemy::spawn(EnemyKind::Dragon, 1, &constants, &mut make_test_rng());
        assert_eq!(dragon.movement, Movement::Guard);
        assert!(!dragon.is_guarding);
        assert_eq!(dragon.stats.max_health, 160);
    }

    #[test]
    fn test_empty_name_pool_uses_kind() {
        let mut constants = GameConstants::default();
        constants.enemies.goblin.names.clear();
        let goblin = Enemy::spawn(EnemyKind::Goblin, 1, &constants, &mut make_test_rng());
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.title(), "Goblin the Goblin");
    }

    #[test]
    fn test_choose_spell_stays_in_candidates() {
        let constants = GameConstants::default();
        let mut rng = make_test_rng();
        for kind in EnemyKind::all() {
            let enemy = Enemy::spawn(*kind, 1, &constants, &mut rng);
            for _ in 0..50 {
                let spell = enemy.choose_spell(&mut rng);
                assert!(kind.spell_candidates().contains(&spell));
            }
        }
    }
}
