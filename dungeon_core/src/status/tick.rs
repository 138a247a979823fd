//! Status effect processing

use super::{StatusEffect, StatusKind};
use crate::config::StatusConstants;
use crate::entity::{CombatStats, Subject};
use crate::types::Element;

/// Result of one status-application pass
#[derive(Debug, Clone, Default)]
pub struct StatusTickResult {
    /// Battle-log lines, one per processed effect (Freeze is silent)
    pub lines: Vec<String>,
    /// Total burn damage taken this pass
    pub burn_damage: u32,
    /// Effects that ran out this pass
    pub expired: Vec<StatusKind>,
}

impl StatusTickResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Run one status-application pass over a combatant
///
/// Attack and defense are recomputed from the base values, so modifiers never
/// compound across passes. Effects apply in insertion order, each then loses a
/// turn; effects reaching zero are removed after they have applied.
pub fn apply_status_effects(
    stats: &mut CombatStats,
    subject: &Subject<'_>,
    constants: &StatusConstants,
) -> StatusTickResult {
    let mut result = StatusTickResult::new();

    stats.current_attack = stats.base_attack;
    stats.current_defense = stats.base_defense;
    stats.status_effects.retain(StatusEffect::is_active);

    for i in 0..stats.status_effects.len() {
        let kind = stats.status_effects[i].kind;
        match kind {
            StatusKind::Burn => {
                let burn = (stats.max_health as f64 * constants.burn_fraction).floor() as u32;
                let dealt = stats.take_damage(burn);
                result.burn_damage += dealt;
                result.lines.push(format!(
                    "{} {} {} burn damage.",
                    subject.name(),
                    subject.verb("suffer", "suffers"),
                    burn
                ));
            }
            StatusKind::Freeze => {}
            StatusKind::Stun => {
                stats.current_attack *= constants.stun_attack_multiplier;
                result.lines.push(format!(
                    "{} attack power is reduced due to stun.",
                    subject.possessive()
                ));
            }
            StatusKind::Shield => {
                stats.current_defense *= constants.shield_defense_multiplier;
                result.lines.push(format!(
                    "{} defense is increased due to shield.",
                    subject.possessive()
                ));
            }
            StatusKind::WindShear => {
                stats.current_defense *= constants.wind_shear_defense_multiplier;
                result.lines.push(format!(
                    "{} defense is decreased due to wind shear.",
                    subject.possessive()
                ));
            }
        }
        stats.status_effects[i].remaining_turns -= 1;
    }

    result.expired = stats
        .status_effects
        .iter()
        .filter(|e| !e.is_active())
        .map(|e| e.kind)
        .collect();
    stats.status_effects.retain(StatusEffect::is_active);

    result
}

/// Status effect a potion of the given element inflicts
pub fn potion_effect(element: Element, constants: &StatusConstants) -> StatusEffect {
    match element {
        Element::Fire => StatusEffect::new(StatusKind::Burn, constants.burn_turns),
        Element::Water => StatusEffect::new(StatusKind::Freeze, constants.freeze_turns),
        Element::Lightning => StatusEffect::new(StatusKind::Stun, constants.stun_turns),
        Element::Earth => StatusEffect::new(StatusKind::Shield, constants.shield_turns),
        Element::Air => StatusEffect::new(StatusKind::WindShear, constants.wind_shear_turns),
    }
}

/// Battle-log line announcing a freshly applied effect
pub fn applied_message(kind: StatusKind, target: &Subject<'_>) -> String {
    match kind {
        StatusKind::Burn => format!("{} is now burning!", target.name()),
        StatusKind::Freeze => format!("{} is frozen!", target.name()),
        StatusKind::Stun => format!("{} is stunned!", target.name()),
        StatusKind::Shield => format!("{} gains a protective shield!", target.name()),
        StatusKind::WindShear => {
            format!("{} defense is reduced by the wind!", target.possessive())
        }
    }
}
