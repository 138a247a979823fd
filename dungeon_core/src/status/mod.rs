//! Status effects - timed modifiers attached to a combatant

pub mod tick;

pub use tick::{apply_status_effects, potion_effect, StatusTickResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Loses a fraction of max health each pass
    Burn,
    /// Skips the next action (handled by the combat resolver)
    Freeze,
    /// Halves attack
    Stun,
    /// Raises defense
    Shield,
    /// Lowers defense
    WindShear,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Burn => "Burn",
            StatusKind::Freeze => "Freeze",
            StatusKind::Stun => "Stun",
            StatusKind::Shield => "Shield",
            StatusKind::WindShear => "Wind Shear",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Burn => "🔥",
            StatusKind::Freeze => "❄️",
            StatusKind::Stun => "💫",
            StatusKind::Shield => "🛡️",
            StatusKind::WindShear => "🌪️",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An active status effect instance
///
/// Effects of the same kind do not merge; each instance counts down on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Passes left before the effect is removed
    pub remaining_turns: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, remaining_turns: u32) -> Self {
        StatusEffect {
            kind,
            remaining_turns,
        }
    }

    /// Check if the effect is still active
    pub fn is_active(&self) -> bool {
        self.remaining_turns > 0
    }

    /// Short display form, e.g. `🔥(3)`
    pub fn badge(&self) -> String {
        format!("{}({})", self.kind.icon(), self.remaining_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_activity() {
        let effect = StatusEffect::new(StatusKind::Burn, 1);
        assert!(effect.is_active());
        assert!(!StatusEffect::new(StatusKind::Stun, 0).is_active());
    }

    #[test]
    fn test_badge() {
        let effect = StatusEffect::new(StatusKind::Stun, 2);
        assert_eq!(effect.badge(), "💫(2)");
    }

    #[test]
    fn test_status_serialization() {
        let effect = StatusEffect::new(StatusKind::WindShear, 2);
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains("wind_shear"));
    }
}
