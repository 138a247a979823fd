//! TurnReport - Outcome of one battle turn

use super::battle::BattleState;
use crate::types::{Element, Matchup};
use serde::{Deserialize, Serialize};

/// A single resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    /// Damage after the critical multiplier
    pub damage: u32,
    pub critical: bool,
    /// Health actually removed (damage clamped to remaining health)
    pub health_lost: u32,
    pub killing_blow: bool,
}

/// What the player did this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum PlayerAction {
    Spell(Element),
    Potion(Element),
}

/// Everything that happened during one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// 1-based turn counter within the battle
    pub turn: u32,
    pub player_action: PlayerAction,
    /// Element the enemy cast, if it acted
    pub enemy_element: Option<Element>,
    /// Only set when both sides could act and elements were compared
    pub matchup: Option<Matchup>,
    pub player_frozen: bool,
    pub enemy_frozen: bool,
    /// Attack landed by the player
    pub player_strike: Option<Strike>,
    /// Attack landed by the enemy
    pub enemy_strike: Option<Strike>,
    /// Burn damage taken during the status pass
    pub player_burn: u32,
    pub enemy_burn: u32,
    /// Battle state after the turn
    pub state: BattleState,
}

impl TurnReport {
    pub fn new(turn: u32, player_action: PlayerAction) -> Self {
        TurnReport {
            turn,
            player_action,
            enemy_element: None,
            matchup: None,
            player_frozen: false,
            enemy_frozen: false,
            player_strike: None,
            enemy_strike: None,
            player_burn: 0,
            enemy_burn: 0,
            state: BattleState::Resolving,
        }
    }

    /// Total health the enemy lost this turn
    pub fn enemy_health_lost(&self) -> u32 {
        self.player_strike.map(|s| s.health_lost).unwrap_or(0) + self.enemy_burn
    }

    /// Total health the player lost this turn
    pub fn player_health_lost(&self) -> u32 {
        self.enemy_strike.map(|s| s.health_lost).unwrap_or(0) + self.player_burn
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(strike) = self.player_strike {
            parts.push(format!("dealt {}", strike.damage));
        }
        if let Some(strike) = self.enemy_strike {
            parts.push(format!("took {}", strike.damage));
        }
        if self.player_burn > 0 || self.enemy_burn > 0 {
            parts.push(format!("burn {}/{}", self.player_burn, self.enemy_burn));
        }
        if self.matchup == Some(Matchup::Tie) {
            parts.push("tie".to_string());
        }
        if self.player_frozen && self.enemy_frozen {
            parts.push("both frozen".to_string());
        }
        match self.state {
            BattleState::EnemyDefeated => parts.push("VICTORY".to_string()),
            BattleState::PlayerDefeated => parts.push("DEFEAT".to_string()),
            _ => {}
        }

        if parts.is_empty() {
            format!("Turn {}: nothing happened", self.turn)
        } else {
            format!("Turn {}: {}", self.turn, parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(damage: u32) -> Strike {
        Strike {
            damage,
            critical: false,
            health_lost: damage,
            killing_blow: false,
        }
    }

    #[test]
    fn test_health_lost_totals() {
        let mut report = TurnReport::new(1, PlayerAction::Spell(Element::Fire));
        report.player_strike = Some(hit(12));
        report.enemy_burn = 5;
        assert_eq!(report.enemy_health_lost(), 17);
        assert_eq!(report.player_health_lost(), 0);
    }

    #[test]
    fn test_summary() {
        let mut report = TurnReport::new(3, PlayerAction::Spell(Element::Water));
        report.enemy_strike = Some(hit(9));
        report.state = BattleState::PlayerDefeated;

        let summary = report.summary();
        assert!(summary.starts_with("Turn 3"));
        assert!(summary.contains("took 9"));
        assert!(summary.contains("DEFEAT"));
    }

    #[test]
    fn test_empty_summary() {
        let report = TurnReport::new(2, PlayerAction::Potion(Element::Earth));
        assert_eq!(report.summary(), "Turn 2: nothing happened");
    }
}
