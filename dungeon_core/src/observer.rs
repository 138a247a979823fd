//! Presentation callbacks
//!
//! The core never renders anything. Everything a front end needs to show is
//! pushed through [`GameObserver`]; every method has a no-op default so hosts
//! implement only what they display.

use crate::dungeon::GridSnapshot;
use crate::entity::{InventoryEntry, PlayerStats};
use crate::status::StatusEffect;
use crate::types::{CastSide, Element, Side};
use serde::{Deserialize, Serialize};

/// Receiver for everything the core wants shown
pub trait GameObserver {
    /// One-line message about the overall game state
    fn on_status_message(&mut self, _text: &str) {}

    /// One line of the battle log
    fn on_battle_log(&mut self, _text: &str) {}

    /// Health bar fill percentages (0-100)
    fn on_health_bars_changed(&mut self, _player_pct: f64, _enemy_pct: f64) {}

    fn on_status_effects_changed(&mut self, _side: Side, _effects: &[StatusEffect]) {}

    fn on_map_changed(&mut self, _grid: &GridSnapshot) {}

    fn on_inventory_changed(&mut self, _items: &[InventoryEntry]) {}

    fn on_spellbook_changed(&mut self, _spells: &[Element]) {}

    fn on_player_stats_changed(&mut self, _stats: &PlayerStats) {}

    /// A spell or effect icon should flash on one side of the battle
    fn on_cast_animation(&mut self, _side: CastSide, _icon: &str) {}

    /// Battle started against the named enemy
    fn on_battle_started(&mut self, _enemy_title: &str) {}

    /// Battle ended (either way)
    fn on_battle_ended(&mut self) {}

    fn on_game_over(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// A recorded observer callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    StatusMessage { text: String },
    BattleLog { text: String },
    HealthBars { player_pct: f64, enemy_pct: f64 },
    StatusEffects { side: Side, effects: Vec<StatusEffect> },
    MapChanged { grid: GridSnapshot },
    InventoryChanged { items: Vec<InventoryEntry> },
    SpellbookChanged { spells: Vec<Element> },
    PlayerStats { stats: PlayerStats },
    CastAnimation { side: CastSide, icon: String },
    BattleStarted { enemy: String },
    BattleEnded,
    GameOver,
}

/// Observer that records every callback in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// All status messages, oldest first
    pub fn status_messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StatusMessage { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All battle-log lines, oldest first
    pub fn battle_log(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BattleLog { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_messages().last().copied()
    }

    pub fn saw_game_over(&self) -> bool {
        self.events.iter().any(|e| matches!(e, GameEvent::GameOver))
    }

    /// Events as newline-delimited JSON
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl GameObserver for EventLog {
    fn on_status_message(&mut self, text: &str) {
        self.events.push(GameEvent::StatusMessage {
            text: text.to_string(),
        });
    }

    fn on_battle_log(&mut self, text: &str) {
        self.events.push(GameEvent::BattleLog {
            text: text.to_string(),
        });
    }

    fn on_health_bars_changed(&mut self, player_pct: f64, enemy_pct: f64) {
        self.events.push(GameEvent::HealthBars {
            player_pct,
            enemy_pct,
        });
    }

    fn on_status_effects_changed(&mut self, side: Side, effects: &[StatusEffect]) {
        self.events.push(GameEvent::StatusEffects {
            side,
            effects: effects.to_vec(),
        });
    }

    fn on_map_changed(&mut self, grid: &GridSnapshot) {
        self.events.push(GameEvent::MapChanged { grid: grid.clone() });
    }

    fn on_inventory_changed(&mut self, items: &[InventoryEntry]) {
        self.events.push(GameEvent::InventoryChanged {
            items: items.to_vec(),
        });
    }

    fn on_spellbook_changed(&mut self, spells: &[Element]) {
        self.events.push(GameEvent::SpellbookChanged {
            spells: spells.to_vec(),
        });
    }

    fn on_player_stats_changed(&mut self, stats: &PlayerStats) {
        self.events.push(GameEvent::PlayerStats {
            stats: stats.clone(),
        });
    }

    fn on_cast_animation(&mut self, side: CastSide, icon: &str) {
        self.events.push(GameEvent::CastAnimation {
            side,
            icon: icon.to_string(),
        });
    }

    fn on_battle_started(&mut self, enemy_title: &str) {
        self.events.push(GameEvent::BattleStarted {
            enemy: enemy_title.to_string(),
        });
    }

    fn on_battle_ended(&mut self) {
        self.events.push(GameEvent::BattleEnded);
    }

    fn on_game_over(&mut self) {
        self.events.push(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_filters() {
        let mut log = EventLog::new();
        log.on_status_message("Welcome");
        log.on_battle_log("You cast Fire.");
        log.on_status_message("Bye");

        assert_eq!(log.status_messages(), vec!["Welcome", "Bye"]);
        assert_eq!(log.battle_log(), vec!["You cast Fire."]);
        assert_eq!(log.last_status(), Some("Bye"));
        assert!(!log.saw_game_over());
    }

    #[test]
    fn test_json_lines() {
        let mut log = EventLog::new();
        log.on_cast_animation(CastSide::Enemy, "❄️");
        log.on_game_over();

        let json = log.to_json_lines().unwrap();
        let lines: Vec<&str> = json.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("cast_animation"));
        assert!(lines[1].contains("game_over"));
    }

    #[test]
    fn test_null_observer_accepts_everything() {
        let mut observer = NullObserver;
        observer.on_status_message("ignored");
        observer.on_health_bars_changed(10.0, 20.0);
        observer.on_game_over();
    }
}
