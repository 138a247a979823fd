//! GameSession - One running game: player, dungeon, battle and clock
//!
//! The session is the only owner of game state. Hosts feed it input
//! (`move_player`, `choose_spell`, `use_potion`) and elapsed time (`tick`)
//! and receive everything worth showing through a [`GameObserver`].

use crate::combat::{Battle, BattleState, TurnReport};
use crate::config::GameConstants;
use crate::dungeon::{move_enemies, use_item, DungeonMap, Encounter, GridSnapshot, ItemOutcome, Tile};
use crate::entity::{Enemy, InventoryEntry, ItemId, Player};
use crate::observer::GameObserver;
use crate::progression::{enter_next_dungeon, gain_xp, movement_interval, XpSource};
use crate::types::{Direction, Element, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player input the session refused
///
/// The display text is what the player is told.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("The game is over.")]
    GameOver,
    #[error("You cannot do that during a battle.")]
    InBattle,
    #[error("You are not in a battle.")]
    NotInBattle,
    #[error("You cannot move in that direction.")]
    Blocked,
    #[error("You have not learned the {0} spell.")]
    UnknownSpell(Element),
    #[error("You have no potions to use.")]
    NoPotions,
    #[error("You have no {0} Potion.")]
    MissingPotion(Element),
}

/// Choices open to the player on their battle turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOptions {
    pub spells: Vec<Element>,
    pub potions: Vec<InventoryEntry>,
}

/// Accumulates host time into enemy movement steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementClock {
    interval_ms: u64,
    accumulated_ms: u64,
}

impl MovementClock {
    pub fn new(interval_ms: u64) -> Self {
        MovementClock {
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Add `delta_ms` and return how many whole intervals elapsed
    pub fn advance(&mut self, delta_ms: u64) -> u64 {
        self.accumulated_ms = self.accumulated_ms.saturating_add(delta_ms);
        let steps = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        steps
    }

    /// Start over with a new interval
    pub fn restart(&mut self, interval_ms: u64) {
        *self = MovementClock::new(interval_ms);
    }
}

/// A running game
pub struct GameSession<R = ChaCha8Rng> {
    constants: GameConstants,
    player: Player,
    map: DungeonMap,
    dungeon_number: u32,
    battle: Option<Battle>,
    game_over: bool,
    clock: MovementClock,
    rng: R,
}

impl GameSession<ChaCha8Rng> {
    /// New game with a deterministic RNG
    pub fn new(constants: GameConstants, seed: u64) -> Self {
        Self::with_rng(constants, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// New game drawing all randomness from `rng`
    pub fn with_rng(constants: GameConstants, mut rng: R) -> Self {
        let player = Player::new(&constants.player, constants.spawn);
        let map = DungeonMap::generate(
            constants.grid_size,
            player.level,
            constants.spawn,
            &constants,
            &mut rng,
        );
        let clock = MovementClock::new(movement_interval(player.level, &constants.movement));
        log::info!(
            "New game: {}x{} dungeon, {} enemies",
            constants.grid_size,
            constants.grid_size,
            map.enemies().len()
        );
        GameSession {
            constants,
            player,
            map,
            dungeon_number: 1,
            battle: None,
            game_over: false,
            clock,
            rng,
        }
    }

    /// Push the initial state to a freshly attached observer
    pub fn start(&self, obs: &mut dyn GameObserver) {
        obs.on_map_changed(&self.snapshot());
        obs.on_player_stats_changed(&self.player.snapshot());
        obs.on_inventory_changed(self.player.inventory.entries());
        obs.on_spellbook_changed(self.player.spells());
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    pub fn dungeon_number(&self) -> u32 {
        self.dungeon_number
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn is_in_battle(&self) -> bool {
        self.battle.is_some()
    }

    /// State of the current battle, `Idle` when there is none
    pub fn battle_state(&self) -> BattleState {
        self.battle.as_ref().map_or(BattleState::Idle, |b| b.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Enemy currently being fought
    pub fn current_enemy(&self) -> Option<&Enemy> {
        let battle = self.battle.as_ref()?;
        self.map.enemy_at(battle.enemy_location)
    }

    /// Current enemy movement period in milliseconds
    pub fn movement_interval_ms(&self) -> u64 {
        self.clock.interval_ms()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.map.snapshot(self.player.position)
    }

    /// Step the player one tile and resolve whatever is there
    ///
    /// Only walls and the grid edge block a step. Refused item uses still
    /// count as a successful move and come back as [`Encounter::Refused`].
    pub fn move_player(
        &mut self,
        direction: Direction,
        obs: &mut dyn GameObserver,
    ) -> Result<Encounter, ActionError> {
        self.ensure_playing()?;
        if self.battle.is_some() {
            return Err(self.reject(ActionError::InBattle, obs));
        }

        let target = self
            .player
            .position
            .step(direction, self.map.size())
            .filter(|p| self.map.tile_at(*p) != Some(Tile::Wall));
        let Some(target) = target else {
            return Err(self.reject(ActionError::Blocked, obs));
        };

        self.player.position = target;
        obs.on_map_changed(&self.snapshot());

        let encounter = match self.map.tile_at(target) {
            Some(Tile::Enemy) => {
                self.begin_battle(target, obs);
                Encounter::Combat(target)
            }
            Some(Tile::Key) | Some(Tile::Chest) | Some(Tile::Portal) => {
                self.interact(target, obs)
            }
            _ => Encounter::Nothing,
        };
        Ok(encounter)
    }

    /// Spells and potions available this turn, or `None` outside a battle
    pub fn request_battle_options(&self) -> Option<BattleOptions> {
        if self.game_over {
            return None;
        }
        let battle = self.battle.as_ref()?;
        if !battle.is_awaiting_choice() {
            return None;
        }
        Some(BattleOptions {
            spells: self.player.spells().to_vec(),
            potions: self.player.inventory.potions(),
        })
    }

    /// Potions the player could throw right now
    ///
    /// An empty bag is reported to the battle log and refused.
    pub fn potion_options(
        &self,
        obs: &mut dyn GameObserver,
    ) -> Result<Vec<InventoryEntry>, ActionError> {
        self.ensure_playing()?;
        if self.battle.is_none() {
            return Err(ActionError::NotInBattle);
        }
        let potions = self.player.inventory.potions();
        if potions.is_empty() {
            obs.on_battle_log(&ActionError::NoPotions.to_string());
            return Err(ActionError::NoPotions);
        }
        Ok(potions)
    }

    /// Cast a known spell at the current enemy
    pub fn choose_spell(
        &mut self,
        element: Element,
        obs: &mut dyn GameObserver,
    ) -> Result<TurnReport, ActionError> {
        self.ensure_playing()?;
        if self.battle.is_none() {
            return Err(self.reject(ActionError::NotInBattle, obs));
        }
        if !self.player.knows(element) {
            return Err(self.reject(ActionError::UnknownSpell(element), obs));
        }

        let report = {
            let Self {
                constants,
                player,
                map,
                battle,
                rng,
                ..
            } = self;
            let Some(battle) = battle.as_mut() else {
                return Err(ActionError::NotInBattle);
            };
            let Some(enemy) = map.enemy_at_mut(battle.enemy_location) else {
                return Err(ActionError::NotInBattle);
            };
            battle.cast_spell(player, enemy, element, constants, rng, obs)
        };

        self.settle_battle(report.state, obs);
        Ok(report)
    }

    /// Throw a held potion at the current enemy
    pub fn use_potion(
        &mut self,
        element: Element,
        obs: &mut dyn GameObserver,
    ) -> Result<TurnReport, ActionError> {
        self.ensure_playing()?;
        if self.battle.is_none() {
            return Err(self.reject(ActionError::NotInBattle, obs));
        }
        if self.player.inventory.potions().is_empty() {
            return Err(self.reject(ActionError::NoPotions, obs));
        }
        if !self.player.inventory.contains(ItemId::Potion(element)) {
            return Err(self.reject(ActionError::MissingPotion(element), obs));
        }

        let report = {
            let Self {
                constants,
                player,
                map,
                battle,
                rng,
                ..
            } = self;
            let Some(battle) = battle.as_mut() else {
                return Err(ActionError::NotInBattle);
            };
            let Some(enemy) = map.enemy_at_mut(battle.enemy_location) else {
                return Err(ActionError::NotInBattle);
            };
            battle.use_potion(player, enemy, element, constants, rng, obs)
        };

        self.settle_battle(report.state, obs);
        Ok(report)
    }

    /// Advance the movement clock by `delta_ms`
    ///
    /// Runs one enemy movement step per elapsed interval. Time does not pass
    /// during a battle or after game over. Returns where a battle started, if
    /// an enemy walked into the player.
    pub fn tick(&mut self, delta_ms: u64, obs: &mut dyn GameObserver) -> Option<Position> {
        if self.game_over || self.battle.is_some() {
            return None;
        }

        let steps = self.clock.advance(delta_ms);
        for _ in 0..steps {
            let bumped = move_enemies(&mut self.map, self.player.position, &mut self.rng);
            obs.on_map_changed(&self.snapshot());
            if let Some(location) = bumped {
                self.clock.restart(self.clock.interval_ms());
                self.begin_battle(location, obs);
                return Some(location);
            }
        }
        None
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        if self.game_over {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Tell the player why their input was refused
    fn reject(&self, err: ActionError, obs: &mut dyn GameObserver) -> ActionError {
        if self.battle.is_some() {
            obs.on_battle_log(&err.to_string());
        } else {
            obs.on_status_message(&err.to_string());
        }
        err
    }

    fn begin_battle(&mut self, location: Position, obs: &mut dyn GameObserver) {
        if self.battle.is_some() {
            return;
        }
        let Some(enemy) = self.map.enemy_at(location) else {
            log::warn!("No enemy at {} to fight", location);
            return;
        };
        self.battle = Some(Battle::start(location, &self.player, enemy, obs));
    }

    fn interact(&mut self, location: Position, obs: &mut dyn GameObserver) -> Encounter {
        let level_before = self.player.level;
        let result = use_item(
            &mut self.player,
            &mut self.map,
            location,
            &self.constants,
            &mut self.rng,
            obs,
        );
        self.sync_clock(level_before);

        match result {
            Ok(outcome) => {
                if let ItemOutcome::PortalOpened { .. } = outcome {
                    self.advance_dungeon(obs);
                }
                Encounter::Item(outcome)
            }
            Err(err) => Encounter::Refused(err),
        }
    }

    fn advance_dungeon(&mut self, obs: &mut dyn GameObserver) {
        let next = self.dungeon_number + 1;
        match enter_next_dungeon(&mut self.player, next, &self.constants, &mut self.rng, obs) {
            Ok(map) => {
                self.map = map;
                self.dungeon_number = next;
                self.clock.restart(self.clock.interval_ms());
            }
            Err(err) => log::warn!("Portal opened without a scroll: {}", err),
        }
    }

    /// Restart the movement clock if the player levelled since `level_before`
    fn sync_clock(&mut self, level_before: u32) {
        if self.player.level != level_before {
            let interval = movement_interval(self.player.level, &self.constants.movement);
            log::debug!("Enemy movement interval now {} ms", interval);
            self.clock.restart(interval);
        }
    }

    fn settle_battle(&mut self, state: BattleState, obs: &mut dyn GameObserver) {
        let Some(location) = self.battle.as_ref().map(|b| b.enemy_location) else {
            return;
        };
        match state {
            BattleState::EnemyDefeated => {
                let level_before = self.player.level;
                gain_xp(&mut self.player, XpSource::Enemy, &self.constants, obs);
                if let Some(enemy) = self.map.remove_enemy(location) {
                    log::info!("{} defeated at {}", enemy.title(), location);
                }
                obs.on_map_changed(&self.snapshot());
                self.battle = None;
                obs.on_battle_ended();
                obs.on_status_message("Battle concluded. You can continue your adventure.");
                self.sync_clock(level_before);
            }
            BattleState::PlayerDefeated => {
                log::info!("Player defeated in dungeon {}", self.dungeon_number);
                self.battle = None;
                self.game_over = true;
                obs.on_battle_ended();
                obs.on_status_message("Battle concluded. You can continue your adventure.");
                obs.on_status_message("Game Over. Press F5 to restart.");
                obs.on_game_over();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EnemyKind, Item};
    use crate::observer::EventLog;
    use crate::status::{StatusEffect, StatusKind};
    use rand::rngs::StdRng;

    /// Session on an empty 7x7 map with the player on the spawn tile (3, 3)
    fn quiet_session() -> GameSession {
        let mut session = GameSession::new(GameConstants::default(), 99);
        session.map = DungeonMap::new(7);
        session.player.stats.critical_chance = 0.0;
        session
    }

    fn add_enemy(session: &mut GameSession, kind: EnemyKind, at: Position) {
        let mut rng = StdRng::seed_from_u64(17);
        let mut enemy = Enemy::spawn(kind, 1, &session.constants, &mut rng);
        enemy.stats.critical_chance = 0.0;
        assert!(session.map.place_enemy(enemy, at));
    }

    #[test]
    fn test_clock_accumulates() {
        let mut clock = MovementClock::new(1000);
        assert_eq!(clock.advance(400), 0);
        assert_eq!(clock.advance(400), 0);
        assert_eq!(clock.advance(400), 1);
        assert_eq!(clock.advance(2500), 2);
        clock.restart(500);
        assert_eq!(clock.advance(499), 0);
        assert_eq!(clock.interval_ms(), 500);
    }

    #[test]
    fn test_clock_survives_huge_deltas() {
        let mut clock = MovementClock::new(1000);
        clock.advance(999);
        assert_eq!(clock.advance(u64::MAX), u64::MAX / 1000);
        assert_eq!(clock.advance(u64::MAX), u64::MAX / 1000);
    }

    #[test]
    fn test_new_game() {
        let session = GameSession::new(GameConstants::default(), 1);
        assert_eq!(session.dungeon_number(), 1);
        assert_eq!(session.player().position, Position::new(3, 3));
        assert_eq!(session.movement_interval_ms(), 900);
        assert!(!session.is_in_battle());
        assert_eq!(session.map().count(Tile::Portal), 1);
    }

    #[test]
    fn test_wall_blocks_move() {
        let mut session = quiet_session();
        session.map.place_object(Item::Wall, Position::new(2, 3));
        let mut log = EventLog::new();

        let err = session.move_player(Direction::Up, &mut log).unwrap_err();

        assert_eq!(err, ActionError::Blocked);
        assert_eq!(session.player().position, Position::new(3, 3));
        assert_eq!(log.last_status(), Some("You cannot move in that direction."));
    }

    #[test]
    fn test_edge_blocks_move() {
        let mut session = quiet_session();
        session.player.position = Position::new(3, 6);

        let err = session
            .move_player(Direction::Right, &mut EventLog::new())
            .unwrap_err();

        assert_eq!(err, ActionError::Blocked);
        assert_eq!(session.player().position, Position::new(3, 6));
    }

    #[test]
    fn test_plain_move() {
        let mut session = quiet_session();
        let mut log = EventLog::new();

        let encounter = session.move_player(Direction::Left, &mut log).unwrap();

        assert_eq!(encounter, Encounter::Nothing);
        assert_eq!(session.player().position, Position::new(3, 2));
        assert_eq!(
            session.snapshot().at(Position::new(3, 2)),
            Some(crate::dungeon::TileView::Player)
        );
    }

    #[test]
    fn test_stepping_on_enemy_starts_battle() {
        let mut session = quiet_session();
        add_enemy(&mut session, EnemyKind::Goblin, Position::new(4, 3));
        let mut log = EventLog::new();
        assert_eq!(session.battle_state(), BattleState::Idle);

        let encounter = session.move_player(Direction::Down, &mut log).unwrap();

        assert_eq!(encounter, Encounter::Combat(Position::new(4, 3)));
        assert!(session.is_in_battle());
        assert_eq!(session.battle_state(), BattleState::PlayerTurnChoice);
        assert!(session.current_enemy().is_some());
        assert_eq!(
            session.move_player(Direction::Up, &mut log),
            Err(ActionError::InBattle)
        );
        let options = session.request_battle_options().unwrap();
        assert_eq!(options.spells, vec![Element::Fire, Element::Water, Element::Earth]);
        assert!(options.potions.is_empty());
    }

    #[test]
    fn test_spell_checks() {
        let mut session = quiet_session();
        let mut log = EventLog::new();

        assert_eq!(
            session.choose_spell(Element::Fire, &mut log).unwrap_err(),
            ActionError::NotInBattle
        );

        add_enemy(&mut session, EnemyKind::Goblin, Position::new(3, 4));
        session.move_player(Direction::Right, &mut log).unwrap();

        assert_eq!(
            session.choose_spell(Element::Lightning, &mut log).unwrap_err(),
            ActionError::UnknownSpell(Element::Lightning)
        );
        assert_eq!(
            log.battle_log().last().copied(),
            Some("You have not learned the Lightning spell.")
        );
    }

    #[test]
    fn test_potion_checks() {
        let mut session = quiet_session();
        add_enemy(&mut session, EnemyKind::Orc, Position::new(3, 4));
        let mut log = EventLog::new();
        session.move_player(Direction::Right, &mut log).unwrap();

        assert_eq!(session.potion_options(&mut log), Err(ActionError::NoPotions));
        assert_eq!(
            session.use_potion(Element::Fire, &mut log),
            Err(ActionError::NoPotions)
        );
        assert_eq!(log.battle_log().last().copied(), Some("You have no potions to use."));

        session
            .player
            .inventory
            .add(ItemId::Potion(Element::Air), "Air Potion");
        assert_eq!(
            session.use_potion(Element::Fire, &mut log),
            Err(ActionError::MissingPotion(Element::Fire))
        );
        let report = session.use_potion(Element::Air, &mut log).unwrap();
        assert_eq!(report.turn, 1);
        assert!(session.player().inventory.potions().is_empty());
    }

    #[test]
    fn test_victory_removes_enemy() {
        let mut session = quiet_session();
        let at = Position::new(3, 4);
        add_enemy(&mut session, EnemyKind::Goblin, at);
        let mut log = EventLog::new();
        session.move_player(Direction::Right, &mut log).unwrap();
        let enemy = session.map.enemy_at_mut(at).unwrap();
        enemy.stats.health = 1;
        enemy.stats.add_effect(StatusEffect::new(StatusKind::Freeze, 1));

        let report = session.choose_spell(Element::Fire, &mut log).unwrap();

        assert_eq!(report.state, BattleState::EnemyDefeated);
        assert!(!session.is_in_battle());
        assert_eq!(session.battle_state(), BattleState::Idle);
        assert!(session.map().enemy_at(at).is_none());
        assert_eq!(session.map().tile_at(at), Some(Tile::Empty));
        assert_eq!(session.player().xp, 60);
        assert_eq!(
            log.last_status(),
            Some("Battle concluded. You can continue your adventure.")
        );
        assert!(log.status_messages().contains(&"You defeated the enemy and gained 60 XP!"));
    }

    #[test]
    fn test_defeat_ends_game() {
        let mut session = quiet_session();
        add_enemy(&mut session, EnemyKind::Dragon, Position::new(3, 4));
        let mut log = EventLog::new();
        session.move_player(Direction::Right, &mut log).unwrap();
        session.player.stats.health = 1;
        session
            .player
            .stats
            .add_effect(StatusEffect::new(StatusKind::Freeze, 1));

        let report = session.choose_spell(Element::Water, &mut log).unwrap();

        assert_eq!(report.state, BattleState::PlayerDefeated);
        assert!(session.is_game_over());
        assert!(log.saw_game_over());
        assert_eq!(log.last_status(), Some("Game Over. Press F5 to restart."));

        log.clear();
        assert_eq!(
            session.move_player(Direction::Up, &mut log),
            Err(ActionError::GameOver)
        );
        assert_eq!(
            session.choose_spell(Element::Fire, &mut log),
            Err(ActionError::GameOver)
        );
        assert_eq!(session.tick(10_000, &mut log), None);
        assert!(log.events.is_empty());
    }

    #[test]
    fn test_tick_moves_chaser_into_battle() {
        let mut session = quiet_session();
        add_enemy(&mut session, EnemyKind::Orc, Position::new(3, 1));
        let mut log = EventLog::new();

        assert_eq!(session.tick(500, &mut log), None);
        assert_eq!(session.map().enemies()[0].1, Position::new(3, 1));
        assert_eq!(session.tick(400, &mut log), None);
        assert_eq!(session.map().enemies()[0].1, Position::new(3, 2));

        assert_eq!(session.tick(900, &mut log), Some(Position::new(3, 2)));
        assert!(session.is_in_battle());
        assert_eq!(session.map().enemies()[0].1, Position::new(3, 2));

        // frozen while fighting
        assert_eq!(session.tick(5_000, &mut log), None);
        assert_eq!(session.map().enemies()[0].1, Position::new(3, 2));
    }

    #[test]
    fn test_portal_moves_to_next_dungeon() {
        let mut session = quiet_session();
        session.map.place_object(Item::Portal, Position::new(2, 3));
        session.player.inventory.add(ItemId::Scroll, "Magical Scroll");
        session.player.inventory.add(ItemId::Key(1), "The Key of Thoth");
        let mut log = EventLog::new();

        let encounter = session.move_player(Direction::Up, &mut log).unwrap();

        assert!(matches!(encounter, Encounter::Item(ItemOutcome::PortalOpened { .. })));
        assert_eq!(session.dungeon_number(), 2);
        assert_eq!(session.player().position, Position::new(3, 3));
        assert!(session.player().inventory.is_empty());
        assert_eq!(session.map().count(Tile::Portal), 1);
        // 120 XP levelled the player up
        assert_eq!(session.player().level, 2);
        assert_eq!(session.movement_interval_ms(), 800);
        assert_eq!(log.last_status(), Some("Welcome to Dungeon 2!"));
    }

    #[test]
    fn test_sealed_portal_is_refused() {
        let mut session = quiet_session();
        session.map.place_object(Item::Portal, Position::new(2, 3));
        let mut log = EventLog::new();

        let encounter = session.move_player(Direction::Up, &mut log).unwrap();

        assert_eq!(
            encounter,
            Encounter::Refused(crate::entity::InteractionError::PortalSealed)
        );
        assert_eq!(session.dungeon_number(), 1);
        assert_eq!(session.player().position, Position::new(2, 3));
    }
}
