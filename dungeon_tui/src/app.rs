//! Application state

use dungeon_core::prelude::*;

/// How many battle-log lines to keep
const BATTLE_LOG_LIMIT: usize = 200;
/// How many past status messages to keep
const HISTORY_LIMIT: usize = 50;

/// Which battle menu is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleMenu {
    Spells,
    Potions,
}

/// Everything the core has told us to show
#[derive(Debug, Default)]
pub struct Screen {
    pub status: String,
    pub history: Vec<String>,
    pub battle_log: Vec<String>,
    pub grid: Option<GridSnapshot>,
    pub player_pct: f64,
    pub enemy_pct: f64,
    pub player_effects: Vec<StatusEffect>,
    pub enemy_effects: Vec<StatusEffect>,
    pub inventory: Vec<InventoryEntry>,
    pub spells: Vec<Element>,
    pub stats: Option<PlayerStats>,
    /// `Name the Kind` of the enemy being fought
    pub enemy_title: Option<String>,
    /// Last spell or effect flashed, and on which side
    pub cast: Option<(CastSide, String)>,
    pub game_over: bool,
}

impl GameObserver for Screen {
    fn on_status_message(&mut self, text: &str) {
        self.status = text.to_string();
        self.history.push(text.to_string());
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }

    fn on_battle_log(&mut self, text: &str) {
        self.battle_log.push(text.to_string());
        if self.battle_log.len() > BATTLE_LOG_LIMIT {
            self.battle_log.remove(0);
        }
    }

    fn on_health_bars_changed(&mut self, player_pct: f64, enemy_pct: f64) {
        self.player_pct = player_pct;
        self.enemy_pct = enemy_pct;
    }

    fn on_status_effects_changed(&mut self, side: Side, effects: &[StatusEffect]) {
        match side {
            Side::Player => self.player_effects = effects.to_vec(),
            Side::Enemy => self.enemy_effects = effects.to_vec(),
        }
    }

    fn on_map_changed(&mut self, grid: &GridSnapshot) {
        self.grid = Some(grid.clone());
    }

    fn on_inventory_changed(&mut self, items: &[InventoryEntry]) {
        self.inventory = items.to_vec();
    }

    fn on_spellbook_changed(&mut self, spells: &[Element]) {
        self.spells = spells.to_vec();
    }

    fn on_player_stats_changed(&mut self, stats: &PlayerStats) {
        self.stats = Some(stats.clone());
    }

    fn on_cast_animation(&mut self, side: CastSide, icon: &str) {
        self.cast = Some((side, icon.to_string()));
    }

    fn on_battle_started(&mut self, enemy_title: &str) {
        self.battle_log.clear();
        self.enemy_title = Some(enemy_title.to_string());
        self.cast = None;
    }

    fn on_battle_ended(&mut self) {
        self.enemy_title = None;
        self.enemy_effects.clear();
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}

pub struct App {
    pub session: GameSession,
    pub screen: Screen,
    pub menu: BattleMenu,
    constants: GameConstants,
}

impl App {
    pub fn new(constants: GameConstants, seed: u64) -> Self {
        let session = GameSession::new(constants.clone(), seed);
        let mut screen = Screen::default();
        session.start(&mut screen);
        App {
            session,
            screen,
            menu: BattleMenu::Spells,
            constants,
        }
    }

    /// Throw the current game away and start a fresh one
    pub fn restart(&mut self) {
        *self = App::new(self.constants.clone(), rand::random());
    }

    pub fn in_battle(&self) -> bool {
        self.session.is_in_battle()
    }

    pub fn move_player(&mut self, direction: Direction) {
        let result = self.session.move_player(direction, &mut self.screen);
        report(result.map(|_| ()));
    }

    /// Cast the spell in the given spellbook slot (0-based)
    pub fn cast_slot(&mut self, slot: usize) {
        let Some(options) = self.session.request_battle_options() else {
            return;
        };
        let Some(spell) = options.spells.get(slot).copied() else {
            return;
        };
        let result = self.session.choose_spell(spell, &mut self.screen);
        report(result.map(|_| ()));
        self.sync_menu();
    }

    pub fn open_potions(&mut self) {
        if self.session.potion_options(&mut self.screen).is_ok() {
            self.menu = BattleMenu::Potions;
        }
    }

    /// Throw the potion in the given potion-list slot (0-based)
    pub fn use_potion_slot(&mut self, slot: usize) {
        let Some(options) = self.session.request_battle_options() else {
            return;
        };
        let Some(element) = options.potions.get(slot).and_then(|entry| match entry.id {
            ItemId::Potion(element) => Some(element),
            _ => None,
        }) else {
            return;
        };
        let result = self.session.use_potion(element, &mut self.screen);
        report(result.map(|_| ()));
        self.menu = BattleMenu::Spells;
        self.sync_menu();
    }

    pub fn back(&mut self) {
        self.menu = BattleMenu::Spells;
    }

    /// Feed elapsed wall-clock time to the enemy movement clock
    pub fn tick(&mut self, delta_ms: u64) {
        if self.session.tick(delta_ms, &mut self.screen).is_some() {
            self.menu = BattleMenu::Spells;
        }
    }

    fn sync_menu(&mut self) {
        if !self.session.is_in_battle() {
            self.menu = BattleMenu::Spells;
        }
    }
}

/// Refusals are already on screen through the observer
fn report(result: Result<(), ActionError>) {
    if let Err(err) = result {
        log::debug!("input refused: {}", err);
    }
}
