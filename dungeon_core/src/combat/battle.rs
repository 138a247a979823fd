//! Battle - Turn-by-turn state machine for one encounter

use super::resolution::{determine_outcome, strike};
use super::result::{PlayerAction, Strike, TurnReport};
use crate::config::GameConstants;
use crate::entity::{Combatant, Enemy, ItemId, Player, Subject};
use crate::observer::GameObserver;
use crate::status::{apply_status_effects, potion_effect, tick::applied_message};
use crate::types::{CastSide, Element, Matchup, Position, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a battle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    /// No battle running
    Idle,
    /// Waiting for the player to pick a spell or potion
    PlayerTurnChoice,
    /// A turn is being worked out
    Resolving,
    EnemyDefeated,
    PlayerDefeated,
}

impl BattleState {
    pub fn is_finished(&self) -> bool {
        matches!(self, BattleState::EnemyDefeated | BattleState::PlayerDefeated)
    }
}

/// An ongoing encounter with the enemy standing at `enemy_location`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
    pub enemy_location: Position,
    pub state: BattleState,
    /// Turns resolved so far
    pub turns: u32,
}

const FREEZE_ICON: &str = "❄️";

impl Battle {
    /// Start a battle and announce it
    pub fn start(
        enemy_location: Position,
        player: &Player,
        enemy: &Enemy,
        obs: &mut dyn GameObserver,
    ) -> Self {
        log::info!(
            "Battle started against {} at {} (hp {})",
            enemy.title(),
            enemy_location,
            enemy.stats.health
        );
        obs.on_battle_started(&enemy.title());
        obs.on_status_message(&format!("You have encountered {}!", enemy.title()));
        let battle = Battle {
            enemy_location,
            state: BattleState::PlayerTurnChoice,
            turns: 0,
        };
        battle.refresh_bars(player, enemy, obs);
        battle
    }

    pub fn is_awaiting_choice(&self) -> bool {
        self.state == BattleState::PlayerTurnChoice
    }

    /// Resolve a turn where the player casts `choice`
    pub fn cast_spell(
        &mut self,
        player: &mut Player,
        enemy: &mut Enemy,
        choice: Element,
        constants: &GameConstants,
        rng: &mut impl Rng,
        obs: &mut dyn GameObserver,
    ) -> TurnReport {
        self.turns += 1;
        self.state = BattleState::Resolving;
        let mut report = TurnReport::new(self.turns, PlayerAction::Spell(choice));

        let enemy_choice = enemy.choose_spell(rng);
        report.enemy_element = Some(enemy_choice);
        report.player_frozen = player.is_frozen();
        report.enemy_frozen = enemy.is_frozen();

        if report.player_frozen {
            obs.on_battle_log("You are frozen and cannot act this turn.");
            obs.on_cast_animation(CastSide::Player, FREEZE_ICON);
        }
        if report.enemy_frozen {
            obs.on_battle_log(&format!("{} is frozen and cannot act this turn.", enemy.name));
            obs.on_cast_animation(CastSide::Enemy, FREEZE_ICON);
        }

        match (report.player_frozen, report.enemy_frozen) {
            (true, true) => {
                obs.on_battle_log("Both you and the enemy are frozen. Nothing happens this turn.");
            }
            (true, false) => {
                report.enemy_strike = Some(enemy_attack(player, enemy, enemy_choice, constants, rng, obs));
            }
            (false, true) => {
                report.player_strike = Some(player_attack(player, enemy, choice, constants, rng, obs));
            }
            (false, false) => {
                let matchup = determine_outcome(choice, enemy_choice);
                report.matchup = Some(matchup);
                obs.on_battle_log(&format!(
                    "You cast {} {}. {} casts {} {}.",
                    choice.icon(),
                    choice,
                    enemy.name,
                    enemy_choice.icon(),
                    enemy_choice
                ));
                match matchup {
                    Matchup::PlayerWins => {
                        report.player_strike =
                            Some(player_attack(player, enemy, choice, constants, rng, obs));
                    }
                    Matchup::EnemyWins => {
                        report.enemy_strike =
                            Some(enemy_attack(player, enemy, enemy_choice, constants, rng, obs));
                    }
                    Matchup::Tie => {
                        obs.on_battle_log("Both spells are equally matched. It's a tie!");
                        obs.on_cast_animation(CastSide::Center, choice.icon());
                    }
                }
            }
        }

        self.end_turn(player, enemy, constants, &mut report, obs);
        report
    }

    /// Resolve a turn where the player throws a potion at the enemy
    ///
    /// The potion's effect always lands on the enemy, including Shield. The
    /// caller must check that the potion is held.
    pub fn use_potion(
        &mut self,
        player: &mut Player,
        enemy: &mut Enemy,
        potion: Element,
        constants: &GameConstants,
        rng: &mut impl Rng,
        obs: &mut dyn GameObserver,
    ) -> TurnReport {
        self.turns += 1;
        self.state = BattleState::Resolving;
        let mut report = TurnReport::new(self.turns, PlayerAction::Potion(potion));

        let effect = potion_effect(potion, &constants.status);
        obs.on_battle_log(&applied_message(effect.kind, &enemy.subject()));
        enemy.stats.add_effect(effect);
        obs.on_battle_log(&format!("You used a {} Potion on {}.", potion, enemy.name));
        obs.on_cast_animation(CastSide::Player, potion.icon());

        player.inventory.remove_one(ItemId::Potion(potion));
        obs.on_inventory_changed(player.inventory.entries());

        report.player_frozen = player.is_frozen();
        report.enemy_frozen = enemy.is_frozen();
        if report.enemy_frozen {
            obs.on_battle_log(&format!("{} is frozen and cannot act this turn.", enemy.name));
            obs.on_cast_animation(CastSide::Enemy, FREEZE_ICON);
        } else {
            let enemy_choice = enemy.choose_spell(rng);
            report.enemy_element = Some(enemy_choice);
            let hit = strike(&enemy.stats, &mut player.stats, &constants.combat, rng);
            if hit.critical {
                obs.on_battle_log("Critical hit! The enemy deals double damage.");
            }
            obs.on_battle_log(&format!(
                "{} attacks and deals {} damage to you.",
                enemy.name, hit.damage
            ));
            obs.on_cast_animation(CastSide::Enemy, enemy_choice.icon());
            report.enemy_strike = Some(hit);
        }

        self.end_turn(player, enemy, constants, &mut report, obs);
        report
    }

    /// Advance both sides' effects, refresh the display and settle the outcome
    fn end_turn(
        &mut self,
        player: &mut Player,
        enemy: &mut Enemy,
        constants: &GameConstants,
        report: &mut TurnReport,
        obs: &mut dyn GameObserver,
    ) {
        let player_tick = apply_status_effects(&mut player.stats, &Subject::Player, &constants.status);
        for line in &player_tick.lines {
            obs.on_battle_log(line);
        }
        let name = enemy.name.clone();
        let enemy_tick = apply_status_effects(&mut enemy.stats, &Subject::Enemy(&name), &constants.status);
        for line in &enemy_tick.lines {
            obs.on_battle_log(line);
        }
        report.player_burn = player_tick.burn_damage;
        report.enemy_burn = enemy_tick.burn_damage;

        self.refresh_bars(player, enemy, obs);
        obs.on_player_stats_changed(&player.snapshot());

        self.state = if !enemy.is_alive() {
            obs.on_battle_log(&format!("You have defeated {}!", enemy.name));
            BattleState::EnemyDefeated
        } else if !player.is_alive() {
            obs.on_battle_log("You have been defeated! Game Over.");
            BattleState::PlayerDefeated
        } else {
            BattleState::PlayerTurnChoice
        };
        report.state = self.state;
        log::debug!("{}", report.summary());
    }

    fn refresh_bars(&self, player: &Player, enemy: &Enemy, obs: &mut dyn GameObserver) {
        obs.on_health_bars_changed(player.health_percent(), enemy.health_percent());
        obs.on_status_effects_changed(Side::Player, &player.stats.status_effects);
        obs.on_status_effects_changed(Side::Enemy, &enemy.stats.status_effects);
    }
}

fn player_attack(
    player: &Player,
    enemy: &mut Enemy,
    element: Element,
    constants: &GameConstants,
    rng: &mut impl Rng,
    obs: &mut dyn GameObserver,
) -> Strike {
    let hit = strike(&player.stats, &mut enemy.stats, &constants.combat, rng);
    if hit.critical {
        obs.on_battle_log("Critical hit! You deal double damage.");
    }
    obs.on_battle_log(&format!(
        "Your spell overpowers the enemy! You deal {} damage.",
        hit.damage
    ));
    obs.on_cast_animation(CastSide::Player, element.icon());
    hit
}

fn enemy_attack(
    player: &mut Player,
    enemy: &Enemy,
    element: Element,
    constants: &GameConstants,
    rng: &mut impl Rng,
    obs: &mut dyn GameObserver,
) -> Strike {
    let hit = strike(&enemy.stats, &mut player.stats, &constants.combat, rng);
    if hit.critical {
        obs.on_battle_log("Critical hit! The enemy deals double damage.");
    }
    obs.on_battle_log(&format!(
        "Enemy's spell overpowers yours! You take {} damage.",
        hit.damage
    ));
    obs.on_cast_animation(CastSide::Enemy, element.icon());
    hit
}
