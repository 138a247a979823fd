//! Combat - Elemental spell duels between the player and one enemy
//!
//! A battle is a turn loop. Each turn the player picks a spell or a potion,
//! the enemy answers, then both sides' status effects tick.

mod battle;
mod resolution;
mod result;

pub use battle::{Battle, BattleState};
pub use resolution::{calculate_damage, determine_outcome, is_critical_hit, strike};
pub use result::{PlayerAction, Strike, TurnReport};
