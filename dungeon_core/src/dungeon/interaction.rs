//! Tile interactions: picking up keys, opening chests, using the portal

use super::map::DungeonMap;
use crate::config::GameConstants;
use crate::entity::{ChestLoot, InteractionError, Item, ItemId, Player};
use crate::observer::GameObserver;
use crate::progression::{gain_xp, LevelUp, XpSource};
use crate::types::Position;
use rand::seq::SliceRandom;
use rand::Rng;

/// What a successful item use produced
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    KeyCollected {
        key: ItemId,
        display_name: String,
        level_up: Option<LevelUp>,
    },
    ChestOpened {
        chest: String,
        loot: ChestLoot,
        level_up: Option<LevelUp>,
    },
    /// The scroll opened the portal; the caller moves the player on
    PortalOpened { level_up: Option<LevelUp> },
}

impl ItemOutcome {
    pub fn level_up(&self) -> Option<&LevelUp> {
        match self {
            ItemOutcome::KeyCollected { level_up, .. }
            | ItemOutcome::ChestOpened { level_up, .. }
            | ItemOutcome::PortalOpened { level_up } => level_up.as_ref(),
        }
    }
}

/// What stepping onto a tile led to
#[derive(Debug, Clone, PartialEq)]
pub enum Encounter {
    /// Plain floor
    Nothing,
    /// An enemy stands here; a battle starts against it
    Combat(Position),
    Item(ItemOutcome),
    /// The item refused to be used; nothing changed
    Refused(InteractionError),
}

/// Use the object at `location` on behalf of the player
///
/// On refusal the player and map are left exactly as they were and the
/// refusal text is sent as a status message.
pub fn use_item(
    player: &mut Player,
    map: &mut DungeonMap,
    location: Position,
    constants: &GameConstants,
    rng: &mut impl Rng,
    obs: &mut dyn GameObserver,
) -> Result<ItemOutcome, InteractionError> {
    let result = match map.object_at(location).cloned() {
        Some(Item::Key(key)) => {
            let display_name = constants
                .names
                .keys
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| key.item_id().default_name());
            player.inventory.add(key.item_id(), display_name.clone());
            obs.on_inventory_changed(player.inventory.entries());
            obs.on_status_message(&format!("You picked up {}.", display_name));
            let level_up = gain_xp(player, XpSource::Discovery, constants, obs);
            map.remove_object(location);
            Ok(ItemOutcome::KeyCollected {
                key: key.item_id(),
                display_name,
                level_up,
            })
        }
        Some(Item::Chest(_)) => open_chest(player, map, location, constants, rng, obs),
        Some(Item::Portal) => {
            if player.inventory.contains(ItemId::Scroll) {
                player.can_progress = true;
                obs.on_status_message(
                    "You used the scroll to unlock the portal and progress to the next dungeon.",
                );
                let level_up = gain_xp(player, XpSource::Dungeon, constants, obs);
                Ok(ItemOutcome::PortalOpened { level_up })
            } else {
                Err(InteractionError::PortalSealed)
            }
        }
        Some(Item::Wall) | None => {
            log::warn!("No usable object at {}", location);
            return Err(InteractionError::NothingHere);
        }
    };

    if let Err(err) = &result {
        obs.on_status_message(&err.to_string());
    }
    result
}

fn open_chest(
    player: &mut Player,
    map: &mut DungeonMap,
    location: Position,
    constants: &GameConstants,
    rng: &mut impl Rng,
    obs: &mut dyn GameObserver,
) -> Result<ItemOutcome, InteractionError> {
    let Some(Item::Chest(chest)) = map.object_at_mut(location) else {
        return Err(InteractionError::NothingHere);
    };
    chest.unlock(&player.inventory)?;
    let chest = chest.clone();
    map.remove_object(location);

    let loot = chest.roll_loot(&constants.loot, rng);
    let message = match loot {
        ChestLoot::Scroll => {
            player.inventory.add(ItemId::Scroll, ItemId::Scroll.default_name());
            format!("You opened {} and found a magical scroll!", chest.display_name)
        }
        ChestLoot::Potion(element) => {
            let id = ItemId::Potion(element);
            player.inventory.add(id, id.default_name());
            format!("You opened {} and found a {}!", chest.display_name, id.default_name())
        }
        ChestLoot::Nothing => format!("You opened {}, but it was empty.", chest.display_name),
    };
    obs.on_inventory_changed(player.inventory.entries());
    obs.on_status_message(&message);
    obs.on_map_changed(&map.snapshot(player.position));

    let level_up = gain_xp(player, XpSource::Discovery, constants, obs);
    Ok(ItemOutcome::ChestOpened {
        chest: chest.display_name,
        loot,
        level_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Tile;
    use crate::entity::{Chest, Key};
    use crate::observer::EventLog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Setup {
        constants: GameConstants,
        player: Player,
        map: DungeonMap,
        rng: StdRng,
        log: EventLog,
    }

    fn setup() -> Setup {
        let constants = GameConstants::default();
        let player = Player::new(&constants.player, constants.spawn);
        Setup {
            map: DungeonMap::new(constants.grid_size),
            constants,
            player,
            rng: StdRng::seed_from_u64(21),
            log: EventLog::new(),
        }
    }

    impl Setup {
        fn use_at(&mut self, location: Position) -> Result<ItemOutcome, InteractionError> {
            use_item(
                &mut self.player,
                &mut self.map,
                location,
                &self.constants,
                &mut self.rng,
                &mut self.log,
            )
        }
    }

    #[test]
    fn test_key_pickup() {
        let mut s = setup();
        let spot = Position::new(1, 1);
        s.map.place_object(Item::Key(Key { key_type: 2 }), spot);

        let outcome = s.use_at(spot).unwrap();

        let ItemOutcome::KeyCollected { key, display_name, level_up } = outcome else {
            panic!("expected a key");
        };
        assert_eq!(key, ItemId::Key(2));
        assert!(s.constants.names.keys.contains(&display_name));
        assert!(level_up.is_none());
        assert!(s.player.inventory.contains(ItemId::Key(2)));
        assert_eq!(s.player.xp, 12);
        assert_eq!(s.map.tile_at(spot), Some(Tile::Empty));
        assert_eq!(
            s.log.status_messages()[0],
            format!("You picked up {}.", display_name)
        );
    }

    #[test]
    fn test_locked_chest_changes_nothing() {
        let mut s = setup();
        let spot = Position::new(2, 5);
        s.map.place_object(Item::Chest(Chest::new(1, "Chest of the Pharaohs", true)), spot);

        let err = s.use_at(spot).unwrap_err();

        assert_eq!(
            err,
            InteractionError::ChestLocked {
                chest: "Chest of the Pharaohs".to_string(),
                key: ItemId::Key(1),
            }
        );
        assert!(s.player.inventory.is_empty());
        assert_eq!(s.player.xp, 0);
        assert_eq!(s.map.tile_at(spot), Some(Tile::Chest));
        assert!(matches!(s.map.object_at(spot), Some(Item::Chest(c)) if !c.opened));
        assert_eq!(
            s.log.last_status(),
            Some("Chest of the Pharaohs is locked and requires Key1.")
        );
    }

    #[test]
    fn test_scroll_chest_keeps_key() {
        let mut s = setup();
        let spot = Position::new(0, 0);
        s.player.inventory.add(ItemId::Key(1), "The Key of Hades");
        s.map.place_object(Item::Chest(Chest::new(1, "Scroll Chest", true)), spot);

        let outcome = s.use_at(spot).unwrap();

        assert!(matches!(
            outcome,
            ItemOutcome::ChestOpened { loot: ChestLoot::Scroll, .. }
        ));
        assert!(s.player.inventory.contains(ItemId::Scroll));
        assert!(s.player.inventory.contains(ItemId::Key(1)));
        assert!(s.map.object_at(spot).is_none());
        assert!(s
            .log
            .status_messages()
            .contains(&"You opened Scroll Chest and found a magical scroll!"));
    }

    #[test]
    fn test_ordinary_chest_loot_lands_in_inventory() {
        let mut s = setup();
        s.player.inventory.add(ItemId::Key(3), "The Key of Olympus");

        for i in 0..6 {
            let spot = Position::new(i, 0);
            s.map.place_object(Item::Chest(Chest::new(3, "Chest of the Lost Gods", false)), spot);
            match s.use_at(spot).unwrap() {
                ItemOutcome::ChestOpened { loot: ChestLoot::Potion(e), .. } => {
                    assert!(s.player.inventory.contains(ItemId::Potion(e)));
                }
                ItemOutcome::ChestOpened { loot: ChestLoot::Nothing, .. } => {
                    let messages = s.log.status_messages();
                    let n = messages.len();
                    assert_eq!(
                        messages[n - 2..],
                        [
                            "You opened Chest of the Lost Gods, but it was empty.",
                            "You gained 12 XP for your discovery!",
                        ]
                    );
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert!(!s.player.inventory.contains(ItemId::Scroll));
    }

    #[test]
    fn test_sealed_portal() {
        let mut s = setup();
        let spot = Position::new(6, 6);
        s.map.place_object(Item::Portal, spot);

        let err = s.use_at(spot).unwrap_err();

        assert_eq!(err, InteractionError::PortalSealed);
        assert!(!s.player.can_progress);
        assert_eq!(s.map.tile_at(spot), Some(Tile::Portal));
        assert_eq!(
            s.log.last_status(),
            Some("You need a magical scroll to open the portal.")
        );
    }

    #[test]
    fn test_portal_with_scroll() {
        let mut s = setup();
        let spot = Position::new(6, 6);
        s.map.place_object(Item::Portal, spot);
        s.player.inventory.add(ItemId::Scroll, "Magical Scroll");

        let outcome = s.use_at(spot).unwrap();

        // 100 + 20 XP at level 1 is enough for level 2
        assert_eq!(outcome.level_up().map(|l| l.level), Some(2));
        assert!(s.player.can_progress);
        assert_eq!(s.player.xp, 120);
    }

    #[test]
    fn test_empty_tile() {
        let mut s = setup();
        assert_eq!(s.use_at(Position::new(4, 4)), Err(InteractionError::NothingHere));
    }
}
