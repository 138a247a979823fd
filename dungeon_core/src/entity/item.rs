//! Map objects: keys, chests, the portal and walls

use super::inventory::{Inventory, ItemId};
use crate::config::LootConstants;
use crate::types::Element;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An object placed on the dungeon grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Key(Key),
    Chest(Chest),
    Portal,
    Wall,
}

/// A key lying on the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Matches the chest with the same number
    pub key_type: u32,
}

impl Key {
    pub fn item_id(&self) -> ItemId {
        ItemId::Key(self.key_type)
    }
}

/// A locked chest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    pub key_type: u32,
    pub display_name: String,
    pub opened: bool,
    /// The one chest per dungeon guaranteed to hold the scroll
    pub contains_scroll: bool,
}

/// What a chest held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestLoot {
    Scroll,
    Potion(Element),
    Nothing,
}

/// Refusal to use a map object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("{chest} is locked and requires {key}.")]
    ChestLocked { chest: String, key: ItemId },
    #[error("You have already opened {chest}.")]
    ChestAlreadyOpened { chest: String },
    #[error("You need a magical scroll to open the portal.")]
    PortalSealed,
    #[error("There is nothing here to use.")]
    NothingHere,
}

impl Chest {
    pub fn new(key_type: u32, display_name: impl Into<String>, contains_scroll: bool) -> Self {
        Chest {
            key_type,
            display_name: display_name.into(),
            opened: false,
            contains_scroll,
        }
    }

    pub fn required_key(&self) -> ItemId {
        ItemId::Key(self.key_type)
    }

    /// Unlock the chest with a key from `inventory`
    ///
    /// Leaves the chest untouched on refusal.
    pub fn unlock(&mut self, inventory: &Inventory) -> Result<(), InteractionError> {
        if self.opened {
            return Err(InteractionError::ChestAlreadyOpened {
                chest: self.display_name.clone(),
            });
        }
        if !inventory.contains(self.required_key()) {
            return Err(InteractionError::ChestLocked {
                chest: self.display_name.clone(),
                key: self.required_key(),
            });
        }
        self.opened = true;
        Ok(())
    }

    /// Decide the contents: the scroll chest always yields the scroll, any
    /// other chest a random potion with `potion_chance`
    pub fn roll_loot(&self, loot: &LootConstants, rng: &mut impl Rng) -> ChestLoot {
        if self.contains_scroll {
            return ChestLoot::Scroll;
        }
        if rng.gen::<f64>() < loot.potion_chance {
            let potions = Element::all();
            ChestLoot::Potion(potions[rng.gen_range(0..potions.len())])
        } else {
            ChestLoot::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_locked_chest_stays_closed() {
        let mut chest = Chest::new(2, "Chest of the Lost Gods", false);
        let inventory = Inventory::new();

        let err = chest.unlock(&inventory).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Chest of the Lost Gods is locked and requires Key2."
        );
        assert!(!chest.opened);
    }

    #[test]
    fn test_matching_key_opens_once() {
        let mut chest = Chest::new(1, "Scroll Chest", true);
        let mut inventory = Inventory::new();
        inventory.add(ItemId::Key(1), "The Key of Thoth");

        assert!(chest.unlock(&inventory).is_ok());
        assert!(chest.opened);
        assert_eq!(
            chest.unlock(&inventory),
            Err(InteractionError::ChestAlreadyOpened {
                chest: "Scroll Chest".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_key_is_refused() {
        let mut chest = Chest::new(1, "Chest of the Pharaohs", false);
        let mut inventory = Inventory::new();
        inventory.add(ItemId::Key(2), "The Key of Hades");
        assert!(matches!(
            chest.unlock(&inventory),
            Err(InteractionError::ChestLocked { .. })
        ));
    }

    #[test]
    fn test_scroll_chest_always_yields_scroll() {
        let chest = Chest::new(1, "Scroll Chest", true);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(chest.roll_loot(&LootConstants::default(), &mut rng), ChestLoot::Scroll);
        }
    }

    #[test]
    fn test_potion_chance_extremes() {
        let chest = Chest::new(1, "Chest of Forgotten Kings", false);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let never = LootConstants { potion_chance: 0.0 };
        assert_eq!(chest.roll_loot(&never, &mut rng), ChestLoot::Nothing);

        let always = LootConstants { potion_chance: 1.0 };
        assert!(matches!(chest.roll_loot(&always, &mut rng), ChestLoot::Potion(_)));
    }

    #[test]
    fn test_portal_sealed_message() {
        assert_eq!(
            InteractionError::PortalSealed.to_string(),
            "You need a magical scroll to open the portal."
        );
    }
}
