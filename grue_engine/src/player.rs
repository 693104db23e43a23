//! The player record.
//!
//! Inventory is not stored here: it is derived from item `parent` edges so
//! there is exactly one source of truth for containment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, StateValue};
use crate::sheet::CharacterSheet;

/// Property keys addressable on the player through the change model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerProp {
    Location,
    Score,
    Moves,
    CarryingCapacity,
    Health,
    MaxHealth,
    Strength,
    Dexterity,
    Accuracy,
    ArmorClass,
    Consciousness,
    Fighting,
    Custom(String),
}

/// The singleton adventurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub location: LocationId,
    pub sheet: CharacterSheet,
    pub score: i64,
    pub moves: u64,
    /// Total carried size allowed, counting items inside carried containers.
    pub carrying_capacity: i64,
    pub props: HashMap<String, StateValue>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            location: LocationId::new(""),
            sheet: CharacterSheet::new(20, 8),
            score: 0,
            moves: 0,
            carrying_capacity: 100,
            props: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_player_starts_fresh() {
        let player = Player::default();
        assert_eq!(player.score, 0);
        assert_eq!(player.moves, 0);
        assert_eq!(player.sheet.health, player.sheet.max_health);
    }

    #[test]
    fn player_prop_serde_roundtrip() {
        let prop = PlayerProp::Custom("luckiness".into());
        let json = serde_json::to_string(&prop).unwrap();
        let back: PlayerProp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prop);
    }
}
