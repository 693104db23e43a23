//! Character sheets for the player and fighting NPCs.
//!
//! Keeps combat-relevant attributes in one place. Health arithmetic
//! saturates; consciousness is a three-state ladder rather than a boolean
//! so "sprawled on the floor" is representable.

use serde::{Deserialize, Serialize};

/// How awake an entity with a character sheet is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Consciousness {
    #[default]
    Alert,
    Unconscious,
    Dead,
}

impl Consciousness {
    /// Stable key used when a consciousness value travels through a
    /// [`crate::ids::StateValue::Text`] property change.
    pub fn as_key(self) -> &'static str {
        match self {
            Consciousness::Alert => "alert",
            Consciousness::Unconscious => "unconscious",
            Consciousness::Dead => "dead",
        }
    }

    pub fn from_key(key: &str) -> Option<Consciousness> {
        match key {
            "alert" => Some(Consciousness::Alert),
            "unconscious" => Some(Consciousness::Unconscious),
            "dead" => Some(Consciousness::Dead),
            _ => None,
        }
    }
}

/// Combat and fitness attributes for a living entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub health: i64,
    pub max_health: i64,
    pub strength: i64,
    pub dexterity: i64,
    /// To-hit modifier added to attack rolls.
    pub accuracy: i64,
    /// Attack rolls at or above this hit.
    pub armor_class: i64,
    pub consciousness: Consciousness,
    /// Whether the entity is currently engaged in melee.
    pub fighting: bool,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            health: 10,
            max_health: 10,
            strength: 10,
            dexterity: 10,
            accuracy: 0,
            armor_class: 10,
            consciousness: Consciousness::Alert,
            fighting: false,
        }
    }
}

impl CharacterSheet {
    /// A sheet at full health with the given pool and armor class.
    pub fn new(max_health: i64, armor_class: i64) -> Self {
        Self {
            health: max_health,
            max_health,
            armor_class,
            ..Self::default()
        }
    }

    pub fn is_alive(&self) -> bool {
        self.consciousness != Consciousness::Dead
    }

    /// Apply damage, saturating at zero.
    pub fn damage(&mut self, amount: i64) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// Heal, saturating at the maximum pool.
    pub fn heal(&mut self, amount: i64) {
        self.health = (self.health + amount.max(0)).min(self.max_health);
    }

    /// Fraction of the health pool remaining, in [0, 1].
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }
}

/// A partial update to a character sheet.
///
/// Proxy builders turn each set field into one primitive property change,
/// so the change history stays within the closed change vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterUpdate {
    pub health: Option<i64>,
    pub max_health: Option<i64>,
    pub strength: Option<i64>,
    pub dexterity: Option<i64>,
    pub accuracy: Option<i64>,
    pub armor_class: Option<i64>,
    pub consciousness: Option<Consciousness>,
    pub fighting: Option<bool>,
}

impl CharacterUpdate {
    pub fn health(amount: i64) -> Self {
        Self {
            health: Some(amount),
            ..Self::default()
        }
    }

    pub fn and_consciousness(mut self, consciousness: Consciousness) -> Self {
        self.consciousness = Some(consciousness);
        self
    }

    pub fn and_fighting(mut self, fighting: bool) -> Self {
        self.fighting = Some(fighting);
        self
    }
}
