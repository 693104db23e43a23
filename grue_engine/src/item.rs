//! Item records and their property keys.
//!
//! An item is any addressable noun in the world: portable objects, scenery,
//! doors, and NPCs alike. Behavior differences come from the flag set and
//! from hooks registered against the item, not from subclassing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::ids::{ItemId, LocationId, StateValue};
use crate::sheet::CharacterSheet;

/// Where an item currently sits. The `parent` edges of all items form a
/// forest rooted at locations, the player, or Nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum ParentEntity {
    Location(LocationId),
    Item(ItemId),
    Player,
    #[default]
    Nowhere,
}

/// Boolean attributes an item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemFlag {
    Open,
    Openable,
    Locked,
    Lockable,
    Container,
    Surface,
    Transparent,
    Takable,
    Weapon,
    Tool,
    Flammable,
    Burning,
    LightSource,
    Device,
    On,
    Searchable,
    Climbable,
    Readable,
    Invisible,
    Touched,
    Visited,
    Plural,
    OmitArticle,
    OmitDescription,
    RequiresTryTake,
    Vehicle,
    Edible,
    Drinkable,
    Sacred,
    SelfIgnitable,
    BurnedOut,
}

/// Property keys addressable on an item through the change model.
///
/// Well-known keys map onto the item's typed slots; `Custom` lands in the
/// opaque bag. Flags are addressed through `Flag(..)` with a Bool value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemProp {
    Flag(ItemFlag),
    Name,
    Description,
    FirstDescription,
    ShortDescription,
    ReadText,
    ReadWhileHeldText,
    Size,
    Capacity,
    Value,
    TmpValue,
    Damage,
    LockKey,
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

/// A discrete noun in the world.
///
/// Created at boot and never destroyed; "removing" an item moves it to
/// [`ParentEntity::Nowhere`]. Optional description slots let the look
/// pipeline vary text over an item's lifetime (`first_description` until
/// touched, `short_description` afterwards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub first_description: Option<String>,
    pub short_description: Option<String>,
    pub read_text: Option<String>,
    pub read_while_held_text: Option<String>,
    pub synonyms: Vec<String>,
    pub adjectives: Vec<String>,
    pub parent: ParentEntity,
    pub flags: HashSet<ItemFlag>,
    pub size: i64,
    /// Maximum total child size this container holds; `None` = unbounded.
    pub capacity: Option<i64>,
    pub value: i64,
    pub tmp_value: i64,
    /// Top of the damage roll when wielded as a weapon.
    pub damage: i64,
    pub sheet: Option<CharacterSheet>,
    /// Key item required to unlock this, when lockable.
    pub lock_key: Option<ItemId>,
    /// Locations a mobile NPC is permitted to wander through.
    pub valid_locations: HashSet<LocationId>,
    pub props: HashMap<String, StateValue>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: ItemId::new(""),
            name: String::new(),
            description: None,
            first_description: None,
            short_description: None,
            read_text: None,
            read_while_held_text: None,
            synonyms: Vec::new(),
            adjectives: Vec::new(),
            parent: ParentEntity::Nowhere,
            flags: HashSet::new(),
            size: 5,
            capacity: None,
            value: 0,
            tmp_value: 0,
            damage: 0,
            sheet: None,
            lock_key: None,
            valid_locations: HashSet::new(),
            props: HashMap::new(),
        }
    }
}

impl Item {
    pub fn has(&self, flag: ItemFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// A container or surface whose contents the player could ever access.
    pub fn holds_things(&self) -> bool {
        self.has(ItemFlag::Container) || self.has(ItemFlag::Surface)
    }

    /// Whether this item's contents can currently be seen from outside.
    pub fn contents_are_visible(&self) -> bool {
        self.has(ItemFlag::Surface)
            || (self.has(ItemFlag::Container)
                && (self.has(ItemFlag::Open) || self.has(ItemFlag::Transparent)))
    }

    /// Whether this item is currently shedding light.
    pub fn is_providing_light(&self) -> bool {
        self.has(ItemFlag::LightSource)
            && (self.has(ItemFlag::On) || self.has(ItemFlag::Burning))
            && !self.has(ItemFlag::BurnedOut)
    }

    /// NPCs and the like carry a character sheet.
    pub fn is_character(&self) -> bool {
        self.sheet.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: ItemId::new(id),
            name: id.to_string(),
            ..Item::default()
        }
    }

    #[test]
    fn default_parent_is_nowhere() {
        assert_eq!(item("pebble").parent, ParentEntity::Nowhere);
        assert!(item("pebble").parent.is_nowhere());
    }

    #[test]
    fn contents_visible_through_open_transparent_or_surface() {
        let mut chest = item("chest");
        chest.flags.insert(ItemFlag::Container);
        assert!(!chest.contents_are_visible());

        chest.flags.insert(ItemFlag::Open);
        assert!(chest.contents_are_visible());

        chest.flags.remove(&ItemFlag::Open);
        chest.flags.insert(ItemFlag::Transparent);
        assert!(chest.contents_are_visible());

        let mut table = item("table");
        table.flags.insert(ItemFlag::Surface);
        assert!(table.contents_are_visible());
    }

    #[test]
    fn light_requires_power_and_an_unspent_source() {
        let mut lantern = item("lantern");
        lantern.flags.insert(ItemFlag::LightSource);
        assert!(!lantern.is_providing_light());

        lantern.flags.insert(ItemFlag::On);
        assert!(lantern.is_providing_light());

        lantern.flags.insert(ItemFlag::BurnedOut);
        assert!(!lantern.is_providing_light());

        let mut torch = item("torch");
        torch.flags.insert(ItemFlag::LightSource);
        torch.flags.insert(ItemFlag::Burning);
        assert!(torch.is_providing_light());
    }

    #[test]
    fn item_prop_serializes_with_discriminator() {
        let prop = ItemProp::Flag(ItemFlag::Open);
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, "{\"flag\":\"open\"}");
        let back: ItemProp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prop);
    }

    #[test]
    fn character_items_have_sheets() {
        let mut troll = item("troll");
        assert!(!troll.is_character());
        troll.sheet = Some(CharacterSheet::new(12, 9));
        assert!(troll.is_character());
    }
}
