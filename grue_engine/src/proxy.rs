//! Read-only proxies over the world store.
//!
//! A proxy is a borrowed view bound to the engine; it never caches. Every
//! typed accessor resolves in precedence order: registered property
//! computer, then the stored value, then the type default. Derived facts
//! (visibility, lighting, reach, load) and change builders live here so
//! handlers never touch the store directly.
//!
//! Change builders uphold a hard contract: they return `None` when the
//! requested value already holds, so applying a built change twice is
//! indistinguishable from applying it once.

use crate::change::StateChange;
use crate::engine::Engine;
use crate::hooks::ComputedProp;
use crate::ids::{Direction, ItemId, LocationId, StateValue};
use crate::item::{Item, ItemFlag, ItemProp, ParentEntity};
use crate::location::{Exit, Location, LocationProp};
use crate::player::{Player, PlayerProp};
use crate::sheet::{CharacterSheet, CharacterUpdate, Consciousness};
use crate::spinners::SpinnerKind;
use crate::vis;

/// Read handle for one item.
#[derive(Clone, Copy)]
pub struct ItemProxy<'a> {
    engine: &'a Engine,
    item: &'a Item,
}

impl<'a> ItemProxy<'a> {
    pub(crate) fn new(engine: &'a Engine, item: &'a Item) -> Self {
        Self { engine, item }
    }

    pub fn id(&self) -> &ItemId {
        &self.item.id
    }

    fn computed(&self, prop: ItemProp) -> Option<StateValue> {
        self.engine
            .compute(&ComputedProp::Item(self.item.id.clone(), prop))
    }

    // ---- typed accessors -----------------------------------------------------

    pub fn name(&self) -> String {
        self.computed(ItemProp::Name)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_else(|| self.item.name.clone())
    }

    pub fn description(&self) -> Option<String> {
        self.computed(ItemProp::Description)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.item.description.clone())
    }

    pub fn first_description(&self) -> Option<String> {
        self.computed(ItemProp::FirstDescription)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.item.first_description.clone())
    }

    pub fn short_description(&self) -> Option<String> {
        self.computed(ItemProp::ShortDescription)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.item.short_description.clone())
    }

    /// Legible text, falling back to a randomized "no inscription" line.
    pub fn read_text(&self) -> String {
        self.computed(ItemProp::ReadText)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.item.read_text.clone())
            .unwrap_or_else(|| {
                self.engine
                    .spin(SpinnerKind::BlankInscription, "There's nothing written on it.")
            })
    }

    pub fn read_while_held_text(&self) -> Option<String> {
        self.computed(ItemProp::ReadWhileHeldText)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.item.read_while_held_text.clone())
    }

    pub fn flag(&self, flag: ItemFlag) -> bool {
        self.computed(ItemProp::Flag(flag))
            .and_then(|v| v.as_bool())
            .unwrap_or_else(|| self.item.has(flag))
    }

    pub fn is_open(&self) -> bool {
        self.flag(ItemFlag::Open)
    }

    pub fn is_container(&self) -> bool {
        self.flag(ItemFlag::Container)
    }

    pub fn is_locked(&self) -> bool {
        self.flag(ItemFlag::Locked)
    }

    pub fn is_takable(&self) -> bool {
        self.flag(ItemFlag::Takable)
    }

    pub fn size(&self) -> i64 {
        self.computed(ItemProp::Size)
            .and_then(|v| v.as_int())
            .unwrap_or(self.item.size)
    }

    pub fn capacity(&self) -> Option<i64> {
        match self.computed(ItemProp::Capacity).and_then(|v| v.as_int()) {
            Some(n) if n >= 0 => Some(n),
            Some(_) => None,
            None => self.item.capacity,
        }
    }

    pub fn value(&self) -> i64 {
        self.computed(ItemProp::Value)
            .and_then(|v| v.as_int())
            .unwrap_or(self.item.value)
    }

    pub fn damage(&self) -> i64 {
        self.computed(ItemProp::Damage)
            .and_then(|v| v.as_int())
            .unwrap_or(self.item.damage)
    }

    pub fn lock_key(&self) -> Option<ItemId> {
        self.computed(ItemProp::LockKey)
            .and_then(|v| v.as_item().cloned())
            .or_else(|| self.item.lock_key.clone())
    }

    pub fn parent(&self) -> &ParentEntity {
        &self.item.parent
    }

    pub fn sheet(&self) -> Option<CharacterSheet> {
        self.item.sheet.clone()
    }

    // ---- derived predicates --------------------------------------------------

    /// Anywhere in the player's carried tree.
    pub fn player_is_holding(&self) -> bool {
        let state = self.engine.state();
        let mut current = self.item.parent.clone();
        loop {
            match current {
                ParentEntity::Player => return true,
                ParentEntity::Item(id) => {
                    current = match state.items.get(&id) {
                        Some(container) => container.parent.clone(),
                        None => return false,
                    };
                },
                _ => return false,
            }
        }
    }

    pub fn player_can_reach(&self) -> bool {
        vis::item_is_reachable(self.engine.state(), &self.item.id)
    }

    pub fn player_can_carry(&self) -> bool {
        let state = self.engine.state();
        state.carried_load() + self.size() <= state.player.carrying_capacity
    }

    pub fn should_take_first(&self) -> bool {
        self.flag(ItemFlag::RequiresTryTake) && !self.player_is_holding()
    }

    pub fn is_providing_light(&self) -> bool {
        self.flag(ItemFlag::LightSource)
            && (self.flag(ItemFlag::On) || self.flag(ItemFlag::Burning))
            && !self.flag(ItemFlag::BurnedOut)
    }

    /// Visible from the player's current location.
    pub fn is_visible(&self) -> bool {
        let state = self.engine.state();
        vis::item_is_visible_from(state, &self.item.id, &state.player.location)
    }

    /// Whether a room listing should mention this item.
    pub fn should_describe(&self) -> bool {
        !self.flag(ItemFlag::Invisible) && !self.flag(ItemFlag::OmitDescription)
    }

    pub fn contents_are_visible(&self) -> bool {
        self.flag(ItemFlag::Surface)
            || (self.flag(ItemFlag::Container)
                && (self.flag(ItemFlag::Open) || self.flag(ItemFlag::Transparent)))
    }

    /// Whether any exit anywhere uses this item as its door.
    pub fn is_door(&self) -> bool {
        self.engine
            .state()
            .locations
            .values()
            .flat_map(|loc| loc.exits.values())
            .any(|exit| exit.door.as_ref() == Some(&self.item.id))
    }

    pub fn is_alive(&self) -> bool {
        self.item.sheet.as_ref().is_some_and(CharacterSheet::is_alive)
    }

    pub fn is_fighting(&self) -> bool {
        self.item.sheet.as_ref().is_some_and(|s| s.fighting)
    }

    pub fn is_hostile_enemy(&self) -> bool {
        self.item
            .sheet
            .as_ref()
            .is_some_and(|s| s.fighting && s.consciousness == Consciousness::Alert)
    }

    // ---- derived collections -------------------------------------------------

    /// Direct children.
    pub fn contents(&self) -> Vec<ItemId> {
        self.engine
            .state()
            .children(&ParentEntity::Item(self.item.id.clone()))
    }

    /// Every descendant, depth first.
    pub fn all_contents(&self) -> Vec<ItemId> {
        self.engine.state().descendants(&self.item.id)
    }

    /// Descendants visible from outside, honoring container opacity.
    pub fn visible_contents(&self) -> Vec<ItemId> {
        let state = self.engine.state();
        let mut out = Vec::new();
        if self.contents_are_visible() {
            collect_visible_into(state, &self.item.id, &mut out);
        }
        out
    }

    /// Room available inside this container.
    pub fn can_hold(&self, other: &ItemProxy<'_>) -> bool {
        match self.capacity() {
            Some(capacity) => {
                self.engine.state().current_load(&self.item.id) + other.size() <= capacity
            },
            None => true,
        }
    }

    // ---- change builders -----------------------------------------------------

    /// The currently stored value for a property, bypassing computers.
    fn stored(&self, prop: &ItemProp) -> Option<StateValue> {
        let item = self.item;
        let value = match prop {
            ItemProp::Flag(flag) => StateValue::Bool(item.has(*flag)),
            ItemProp::Name => StateValue::Text(item.name.clone()),
            ItemProp::Description => StateValue::Text(item.description.clone()?),
            ItemProp::FirstDescription => StateValue::Text(item.first_description.clone()?),
            ItemProp::ShortDescription => StateValue::Text(item.short_description.clone()?),
            ItemProp::ReadText => StateValue::Text(item.read_text.clone()?),
            ItemProp::ReadWhileHeldText => StateValue::Text(item.read_while_held_text.clone()?),
            ItemProp::Size => StateValue::Int(item.size),
            ItemProp::Capacity => StateValue::Int(item.capacity.unwrap_or(-1)),
            ItemProp::Value => StateValue::Int(item.value),
            ItemProp::TmpValue => StateValue::Int(item.tmp_value),
            ItemProp::Damage => StateValue::Int(item.damage),
            ItemProp::LockKey => StateValue::Item(item.lock_key.clone()?),
            ItemProp::Health => StateValue::Int(item.sheet.as_ref()?.health),
            ItemProp::MaxHealth => StateValue::Int(item.sheet.as_ref()?.max_health),
            ItemProp::Strength => StateValue::Int(item.sheet.as_ref()?.strength),
            ItemProp::Dexterity => StateValue::Int(item.sheet.as_ref()?.dexterity),
            ItemProp::Accuracy => StateValue::Int(item.sheet.as_ref()?.accuracy),
            ItemProp::ArmorClass => StateValue::Int(item.sheet.as_ref()?.armor_class),
            ItemProp::Consciousness => {
                StateValue::Text(item.sheet.as_ref()?.consciousness.as_key().to_string())
            },
            ItemProp::Fighting => StateValue::Bool(item.sheet.as_ref()?.fighting),
            ItemProp::Custom(key) => item.props.get(key)?.clone(),
        };
        Some(value)
    }

    /// Build a property change, or `None` when the value already holds.
    pub fn set_property(&self, prop: ItemProp, value: StateValue) -> Option<StateChange> {
        if self.stored(&prop) == Some(value.clone()) {
            return None;
        }
        Some(StateChange::SetItemProperty {
            item: self.item.id.clone(),
            prop,
            value,
        })
    }

    pub fn set_flag(&self, flag: ItemFlag) -> Option<StateChange> {
        self.set_property(ItemProp::Flag(flag), StateValue::Bool(true))
    }

    pub fn clear_flag(&self, flag: ItemFlag) -> Option<StateChange> {
        self.set_property(ItemProp::Flag(flag), StateValue::Bool(false))
    }

    pub fn set_description(&self, text: impl Into<String>) -> Option<StateChange> {
        self.set_property(ItemProp::Description, StateValue::Text(text.into()))
    }

    pub fn move_to(&self, to: ParentEntity) -> Option<StateChange> {
        if self.item.parent == to {
            return None;
        }
        Some(StateChange::MoveItem {
            item: self.item.id.clone(),
            to,
        })
    }

    /// Move to Nowhere.
    pub fn remove(&self) -> Option<StateChange> {
        self.move_to(ParentEntity::Nowhere)
    }

    /// One primitive change per set field; no-ops dropped.
    pub fn set_character_attributes(&self, update: CharacterUpdate) -> Vec<StateChange> {
        let mut changes = Vec::new();
        let mut push = |prop: ItemProp, value: StateValue| {
            if let Some(change) = self.set_property(prop, value) {
                changes.push(change);
            }
        };
        if let Some(n) = update.health {
            push(ItemProp::Health, StateValue::Int(n));
        }
        if let Some(n) = update.max_health {
            push(ItemProp::MaxHealth, StateValue::Int(n));
        }
        if let Some(n) = update.strength {
            push(ItemProp::Strength, StateValue::Int(n));
        }
        if let Some(n) = update.dexterity {
            push(ItemProp::Dexterity, StateValue::Int(n));
        }
        if let Some(n) = update.accuracy {
            push(ItemProp::Accuracy, StateValue::Int(n));
        }
        if let Some(n) = update.armor_class {
            push(ItemProp::ArmorClass, StateValue::Int(n));
        }
        if let Some(c) = update.consciousness {
            push(ItemProp::Consciousness, StateValue::Text(c.as_key().to_string()));
        }
        if let Some(f) = update.fighting {
            push(ItemProp::Fighting, StateValue::Bool(f));
        }
        changes
    }

    // ---- naming --------------------------------------------------------------

    pub fn with_definite_article(&self) -> String {
        let name = self.name();
        if self.flag(ItemFlag::OmitArticle) {
            name
        } else {
            format!("the {name}")
        }
    }

    pub fn with_indefinite_article(&self) -> String {
        let name = self.name();
        if self.flag(ItemFlag::OmitArticle) {
            return name;
        }
        if self.flag(ItemFlag::Plural) {
            return format!("some {name}");
        }
        match name.chars().next() {
            Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => format!("an {name}"),
            _ => format!("a {name}"),
        }
    }

    pub fn with_possessive_adjective(&self) -> String {
        if self.player_is_holding() {
            format!("your {}", self.name())
        } else {
            self.with_definite_article()
        }
    }
}

fn collect_visible_into(
    state: &crate::world::GameState,
    container: &ItemId,
    out: &mut Vec<ItemId>,
) {
    for id in state.children(&ParentEntity::Item(container.clone())) {
        let Some(item) = state.items.get(&id) else { continue };
        if item.has(ItemFlag::Invisible) {
            continue;
        }
        let recurse = item.contents_are_visible();
        out.push(id.clone());
        if recurse {
            collect_visible_into(state, &id, out);
        }
    }
}

/// Read handle for one location.
#[derive(Clone, Copy)]
pub struct LocationProxy<'a> {
    engine: &'a Engine,
    location: &'a Location,
}

impl<'a> LocationProxy<'a> {
    pub(crate) fn new(engine: &'a Engine, location: &'a Location) -> Self {
        Self { engine, location }
    }

    pub fn id(&self) -> &LocationId {
        &self.location.id
    }

    fn computed(&self, prop: LocationProp) -> Option<StateValue> {
        self.engine
            .compute(&ComputedProp::Location(self.location.id.clone(), prop))
    }

    pub fn name(&self) -> String {
        self.location.name.clone()
    }

    pub fn description(&self) -> Option<String> {
        self.computed(LocationProp::Description)
            .and_then(|v| v.as_text().map(str::to_string))
            .or_else(|| self.location.description.clone())
    }

    pub fn is_visited(&self) -> bool {
        self.computed(LocationProp::IsVisited)
            .and_then(|v| v.as_bool())
            .unwrap_or(self.location.visited)
    }

    pub fn is_lit(&self) -> bool {
        vis::location_is_lit(self.engine.state(), &self.location.id)
    }

    pub fn exit(&self, direction: Direction) -> Option<&'a Exit> {
        self.location.exit(direction)
    }

    pub fn local_globals(&self) -> &'a [ItemId] {
        &self.location.local_globals
    }

    /// Direct contents, in id order.
    pub fn contents(&self) -> Vec<ItemId> {
        self.engine
            .state()
            .children(&ParentEntity::Location(self.location.id.clone()))
    }

    /// Everything visible here: direct contents plus the contents of
    /// showing containers, recursively.
    pub fn visible_items(&self) -> Vec<ItemId> {
        vis::visible_items_at(self.engine.state(), &self.location.id)
    }

    pub fn neighbors(&self) -> Vec<LocationId> {
        self.location.neighbors().cloned().collect()
    }

    pub fn set_visited(&self) -> Option<StateChange> {
        if self.location.visited {
            return None;
        }
        Some(StateChange::SetLocationProperty {
            location: self.location.id.clone(),
            prop: LocationProp::IsVisited,
            value: StateValue::Bool(true),
        })
    }

    pub fn set_description(&self, text: impl Into<String>) -> Option<StateChange> {
        let text = text.into();
        if self.location.description.as_deref() == Some(text.as_str()) {
            return None;
        }
        Some(StateChange::SetLocationProperty {
            location: self.location.id.clone(),
            prop: LocationProp::Description,
            value: StateValue::Text(text),
        })
    }

    pub fn set_name(&self, name: impl Into<String>) -> Option<StateChange> {
        let name = name.into();
        if self.location.name == name {
            return None;
        }
        Some(StateChange::SetLocationName {
            location: self.location.id.clone(),
            name,
        })
    }
}

/// Read handle for the player.
#[derive(Clone, Copy)]
pub struct PlayerProxy<'a> {
    engine: &'a Engine,
    player: &'a Player,
}

impl<'a> PlayerProxy<'a> {
    pub(crate) fn new(engine: &'a Engine, player: &'a Player) -> Self {
        Self { engine, player }
    }

    pub fn location_id(&self) -> &LocationId {
        &self.player.location
    }

    pub fn score(&self) -> i64 {
        self.player.score
    }

    pub fn moves(&self) -> u64 {
        self.player.moves
    }

    pub fn sheet(&self) -> &CharacterSheet {
        &self.player.sheet
    }

    pub fn carrying_capacity(&self) -> i64 {
        self.player.carrying_capacity
    }

    /// Directly held items, in id order.
    pub fn inventory(&self) -> Vec<ItemId> {
        self.engine.state().children(&ParentEntity::Player)
    }

    pub fn carried_load(&self) -> i64 {
        self.engine.state().carried_load()
    }

    pub fn is_empty_handed(&self) -> bool {
        self.inventory().is_empty()
    }

    pub fn set_location(&self, destination: &LocationId) -> Option<StateChange> {
        if self.player.location == *destination {
            return None;
        }
        Some(StateChange::SetPlayerProperty {
            prop: PlayerProp::Location,
            value: StateValue::Location(destination.clone()),
        })
    }

    pub fn set_score(&self, score: i64) -> Option<StateChange> {
        if self.player.score == score {
            return None;
        }
        Some(StateChange::SetPlayerProperty {
            prop: PlayerProp::Score,
            value: StateValue::Int(score),
        })
    }

    pub fn set_character_attributes(&self, update: CharacterUpdate) -> Vec<StateChange> {
        let sheet = &self.player.sheet;
        let mut changes = Vec::new();
        let mut push = |prop: PlayerProp, value: StateValue, current: StateValue| {
            if value != current {
                changes.push(StateChange::SetPlayerProperty { prop, value });
            }
        };
        if let Some(n) = update.health {
            push(PlayerProp::Health, StateValue::Int(n), StateValue::Int(sheet.health));
        }
        if let Some(n) = update.max_health {
            push(
                PlayerProp::MaxHealth,
                StateValue::Int(n),
                StateValue::Int(sheet.max_health),
            );
        }
        if let Some(n) = update.strength {
            push(
                PlayerProp::Strength,
                StateValue::Int(n),
                StateValue::Int(sheet.strength),
            );
        }
        if let Some(n) = update.dexterity {
            push(
                PlayerProp::Dexterity,
                StateValue::Int(n),
                StateValue::Int(sheet.dexterity),
            );
        }
        if let Some(n) = update.accuracy {
            push(
                PlayerProp::Accuracy,
                StateValue::Int(n),
                StateValue::Int(sheet.accuracy),
            );
        }
        if let Some(n) = update.armor_class {
            push(
                PlayerProp::ArmorClass,
                StateValue::Int(n),
                StateValue::Int(sheet.armor_class),
            );
        }
        if let Some(c) = update.consciousness {
            push(
                PlayerProp::Consciousness,
                StateValue::Text(c.as_key().to_string()),
                StateValue::Text(sheet.consciousness.as_key().to_string()),
            );
        }
        if let Some(f) = update.fighting {
            push(
                PlayerProp::Fighting,
                StateValue::Bool(f),
                StateValue::Bool(sheet.fighting),
            );
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{ItemSeed, LocationSeed, WorldDef, WorldSeed};

    fn engine() -> Engine {
        let mut def = WorldDef::default();
        def.seed = WorldSeed {
            locations: vec![LocationSeed::new("den", "Den").build()],
            items: vec![
                ItemSeed::new("emerald", "emerald").in_location("den").size(2).build(),
                ItemSeed::new("onion", "onion").held_by_player().size(3).build(),
                ItemSeed::new("bones", "old bones")
                    .adjectives(&["old"])
                    .in_location("den")
                    .flags(&[ItemFlag::Plural])
                    .build(),
                ItemSeed::new("sack", "sack")
                    .in_location("den")
                    .flags(&[ItemFlag::Container, ItemFlag::Open])
                    .capacity(4)
                    .build(),
            ],
            ..WorldSeed::default()
        };
        def.seed.player.location = crate::ids::LocationId::new("den");
        def.seed.player.carrying_capacity = 10;
        Engine::boot(def, 1).expect("proxy fixture should boot")
    }

    #[test]
    fn articles_follow_english_rules() {
        let engine = engine();
        let emerald = engine.item(&ItemId::new("emerald")).unwrap();
        assert_eq!(emerald.with_indefinite_article(), "an emerald");
        assert_eq!(emerald.with_definite_article(), "the emerald");

        let bones = engine.item(&ItemId::new("bones")).unwrap();
        assert_eq!(bones.with_indefinite_article(), "some old bones");

        let onion = engine.item(&ItemId::new("onion")).unwrap();
        assert_eq!(onion.with_possessive_adjective(), "your onion");
        assert_eq!(emerald.with_possessive_adjective(), "the emerald");
    }

    #[test]
    fn builders_return_none_when_value_already_holds() {
        let engine = engine();
        let sack = engine.item(&ItemId::new("sack")).unwrap();
        assert_eq!(sack.set_flag(ItemFlag::Open), None);
        assert!(sack.clear_flag(ItemFlag::Open).is_some());
        assert_eq!(sack.move_to(ParentEntity::Location(LocationId::new("den"))), None);
        assert!(sack.remove().is_some());
    }

    #[test]
    fn capacity_arithmetic_counts_direct_children() {
        let engine = engine();
        let sack = engine.item(&ItemId::new("sack")).unwrap();
        let emerald = engine.item(&ItemId::new("emerald")).unwrap();
        let onion = engine.item(&ItemId::new("onion")).unwrap();
        // 2 + 3 > 4 only together
        assert!(sack.can_hold(&emerald));
        assert!(sack.can_hold(&onion));
    }

    #[test]
    fn player_can_carry_respects_total_load() {
        let engine = engine();
        // carrying the onion (3); capacity 10
        let emerald = engine.item(&ItemId::new("emerald")).unwrap();
        assert!(emerald.player_can_carry());
        let bones = engine.item(&ItemId::new("bones")).unwrap();
        // bones default size 5: 3 + 5 <= 10
        assert!(bones.player_can_carry());
    }

    #[test]
    fn computers_intercept_stored_values() {
        let mut def = WorldDef::default();
        def.seed = WorldSeed {
            locations: vec![LocationSeed::new("den", "Den").build()],
            items: vec![ItemSeed::new("orb", "glass orb")
                .description("A dull glass orb.")
                .in_location("den")
                .build()],
            ..WorldSeed::default()
        };
        def.seed.player.location = crate::ids::LocationId::new("den");
        def.computer(
            ComputedProp::Item(ItemId::new("orb"), ItemProp::Description),
            Box::new(|_| Some(StateValue::Text("The orb swirls with green light.".into()))),
        );
        let engine = Engine::boot(def, 1).unwrap();
        let orb = engine.item(&ItemId::new("orb")).unwrap();
        assert_eq!(orb.description().as_deref(), Some("The orb swirls with green light."));
        // the stored slot is untouched; builders compare against it
        assert!(orb.set_description("A dull glass orb.").is_none());
    }

    #[test]
    fn set_character_attributes_emits_only_changed_fields() {
        let mut def = WorldDef::default();
        def.seed = WorldSeed {
            locations: vec![LocationSeed::new("den", "Den").build()],
            items: vec![ItemSeed::new("gnome", "gnome")
                .in_location("den")
                .sheet(CharacterSheet::new(10, 10))
                .build()],
            ..WorldSeed::default()
        };
        def.seed.player.location = crate::ids::LocationId::new("den");
        let engine = Engine::boot(def, 1).unwrap();
        let gnome = engine.item(&ItemId::new("gnome")).unwrap();
        let changes = gnome.set_character_attributes(CharacterUpdate {
            health: Some(10), // unchanged
            fighting: Some(true),
            ..CharacterUpdate::default()
        });
        assert_eq!(changes.len(), 1);
        assert!(matches!(
            &changes[0],
            StateChange::SetItemProperty {
                prop: ItemProp::Fighting,
                ..
            }
        ));
    }
}
