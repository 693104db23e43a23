//! The authoritative world store.
//!
//! [`GameState`] owns every item, location, the player, the global store,
//! the daemon ledger, and the append-only change history. Nothing outside
//! the commit path mutates it: handlers read through proxies and emit
//! [`StateChange`] lists, and [`GameState::apply`] is the single door those
//! changes walk through.
//!
//! Maps are ordered so that every derived listing and every daemon
//! adjacency scan is deterministic for a given seed and transcript.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::change::StateChange;
use crate::ids::{DaemonId, GlobalId, ItemId, LocationId, StateValue};
use crate::item::{Item, ItemProp, ParentEntity};
use crate::location::{Location, LocationProp};
use crate::player::{Player, PlayerProp};
use crate::sheet::Consciousness;

/// Lookup failures for unknown identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("unknown item id '{0}'")]
    UnknownItem(ItemId),
    #[error("unknown location id '{0}'")]
    UnknownLocation(LocationId),
}

/// Why a change was rejected at commit time.
///
/// Any of these indicates misauthored content or an engine bug: handlers
/// are expected to validate with proxy predicates before emitting changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    #[error("change targets unknown item '{0}'")]
    UnknownItem(ItemId),
    #[error("change targets unknown location '{0}'")]
    UnknownLocation(LocationId),
    #[error("moving '{item}' into '{destination}' would create a containment cycle")]
    ContainmentCycle { item: ItemId, destination: ItemId },
    #[error(
        "container '{container}' cannot hold '{item}': load {load} + size {size} exceeds capacity {capacity}"
    )]
    CapacityExceeded {
        container: ItemId,
        item: ItemId,
        capacity: i64,
        load: i64,
        size: i64,
    },
    #[error("value {value:?} has the wrong type for property {prop}")]
    TypeMismatch { prop: String, value: StateValue },
    #[error("item '{0}' has no character sheet to update")]
    NoCharacterSheet(ItemId),
}

/// Scheduler-visible state of one daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DaemonState {
    #[default]
    Inactive,
    Active,
    /// One-shot countdown; fires when the remaining turn count reaches zero.
    Fuse(u64),
}

/// Complete state of a running game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub items: BTreeMap<ItemId, Item>,
    pub locations: BTreeMap<LocationId, Location>,
    pub player: Player,
    pub globals: BTreeMap<GlobalId, StateValue>,
    /// Per-daemon activation ledger; callbacks live in the engine registry.
    pub daemons: BTreeMap<DaemonId, DaemonState>,
    /// Every change ever committed, in commit order.
    pub change_history: Vec<StateChange>,
    /// Turns taken so far.
    pub turn: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            locations: BTreeMap::new(),
            player: Player::default(),
            globals: BTreeMap::new(),
            daemons: BTreeMap::new(),
            change_history: Vec::new(),
            turn: 0,
        }
    }
}

impl GameState {
    pub fn item(&self, id: &ItemId) -> Result<&Item, WorldError> {
        self.items.get(id).ok_or_else(|| WorldError::UnknownItem(id.clone()))
    }

    pub fn location(&self, id: &LocationId) -> Result<&Location, WorldError> {
        self.locations
            .get(id)
            .ok_or_else(|| WorldError::UnknownLocation(id.clone()))
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn global(&self, id: &GlobalId) -> Option<&StateValue> {
        self.globals.get(id)
    }

    pub fn global_bool(&self, id: &GlobalId) -> bool {
        self.global(id).and_then(StateValue::as_bool).unwrap_or(false)
    }

    pub fn global_int(&self, id: &GlobalId) -> i64 {
        self.global(id).and_then(StateValue::as_int).unwrap_or(0)
    }

    pub fn daemon_state(&self, id: &DaemonId) -> DaemonState {
        self.daemons.get(id).copied().unwrap_or_default()
    }

    /// Cheap structural clone for read-only use and batch rollback.
    pub fn snapshot(&self) -> GameState {
        self.clone()
    }

    // ---- containment queries -------------------------------------------------

    /// Direct children of a parent, in id order.
    pub fn children(&self, parent: &ParentEntity) -> Vec<ItemId> {
        self.items
            .values()
            .filter(|item| item.parent == *parent)
            .map(|item| item.id.clone())
            .collect()
    }

    /// Every descendant of an item, depth first.
    pub fn descendants(&self, root: &ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack = self.children(&ParentEntity::Item(root.clone()));
        stack.reverse();
        while let Some(id) = stack.pop() {
            let below = self.children(&ParentEntity::Item(id.clone()));
            out.push(id);
            for child in below.into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// The location an item ultimately sits in, following parent edges.
    /// Items held by the player resolve to the player's location; items
    /// Nowhere resolve to `None`.
    pub fn nearest_location(&self, id: &ItemId) -> Option<LocationId> {
        let mut current = id.clone();
        // bounded walk; the cycle guard in apply() keeps the forest acyclic
        for _ in 0..self.items.len() + 1 {
            match &self.items.get(&current)?.parent {
                ParentEntity::Location(loc) => return Some(loc.clone()),
                ParentEntity::Player => return Some(self.player.location.clone()),
                ParentEntity::Nowhere => return None,
                ParentEntity::Item(container) => current = container.clone(),
            }
        }
        None
    }

    /// Whether `ancestor` appears on `item`'s parent chain.
    pub fn is_ancestor(&self, ancestor: &ItemId, item: &ItemId) -> bool {
        let mut current = item.clone();
        for _ in 0..self.items.len() + 1 {
            match self.items.get(&current).map(|i| &i.parent) {
                Some(ParentEntity::Item(parent)) => {
                    if parent == ancestor {
                        return true;
                    }
                    current = parent.clone();
                },
                _ => return false,
            }
        }
        false
    }

    /// Sum of direct children's sizes.
    pub fn current_load(&self, container: &ItemId) -> i64 {
        self.items
            .values()
            .filter(|item| item.parent == ParentEntity::Item(container.clone()))
            .map(|item| item.size)
            .sum()
    }

    /// Total size the player is carrying, including the contents of
    /// carried containers.
    pub fn carried_load(&self) -> i64 {
        let mut load = 0;
        for id in self.children(&ParentEntity::Player) {
            if let Some(item) = self.items.get(&id) {
                load += item.size;
            }
            for inner in self.descendants(&id) {
                if let Some(item) = self.items.get(&inner) {
                    load += item.size;
                }
            }
        }
        load
    }

    // ---- commit path ---------------------------------------------------------

    /// Atomically apply one change.
    ///
    /// Returns `Ok(true)` when the world changed (and the change was
    /// appended to the history), `Ok(false)` when the post-condition
    /// already held (nothing logged).
    ///
    /// # Errors
    /// Rejects changes that target unknown ids, would create a containment
    /// cycle, would overfill a container, or carry the wrong value type.
    pub fn apply(&mut self, change: &StateChange) -> Result<bool, CommitError> {
        let mutated = match change {
            StateChange::MoveItem { item, to } => self.apply_move(item, to)?,
            StateChange::SetItemProperty { item, prop, value } => {
                self.apply_item_prop(item, prop, value)?
            },
            StateChange::SetLocationProperty { location, prop, value } => {
                self.apply_location_prop(location, prop, value)?
            },
            StateChange::SetLocationName { location, name } => {
                let loc = self
                    .locations
                    .get_mut(location)
                    .ok_or_else(|| CommitError::UnknownLocation(location.clone()))?;
                if loc.name == *name {
                    false
                } else {
                    loc.name = name.clone();
                    true
                }
            },
            StateChange::SetPlayerProperty { prop, value } => self.apply_player_prop(prop, value)?,
            StateChange::SetGlobal { global, value } => {
                if self.globals.get(global) == Some(value) {
                    false
                } else {
                    self.globals.insert(global.clone(), value.clone());
                    true
                }
            },
            StateChange::SetGlobalCodable { global, blob } => {
                let value = StateValue::Blob(blob.clone());
                if self.globals.get(global) == Some(&value) {
                    false
                } else {
                    self.globals.insert(global.clone(), value);
                    true
                }
            },
            StateChange::RunDaemon(id) => self.set_daemon(id, DaemonState::Active),
            StateChange::StopDaemon(id) => self.set_daemon(id, DaemonState::Inactive),
            StateChange::ScheduleFuse { fuse, turns } => self.set_daemon(fuse, DaemonState::Fuse(*turns)),
        };
        if mutated {
            self.change_history.push(change.clone());
        }
        Ok(mutated)
    }

    fn set_daemon(&mut self, id: &DaemonId, state: DaemonState) -> bool {
        if self.daemon_state(id) == state {
            false
        } else {
            info!("daemon '{id}' -> {state:?}");
            self.daemons.insert(id.clone(), state);
            true
        }
    }

    fn apply_move(&mut self, id: &ItemId, to: &ParentEntity) -> Result<bool, CommitError> {
        let item = self.items.get(id).ok_or_else(|| CommitError::UnknownItem(id.clone()))?;
        if item.parent == *to {
            return Ok(false);
        }
        let size = item.size;

        match to {
            ParentEntity::Location(loc) => {
                if !self.locations.contains_key(loc) {
                    return Err(CommitError::UnknownLocation(loc.clone()));
                }
            },
            ParentEntity::Item(container) => {
                if !self.items.contains_key(container) {
                    return Err(CommitError::UnknownItem(container.clone()));
                }
                if container == id || self.is_ancestor(id, container) {
                    return Err(CommitError::ContainmentCycle {
                        item: id.clone(),
                        destination: container.clone(),
                    });
                }
                let dest = &self.items[container];
                if let Some(capacity) = dest.capacity {
                    let load = self.current_load(container);
                    if load + size > capacity {
                        return Err(CommitError::CapacityExceeded {
                            container: container.clone(),
                            item: id.clone(),
                            capacity,
                            load,
                            size,
                        });
                    }
                }
            },
            ParentEntity::Player | ParentEntity::Nowhere => {},
        }

        if let Some(item) = self.items.get_mut(id) {
            info!("moved '{}' -> {:?}", item.id, to);
            item.parent = to.clone();
        }
        Ok(true)
    }

    fn apply_item_prop(
        &mut self,
        id: &ItemId,
        prop: &ItemProp,
        value: &StateValue,
    ) -> Result<bool, CommitError> {
        let mismatch = || CommitError::TypeMismatch {
            prop: format!("{prop:?}"),
            value: value.clone(),
        };
        let item = self.items.get_mut(id).ok_or_else(|| CommitError::UnknownItem(id.clone()))?;

        let mutated = match prop {
            ItemProp::Flag(flag) => {
                let want = value.as_bool().ok_or_else(mismatch)?;
                if want {
                    item.flags.insert(*flag)
                } else {
                    item.flags.remove(flag)
                }
            },
            ItemProp::Name => {
                let text = value.as_text().ok_or_else(mismatch)?;
                set_string(&mut item.name, text)
            },
            ItemProp::Description => set_opt_string(&mut item.description, value).ok_or_else(mismatch)?,
            ItemProp::FirstDescription => {
                set_opt_string(&mut item.first_description, value).ok_or_else(mismatch)?
            },
            ItemProp::ShortDescription => {
                set_opt_string(&mut item.short_description, value).ok_or_else(mismatch)?
            },
            ItemProp::ReadText => set_opt_string(&mut item.read_text, value).ok_or_else(mismatch)?,
            ItemProp::ReadWhileHeldText => {
                set_opt_string(&mut item.read_while_held_text, value).ok_or_else(mismatch)?
            },
            ItemProp::Size => set_i64(&mut item.size, value).ok_or_else(mismatch)?,
            ItemProp::Capacity => {
                let n = value.as_int().ok_or_else(mismatch)?;
                let next = if n < 0 { None } else { Some(n) };
                if item.capacity == next {
                    false
                } else {
                    item.capacity = next;
                    true
                }
            },
            ItemProp::Value => set_i64(&mut item.value, value).ok_or_else(mismatch)?,
            ItemProp::TmpValue => set_i64(&mut item.tmp_value, value).ok_or_else(mismatch)?,
            ItemProp::Damage => set_i64(&mut item.damage, value).ok_or_else(mismatch)?,
            ItemProp::LockKey => {
                let key = value.as_item().ok_or_else(mismatch)?;
                if item.lock_key.as_ref() == Some(key) {
                    false
                } else {
                    item.lock_key = Some(key.clone());
                    true
                }
            },
            ItemProp::Health
            | ItemProp::MaxHealth
            | ItemProp::Strength
            | ItemProp::Dexterity
            | ItemProp::Accuracy
            | ItemProp::ArmorClass => {
                let sheet = item
                    .sheet
                    .as_mut()
                    .ok_or_else(|| CommitError::NoCharacterSheet(id.clone()))?;
                let slot = match prop {
                    ItemProp::Health => &mut sheet.health,
                    ItemProp::MaxHealth => &mut sheet.max_health,
                    ItemProp::Strength => &mut sheet.strength,
                    ItemProp::Dexterity => &mut sheet.dexterity,
                    ItemProp::Accuracy => &mut sheet.accuracy,
                    _ => &mut sheet.armor_class,
                };
                set_i64(slot, value).ok_or_else(mismatch)?
            },
            ItemProp::Consciousness => {
                let sheet = item
                    .sheet
                    .as_mut()
                    .ok_or_else(|| CommitError::NoCharacterSheet(id.clone()))?;
                let key = value.as_text().ok_or_else(mismatch)?;
                let next = Consciousness::from_key(key).ok_or_else(mismatch)?;
                if sheet.consciousness == next {
                    false
                } else {
                    sheet.consciousness = next;
                    true
                }
            },
            ItemProp::Fighting => {
                let sheet = item
                    .sheet
                    .as_mut()
                    .ok_or_else(|| CommitError::NoCharacterSheet(id.clone()))?;
                let want = value.as_bool().ok_or_else(mismatch)?;
                if sheet.fighting == want {
                    false
                } else {
                    sheet.fighting = want;
                    true
                }
            },
            ItemProp::Custom(key) => {
                if item.props.get(key) == Some(value) {
                    false
                } else {
                    item.props.insert(key.clone(), value.clone());
                    true
                }
            },
        };
        Ok(mutated)
    }

    fn apply_location_prop(
        &mut self,
        id: &LocationId,
        prop: &LocationProp,
        value: &StateValue,
    ) -> Result<bool, CommitError> {
        let mismatch = || CommitError::TypeMismatch {
            prop: format!("{prop:?}"),
            value: value.clone(),
        };
        let loc = self
            .locations
            .get_mut(id)
            .ok_or_else(|| CommitError::UnknownLocation(id.clone()))?;

        let mutated = match prop {
            LocationProp::Description => set_opt_string(&mut loc.description, value).ok_or_else(mismatch)?,
            LocationProp::InherentlyLit => set_bool(&mut loc.inherently_lit, value).ok_or_else(mismatch)?,
            LocationProp::IsVisited => set_bool(&mut loc.visited, value).ok_or_else(mismatch)?,
            LocationProp::OmitArticle => set_bool(&mut loc.omit_article, value).ok_or_else(mismatch)?,
            LocationProp::Custom(key) => {
                if loc.props.get(key) == Some(value) {
                    false
                } else {
                    loc.props.insert(key.clone(), value.clone());
                    true
                }
            },
        };
        Ok(mutated)
    }

    fn apply_player_prop(&mut self, prop: &PlayerProp, value: &StateValue) -> Result<bool, CommitError> {
        let mismatch = || CommitError::TypeMismatch {
            prop: format!("{prop:?}"),
            value: value.clone(),
        };

        let mutated = match prop {
            PlayerProp::Location => {
                let dest = value.as_location().ok_or_else(mismatch)?;
                if !self.locations.contains_key(dest) {
                    return Err(CommitError::UnknownLocation(dest.clone()));
                }
                if self.player.location == *dest {
                    false
                } else {
                    info!("player moved '{}' -> '{}'", self.player.location, dest);
                    self.player.location = dest.clone();
                    true
                }
            },
            PlayerProp::Score => set_i64(&mut self.player.score, value).ok_or_else(mismatch)?,
            PlayerProp::Moves => {
                let n = value.as_int().ok_or_else(mismatch)?;
                let next = n.max(0) as u64;
                if self.player.moves == next {
                    false
                } else {
                    self.player.moves = next;
                    true
                }
            },
            PlayerProp::CarryingCapacity => {
                set_i64(&mut self.player.carrying_capacity, value).ok_or_else(mismatch)?
            },
            PlayerProp::Health
            | PlayerProp::MaxHealth
            | PlayerProp::Strength
            | PlayerProp::Dexterity
            | PlayerProp::Accuracy
            | PlayerProp::ArmorClass => {
                let sheet = &mut self.player.sheet;
                let slot = match prop {
                    PlayerProp::Health => &mut sheet.health,
                    PlayerProp::MaxHealth => &mut sheet.max_health,
                    PlayerProp::Strength => &mut sheet.strength,
                    PlayerProp::Dexterity => &mut sheet.dexterity,
                    PlayerProp::Accuracy => &mut sheet.accuracy,
                    _ => &mut sheet.armor_class,
                };
                set_i64(slot, value).ok_or_else(mismatch)?
            },
            PlayerProp::Consciousness => {
                let key = value.as_text().ok_or_else(mismatch)?;
                let next = Consciousness::from_key(key).ok_or_else(mismatch)?;
                if self.player.sheet.consciousness == next {
                    false
                } else {
                    self.player.sheet.consciousness = next;
                    true
                }
            },
            PlayerProp::Fighting => set_bool(&mut self.player.sheet.fighting, value).ok_or_else(mismatch)?,
            PlayerProp::Custom(key) => {
                if self.player.props.get(key) == Some(value) {
                    false
                } else {
                    self.player.props.insert(key.clone(), value.clone());
                    true
                }
            },
        };
        Ok(mutated)
    }
}

fn set_string(slot: &mut String, text: &str) -> bool {
    if slot == text {
        false
    } else {
        *slot = text.to_string();
        true
    }
}

fn set_opt_string(slot: &mut Option<String>, value: &StateValue) -> Option<bool> {
    let text = value.as_text()?;
    if slot.as_deref() == Some(text) {
        Some(false)
    } else {
        *slot = Some(text.to_string());
        Some(true)
    }
}

fn set_bool(slot: &mut bool, value: &StateValue) -> Option<bool> {
    let want = value.as_bool()?;
    if *slot == want {
        Some(false)
    } else {
        *slot = want;
        Some(true)
    }
}

fn set_i64(slot: &mut i64, value: &StateValue) -> Option<bool> {
    let want = value.as_int()?;
    if *slot == want {
        Some(false)
    } else {
        *slot = want;
        Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemFlag;

    fn state_with(items: Vec<Item>, locations: Vec<Location>) -> GameState {
        let mut state = GameState::default();
        for loc in locations {
            state.locations.insert(loc.id.clone(), loc);
        }
        for item in items {
            state.items.insert(item.id.clone(), item);
        }
        state
    }

    fn loc(id: &str) -> Location {
        Location {
            id: LocationId::new(id),
            name: id.to_string(),
            ..Location::default()
        }
    }

    fn item_in(id: &str, parent: ParentEntity) -> Item {
        Item {
            id: ItemId::new(id),
            name: id.to_string(),
            parent,
            ..Item::default()
        }
    }

    fn room_parent(id: &str) -> ParentEntity {
        ParentEntity::Location(LocationId::new(id))
    }

    #[test]
    fn lookups_fail_with_unknown_id() {
        let state = GameState::default();
        assert_eq!(
            state.item(&ItemId::new("ghost")),
            Err(WorldError::UnknownItem(ItemId::new("ghost")))
        );
        assert_eq!(
            state.location(&LocationId::new("limbo")),
            Err(WorldError::UnknownLocation(LocationId::new("limbo")))
        );
    }

    #[test]
    fn move_item_updates_one_parent_edge() {
        let mut state = state_with(
            vec![item_in("leaflet", room_parent("west_of_house"))],
            vec![loc("west_of_house")],
        );
        let change = StateChange::MoveItem {
            item: ItemId::new("leaflet"),
            to: ParentEntity::Player,
        };
        assert_eq!(state.apply(&change), Ok(true));
        assert_eq!(state.items[&ItemId::new("leaflet")].parent, ParentEntity::Player);
        assert_eq!(state.change_history.len(), 1);
    }

    #[test]
    fn move_to_current_parent_is_a_silent_noop() {
        let mut state = state_with(
            vec![item_in("leaflet", ParentEntity::Player)],
            vec![loc("west_of_house")],
        );
        let change = StateChange::MoveItem {
            item: ItemId::new("leaflet"),
            to: ParentEntity::Player,
        };
        assert_eq!(state.apply(&change), Ok(false));
        assert!(state.change_history.is_empty());
    }

    #[test]
    fn move_rejects_containment_cycles() {
        let mut state = state_with(
            vec![
                item_in("sack", room_parent("kitchen")),
                item_in("box", ParentEntity::Item(ItemId::new("sack"))),
            ],
            vec![loc("kitchen")],
        );
        // sack into the box it contains
        let change = StateChange::MoveItem {
            item: ItemId::new("sack"),
            to: ParentEntity::Item(ItemId::new("box")),
        };
        assert!(matches!(
            state.apply(&change),
            Err(CommitError::ContainmentCycle { .. })
        ));
        // item into itself
        let direct = StateChange::MoveItem {
            item: ItemId::new("sack"),
            to: ParentEntity::Item(ItemId::new("sack")),
        };
        assert!(matches!(state.apply(&direct), Err(CommitError::ContainmentCycle { .. })));
    }

    #[test]
    fn move_enforces_capacity() {
        let mut chest = item_in("chest", room_parent("cellar"));
        chest.capacity = Some(10);
        let mut gold = item_in("gold", room_parent("cellar"));
        gold.size = 6;
        let mut anvil = item_in("anvil", room_parent("cellar"));
        anvil.size = 6;
        let mut state = state_with(vec![chest, gold, anvil], vec![loc("cellar")]);

        let put_gold = StateChange::MoveItem {
            item: ItemId::new("gold"),
            to: ParentEntity::Item(ItemId::new("chest")),
        };
        assert_eq!(state.apply(&put_gold), Ok(true));

        let put_anvil = StateChange::MoveItem {
            item: ItemId::new("anvil"),
            to: ParentEntity::Item(ItemId::new("chest")),
        };
        let err = state.apply(&put_anvil).unwrap_err();
        assert!(matches!(err, CommitError::CapacityExceeded { load: 6, size: 6, .. }));
        // rejected change leaves the world untouched
        assert_eq!(state.items[&ItemId::new("anvil")].parent, room_parent("cellar"));
        assert_eq!(state.change_history.len(), 1);
    }

    #[test]
    fn flag_changes_are_idempotent() {
        let mut state = state_with(vec![item_in("window", room_parent("east"))], vec![loc("east")]);
        let open = StateChange::SetItemProperty {
            item: ItemId::new("window"),
            prop: ItemProp::Flag(ItemFlag::Open),
            value: StateValue::Bool(true),
        };
        assert_eq!(state.apply(&open), Ok(true));
        assert_eq!(state.apply(&open), Ok(false));
        assert_eq!(state.change_history.len(), 1);
        assert!(state.items[&ItemId::new("window")].has(ItemFlag::Open));
    }

    #[test]
    fn property_type_mismatch_is_rejected() {
        let mut state = state_with(vec![item_in("window", room_parent("east"))], vec![loc("east")]);
        let bad = StateChange::SetItemProperty {
            item: ItemId::new("window"),
            prop: ItemProp::Flag(ItemFlag::Open),
            value: StateValue::Int(1),
        };
        assert!(matches!(state.apply(&bad), Err(CommitError::TypeMismatch { .. })));
    }

    #[test]
    fn sheet_updates_require_a_sheet() {
        let mut state = state_with(vec![item_in("rock", room_parent("east"))], vec![loc("east")]);
        let change = StateChange::SetItemProperty {
            item: ItemId::new("rock"),
            prop: ItemProp::Health,
            value: StateValue::Int(3),
        };
        assert_eq!(
            state.apply(&change),
            Err(CommitError::NoCharacterSheet(ItemId::new("rock")))
        );
    }

    #[test]
    fn player_location_change_validates_destination() {
        let mut state = state_with(vec![], vec![loc("kitchen")]);
        state.player.location = LocationId::new("kitchen");
        let bad = StateChange::SetPlayerProperty {
            prop: PlayerProp::Location,
            value: StateValue::Location(LocationId::new("narnia")),
        };
        assert!(matches!(state.apply(&bad), Err(CommitError::UnknownLocation(_))));
    }

    #[test]
    fn daemon_ledger_transitions() {
        let mut state = GameState::default();
        let id = DaemonId::new("thief");
        assert_eq!(state.daemon_state(&id), DaemonState::Inactive);

        assert_eq!(state.apply(&StateChange::RunDaemon(id.clone())), Ok(true));
        assert_eq!(state.daemon_state(&id), DaemonState::Active);
        // already active: no-op
        assert_eq!(state.apply(&StateChange::RunDaemon(id.clone())), Ok(false));

        assert_eq!(
            state.apply(&StateChange::ScheduleFuse {
                fuse: id.clone(),
                turns: 3
            }),
            Ok(true)
        );
        assert_eq!(state.daemon_state(&id), DaemonState::Fuse(3));

        assert_eq!(state.apply(&StateChange::StopDaemon(id.clone())), Ok(true));
        assert_eq!(state.daemon_state(&id), DaemonState::Inactive);
    }

    #[test]
    fn globals_noop_when_unchanged() {
        let mut state = GameState::default();
        let set = StateChange::SetGlobal {
            global: GlobalId::new("trap_door_barred"),
            value: StateValue::Bool(true),
        };
        assert_eq!(state.apply(&set), Ok(true));
        assert_eq!(state.apply(&set), Ok(false));
        assert!(state.global_bool(&GlobalId::new("trap_door_barred")));
    }

    #[test]
    fn nearest_location_follows_nesting_and_player() {
        let mut state = state_with(
            vec![
                item_in("sack", room_parent("kitchen")),
                item_in("garlic", ParentEntity::Item(ItemId::new("sack"))),
                item_in("sword", ParentEntity::Player),
                item_in("ghost", ParentEntity::Nowhere),
            ],
            vec![loc("kitchen"), loc("cellar")],
        );
        state.player.location = LocationId::new("cellar");

        assert_eq!(
            state.nearest_location(&ItemId::new("garlic")),
            Some(LocationId::new("kitchen"))
        );
        assert_eq!(
            state.nearest_location(&ItemId::new("sword")),
            Some(LocationId::new("cellar"))
        );
        assert_eq!(state.nearest_location(&ItemId::new("ghost")), None);
    }

    #[test]
    fn move_there_and_back_restores_state() {
        let mut state = state_with(
            vec![item_in("leaflet", room_parent("west_of_house"))],
            vec![loc("west_of_house")],
        );
        let mut roundtrip = state.snapshot();
        roundtrip
            .apply(&StateChange::MoveItem {
                item: ItemId::new("leaflet"),
                to: ParentEntity::Player,
            })
            .unwrap();
        roundtrip
            .apply(&StateChange::MoveItem {
                item: ItemId::new("leaflet"),
                to: room_parent("west_of_house"),
            })
            .unwrap();
        // identical apart from the history log
        roundtrip.change_history.clear();
        state.change_history.clear();
        assert_eq!(roundtrip, state);
    }

    #[test]
    fn carried_load_counts_nested_contents() {
        let mut sack = item_in("sack", ParentEntity::Player);
        sack.size = 3;
        let mut garlic = item_in("garlic", ParentEntity::Item(ItemId::new("sack")));
        garlic.size = 2;
        let mut sword = item_in("sword", ParentEntity::Player);
        sword.size = 10;
        let state = state_with(vec![sack, garlic, sword], vec![loc("kitchen")]);
        assert_eq!(state.carried_load(), 15);
    }

    #[test]
    fn descendants_walks_depth_first() {
        let state = state_with(
            vec![
                item_in("bag", room_parent("room")),
                item_in("box", ParentEntity::Item(ItemId::new("bag"))),
                item_in("coin", ParentEntity::Item(ItemId::new("box"))),
            ],
            vec![loc("room")],
        );
        let all = state.descendants(&ItemId::new("bag"));
        assert_eq!(all, vec![ItemId::new("box"), ItemId::new("coin")]);
    }
}
