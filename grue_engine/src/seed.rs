//! World declaration consumed at boot.
//!
//! A world is plain data: entity records with defaulted fields plus the
//! hooks, computers, daemons, and combat systems to register. The builder
//! methods here are authoring sugar only — nothing at runtime depends on
//! them. Boot validates the whole declaration before play begins so content
//! mistakes surface as [`SeedError`]s instead of mid-game commit failures.

use std::collections::HashSet;

use gametools::Spinner;
use log::info;
use thiserror::Error;

use crate::combat::CombatSystem;
use crate::hooks::{ComputeFn, ComputedProp, HookFn, HookPoint};
use crate::ids::{Direction, DaemonId, GlobalId, ItemId, LocationId, StateValue};
use crate::item::{Item, ItemFlag, ParentEntity};
use crate::location::{Exit, ExitTarget, Location};
use crate::player::Player;
use crate::scheduler::DaemonFn;
use crate::sheet::CharacterSheet;
use crate::spinners::SpinnerKind;

/// Content mistakes detected at boot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("duplicate item id '{0}'")]
    DuplicateItem(ItemId),
    #[error("duplicate location id '{0}'")]
    DuplicateLocation(LocationId),
    #[error("item '{item}' references unknown {role} '{target}'")]
    DanglingItemRef {
        item: ItemId,
        role: &'static str,
        target: String,
    },
    #[error("location '{location}' references unknown {role} '{target}'")]
    DanglingLocationRef {
        location: LocationId,
        role: &'static str,
        target: String,
    },
    #[error("player starts in unknown location '{0}'")]
    UnknownStartLocation(LocationId),
    #[error("containment cycle through item '{0}'")]
    SeedCycle(ItemId),
    #[error("container '{container}' starts over capacity ({load} > {capacity})")]
    OverCapacity {
        container: ItemId,
        load: i64,
        capacity: i64,
    },
    #[error("daemon '{0}' is referenced but never registered")]
    UnknownDaemon(DaemonId),
}

/// The data half of a world declaration.
#[derive(Default)]
pub struct WorldSeed {
    pub items: Vec<Item>,
    pub locations: Vec<Location>,
    pub player: Player,
    pub globals: Vec<(GlobalId, StateValue)>,
}

/// One daemon to register at boot.
pub struct DaemonSeed {
    pub id: DaemonId,
    pub frequency: u64,
    /// Whether the daemon starts in the Active ledger state.
    pub active_at_boot: bool,
    pub callback: DaemonFn,
}

/// A complete world declaration: data plus registered behavior.
#[derive(Default)]
pub struct WorldDef {
    pub seed: WorldSeed,
    pub hooks: Vec<(HookPoint, HookFn)>,
    pub computers: Vec<(ComputedProp, ComputeFn)>,
    pub daemons: Vec<DaemonSeed>,
    pub combat: Vec<(ItemId, Box<dyn CombatSystem>)>,
    /// Replacement spinner pools; unlisted kinds keep the defaults.
    pub spinners: Vec<(SpinnerKind, Spinner<String>)>,
}

impl WorldDef {
    pub fn hook(&mut self, point: HookPoint, hook: HookFn) -> &mut Self {
        self.hooks.push((point, hook));
        self
    }

    pub fn computer(&mut self, prop: ComputedProp, compute: ComputeFn) -> &mut Self {
        self.computers.push((prop, compute));
        self
    }

    pub fn daemon(&mut self, id: impl Into<DaemonId>, frequency: u64, active: bool, callback: DaemonFn) -> &mut Self {
        self.daemons.push(DaemonSeed {
            id: id.into(),
            frequency,
            active_at_boot: active,
            callback,
        });
        self
    }

    pub fn combat_system(&mut self, enemy: impl Into<ItemId>, system: Box<dyn CombatSystem>) -> &mut Self {
        self.combat.push((enemy.into(), system));
        self
    }
}

/// Check the data half of a declaration for structural mistakes.
pub fn validate(seed: &WorldSeed) -> Result<(), SeedError> {
    let mut item_ids = HashSet::new();
    for item in &seed.items {
        if !item_ids.insert(item.id.clone()) {
            return Err(SeedError::DuplicateItem(item.id.clone()));
        }
    }
    let mut location_ids = HashSet::new();
    for loc in &seed.locations {
        if !location_ids.insert(loc.id.clone()) {
            return Err(SeedError::DuplicateLocation(loc.id.clone()));
        }
    }

    if !location_ids.contains(&seed.player.location) {
        return Err(SeedError::UnknownStartLocation(seed.player.location.clone()));
    }

    for item in &seed.items {
        match &item.parent {
            ParentEntity::Location(loc) if !location_ids.contains(loc) => {
                return Err(SeedError::DanglingItemRef {
                    item: item.id.clone(),
                    role: "parent location",
                    target: loc.to_string(),
                });
            },
            ParentEntity::Item(container) if !item_ids.contains(container) => {
                return Err(SeedError::DanglingItemRef {
                    item: item.id.clone(),
                    role: "parent item",
                    target: container.to_string(),
                });
            },
            _ => {},
        }
        if let Some(key) = &item.lock_key
            && !item_ids.contains(key)
        {
            return Err(SeedError::DanglingItemRef {
                item: item.id.clone(),
                role: "lock key",
                target: key.to_string(),
            });
        }
        for loc in &item.valid_locations {
            if !location_ids.contains(loc) {
                return Err(SeedError::DanglingItemRef {
                    item: item.id.clone(),
                    role: "valid location",
                    target: loc.to_string(),
                });
            }
        }
    }

    for loc in &seed.locations {
        for exit in loc.exits.values() {
            if let ExitTarget::To(dest) = &exit.target
                && !location_ids.contains(dest)
            {
                return Err(SeedError::DanglingLocationRef {
                    location: loc.id.clone(),
                    role: "exit destination",
                    target: dest.to_string(),
                });
            }
            if let Some(door) = &exit.door
                && !item_ids.contains(door)
            {
                return Err(SeedError::DanglingLocationRef {
                    location: loc.id.clone(),
                    role: "door",
                    target: door.to_string(),
                });
            }
        }
        for scenery in &loc.local_globals {
            if !item_ids.contains(scenery) {
                return Err(SeedError::DanglingLocationRef {
                    location: loc.id.clone(),
                    role: "local global",
                    target: scenery.to_string(),
                });
            }
        }
    }

    check_cycles(seed)?;
    check_capacity(seed)?;
    info!(
        "world seed validated: {} items, {} locations",
        seed.items.len(),
        seed.locations.len()
    );
    Ok(())
}

fn check_cycles(seed: &WorldSeed) -> Result<(), SeedError> {
    for item in &seed.items {
        let mut seen = HashSet::new();
        let mut current = item.id.clone();
        seen.insert(current.clone());
        loop {
            let parent = seed
                .items
                .iter()
                .find(|i| i.id == current)
                .map(|i| i.parent.clone());
            match parent {
                Some(ParentEntity::Item(container)) => {
                    if !seen.insert(container.clone()) {
                        return Err(SeedError::SeedCycle(item.id.clone()));
                    }
                    current = container;
                },
                _ => break,
            }
        }
    }
    Ok(())
}

fn check_capacity(seed: &WorldSeed) -> Result<(), SeedError> {
    for container in &seed.items {
        let Some(capacity) = container.capacity else { continue };
        let load: i64 = seed
            .items
            .iter()
            .filter(|i| i.parent == ParentEntity::Item(container.id.clone()))
            .map(|i| i.size)
            .sum();
        if load > capacity {
            return Err(SeedError::OverCapacity {
                container: container.id.clone(),
                load,
                capacity,
            });
        }
    }
    Ok(())
}

/// Authoring sugar over [`Item`].
pub struct ItemSeed(Item);

impl ItemSeed {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self(Item {
            id: id.into(),
            name: name.into(),
            ..Item::default()
        })
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.0.description = Some(text.into());
        self
    }

    pub fn first_description(mut self, text: impl Into<String>) -> Self {
        self.0.first_description = Some(text.into());
        self
    }

    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.0.short_description = Some(text.into());
        self
    }

    pub fn read_text(mut self, text: impl Into<String>) -> Self {
        self.0.read_text = Some(text.into());
        self
    }

    pub fn read_while_held_text(mut self, text: impl Into<String>) -> Self {
        self.0.read_while_held_text = Some(text.into());
        self
    }

    pub fn synonyms(mut self, words: &[&str]) -> Self {
        self.0.synonyms = words.iter().map(|w| (*w).to_string()).collect();
        self
    }

    pub fn adjectives(mut self, words: &[&str]) -> Self {
        self.0.adjectives = words.iter().map(|w| (*w).to_string()).collect();
        self
    }

    pub fn in_location(mut self, id: impl Into<LocationId>) -> Self {
        self.0.parent = ParentEntity::Location(id.into());
        self
    }

    pub fn in_item(mut self, id: impl Into<ItemId>) -> Self {
        self.0.parent = ParentEntity::Item(id.into());
        self
    }

    pub fn held_by_player(mut self) -> Self {
        self.0.parent = ParentEntity::Player;
        self
    }

    pub fn flags(mut self, flags: &[ItemFlag]) -> Self {
        self.0.flags.extend(flags.iter().copied());
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.0.size = size;
        self
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.0.capacity = Some(capacity);
        self
    }

    pub fn value(mut self, value: i64) -> Self {
        self.0.value = value;
        self
    }

    pub fn damage(mut self, damage: i64) -> Self {
        self.0.damage = damage;
        self
    }

    pub fn sheet(mut self, sheet: CharacterSheet) -> Self {
        self.0.sheet = Some(sheet);
        self
    }

    pub fn lock_key(mut self, key: impl Into<ItemId>) -> Self {
        self.0.lock_key = Some(key.into());
        self
    }

    pub fn valid_locations(mut self, locations: &[&str]) -> Self {
        self.0.valid_locations = locations.iter().map(|l| LocationId::new(*l)).collect();
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: StateValue) -> Self {
        self.0.props.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Item {
        self.0
    }
}

/// Authoring sugar over [`Location`].
pub struct LocationSeed(Location);

impl LocationSeed {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self(Location {
            id: id.into(),
            name: name.into(),
            ..Location::default()
        })
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.0.description = Some(text.into());
        self
    }

    pub fn dark(mut self) -> Self {
        self.0.inherently_lit = false;
        self
    }

    pub fn omit_article(mut self) -> Self {
        self.0.omit_article = true;
        self
    }

    pub fn exit(mut self, direction: Direction, exit: Exit) -> Self {
        self.0.exits.insert(direction, exit);
        self
    }

    pub fn local_global(mut self, id: impl Into<ItemId>) -> Self {
        self.0.local_globals.push(id.into());
        self
    }

    pub fn build(self) -> Location {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_seed() -> WorldSeed {
        let mut seed = WorldSeed {
            locations: vec![LocationSeed::new("clearing", "Clearing").build()],
            ..WorldSeed::default()
        };
        seed.player.location = LocationId::new("clearing");
        seed
    }

    #[test]
    fn minimal_seed_validates() {
        assert_eq!(validate(&minimal_seed()), Ok(()));
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let mut seed = minimal_seed();
        seed.items.push(ItemSeed::new("rock", "rock").in_location("clearing").build());
        seed.items.push(ItemSeed::new("rock", "other rock").in_location("clearing").build());
        assert_eq!(validate(&seed), Err(SeedError::DuplicateItem(ItemId::new("rock"))));
    }

    #[test]
    fn unknown_start_location_is_rejected() {
        let mut seed = minimal_seed();
        seed.player.location = LocationId::new("narnia");
        assert_eq!(
            validate(&seed),
            Err(SeedError::UnknownStartLocation(LocationId::new("narnia")))
        );
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let mut seed = minimal_seed();
        seed.items.push(ItemSeed::new("rock", "rock").in_location("moon").build());
        assert!(matches!(validate(&seed), Err(SeedError::DanglingItemRef { .. })));
    }

    #[test]
    fn dangling_exit_is_rejected() {
        let mut seed = minimal_seed();
        seed.locations[0]
            .exits
            .insert(Direction::North, Exit::to("atlantis"));
        assert!(matches!(validate(&seed), Err(SeedError::DanglingLocationRef { .. })));
    }

    #[test]
    fn seed_cycles_are_rejected() {
        let mut seed = minimal_seed();
        seed.items.push(ItemSeed::new("box_a", "box").in_item("box_b").build());
        seed.items.push(ItemSeed::new("box_b", "box").in_item("box_a").build());
        assert!(matches!(validate(&seed), Err(SeedError::SeedCycle(_))));
    }

    #[test]
    fn initial_over_capacity_is_rejected() {
        let mut seed = minimal_seed();
        seed.items.push(
            ItemSeed::new("thimble", "thimble")
                .in_location("clearing")
                .capacity(1)
                .build(),
        );
        seed.items
            .push(ItemSeed::new("boulder", "boulder").in_item("thimble").size(50).build());
        assert!(matches!(validate(&seed), Err(SeedError::OverCapacity { .. })));
    }

    #[test]
    fn builders_fill_the_records() {
        let item = ItemSeed::new("lantern", "brass lantern")
            .description("A battery-powered brass lantern.")
            .synonyms(&["lamp", "light"])
            .adjectives(&["brass"])
            .in_location("clearing")
            .flags(&[ItemFlag::Takable, ItemFlag::LightSource, ItemFlag::Device])
            .size(8)
            .build();
        assert_eq!(item.id, ItemId::new("lantern"));
        assert!(item.has(ItemFlag::LightSource));
        assert_eq!(item.size, 8);

        let loc = LocationSeed::new("clearing", "Clearing")
            .description("You are in a clearing.")
            .dark()
            .exit(Direction::North, Exit::to("clearing"))
            .build();
        assert!(!loc.inherently_lit);
        assert!(loc.exit(Direction::North).is_some());
    }
}
