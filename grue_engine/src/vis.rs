//! Visibility, reachability, and lighting rules.
//!
//! These are the pure world-state halves of the derived queries; the proxy
//! layer wraps them so property computers can intercept individual reads.
//!
//! An item is visible from a location when its nearest location ancestor is
//! that location (or it is carried, or it is local scenery of the location),
//! it is not invisible, and every container between it and its root shows
//! its contents. Reachability is the same walk with a stricter container
//! rule: closed transparent containers show but do not yield.

use crate::ids::{ItemId, LocationId};
use crate::item::{Item, ItemFlag, ParentEntity};
use crate::world::GameState;

/// The root an item's parent chain bottoms out at, plus the container
/// ancestors crossed on the way (nearest first).
fn chain_to_root(state: &GameState, id: &ItemId) -> (ParentEntity, Vec<ItemId>) {
    let mut containers = Vec::new();
    let mut current = id.clone();
    for _ in 0..state.items.len() + 1 {
        match state.items.get(&current).map(|item| item.parent.clone()) {
            Some(ParentEntity::Item(container)) => {
                containers.push(container.clone());
                current = container;
            },
            Some(root) => return (root, containers),
            None => break,
        }
    }
    (ParentEntity::Nowhere, containers)
}

fn container_shows(item: &Item) -> bool {
    item.contents_are_visible()
}

fn container_yields(item: &Item) -> bool {
    item.has(ItemFlag::Surface) || (item.has(ItemFlag::Container) && item.has(ItemFlag::Open))
}

fn chain_passes(state: &GameState, containers: &[ItemId], rule: fn(&Item) -> bool) -> bool {
    containers
        .iter()
        .all(|id| state.items.get(id).is_some_and(rule))
}

/// Whether the item can be seen by a player standing in `location`.
///
/// In an unlit location nothing room-rooted (scenery included) is
/// visible; carried items stay with the player.
pub fn item_is_visible_from(state: &GameState, id: &ItemId, location: &LocationId) -> bool {
    let Ok(item) = state.item(id) else {
        return false;
    };
    if item.has(ItemFlag::Invisible) {
        return false;
    }
    let lit = location_is_lit(state, location);
    // local scenery is visible as if present, with no container chain
    if lit
        && state
            .location(location)
            .is_ok_and(|loc| loc.local_globals.contains(id))
    {
        return true;
    }
    let (root, containers) = chain_to_root(state, id);
    let rooted_here = match root {
        ParentEntity::Location(loc) => lit && loc == *location,
        ParentEntity::Player => state.player.location == *location,
        _ => false,
    };
    rooted_here && chain_passes(state, &containers, container_shows)
}

/// Whether the player can physically get at the item from where they stand.
pub fn item_is_reachable(state: &GameState, id: &ItemId) -> bool {
    let Ok(item) = state.item(id) else {
        return false;
    };
    if item.has(ItemFlag::Invisible) {
        return false;
    }
    let here = &state.player.location;
    if state.location(here).is_ok_and(|loc| loc.local_globals.contains(id)) {
        return true;
    }
    let (root, containers) = chain_to_root(state, id);
    let rooted_near = match root {
        ParentEntity::Location(loc) => loc == *here,
        ParentEntity::Player => true,
        _ => false,
    };
    rooted_near && chain_passes(state, &containers, container_yields)
}

/// Items the player is holding, directly or in carried containers that
/// show their contents.
pub fn held_visible_items(state: &GameState) -> Vec<ItemId> {
    let mut out = Vec::new();
    collect_visible(state, &ParentEntity::Player, &mut out);
    out
}

/// Items visible in a location: its direct contents plus the contents of
/// showing containers, recursively. Inventory and scenery are not
/// included, and an unlit location shows nothing at all.
pub fn visible_items_at(state: &GameState, location: &LocationId) -> Vec<ItemId> {
    if !location_is_lit(state, location) {
        return Vec::new();
    }
    lit_contents(state, location)
}

/// The contents walk without the lighting gate; the lighting decision
/// itself needs it to find shining items in the room.
fn lit_contents(state: &GameState, location: &LocationId) -> Vec<ItemId> {
    let mut out = Vec::new();
    collect_visible(state, &ParentEntity::Location(location.clone()), &mut out);
    out
}

fn collect_visible(state: &GameState, parent: &ParentEntity, out: &mut Vec<ItemId>) {
    for id in state.children(parent) {
        let Some(item) = state.items.get(&id) else { continue };
        if item.has(ItemFlag::Invisible) {
            continue;
        }
        let show_contents = container_shows(item);
        out.push(id.clone());
        if show_contents {
            collect_visible(state, &ParentEntity::Item(id), out);
        }
    }
}

/// Whether the location is lit: inherently, by a shining item in the room,
/// or by a shining item the player carries.
pub fn location_is_lit(state: &GameState, location: &LocationId) -> bool {
    let Ok(loc) = state.location(location) else {
        return false;
    };
    if loc.inherently_lit {
        return true;
    }
    let shining = |id: &ItemId| state.items.get(id).is_some_and(Item::is_providing_light);
    lit_contents(state, location).iter().any(shining)
        || held_visible_items(state).iter().any(shining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LocationId;
    use crate::location::Location;

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

    fn build(items: Vec<Item>, locations: Vec<Location>) -> GameState {
        let mut state = GameState::default();
        for l in locations {
            state.locations.insert(l.id.clone(), l);
        }
        for i in items {
            state.items.insert(i.id.clone(), i);
        }
        state
    }

    fn here() -> ParentEntity {
        ParentEntity::Location(LocationId::new("cellar"))
    }

    #[test]
    fn room_items_are_visible_and_reachable() {
        let mut state = build(vec![item_in("sword", here())], vec![loc("cellar")]);
        state.player.location = LocationId::new("cellar");
        assert!(item_is_visible_from(&state, &ItemId::new("sword"), &LocationId::new("cellar")));
        assert!(item_is_reachable(&state, &ItemId::new("sword")));
    }

    #[test]
    fn invisible_items_are_neither() {
        let mut grating = item_in("grating", here());
        grating.flags.insert(ItemFlag::Invisible);
        let mut state = build(vec![grating], vec![loc("cellar")]);
        state.player.location = LocationId::new("cellar");
        assert!(!item_is_visible_from(&state, &ItemId::new("grating"), &LocationId::new("cellar")));
        assert!(!item_is_reachable(&state, &ItemId::new("grating")));
    }

    #[test]
    fn closed_opaque_containers_hide_contents() {
        let mut chest = item_in("chest", here());
        chest.flags.insert(ItemFlag::Container);
        let coin = item_in("coin", ParentEntity::Item(ItemId::new("chest")));
        let mut state = build(vec![chest, coin], vec![loc("cellar")]);
        state.player.location = LocationId::new("cellar");
        assert!(!item_is_visible_from(&state, &ItemId::new("coin"), &LocationId::new("cellar")));

        state
            .items
            .get_mut(&ItemId::new("chest"))
            .unwrap()
            .flags
            .insert(ItemFlag::Open);
        assert!(item_is_visible_from(&state, &ItemId::new("coin"), &LocationId::new("cellar")));
        assert!(item_is_reachable(&state, &ItemId::new("coin")));
    }

    #[test]
    fn transparent_closed_shows_but_does_not_yield() {
        let mut bottle = item_in("bottle", here());
        bottle.flags.insert(ItemFlag::Container);
        bottle.flags.insert(ItemFlag::Transparent);
        let water = item_in("water", ParentEntity::Item(ItemId::new("bottle")));
        let mut state = build(vec![bottle, water], vec![loc("cellar")]);
        state.player.location = LocationId::new("cellar");
        assert!(item_is_visible_from(&state, &ItemId::new("water"), &LocationId::new("cellar")));
        assert!(!item_is_reachable(&state, &ItemId::new("water")));
    }

    #[test]
    fn surfaces_show_and_yield() {
        let mut table = item_in("table", here());
        table.flags.insert(ItemFlag::Surface);
        let lunch = item_in("lunch", ParentEntity::Item(ItemId::new("table")));
        let mut state = build(vec![table, lunch], vec![loc("cellar")]);
        state.player.location = LocationId::new("cellar");
        assert!(item_is_visible_from(&state, &ItemId::new("lunch"), &LocationId::new("cellar")));
        assert!(item_is_reachable(&state, &ItemId::new("lunch")));
    }

    #[test]
    fn carried_items_are_visible_in_the_players_location() {
        let sword = item_in("sword", ParentEntity::Player);
        let mut state = build(vec![sword], vec![loc("cellar"), loc("kitchen")]);
        state.player.location = LocationId::new("cellar");
        assert!(item_is_visible_from(&state, &ItemId::new("sword"), &LocationId::new("cellar")));
        assert!(!item_is_visible_from(&state, &ItemId::new("sword"), &LocationId::new("kitchen")));
    }

    #[test]
    fn local_globals_are_visible_without_presence() {
        let house = item_in("white_house", ParentEntity::Nowhere);
        let mut west = loc("west_of_house");
        west.local_globals.push(ItemId::new("white_house"));
        let mut state = build(vec![house], vec![west, loc("cellar")]);
        state.player.location = LocationId::new("west_of_house");
        assert!(item_is_visible_from(
            &state,
            &ItemId::new("white_house"),
            &LocationId::new("west_of_house")
        ));
        assert!(!item_is_visible_from(&state, &ItemId::new("white_house"), &LocationId::new("cellar")));
        assert!(item_is_reachable(&state, &ItemId::new("white_house")));
    }

    #[test]
    fn darkness_rules() {
        let mut cellar = loc("cellar");
        cellar.inherently_lit = false;
        let mut lantern = item_in("lantern", ParentEntity::Player);
        lantern.flags.insert(ItemFlag::LightSource);
        let mut state = build(vec![lantern], vec![cellar]);
        state.player.location = LocationId::new("cellar");
        assert!(!location_is_lit(&state, &LocationId::new("cellar")));

        state
            .items
            .get_mut(&ItemId::new("lantern"))
            .unwrap()
            .flags
            .insert(ItemFlag::On);
        assert!(location_is_lit(&state, &LocationId::new("cellar")));
    }

    #[test]
    fn burning_item_in_room_lights_it() {
        let mut cellar = loc("cellar");
        cellar.inherently_lit = false;
        let mut torch = item_in("torch", here());
        torch.flags.insert(ItemFlag::LightSource);
        torch.flags.insert(ItemFlag::Burning);
        let state = build(vec![torch], vec![cellar]);
        assert!(location_is_lit(&state, &LocationId::new("cellar")));
    }

    #[test]
    fn unlit_rooms_show_nothing_but_held_items() {
        let mut cellar = loc("cellar");
        cellar.inherently_lit = false;
        let sword = item_in("sword", here());
        let carried = item_in("garlic", ParentEntity::Player);
        let mut state = build(vec![sword, carried], vec![cellar]);
        state.player.location = LocationId::new("cellar");

        assert!(visible_items_at(&state, &LocationId::new("cellar")).is_empty());
        assert!(!item_is_visible_from(&state, &ItemId::new("sword"), &LocationId::new("cellar")));
        // what's in hand stays with you
        assert_eq!(held_visible_items(&state), vec![ItemId::new("garlic")]);
        assert!(item_is_visible_from(
            &state,
            &ItemId::new("garlic"),
            &LocationId::new("cellar")
        ));
    }

    #[test]
    fn light_inside_closed_container_does_not_shine() {
        let mut cellar = loc("cellar");
        cellar.inherently_lit = false;
        let mut sack = item_in("sack", here());
        sack.flags.insert(ItemFlag::Container);
        let mut lantern = item_in("lantern", ParentEntity::Item(ItemId::new("sack")));
        lantern.flags.insert(ItemFlag::LightSource);
        lantern.flags.insert(ItemFlag::On);
        let state = build(vec![sack, lantern], vec![cellar]);
        assert!(!location_is_lit(&state, &LocationId::new("cellar")));
    }
}
