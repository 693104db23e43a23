//! Background agents: the sword's glow, the wandering thief, and the
//! combat rounds themselves. Registration order is load-bearing — the
//! glow check reads the world before the thief moves, and combat always
//! resolves last.

use grue_engine::change::ActionResult;
use grue_engine::combat::{enemy_rounds_daemon, sword_glow_daemon};
use grue_engine::scheduler::DaemonFn;
use grue_engine::sheet::Consciousness;
use grue_engine::world::DaemonState;
use grue_engine::{
    GlobalId, ItemId, LocationId, ParentEntity, StateChange, WorldDef,
};

use crate::ids;

pub fn register(def: &mut WorldDef) {
    def.daemon(
        ids::SWORD_GLOW_DAEMON,
        1,
        true,
        sword_glow_daemon(ItemId::new(ids::SWORD), GlobalId::new(ids::SWORD_GLOW_LEVEL)),
    );
    def.daemon(ids::THIEF_DAEMON, 1, true, thief_daemon());
    def.daemon(ids::COMBAT_DAEMON, 1, true, enemy_rounds_daemon());
}

/// The thief skulks around his haunts. Sharing a room with the player,
/// he has a 30% window each turn to lift the most valuable thing the
/// player carries into his bag and slip away; otherwise he lurks. Away
/// from the player he wanders his lairs.
pub fn thief_daemon() -> DaemonFn {
    Box::new(|engine, daemon_state| {
        let world = engine.state();
        let thief_id = ItemId::new(ids::THIEF);
        let Ok(thief) = world.item(&thief_id) else {
            return Ok((None, DaemonState::Inactive));
        };
        let Some(sheet) = thief.sheet.as_ref() else {
            return Ok((None, DaemonState::Inactive));
        };
        if sheet.consciousness != Consciousness::Alert {
            return Ok((None, DaemonState::Inactive));
        }

        let lair = world.nearest_location(&thief_id);
        let with_player = lair.as_ref() == Some(&world.player.location);

        if with_player {
            if engine.random_percentage(30)
                && let Some(loot) = most_valuable_carried(world)
            {
                let mut changes = vec![StateChange::MoveItem {
                    item: loot.clone(),
                    to: ParentEntity::Item(ItemId::new(ids::LARGE_BAG)),
                }];
                if let Some(bolt_hole) = random_lair(engine, lair.as_ref()) {
                    changes.push(StateChange::MoveItem {
                        item: thief_id,
                        to: ParentEntity::Location(bolt_hole),
                    });
                }
                let name = world.items.get(&loot).map_or_else(String::new, |i| i.name.clone());
                let message = format!(
                    "A seedy-looking individual with a large bag just robbed you blind! Your {name} vanishes with him into the gloom."
                );
                return Ok((Some(ActionResult::with_changes(message, changes)), daemon_state));
            }
            // lurking; maybe next turn
            return Ok((Some(ActionResult::yielded()), daemon_state));
        }

        // wander the lairs, quietly
        if engine.random_percentage(40)
            && let Some(next) = random_lair(engine, lair.as_ref())
        {
            let arrives_on_player = next == world.player.location;
            let changes = vec![StateChange::MoveItem {
                item: thief_id,
                to: ParentEntity::Location(next),
            }];
            let result = if arrives_on_player {
                ActionResult::with_changes(
                    "Someone carrying a large bag is casually leaning against one of the walls here. He does not speak, but it is clear from his aspect that the bag will be taken only over his dead body.",
                    changes,
                )
            } else {
                ActionResult::silent(changes)
            };
            return Ok((Some(result), daemon_state));
        }
        Ok((Some(ActionResult::yielded()), daemon_state))
    })
}

/// The most valuable treasure in the player's hands.
fn most_valuable_carried(world: &grue_engine::GameState) -> Option<ItemId> {
    world
        .children(&ParentEntity::Player)
        .into_iter()
        .filter_map(|id| world.items.get(&id).map(|item| (id, item.value)))
        .filter(|(_, value)| *value > 0)
        .max_by_key(|(_, value)| *value)
        .map(|(id, _)| id)
}

/// A deterministic pick from the thief's permitted haunts, excluding
/// where he stands now.
fn random_lair(engine: &grue_engine::Engine, current: Option<&LocationId>) -> Option<LocationId> {
    let world = engine.state();
    let thief = world.item(&ItemId::new(ids::THIEF)).ok()?;
    let mut lairs: Vec<&LocationId> = thief
        .valid_locations
        .iter()
        .filter(|loc| Some(*loc) != current)
        .collect();
    if lairs.is_empty() {
        return None;
    }
    lairs.sort();
    let idx = (engine.roll(lairs.len() as i64) - 1) as usize;
    Some(lairs[idx].clone())
}
