//! The combat subsystem.
//!
//! A pluggable state machine layered on the scheduler. Each round rolls
//! d20 + accuracy against armor class on the engine's seeded RNG, draws
//! damage from the wielded weapon's damage slot, and classifies the outcome
//! into a [`CombatEvent`]. A per-enemy [`CombatSystem`] turns events into
//! flavor text and optional extra changes; the engine composes those with
//! the baseline state changes.
//!
//! Enemy-initiated rounds run inside [`enemy_rounds_daemon`]; the ATTACK
//! verb drives the player's round through [`player_attack_round`].

use anyhow::Result;
use log::info;

use crate::change::{ActionResult, StateChange};
use crate::engine::Engine;
use crate::ids::{GlobalId, ItemId, StateValue};
use crate::item::{ItemFlag, ItemProp, ParentEntity};
use crate::player::PlayerProp;
use crate::scheduler::DaemonFn;
use crate::sheet::Consciousness;
use crate::world::GameState;

/// Damage dealt bare-handed.
const FIST_DAMAGE: i64 = 2;

/// Classified outcome of one attack round.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerMissed {
        enemy: ItemId,
    },
    EnemyMissed {
        enemy: ItemId,
    },
    PlayerDodged {
        enemy: ItemId,
    },
    PlayerLightlyInjured {
        enemy: ItemId,
        damage: i64,
    },
    PlayerGravelyInjured {
        enemy: ItemId,
        damage: i64,
    },
    PlayerCriticallyWounded {
        enemy: ItemId,
        damage: i64,
    },
    PlayerUnconscious {
        enemy: ItemId,
    },
    PlayerSlain {
        enemy: ItemId,
    },
    PlayerDisarmed {
        enemy: ItemId,
        player_weapon: ItemId,
        enemy_weapon: Option<ItemId>,
        was_fumble: bool,
    },
    EnemyLightlyInjured {
        enemy: ItemId,
        damage: i64,
    },
    EnemyGravelyInjured {
        enemy: ItemId,
        damage: i64,
    },
    EnemyCriticallyWounded {
        enemy: ItemId,
        damage: i64,
    },
    EnemyUnconscious {
        enemy: ItemId,
    },
    EnemySlain {
        enemy: ItemId,
        weapon: Option<ItemId>,
        damage: i64,
    },
    EnemyFlees {
        enemy: ItemId,
    },
    EnemySpecialAction {
        enemy: ItemId,
    },
}

/// Flavor text plus any extra changes a combat system wants alongside the
/// engine's baseline changes.
#[derive(Debug, Clone, Default)]
pub struct CombatNarration {
    pub text: String,
    pub changes: Vec<StateChange>,
}

impl CombatNarration {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changes: Vec::new(),
        }
    }
}

/// Per-enemy narration plug-in. Most implementations pick a random line
/// from a fixed list per event.
pub trait CombatSystem {
    fn narrate(&self, engine: &Engine, event: &CombatEvent) -> CombatNarration;
}

/// Fallback narration used for enemies without a registered system.
pub struct DefaultCombatSystem;

impl CombatSystem for DefaultCombatSystem {
    fn narrate(&self, engine: &Engine, event: &CombatEvent) -> CombatNarration {
        let name = |id: &ItemId| {
            engine
                .state()
                .item(id)
                .map(|item| item.name.clone())
                .unwrap_or_else(|_| "creature".to_string())
        };
        let text = match event {
            CombatEvent::PlayerMissed { enemy } => format!("Your blow misses the {}.", name(enemy)),
            CombatEvent::EnemyMissed { enemy } => {
                format!("The {} swings at you, but misses.", name(enemy))
            },
            CombatEvent::PlayerDodged { enemy } => {
                format!("You dodge as the {} strikes at you.", name(enemy))
            },
            CombatEvent::PlayerLightlyInjured { enemy, .. } => {
                format!("The {} grazes you.", name(enemy))
            },
            CombatEvent::PlayerGravelyInjured { enemy, .. } => {
                format!("The {} lands a solid blow. That hurt.", name(enemy))
            },
            CombatEvent::PlayerCriticallyWounded { enemy, .. } => {
                format!("The {} wounds you gravely. You stagger.", name(enemy))
            },
            CombatEvent::PlayerUnconscious { enemy } => {
                format!("A crushing blow from the {} knocks you senseless.", name(enemy))
            },
            CombatEvent::PlayerSlain { enemy } => {
                format!("The {} delivers a killing blow. It appears that that last blow was too much for you.", name(enemy))
            },
            CombatEvent::PlayerDisarmed { enemy, player_weapon, .. } => format!(
                "The {} knocks the {} out of your hand!",
                name(enemy),
                name(player_weapon)
            ),
            CombatEvent::EnemyLightlyInjured { enemy, .. } => {
                format!("You nick the {}.", name(enemy))
            },
            CombatEvent::EnemyGravelyInjured { enemy, .. } => {
                format!("You wound the {} badly.", name(enemy))
            },
            CombatEvent::EnemyCriticallyWounded { enemy, .. } => {
                format!("The {} reels from a grievous wound.", name(enemy))
            },
            CombatEvent::EnemyUnconscious { enemy } => {
                format!("The {} collapses, unconscious.", name(enemy))
            },
            CombatEvent::EnemySlain { enemy, .. } => {
                format!("The {} breathes its last.", name(enemy))
            },
            CombatEvent::EnemyFlees { enemy } => {
                format!("The {} flees the battle.", name(enemy))
            },
            CombatEvent::EnemySpecialAction { enemy } => {
                format!("The {} does something unexpected.", name(enemy))
            },
        };
        CombatNarration::text(text)
    }
}

/// The weapon an entity is carrying: its first child with the weapon flag.
pub fn carried_weapon(state: &GameState, holder: &ParentEntity) -> Option<ItemId> {
    state
        .children(holder)
        .into_iter()
        .find(|id| state.items.get(id).is_some_and(|item| item.has(ItemFlag::Weapon)))
}

fn weapon_damage(state: &GameState, weapon: Option<&ItemId>) -> i64 {
    weapon
        .and_then(|id| state.items.get(id))
        .map(|item| item.damage.max(1))
        .unwrap_or(FIST_DAMAGE)
}

fn set_enemy(enemy: &ItemId, prop: ItemProp, value: StateValue) -> StateChange {
    StateChange::SetItemProperty {
        item: enemy.clone(),
        prop,
        value,
    }
}

fn set_player(prop: PlayerProp, value: StateValue) -> StateChange {
    StateChange::SetPlayerProperty { prop, value }
}

/// Changes that knock an enemy out: health pinned at zero, fighting
/// cleared, weapon dropped where it can be taken.
pub fn unconsciousness_changes(state: &GameState, enemy: &ItemId) -> Vec<StateChange> {
    let mut changes = vec![
        set_enemy(enemy, ItemProp::Health, StateValue::Int(0)),
        set_enemy(
            enemy,
            ItemProp::Consciousness,
            StateValue::Text(Consciousness::Unconscious.as_key().into()),
        ),
        set_enemy(enemy, ItemProp::Fighting, StateValue::Bool(false)),
    ];
    if let Some(here) = state.nearest_location(enemy)
        && let Some(weapon) = carried_weapon(state, &ParentEntity::Item(enemy.clone()))
    {
        changes.push(StateChange::MoveItem {
            item: weapon.clone(),
            to: ParentEntity::Location(here),
        });
        changes.push(set_enemy(
            &weapon,
            ItemProp::Flag(ItemFlag::OmitDescription),
            StateValue::Bool(false),
        ));
        changes.push(set_enemy(
            &weapon,
            ItemProp::Flag(ItemFlag::Weapon),
            StateValue::Bool(true),
        ));
    }
    changes
}

/// The canonical enemy-death change list: consciousness dead, corpse to
/// Nowhere, weapon dropped, and any carried container disgorged — its
/// valuable contents to the location, the rest staying inside, the
/// container itself to the location.
pub fn death_changes(state: &GameState, enemy: &ItemId) -> Vec<StateChange> {
    let here = state.nearest_location(enemy).or_else(|| Some(state.player.location.clone()));
    let mut changes = vec![
        set_enemy(
            enemy,
            ItemProp::Consciousness,
            StateValue::Text(Consciousness::Dead.as_key().into()),
        ),
        set_enemy(enemy, ItemProp::Fighting, StateValue::Bool(false)),
    ];
    let Some(here) = here else {
        changes.push(StateChange::MoveItem {
            item: enemy.clone(),
            to: ParentEntity::Nowhere,
        });
        return changes;
    };
    let floor = ParentEntity::Location(here);

    if let Some(weapon) = carried_weapon(state, &ParentEntity::Item(enemy.clone())) {
        changes.push(StateChange::MoveItem {
            item: weapon.clone(),
            to: floor.clone(),
        });
        changes.push(set_enemy(
            &weapon,
            ItemProp::Flag(ItemFlag::OmitDescription),
            StateValue::Bool(false),
        ));
    }
    for id in state.children(&ParentEntity::Item(enemy.clone())) {
        let Some(item) = state.items.get(&id) else { continue };
        if item.has(ItemFlag::Container) {
            // treasures spill out; junk stays in the bag
            for inner in state.children(&ParentEntity::Item(id.clone())) {
                if state.items.get(&inner).is_some_and(|i| i.value > 0) {
                    changes.push(StateChange::MoveItem {
                        item: inner,
                        to: floor.clone(),
                    });
                }
            }
            changes.push(StateChange::MoveItem {
                item: id,
                to: floor.clone(),
            });
        }
    }
    changes.push(StateChange::MoveItem {
        item: enemy.clone(),
        to: ParentEntity::Nowhere,
    });
    changes
}

fn classify_enemy_hit(enemy: &ItemId, post_hp: i64, max_hp: i64, damage: i64) -> CombatEvent {
    if post_hp <= 0 {
        return CombatEvent::EnemyUnconscious { enemy: enemy.clone() };
    }
    let fraction = post_hp as f64 / max_hp.max(1) as f64;
    if fraction <= 0.25 {
        CombatEvent::EnemyCriticallyWounded {
            enemy: enemy.clone(),
            damage,
        }
    } else if fraction <= 0.5 {
        CombatEvent::EnemyGravelyInjured {
            enemy: enemy.clone(),
            damage,
        }
    } else {
        CombatEvent::EnemyLightlyInjured {
            enemy: enemy.clone(),
            damage,
        }
    }
}

fn classify_player_hit(enemy: &ItemId, post_hp: i64, max_hp: i64, damage: i64) -> CombatEvent {
    if post_hp <= 0 {
        return CombatEvent::PlayerSlain { enemy: enemy.clone() };
    }
    let fraction = post_hp as f64 / max_hp.max(1) as f64;
    if fraction <= 0.25 {
        CombatEvent::PlayerCriticallyWounded {
            enemy: enemy.clone(),
            damage,
        }
    } else if fraction <= 0.5 {
        CombatEvent::PlayerGravelyInjured {
            enemy: enemy.clone(),
            damage,
        }
    } else {
        CombatEvent::PlayerLightlyInjured {
            enemy: enemy.clone(),
            damage,
        }
    }
}

/// Resolve the player's swing at an enemy.
///
/// An unconscious enemy is slain outright. Otherwise: d20 + accuracy vs
/// the enemy's armor class, damage from the wielded weapon, and the enemy
/// is provoked into fighting back.
pub fn player_attack_round(
    engine: &Engine,
    enemy_id: &ItemId,
    weapon: Option<&ItemId>,
) -> Result<ActionResult> {
    let state = engine.state();
    let enemy = state.item(enemy_id)?;
    let Some(sheet) = enemy.sheet.clone() else {
        return Ok(ActionResult::message(format!(
            "Attacking the {} is pointless.",
            enemy.name
        )));
    };

    if sheet.consciousness == Consciousness::Unconscious {
        let damage = weapon_damage(state, weapon);
        let event = CombatEvent::EnemySlain {
            enemy: enemy_id.clone(),
            weapon: weapon.cloned(),
            damage,
        };
        let narration = engine.narrate_combat(enemy_id, &event);
        let mut changes = death_changes(state, enemy_id);
        changes.extend(narration.changes);
        info!("unconscious '{enemy_id}' slain outright");
        return Ok(ActionResult {
            message: Some(narration.text),
            changes,
            ..ActionResult::default()
        });
    }

    let roll = engine.roll_d20() + state.player.sheet.accuracy;
    let event;
    let mut changes = Vec::new();
    if roll < sheet.armor_class {
        event = CombatEvent::PlayerMissed {
            enemy: enemy_id.clone(),
        };
    } else {
        let damage = engine.roll(weapon_damage(state, weapon));
        let post_hp = sheet.health - damage;
        changes.push(set_enemy(enemy_id, ItemProp::Health, StateValue::Int(post_hp.max(0))));
        event = classify_enemy_hit(enemy_id, post_hp, sheet.max_health, damage);
        if matches!(event, CombatEvent::EnemyUnconscious { .. }) {
            changes = unconsciousness_changes(state, enemy_id);
        }
    }
    // a swing provokes the enemy even when it misses
    if !matches!(event, CombatEvent::EnemyUnconscious { .. }) && !sheet.fighting {
        changes.push(set_enemy(enemy_id, ItemProp::Fighting, StateValue::Bool(true)));
    }

    let narration = engine.narrate_combat(enemy_id, &event);
    changes.extend(narration.changes.clone());
    Ok(ActionResult {
        message: Some(narration.text),
        changes,
        ..ActionResult::default()
    })
}

/// Resolve one enemy's swing at the player.
pub fn enemy_attack_round(engine: &Engine, enemy_id: &ItemId) -> Result<ActionResult> {
    let state = engine.state();
    let enemy = state.item(enemy_id)?;
    let Some(sheet) = enemy.sheet.clone() else {
        return Ok(ActionResult::yielded());
    };
    let player_sheet = &state.player.sheet;

    let natural = engine.roll_d20();
    let roll = natural + sheet.accuracy;
    let enemy_weapon = carried_weapon(state, &ParentEntity::Item(enemy_id.clone()));
    let player_weapon = carried_weapon(state, &ParentEntity::Player);

    let event;
    let mut changes = Vec::new();
    if natural == 20
        && let Some(weapon) = player_weapon
    {
        // a perfect strike knocks the player's weapon away instead of wounding
        changes.push(StateChange::MoveItem {
            item: weapon.clone(),
            to: ParentEntity::Location(state.player.location.clone()),
        });
        event = CombatEvent::PlayerDisarmed {
            enemy: enemy_id.clone(),
            player_weapon: weapon,
            enemy_weapon,
            was_fumble: false,
        };
    } else if roll < player_sheet.armor_class {
        event = if roll == player_sheet.armor_class - 1 {
            CombatEvent::PlayerDodged {
                enemy: enemy_id.clone(),
            }
        } else {
            CombatEvent::EnemyMissed {
                enemy: enemy_id.clone(),
            }
        };
    } else {
        let damage = engine.roll(weapon_damage(state, enemy_weapon.as_ref()));
        let post_hp = player_sheet.health - damage;
        changes.push(set_player(PlayerProp::Health, StateValue::Int(post_hp.max(0))));
        event = match classify_player_hit(enemy_id, post_hp, player_sheet.max_health, damage) {
            CombatEvent::PlayerSlain { enemy } => {
                changes.push(set_player(
                    PlayerProp::Consciousness,
                    StateValue::Text(Consciousness::Dead.as_key().into()),
                ));
                CombatEvent::PlayerSlain { enemy }
            },
            other => other,
        };
    }

    let narration = engine.narrate_combat(enemy_id, &event);
    changes.extend(narration.changes.clone());
    Ok(ActionResult {
        message: Some(narration.text),
        changes,
        ..ActionResult::default()
    })
}

/// Hostile, awake, co-located enemies each get a swing after the player's
/// action. Registered as a daemon so combat runs on the scheduler like any
/// other background agent.
pub fn enemy_rounds_daemon() -> DaemonFn {
    Box::new(|engine, daemon_state| {
        let state = engine.state();
        let here = &state.player.location;
        let hostiles: Vec<ItemId> = state
            .items
            .values()
            .filter(|item| {
                item.sheet
                    .as_ref()
                    .is_some_and(|s| s.fighting && s.consciousness == Consciousness::Alert)
            })
            .filter(|item| state.nearest_location(&item.id).as_ref() == Some(here))
            .map(|item| item.id.clone())
            .collect();
        if hostiles.is_empty() {
            return Ok((Some(ActionResult::yielded()), daemon_state));
        }
        let mut lines = Vec::new();
        let mut changes = Vec::new();
        for enemy in &hostiles {
            let round = enemy_attack_round(engine, enemy)?;
            if let Some(text) = round.message {
                lines.push(text);
            }
            changes.extend(round.changes);
        }
        let result = ActionResult {
            message: Some(lines.join("\n")),
            changes,
            ..ActionResult::default()
        };
        Ok((Some(result), daemon_state))
    })
}

/// Glow levels for [`sword_glow_daemon`].
const GLOW_NONE: i64 = 0;
const GLOW_ADJACENT: i64 = 1;
const GLOW_HERE: i64 = 2;

/// A daemon that tracks hostile presence around the player and sets a
/// global glow level, announcing only level transitions while the sword
/// is carried.
pub fn sword_glow_daemon(sword: ItemId, glow_global: GlobalId) -> DaemonFn {
    Box::new(move |engine, daemon_state| {
        let state = engine.state();
        let here = &state.player.location;
        let hostile_at = |loc: &crate::ids::LocationId| {
            state.items.values().any(|item| {
                item.sheet.as_ref().is_some_and(|s| s.is_alive())
                    && state.nearest_location(&item.id).as_ref() == Some(loc)
            })
        };
        let level = if hostile_at(here) {
            GLOW_HERE
        } else if state
            .location(here)
            .map(|loc| loc.neighbors().any(hostile_at))
            .unwrap_or(false)
        {
            GLOW_ADJACENT
        } else {
            GLOW_NONE
        };

        let previous = state.global_int(&glow_global);
        if level == previous {
            return Ok((Some(ActionResult::yielded()), daemon_state));
        }
        let change = StateChange::SetGlobal {
            global: glow_global.clone(),
            value: StateValue::Int(level),
        };
        // silent unless the player is carrying the blade
        let held = state
            .items
            .get(&sword)
            .is_some_and(|item| item.parent == ParentEntity::Player);
        let result = if held {
            let text = match level {
                GLOW_HERE => "Your sword has begun to glow very brightly.",
                GLOW_ADJACENT => "Your sword is glowing with a faint blue glow.",
                _ => "Your sword is no longer glowing.",
            };
            ActionResult::with_changes(text, vec![change])
        } else {
            ActionResult::silent(vec![change])
        };
        Ok((Some(result), daemon_state))
    })
}
