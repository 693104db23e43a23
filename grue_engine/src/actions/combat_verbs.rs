//! Attack and throw.

use anyhow::Result;

use crate::change::ActionResult;
use crate::combat::{carried_weapon, player_attack_round};
use crate::command::Command;
use crate::engine::Engine;
use crate::item::ParentEntity;

use super::{direct_item, indirect_item, refuse_universal, respond};

/// ATTACK X [WITH W].
pub fn attack(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    if let Some(refusal) = refuse_universal(command) {
        return respond(refusal);
    }
    let Some(target) = direct_item(engine, command) else {
        return respond("Attack what?");
    };
    if target.sheet().is_none() {
        return respond(format!(
            "Attacking {} is pointless.",
            target.with_definite_article()
        ));
    }
    if !target.is_alive() {
        return respond("Flogging a corpse accomplishes nothing.");
    }

    let weapon = match indirect_item(engine, command) {
        Some(weapon) => {
            if !weapon.player_is_holding() {
                return respond(format!("You aren't holding {}.", weapon.with_definite_article()));
            }
            Some(weapon.id().clone())
        },
        None => carried_weapon(engine.state(), &ParentEntity::Player),
    };
    player_attack_round(engine, target.id(), weapon.as_ref()).map(Some)
}

/// THROW X AT Y.
pub fn throw(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(missile) = direct_item(engine, command) else {
        return respond("Throw what?");
    };
    if !missile.player_is_holding() {
        return respond("You're not holding that.");
    }
    let here = engine.state().player.location.clone();
    let landed = missile.move_to(ParentEntity::Location(here));

    if let Some(target) = indirect_item(engine, command)
        && target.sheet().is_some()
        && target.is_alive()
    {
        let message = format!(
            "The {} bounces off the {}, enraging it.",
            missile.name(),
            target.name()
        );
        let mut result = ActionResult::message(message).then_maybe([landed]);
        result.changes.extend(
            target.set_character_attributes(crate::sheet::CharacterUpdate {
                fighting: Some(true),
                ..Default::default()
            }),
        );
        return Ok(Some(result));
    }

    let result = ActionResult::message("Thrown.").then_maybe([landed]);
    Ok(Some(result))
}
