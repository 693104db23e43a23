//! Light sources and devices: turn on, turn off, light, extinguish.

use anyhow::Result;

use crate::change::ActionResult;
use crate::command::Command;
use crate::engine::Engine;
use crate::item::ItemFlag;

use super::look::describe_location;
use super::{direct_item, respond};

/// TURN ON / LIGHT.
pub fn light(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Turn on what?");
    };

    // powered devices
    if item.flag(ItemFlag::Device) {
        if item.flag(ItemFlag::On) {
            return respond("It's already on.");
        }
        if item.flag(ItemFlag::BurnedOut) {
            return respond(format!("The {} has burned out.", item.name()));
        }
        let was_dark = !engine.here()?.is_lit();
        let mut text = format!("The {} is now on.", item.name());
        let mut changes = vec![];
        changes.extend(item.set_flag(ItemFlag::On));
        if was_dark && item.flag(ItemFlag::LightSource) {
            // show the room the player just lit up
            let here = engine.state().player.location.clone();
            let (view, mut touch) = describe_location(engine, &here, true)?;
            text.push_str(&format!("\n\n{view}"));
            changes.append(&mut touch);
        }
        return Ok(Some(ActionResult::with_changes(text, changes)));
    }

    // open flames
    if item.flag(ItemFlag::Flammable) {
        if item.flag(ItemFlag::Burning) {
            return respond("It's already burning.");
        }
        if item.flag(ItemFlag::BurnedOut) {
            return respond(format!("There's nothing left of the {} to burn.", item.name()));
        }
        let has_flame = item.flag(ItemFlag::SelfIgnitable)
            || engine
                .player()
                .inventory()
                .iter()
                .filter_map(|id| engine.item(id).ok())
                .any(|held| held.flag(ItemFlag::Burning));
        if !has_flame {
            return respond("You have nothing to light it with.");
        }
        let result = ActionResult::message(format!("The {} is now burning.", item.name()))
            .then_maybe([item.set_flag(ItemFlag::Burning)]);
        return Ok(Some(result));
    }

    respond(format!("You can't turn {} on.", item.with_definite_article()))
}

/// TURN OFF / EXTINGUISH / DOUSE.
pub fn extinguish(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Turn off what?");
    };

    if item.flag(ItemFlag::On) {
        let mut text = format!("The {} is now off.", item.name());
        let changes: Vec<_> = item.clear_flag(ItemFlag::On).into_iter().collect();
        if would_go_dark(engine, &item)? {
            text.push_str("\nIt is now pitch black.");
        }
        return Ok(Some(ActionResult {
            message: Some(text),
            changes,
            ..ActionResult::default()
        }));
    }

    if item.flag(ItemFlag::Burning) {
        let mut text = format!("The {} is extinguished.", item.name());
        let changes: Vec<_> = item.clear_flag(ItemFlag::Burning).into_iter().collect();
        if would_go_dark(engine, &item)? {
            text.push_str("\nIt is now pitch black.");
        }
        return Ok(Some(ActionResult {
            message: Some(text),
            changes,
            ..ActionResult::default()
        }));
    }

    if item.flag(ItemFlag::Device) || item.flag(ItemFlag::Flammable) {
        return respond("It's not on.");
    }
    respond(format!("You can't turn {} off.", item.with_definite_article()))
}

/// Whether dousing this particular source leaves the player in the dark:
/// the room isn't inherently lit and no other source is shining.
fn would_go_dark(engine: &Engine, doused: &crate::proxy::ItemProxy<'_>) -> Result<bool> {
    let here = engine.here()?;
    if !doused.is_providing_light() {
        return Ok(false);
    }
    let state = engine.state();
    let loc = state.location(here.id())?;
    if loc.inherently_lit {
        return Ok(false);
    }
    let another_source = here
        .visible_items()
        .iter()
        .chain(engine.player().inventory().iter())
        .filter(|id| *id != doused.id())
        .filter_map(|id| engine.item(id).ok())
        .any(|item| item.is_providing_light());
    Ok(!another_source)
}
