//! Default verb handlers.
//!
//! These implement the canonical semantics for every verb in the command
//! surface. Hooks run first and may override any of them; a default runs
//! only when nothing upstream claimed the command.
//!
//! A handler returns `Ok(None)` when its intent does not apply to the
//! command's objects (letting the next intent on the verb try), or
//! `Ok(Some(result))` with the outcome. Player-visible refusals are
//! results, never errors.

pub mod combat_verbs;
pub mod device;
pub mod look;
pub mod manipulate;
pub mod misc;
pub mod movement;
pub mod social;

use anyhow::Result;

use crate::change::ActionResult;
use crate::command::{Command, EntityRef, Universal};
use crate::engine::Engine;
use crate::proxy::ItemProxy;
use crate::spinners::SpinnerKind;
use crate::vocab::Intent;

/// Run the default handler for a command, trying its intents in order.
pub fn perform_default(engine: &Engine, command: &Command) -> Result<ActionResult> {
    for intent in &command.intents {
        if let Some(result) = run_intent(engine, *intent, command)? {
            return Ok(result);
        }
    }
    Ok(ActionResult::message(
        engine.spin(SpinnerKind::NoEffect, "Nothing happens."),
    ))
}

fn run_intent(engine: &Engine, intent: Intent, command: &Command) -> Result<Option<ActionResult>> {
    match intent {
        Intent::Move => movement::go(engine, command),
        Intent::Climb => movement::climb(engine, command),
        Intent::Look => look::look_around(engine),
        Intent::Examine => look::examine(engine, command),
        Intent::Take => manipulate::take(engine, command),
        Intent::Drop => manipulate::drop(engine, command),
        Intent::Put => manipulate::put(engine, command),
        Intent::Open => manipulate::open(engine, command),
        Intent::Close => manipulate::close(engine, command),
        Intent::Lock => manipulate::lock(engine, command),
        Intent::Unlock => manipulate::unlock(engine, command),
        Intent::Read => manipulate::read(engine, command),
        Intent::Push | Intent::Pull | Intent::MoveObject => manipulate::shove(engine, command),
        Intent::Mung => manipulate::mung(engine, command),
        Intent::Light => device::light(engine, command),
        Intent::Extinguish => device::extinguish(engine, command),
        Intent::Attack => combat_verbs::attack(engine, command),
        Intent::Throw => combat_verbs::throw(engine, command),
        Intent::Give => social::give(engine, command),
        Intent::Tell => social::tell(engine, command),
        Intent::Ask => social::ask(engine, command),
        Intent::Listen => social::listen(engine, command),
        Intent::Inventory => misc::inventory(engine),
        Intent::Wait => misc::wait(engine),
        // session-level; resolved before dispatch
        Intent::Save | Intent::Restore | Intent::Quit => Ok(None),
    }
}

/// Shorthand for a message-only handler outcome.
pub(crate) fn respond(text: impl Into<String>) -> Result<Option<ActionResult>> {
    Ok(Some(ActionResult::message(text)))
}

/// The direct object as an item proxy, when it is an item.
pub(crate) fn direct_item<'a>(engine: &'a Engine, command: &Command) -> Option<ItemProxy<'a>> {
    command
        .direct_item()
        .and_then(|id| engine.item(id).ok())
}

/// The indirect object as an item proxy, when it is an item.
pub(crate) fn indirect_item<'a>(engine: &'a Engine, command: &Command) -> Option<ItemProxy<'a>> {
    command
        .indirect_item()
        .and_then(|id| engine.item(id).ok())
}

/// Canned text for verbs aimed at a universal pseudo-object.
pub(crate) fn universal_response(universal: Universal, verb: &str) -> String {
    match universal {
        Universal::Ground => format!("You can't {verb} the ground."),
        Universal::Sky => format!("You can't {verb} the sky."),
        Universal::Walls => format!("You can't {verb} the walls."),
        Universal::Me => format!("Trying to {verb} yourself seems unwise."),
    }
}

/// True when the direct object is a universal, with its canned refusal.
pub(crate) fn refuse_universal(command: &Command) -> Option<String> {
    match &command.direct {
        Some(EntityRef::Universal(universal)) => Some(universal_response(*universal, &command.verb)),
        Some(EntityRef::Player) => Some(universal_response(Universal::Me, &command.verb)),
        _ => None,
    }
}
