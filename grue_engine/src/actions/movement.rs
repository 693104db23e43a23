//! Movement.
//!
//! The movement protocol: find the exit, respect blocked messages and
//! doors (locked fails, closed fails, never auto-open), then move the
//! player, mark the destination visited, and show the arrival view.

use anyhow::Result;
use log::info;

use crate::change::ActionResult;
use crate::command::Command;
use crate::engine::Engine;
use crate::ids::Direction;
use crate::location::ExitTarget;

use super::look::describe_location;
use super::{direct_item, respond};

pub const NO_EXIT: &str = "You can't go that way.";

/// GO and bare directions.
pub fn go(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(direction) = command.direction else {
        return respond("Which way?");
    };
    travel(engine, direction)
}

/// CLIMB: vertical movement when a direction came along; otherwise only
/// climbable scenery makes sense, and that means going up.
pub fn climb(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    if let Some(direction) = command.direction {
        return travel(engine, direction);
    }
    if let Some(item) = direct_item(engine, command) {
        if item.flag(crate::item::ItemFlag::Climbable) {
            return travel(engine, Direction::Up);
        }
        return respond(format!("You can't climb {}.", item.with_definite_article()));
    }
    respond("There's nothing here to climb.")
}

/// Shared traversal used by GO, CLIMB, and content hooks.
pub fn travel(engine: &Engine, direction: Direction) -> Result<Option<ActionResult>> {
    let here = engine.here()?;
    let Some(exit) = here.exit(direction) else {
        return respond(NO_EXIT);
    };

    let destination = match &exit.target {
        ExitTarget::Blocked(message) => return respond(message.clone()),
        ExitTarget::To(destination) => destination.clone(),
    };

    if let Some(door_id) = &exit.door {
        let door = engine.item(door_id)?;
        if door.is_locked() {
            return respond(format!("The {} is locked.", door.name()));
        }
        if !door.is_open() {
            return respond(format!("The {} is closed.", door.name()));
        }
    }

    info!("player travels {direction} to '{destination}'");
    let destination_view = engine.location(&destination)?;
    let (text, mut changes) = describe_location(engine, &destination, false)?;
    let mut all = Vec::new();
    all.extend(engine.player().set_location(&destination));
    all.extend(destination_view.set_visited());
    all.append(&mut changes);
    Ok(Some(ActionResult::with_changes(text, all)))
}
