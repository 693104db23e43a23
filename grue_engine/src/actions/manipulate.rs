//! Item manipulation: take, drop, put, open, close, lock, unlock, read,
//! pushing things around, and breaking things.

use anyhow::Result;

use crate::change::ActionResult;
use crate::command::Command;
use crate::engine::Engine;
use crate::item::{ItemFlag, ParentEntity};
use crate::vocab::Preposition;

use super::{direct_item, indirect_item, refuse_universal, respond};

/// TAKE.
pub fn take(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    if let Some(refusal) = refuse_universal(command) {
        return respond(refusal);
    }
    let Some(item) = direct_item(engine, command) else {
        return respond("Take what?");
    };
    if item.player_is_holding() {
        return respond("You already have that.");
    }
    if !item.is_takable() {
        return respond(format!("You can't take {}.", item.with_definite_article()));
    }
    if !item.player_can_reach() {
        return respond(format!("You can't reach {}.", item.with_definite_article()));
    }
    if !item.player_can_carry() {
        return respond("Your load is too heavy.");
    }
    let result = ActionResult::message("Taken.").then_maybe([
        item.move_to(ParentEntity::Player),
        item.set_flag(ItemFlag::Touched),
    ]);
    Ok(Some(result))
}

/// DROP.
pub fn drop(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Drop what?");
    };
    if !item.player_is_holding() {
        return respond("You're not carrying that.");
    }
    let here = engine.state().player.location.clone();
    let result = ActionResult::message("Dropped.").then_maybe([item.move_to(ParentEntity::Location(here))]);
    Ok(Some(result))
}

/// PUT X IN/ON Y.
pub fn put(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Put what where?");
    };
    let Some(target) = indirect_item(engine, command) else {
        return respond(format!("Put {} where?", item.with_definite_article()));
    };
    if item.id() == target.id() {
        return respond("You can't put something inside itself.");
    }
    if !item.player_is_holding() {
        return respond(format!(
            "You need to be holding {} first.",
            item.with_definite_article()
        ));
    }
    let on_surface = command.preposition == Some(Preposition::On);
    if on_surface && !target.flag(ItemFlag::Surface) {
        return respond(format!(
            "You can't put anything on {}.",
            target.with_definite_article()
        ));
    }
    if !on_surface {
        if !target.is_container() {
            return respond(format!("{} can't contain things.", target.with_definite_article()));
        }
        if !target.is_open() {
            return respond(format!("The {} is closed.", target.name()));
        }
    }
    if !target.can_hold(&item) {
        return respond(format!("There's no room in {}.", target.with_definite_article()));
    }
    let result = ActionResult::message("Done.")
        .then_maybe([item.move_to(ParentEntity::Item(target.id().clone()))]);
    Ok(Some(result))
}

/// OPEN.
pub fn open(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Open what?");
    };
    if !item.flag(ItemFlag::Openable) {
        return respond(format!("You can't open {}.", item.with_definite_article()));
    }
    if item.is_locked() {
        return respond("It seems to be locked.");
    }
    if item.is_open() {
        return respond("It's already open.");
    }
    // reveal contents the moment the lid comes up
    let contents = item.contents();
    let message = if item.is_container() && !contents.is_empty() {
        let names: Vec<String> = contents
            .iter()
            .filter_map(|id| engine.item(id).ok())
            .filter(|i| !i.flag(ItemFlag::Invisible))
            .map(|i| i.with_indefinite_article())
            .collect();
        if names.is_empty() {
            "Opened.".to_string()
        } else {
            format!("Opening the {} reveals {}.", item.name(), join_names(&names))
        }
    } else {
        "Opened.".to_string()
    };
    let result = ActionResult::message(message).then_maybe([item.set_flag(ItemFlag::Open)]);
    Ok(Some(result))
}

/// CLOSE.
pub fn close(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Close what?");
    };
    if !item.flag(ItemFlag::Openable) {
        return respond(format!("You can't close {}.", item.with_definite_article()));
    }
    if !item.is_open() {
        return respond("It's already closed.");
    }
    let result = ActionResult::message("Closed.").then_maybe([item.clear_flag(ItemFlag::Open)]);
    Ok(Some(result))
}

/// UNLOCK X WITH K.
pub fn unlock(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Unlock what?");
    };
    if !item.flag(ItemFlag::Lockable) {
        return respond(format!("{} has no lock.", item.with_definite_article()));
    }
    if !item.is_locked() {
        return respond("It's already unlocked.");
    }
    let Some(key) = indirect_item(engine, command) else {
        return respond("You need something to unlock it with.");
    };
    if item.lock_key().as_ref() != Some(key.id()) {
        return respond(format!("The {} doesn't fit.", key.name()));
    }
    if !key.player_is_holding() {
        return respond(format!("You're not holding {}.", key.with_definite_article()));
    }
    let result = ActionResult::message(format!("The {} is now unlocked.", item.name()))
        .then_maybe([item.clear_flag(ItemFlag::Locked)]);
    Ok(Some(result))
}

/// LOCK X WITH K.
pub fn lock(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Lock what?");
    };
    if !item.flag(ItemFlag::Lockable) {
        return respond(format!("{} has no lock.", item.with_definite_article()));
    }
    if item.is_locked() {
        return respond("It's already locked.");
    }
    if item.is_open() {
        return respond("You'll have to close it first.");
    }
    let Some(key) = indirect_item(engine, command) else {
        return respond("You need something to lock it with.");
    };
    if item.lock_key().as_ref() != Some(key.id()) {
        return respond(format!("The {} doesn't fit.", key.name()));
    }
    let result = ActionResult::message(format!("The {} is now locked.", item.name()))
        .then_maybe([item.set_flag(ItemFlag::Locked)]);
    Ok(Some(result))
}

/// READ.
pub fn read(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Read what?");
    };
    if !engine.here()?.is_lit() {
        return respond("It's too dark to read.");
    }
    let text = if item.player_is_holding() {
        item.read_while_held_text().unwrap_or_else(|| item.read_text())
    } else {
        item.read_text()
    };
    let result = ActionResult::message(text).then_maybe([item.set_flag(ItemFlag::Touched)]);
    Ok(Some(result))
}

/// PUSH / PULL / MOVE aimed at an object. Content hooks give these verbs
/// their interesting outcomes; the default accomplishes nothing.
pub fn shove(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    if let Some(refusal) = refuse_universal(command) {
        return respond(refusal);
    }
    let Some(item) = direct_item(engine, command) else {
        return respond(format!("{} what?", capitalize(&command.verb)));
    };
    if item.is_takable() {
        return respond(format!(
            "Moving {} reveals nothing.",
            item.with_definite_article()
        ));
    }
    respond(format!("{} won't budge.", capitalize(&item.with_definite_article())))
}

/// BREAK and friends. Characters defer to the attack intent.
pub fn mung(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return Ok(None);
    };
    if item.sheet().is_some() {
        // let the attack intent pick this up
        return Ok(None);
    }
    respond(format!(
        "Trying to destroy {} is futile.",
        item.with_definite_article()
    ))
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., tail] => format!("{} and {tail}", head.join(", ")),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
