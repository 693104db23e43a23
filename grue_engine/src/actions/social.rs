//! Social verbs: give, tell, ask, listen. The defaults are polite
//! refusals; content hooks implement actual conversations and trades.

use anyhow::Result;

use crate::change::ActionResult;
use crate::command::Command;
use crate::engine::Engine;

use super::{direct_item, indirect_item, respond};

/// GIVE X TO Y.
pub fn give(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    let Some(item) = direct_item(engine, command) else {
        return respond("Give what to whom?");
    };
    let Some(recipient) = indirect_item(engine, command) else {
        return respond(format!("Give {} to whom?", item.with_definite_article()));
    };
    if !item.player_is_holding() {
        return respond("You're not holding that.");
    }
    if recipient.sheet().is_none() || !recipient.is_alive() {
        return respond(format!(
            "The {} shows no interest in your offer.",
            recipient.name()
        ));
    }
    // accepting hooks are content-side; the default is a polite decline
    respond(format!("The {} refuses your offer.", recipient.name()))
}

/// TELL X ABOUT Y.
pub fn tell(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    chat(engine, command, "Telling")
}

/// ASK X ABOUT Y.
pub fn ask(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    chat(engine, command, "Asking")
}

fn chat(engine: &Engine, command: &Command, gerund: &str) -> Result<Option<ActionResult>> {
    let Some(target) = direct_item(engine, command) else {
        return respond("Talk to whom?");
    };
    if target.sheet().is_none() {
        return respond(format!("You can't talk to {}.", target.with_definite_article()));
    }
    if !target.is_alive() {
        return respond(format!("The {} is past conversation.", target.name()));
    }
    respond(format!(
        "{gerund} the {} accomplishes nothing; it ignores you.",
        target.name()
    ))
}

/// LISTEN.
pub fn listen(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    if let Some(target) = direct_item(engine, command) {
        if target.sheet().is_some() && target.is_alive() {
            return respond(format!("The {} has nothing to say.", target.name()));
        }
        return respond(format!("The {} makes no sound.", target.name()));
    }
    respond("You hear nothing unexpected.")
}
