//! Look and examine.
//!
//! The location description pipeline: name, body text, then a listing of
//! visible items. First-time items use their first description and get
//! marked touched; afterwards the short description or a generic line.
//! In darkness nothing is listed and the grue looms.

use anyhow::Result;

use crate::change::{ActionResult, StateChange};
use crate::command::{Command, EntityRef};
use crate::engine::Engine;
use crate::ids::LocationId;
use crate::item::ItemFlag;
use crate::proxy::ItemProxy;

use super::{direct_item, respond};

pub const PITCH_BLACK: &str = "It is pitch black. You are likely to be eaten by a grue.";

/// The full room view for LOOK and for arrival after movement.
///
/// Returns the text plus the touched-marking changes for items described
/// for the first time. `assume_lit` lets a light-toggle handler render the
/// room it is about to illuminate.
pub fn describe_location(
    engine: &Engine,
    location: &LocationId,
    assume_lit: bool,
) -> Result<(String, Vec<StateChange>)> {
    let loc = engine.location(location)?;
    if !assume_lit && !loc.is_lit() {
        return Ok((PITCH_BLACK.to_string(), Vec::new()));
    }

    let mut paragraphs = vec![loc.name()];
    if let Some(body) = loc.description() {
        paragraphs.push(body);
    }

    let mut changes = Vec::new();
    for id in loc.contents() {
        let Ok(item) = engine.item(&id) else { continue };
        if item.flag(ItemFlag::Invisible) || !item.should_describe() {
            continue;
        }
        if let Some(line) = describe_item_in_room(engine, &item, &mut changes) {
            paragraphs.push(line);
        }
    }
    Ok((paragraphs.join("\n"), changes))
}

/// One listing entry for an item sitting in the room, including the
/// contents block for showing containers.
fn describe_item_in_room(
    engine: &Engine,
    item: &ItemProxy<'_>,
    changes: &mut Vec<StateChange>,
) -> Option<String> {
    let mut line = if !item.flag(ItemFlag::Touched)
        && let Some(first) = item.first_description()
    {
        changes.extend(item.set_flag(ItemFlag::Touched));
        first
    } else if let Some(short) = item.short_description() {
        short
    } else {
        format!("There is {} here.", item.with_indefinite_article())
    };

    if item.contents_are_visible() {
        let contents = item.contents();
        if !contents.is_empty() {
            line.push_str(&format!("\n{}", contents_block(engine, item, 0)));
        }
    }
    Some(line)
}

/// "The X contains:" block, recursing through showing containers with
/// two-space indentation per level.
fn contents_block(engine: &Engine, container: &ItemProxy<'_>, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut lines = vec![format!("{indent}The {} contains:", container.name())];
    for id in container.contents() {
        let Ok(item) = engine.item(&id) else { continue };
        if item.flag(ItemFlag::Invisible) {
            continue;
        }
        lines.push(format!("{indent}  {}", capitalized(&item.with_indefinite_article())));
        if item.contents_are_visible() && !item.contents().is_empty() {
            lines.push(contents_block(engine, &item, depth + 1));
        }
    }
    lines.join("\n")
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// LOOK with no object.
pub fn look_around(engine: &Engine) -> Result<Option<ActionResult>> {
    let here = engine.state().player.location.clone();
    let (text, changes) = describe_location(engine, &here, false)?;
    Ok(Some(ActionResult::with_changes(text, changes)))
}

/// EXAMINE (and LOOK AT).
pub fn examine(engine: &Engine, command: &Command) -> Result<Option<ActionResult>> {
    match &command.direct {
        None => respond("Examine what?"),
        Some(EntityRef::Player) => respond("You look about as good as ever."),
        Some(EntityRef::Universal(universal)) => {
            respond(format!("There's nothing special about the {}.", universal.name()))
        },
        Some(EntityRef::Location(_)) => look_around(engine),
        Some(EntityRef::Item(_)) => {
            let Some(item) = direct_item(engine, command) else {
                return respond("You can't see that here.");
            };
            if !engine.here()?.is_lit() {
                return respond("It's too dark to see anything.");
            }
            let mut text = item
                .description()
                .unwrap_or_else(|| format!("There's nothing special about {}.", item.with_definite_article()));
            if item.contents_are_visible() {
                let contents = item.contents();
                if contents.is_empty() {
                    if item.is_container() {
                        text.push_str(&format!("\nThe {} is empty.", item.name()));
                    }
                } else {
                    text.push_str(&format!("\n{}", contents_block(engine, &item, 0)));
                }
            } else if item.is_container() && !item.is_open() {
                text.push_str(&format!("\nThe {} is closed.", item.name()));
            }
            let mut result = ActionResult::message(text);
            result = result.then_maybe([item.set_flag(ItemFlag::Touched)]);
            Ok(Some(result))
        },
    }
}
