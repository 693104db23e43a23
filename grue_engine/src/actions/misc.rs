//! Inventory and waiting.

use anyhow::Result;

use crate::change::ActionResult;
use crate::engine::Engine;
use crate::spinners::SpinnerKind;

use super::respond;

/// INVENTORY.
pub fn inventory(engine: &Engine) -> Result<Option<ActionResult>> {
    let held = engine.player().inventory();
    if held.is_empty() {
        return respond("You are empty-handed.");
    }
    let mut lines = vec!["You are carrying:".to_string()];
    for id in held {
        let Ok(item) = engine.item(&id) else { continue };
        lines.push(format!("  {}", capitalized(&item.with_indefinite_article())));
        if item.contents_are_visible() {
            for inner in item.contents() {
                if let Ok(inner) = engine.item(&inner) {
                    lines.push(format!("    {}", capitalized(&inner.with_indefinite_article())));
                }
            }
        }
    }
    respond(lines.join("\n"))
}

/// WAIT.
pub fn wait(engine: &Engine) -> Result<Option<ActionResult>> {
    respond(engine.spin(SpinnerKind::NoEffect, "Time passes."))
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
