//! Flavor-text spinners.
//!
//! Short randomized pools keep engine responses from getting repetitive.
//! Anything a test transcript asserts on goes through the engine's seeded
//! RNG instead; spinners are for unasserted variety only.

use std::collections::HashMap;

use gametools::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

/// The engine-message pools the runtime draws from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinnerKind {
    /// "read" on something with no inscription.
    BlankInscription,
    /// Verb not in the vocabulary.
    UnknownVerb,
    /// Command parsed but referenced nothing nearby.
    NothingHere,
    /// A wasted turn ("wait", pushing scenery, ...).
    NoEffect,
}

/// Build the default pools. Worlds may replace any entry at boot.
pub fn default_spinners() -> HashMap<SpinnerKind, Spinner<String>> {
    let mut spinners = HashMap::new();
    spinners.insert(
        SpinnerKind::BlankInscription,
        pool(&[
            "There's nothing written on it.",
            "It is unadorned by any inscription.",
            "You find no writing of any kind.",
        ]),
    );
    spinners.insert(
        SpinnerKind::UnknownVerb,
        pool(&[
            "That's not a verb I recognize.",
            "I don't know the word that starts your command.",
            "That sentence began in a way I can't follow.",
        ]),
    );
    spinners.insert(
        SpinnerKind::NothingHere,
        pool(&[
            "You can't see any such thing.",
            "There's nothing like that here.",
            "No such thing is within reach.",
        ]),
    );
    spinners.insert(
        SpinnerKind::NoEffect,
        pool(&[
            "Nothing happens.",
            "Time passes.",
            "Nothing obvious comes of that.",
        ]),
    );
    spinners
}

fn pool(lines: &[&str]) -> Spinner<String> {
    Spinner::new(lines.iter().map(|line| Wedge::new((*line).to_string())).collect())
}

/// Spin a pool, falling back to a fixed default when it is missing or empty.
pub fn spin(
    spinners: &HashMap<SpinnerKind, Spinner<String>>,
    kind: SpinnerKind,
    default: &'static str,
) -> String {
    spinners
        .get(&kind)
        .and_then(gametools::Spinner::spin)
        .unwrap_or_else(|| default.to_string())
}
