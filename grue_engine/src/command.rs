//! Parsed command representation.

use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::ids::{Direction, ItemId, LocationId};
use crate::vocab::{Intent, Preposition};

/// Pseudo-objects that resolve in every location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Universal {
    Ground,
    Sky,
    Walls,
    Me,
}

impl Universal {
    pub fn from_token(token: &str) -> Option<Universal> {
        let uni = match token {
            "ground" | "floor" | "dirt" => Universal::Ground,
            "sky" | "air" | "ceiling" => Universal::Sky,
            "walls" | "wall" => Universal::Walls,
            "me" | "self" | "myself" => Universal::Me,
            _ => return None,
        };
        Some(uni)
    }

    pub fn name(self) -> &'static str {
        match self {
            Universal::Ground => "ground",
            Universal::Sky => "sky",
            Universal::Walls => "walls",
            Universal::Me => "yourself",
        }
    }
}

/// A resolved object slot in a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum EntityRef {
    Item(ItemId),
    Location(LocationId),
    Player,
    Universal(Universal),
}

impl EntityRef {
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            EntityRef::Item(id) => Some(id),
            _ => None,
        }
    }
}

/// One fully parsed player command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Canonical verb text ("take", "turn on", ...).
    pub verb: String,
    /// Candidate meanings, most specific first.
    pub intents: Vec<Intent>,
    pub direction: Option<Direction>,
    pub direct: Option<EntityRef>,
    pub preposition: Option<Preposition>,
    pub indirect: Option<EntityRef>,
    /// The post-stop-word tokens the command was parsed from.
    pub raw_tokens: Vec<String>,
}

impl Command {
    /// A bare movement command.
    pub fn movement(direction: Direction, raw_tokens: Vec<String>) -> Self {
        Self {
            verb: "go".into(),
            intents: vec![Intent::Move],
            direction: Some(direction),
            direct: None,
            preposition: None,
            indirect: None,
            raw_tokens,
        }
    }

    pub fn has_intent(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }

    /// First (most specific) intent.
    pub fn primary_intent(&self) -> Option<Intent> {
        self.intents.first().copied()
    }

    pub fn direct_item(&self) -> Option<&ItemId> {
        self.direct.as_ref().and_then(EntityRef::item_id)
    }

    pub fn indirect_item(&self) -> Option<&ItemId> {
        self.indirect.as_ref().and_then(EntityRef::item_id)
    }

    /// The canonical phrasing this command re-parses from: verb followed by
    /// its raw tokens minus the verb tokens themselves.
    pub fn reserialize(&self) -> String {
        self.raw_tokens.join(" ")
    }
}
