//! Typed identifiers and the tagged value sum.
//!
//! Every entity kind gets its own id newtype so a location id can never be
//! handed to an item lookup. Ids are author-stable symbols assigned at world
//! boot and never reused within a kind.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use variantly::Variantly;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(symbol: impl Into<String>) -> Self {
                Self(symbol.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
        impl From<&str> for $name {
            fn from(symbol: &str) -> Self {
                Self(symbol.to_string())
            }
        }
    };
}

define_id!(
    /// Stable id of an [`crate::item::Item`].
    ItemId
);
define_id!(
    /// Stable id of a [`crate::location::Location`].
    LocationId
);
define_id!(
    /// Stable id of a registered daemon or fuse.
    DaemonId
);
define_id!(
    /// Key into the world-level global store.
    GlobalId
);

/// Compass and spatial directions recognized by the movement verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
    Inside,
    Outside,
    Land,
}

impl Direction {
    /// Map one lowercase input token to a direction, accepting the usual
    /// abbreviations ("n", "ne", "u", "in", ...).
    pub fn from_token(token: &str) -> Option<Direction> {
        use Direction::*;
        let dir = match token {
            "north" | "n" => North,
            "south" | "s" => South,
            "east" | "e" => East,
            "west" | "w" => West,
            "northeast" | "ne" => Northeast,
            "northwest" | "nw" => Northwest,
            "southeast" | "se" => Southeast,
            "southwest" | "sw" => Southwest,
            "up" | "u" | "upward" => Up,
            "down" | "d" | "downward" => Down,
            "in" | "inside" | "enter" => Inside,
            "out" | "outside" | "exit" => Outside,
            "land" => Land,
            _ => return None,
        };
        Some(dir)
    }

    /// The reverse direction, where one exists (Land has no opposite).
    pub fn opposite(self) -> Option<Direction> {
        use Direction::*;
        let opp = match self {
            North => South,
            South => North,
            East => West,
            West => East,
            Northeast => Southwest,
            Southwest => Northeast,
            Northwest => Southeast,
            Southeast => Northwest,
            Up => Down,
            Down => Up,
            Inside => Outside,
            Outside => Inside,
            Land => return None,
        };
        Some(opp)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Inside => "in",
            Direction::Outside => "out",
            Direction::Land => "land",
        };
        write!(f, "{name}")
    }
}

/// A dynamically-typed world value.
///
/// Used for property bags, the global store, and the property-computer
/// protocol. Serializes as an externally-tagged union so change histories
/// read back unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Item(ItemId),
    Location(LocationId),
    /// Opaque structured payload for content that needs more than a scalar.
    Blob(serde_json::Value),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StateValue::Int(n) => Some(*n),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_item(&self) -> Option<&ItemId> {
        match self {
            StateValue::Item(id) => Some(id),
            _ => None,
        }
    }
    pub fn as_location(&self) -> Option<&LocationId> {
        match self {
            StateValue::Location(id) => Some(id),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        StateValue::Bool(b)
    }
}
impl From<i64> for StateValue {
    fn from(n: i64) -> Self {
        StateValue::Int(n)
    }
}
impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::Text(s.to_string())
    }
}
impl From<String> for StateValue {
    fn from(s: String) -> Self {
        StateValue::Text(s)
    }
}
