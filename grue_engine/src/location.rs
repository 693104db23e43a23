//! Location records, exits, and their property keys.
//!
//! A location is any place the player can occupy. Exits are an ordered map
//! from direction to destination; a destination may instead be a standing
//! refusal message, and either form may be gated by a door item.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::ids::{Direction, ItemId, LocationId, StateValue};

/// Where an exit leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitTarget {
    To(LocationId),
    /// Permanently impassable; the message explains why.
    Blocked(String),
}

/// One edge out of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub target: ExitTarget,
    /// Door item that must be open to pass, if any.
    pub door: Option<ItemId>,
}

impl Exit {
    pub fn to(destination: impl Into<LocationId>) -> Self {
        Self {
            target: ExitTarget::To(destination.into()),
            door: None,
        }
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self {
            target: ExitTarget::Blocked(message.into()),
            door: None,
        }
    }

    pub fn through_door(destination: impl Into<LocationId>, door: impl Into<ItemId>) -> Self {
        Self {
            target: ExitTarget::To(destination.into()),
            door: Some(door.into()),
        }
    }

    pub fn destination(&self) -> Option<&LocationId> {
        match &self.target {
            ExitTarget::To(id) => Some(id),
            ExitTarget::Blocked(_) => None,
        }
    }
}

/// Property keys addressable on a location through the change model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationProp {
    Description,
    InherentlyLit,
    IsVisited,
    OmitArticle,
    Custom(String),
}

/// A named place the player can occupy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    /// Lit without any light source present (outdoors, most above-ground rooms).
    pub inherently_lit: bool,
    pub visited: bool,
    pub omit_article: bool,
    /// Ordered so exit listings and daemon adjacency scans are deterministic.
    pub exits: BTreeMap<Direction, Exit>,
    /// Scenery items addressable from this location without being in it.
    pub local_globals: Vec<ItemId>,
    pub props: HashMap<String, StateValue>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            id: LocationId::new(""),
            name: String::new(),
            description: None,
            inherently_lit: true,
            visited: false,
            omit_article: false,
            exits: BTreeMap::new(),
            local_globals: Vec::new(),
            props: HashMap::new(),
        }
    }
}

impl Location {
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.get(&direction)
    }

    /// Destinations reachable in one move, in direction order.
    pub fn neighbors(&self) -> impl Iterator<Item = &LocationId> {
        self.exits.values().filter_map(Exit::destination)
    }
}
