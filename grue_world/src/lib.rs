#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! ** grue_world **
//!
//! The opening stretch of the Great Underground Empire, declared as seed
//! data for `grue_engine`: the white house and its surroundings, the
//! cellar and troll room below, the thief, and the machinery that makes
//! them behave — hooks, property computers, daemons, and combat systems.

pub mod combat;
pub mod daemons;
pub mod hooks;
pub mod items;
pub mod rooms;

use grue_engine::WorldDef;

/// Well-known identifiers, shared between declarations and tests.
pub mod ids {
    // locations
    pub const WEST_OF_HOUSE: &str = "west_of_house";
    pub const NORTH_OF_HOUSE: &str = "north_of_house";
    pub const SOUTH_OF_HOUSE: &str = "south_of_house";
    pub const EAST_OF_HOUSE: &str = "east_of_house";
    pub const KITCHEN: &str = "kitchen";
    pub const LIVING_ROOM: &str = "living_room";
    pub const ATTIC: &str = "attic";
    pub const CELLAR: &str = "cellar";
    pub const TROLL_ROOM: &str = "troll_room";
    pub const EAST_WEST_PASSAGE: &str = "east_west_passage";
    pub const FOREST_PATH: &str = "forest_path";
    pub const UP_A_TREE: &str = "up_a_tree";
    pub const GRATING_CLEARING: &str = "grating_clearing";
    pub const GRATING_ROOM: &str = "grating_room";

    // items
    pub const MAILBOX: &str = "mailbox";
    pub const LEAFLET: &str = "leaflet";
    pub const MAT: &str = "mat";
    pub const WHITE_HOUSE: &str = "white_house";
    pub const KITCHEN_WINDOW: &str = "kitchen_window";
    pub const SACK: &str = "sack";
    pub const LUNCH: &str = "lunch";
    pub const GARLIC: &str = "garlic";
    pub const BOTTLE: &str = "bottle";
    pub const WATER: &str = "water";
    pub const RUG: &str = "rug";
    pub const TRAP_DOOR: &str = "trap_door";
    pub const SWORD: &str = "sword";
    pub const LANTERN: &str = "lantern";
    pub const TROPHY_CASE: &str = "trophy_case";
    pub const TROLL: &str = "troll";
    pub const AXE: &str = "axe";
    pub const LEAVES: &str = "leaves";
    pub const GRATING: &str = "grating";
    pub const NEST: &str = "nest";
    pub const EGG: &str = "egg";
    pub const ROPE: &str = "rope";
    pub const KNIFE: &str = "knife";
    pub const THIEF: &str = "thief";
    pub const STILETTO: &str = "stiletto";
    pub const LARGE_BAG: &str = "large_bag";

    // daemons
    pub const SWORD_GLOW_DAEMON: &str = "sword_glow";
    pub const THIEF_DAEMON: &str = "thief";
    pub const COMBAT_DAEMON: &str = "combat";

    // globals
    pub const RUG_MOVED: &str = "rug_moved";
    pub const GRATING_REVEALED: &str = "grating_revealed";
    pub const SWORD_GLOW_LEVEL: &str = "sword_glow_level";
}

/// Assemble the complete world declaration.
pub fn world() -> WorldDef {
    let mut def = WorldDef::default();
    def.seed.locations = rooms::all();
    def.seed.items = items::all();
    def.seed.player = items::player();
    def.seed.globals = items::globals();
    hooks::register(&mut def);
    daemons::register(&mut def);
    combat::register(&mut def);
    def
}
