//! Locations of the surface and the first stretch underground.

use grue_engine::seed::LocationSeed;
use grue_engine::{Direction, Exit, Location};

use crate::ids;

pub fn all() -> Vec<Location> {
    vec![
        LocationSeed::new(ids::WEST_OF_HOUSE, "West of House")
            .description(
                "You are standing in an open field west of a white house, with a boarded front door.",
            )
            .exit(Direction::North, Exit::to(ids::NORTH_OF_HOUSE))
            .exit(Direction::South, Exit::to(ids::SOUTH_OF_HOUSE))
            .exit(
                Direction::East,
                Exit::blocked("The door is boarded and you can't remove the boards."),
            )
            .local_global(ids::WHITE_HOUSE)
            .build(),
        LocationSeed::new(ids::NORTH_OF_HOUSE, "North of House")
            .description(
                "You are facing the north side of a white house. There is no door here, and all the windows are boarded up. To the north a narrow path winds through the trees.",
            )
            .exit(Direction::West, Exit::to(ids::WEST_OF_HOUSE))
            .exit(Direction::East, Exit::to(ids::EAST_OF_HOUSE))
            .exit(Direction::North, Exit::to(ids::FOREST_PATH))
            .local_global(ids::WHITE_HOUSE)
            .build(),
        LocationSeed::new(ids::SOUTH_OF_HOUSE, "South of House")
            .description(
                "You are facing the south side of a white house. There is no door here, and all the windows are boarded.",
            )
            .exit(Direction::West, Exit::to(ids::WEST_OF_HOUSE))
            .exit(Direction::East, Exit::to(ids::EAST_OF_HOUSE))
            .local_global(ids::WHITE_HOUSE)
            .build(),
        LocationSeed::new(ids::EAST_OF_HOUSE, "Behind House")
            .description(
                "You are behind the white house. A path leads into the forest to the east. In one corner of the house there is a small window which is slightly ajar.",
            )
            .exit(Direction::North, Exit::to(ids::NORTH_OF_HOUSE))
            .exit(Direction::South, Exit::to(ids::SOUTH_OF_HOUSE))
            .exit(Direction::East, Exit::to(ids::GRATING_CLEARING))
            .exit(
                Direction::West,
                Exit::through_door(ids::KITCHEN, ids::KITCHEN_WINDOW),
            )
            .exit(
                Direction::Inside,
                Exit::through_door(ids::KITCHEN, ids::KITCHEN_WINDOW),
            )
            .local_global(ids::WHITE_HOUSE)
            .build(),
        LocationSeed::new(ids::KITCHEN, "Kitchen")
            .description(
                "You are in the kitchen of the white house. A table seems to have been used recently for the preparation of food. A passage leads to the west and a dark staircase can be seen leading upward. To the east is a small window which is open.",
            )
            .exit(
                Direction::East,
                Exit::through_door(ids::EAST_OF_HOUSE, ids::KITCHEN_WINDOW),
            )
            .exit(Direction::West, Exit::to(ids::LIVING_ROOM))
            .exit(Direction::Up, Exit::to(ids::ATTIC))
            .local_global(ids::KITCHEN_WINDOW)
            .build(),
        LocationSeed::new(ids::LIVING_ROOM, "Living Room")
            .description(
                "You are in the living room. There is a doorway to the east, a wooden door with strange gothic lettering to the west, which appears to be nailed shut, and a large oriental rug in the center of the room.",
            )
            .exit(Direction::East, Exit::to(ids::KITCHEN))
            .exit(
                Direction::West,
                Exit::blocked("The door is nailed shut."),
            )
            .exit(
                Direction::Down,
                Exit::through_door(ids::CELLAR, ids::TRAP_DOOR),
            )
            .build(),
        LocationSeed::new(ids::ATTIC, "Attic")
            .description("This is the attic. The only exit is a stairway leading down.")
            .dark()
            .exit(Direction::Down, Exit::to(ids::KITCHEN))
            .build(),
        LocationSeed::new(ids::CELLAR, "Cellar")
            .description(
                "You are in a dark and damp cellar with a narrow passageway leading north, and a crawlway to the south. On the west is the bottom of a steep metal ramp which is unclimbable.",
            )
            .dark()
            .exit(
                Direction::Up,
                Exit::through_door(ids::LIVING_ROOM, ids::TRAP_DOOR),
            )
            .exit(Direction::North, Exit::to(ids::TROLL_ROOM))
            .build(),
        LocationSeed::new(ids::TROLL_ROOM, "The Troll Room")
            .description(
                "This is a small room with passages to the east and south and a forbidding hole leading west. Bloodstains and deep scratches (perhaps made by an axe) mar the walls.",
            )
            .dark()
            .exit(Direction::South, Exit::to(ids::CELLAR))
            .exit(Direction::East, Exit::to(ids::EAST_WEST_PASSAGE))
            .build(),
        LocationSeed::new(ids::EAST_WEST_PASSAGE, "East-West Passage")
            .description(
                "This is a narrow east-west passageway. There is a narrow stairway leading down at the north end of the room.",
            )
            .dark()
            .exit(Direction::West, Exit::to(ids::TROLL_ROOM))
            .build(),
        LocationSeed::new(ids::FOREST_PATH, "Forest Path")
            .description(
                "This is a path winding through a dimly lit forest. The path heads north-south here. One particularly large tree with some low branches stands at the edge of the path.",
            )
            .exit(Direction::South, Exit::to(ids::NORTH_OF_HOUSE))
            .exit(Direction::North, Exit::to(ids::GRATING_CLEARING))
            .exit(Direction::Up, Exit::to(ids::UP_A_TREE))
            .build(),
        LocationSeed::new(ids::UP_A_TREE, "Up a Tree")
            .description(
                "You are about 10 feet above the ground nestled among some large branches. The nearest branch above you is above your reach.",
            )
            .exit(Direction::Down, Exit::to(ids::FOREST_PATH))
            .build(),
        LocationSeed::new(ids::GRATING_CLEARING, "Clearing")
            .description("You are in a clearing, with a forest surrounding you on all sides. A path leads south.")
            .exit(Direction::South, Exit::to(ids::EAST_OF_HOUSE))
            .exit(Direction::West, Exit::to(ids::FOREST_PATH))
            .exit(
                Direction::Down,
                Exit::through_door(ids::GRATING_ROOM, ids::GRATING),
            )
            .build(),
        LocationSeed::new(ids::GRATING_ROOM, "Grating Room")
            .description(
                "You are in a small room near the maze. There are twisty passages in the immediate vicinity. Above you is a grating.",
            )
            .dark()
            .exit(
                Direction::Up,
                Exit::through_door(ids::GRATING_CLEARING, ids::GRATING),
            )
            .build(),
    ]
}
