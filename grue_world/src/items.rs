//! Items, the player, and the initial globals.

use grue_engine::seed::ItemSeed;
use grue_engine::{
    CharacterSheet, GlobalId, Item, ItemFlag, LocationId, Player, StateValue,
};

use crate::ids;

pub fn all() -> Vec<Item> {
    vec![
        // --- around the house ------------------------------------------------
        ItemSeed::new(ids::MAILBOX, "small mailbox")
            .synonyms(&["box"])
            .adjectives(&["small"])
            .in_location(ids::WEST_OF_HOUSE)
            .flags(&[ItemFlag::Container, ItemFlag::Openable])
            .capacity(10)
            .build(),
        ItemSeed::new(ids::LEAFLET, "leaflet")
            .synonyms(&["pamphlet", "booklet", "mail"])
            .in_item(ids::MAILBOX)
            .flags(&[ItemFlag::Takable, ItemFlag::Readable])
            .size(2)
            .read_text(
                "WELCOME TO ZORK!\n\nZORK is a game of adventure, danger, and low cunning. In it you will explore some of the most amazing territory ever seen by mortals. No computer should be without one!",
            )
            .build(),
        ItemSeed::new(ids::MAT, "welcome mat")
            .synonyms(&["rubber", "doormat"])
            .adjectives(&["welcome"])
            .in_location(ids::WEST_OF_HOUSE)
            .flags(&[ItemFlag::Takable])
            .short_description("A rubber mat saying 'Welcome to Zork!' lies by the door.")
            .size(12)
            .build(),
        ItemSeed::new(ids::WHITE_HOUSE, "white house")
            .synonyms(&["house"])
            .adjectives(&["white", "beautiful", "colonial"])
            .description(
                "The house is a beautiful colonial house which is painted white. It is clear that the owners must have been extremely wealthy.",
            )
            .flags(&[ItemFlag::OmitDescription])
            .build(),
        ItemSeed::new(ids::KITCHEN_WINDOW, "kitchen window")
            .synonyms(&["window"])
            .adjectives(&["kitchen", "small"])
            .in_location(ids::EAST_OF_HOUSE)
            .flags(&[ItemFlag::Openable, ItemFlag::OmitDescription])
            .description("The window is slightly ajar, but not enough to allow entry.")
            .build(),
        // --- kitchen ---------------------------------------------------------
        ItemSeed::new(ids::SACK, "brown sack")
            .synonyms(&["bag"])
            .adjectives(&["brown", "elongated"])
            .in_location(ids::KITCHEN)
            .flags(&[ItemFlag::Container, ItemFlag::Openable, ItemFlag::Takable])
            .first_description("On the table is an elongated brown sack, smelling of hot peppers.")
            .capacity(9)
            .size(9)
            .build(),
        ItemSeed::new(ids::LUNCH, "lunch")
            .synonyms(&["food", "sandwich"])
            .adjectives(&["hot", "pepper"])
            .in_item(ids::SACK)
            .flags(&[ItemFlag::Takable, ItemFlag::Edible])
            .size(4)
            .build(),
        ItemSeed::new(ids::GARLIC, "clove of garlic")
            .synonyms(&["garlic", "clove"])
            .in_item(ids::SACK)
            .flags(&[ItemFlag::Takable, ItemFlag::Edible])
            .size(2)
            .build(),
        ItemSeed::new(ids::BOTTLE, "glass bottle")
            .synonyms(&["container"])
            .adjectives(&["glass", "clear"])
            .in_location(ids::KITCHEN)
            .flags(&[
                ItemFlag::Container,
                ItemFlag::Openable,
                ItemFlag::Transparent,
                ItemFlag::Takable,
            ])
            .first_description("A bottle is sitting on the table.")
            .capacity(4)
            .size(5)
            .build(),
        ItemSeed::new(ids::WATER, "quantity of water")
            .synonyms(&["water", "liquid", "h2o"])
            .in_item(ids::BOTTLE)
            .flags(&[ItemFlag::Takable, ItemFlag::Drinkable, ItemFlag::OmitArticle])
            .size(4)
            .build(),
        // --- living room -----------------------------------------------------
        ItemSeed::new(ids::RUG, "large oriental rug")
            .synonyms(&["carpet"])
            .adjectives(&["large", "oriental"])
            .in_location(ids::LIVING_ROOM)
            .flags(&[ItemFlag::OmitDescription])
            .description("The rug is extremely heavy and cannot be carried.")
            .build(),
        ItemSeed::new(ids::TRAP_DOOR, "trap door")
            .synonyms(&["door", "trapdoor", "cover"])
            .adjectives(&["trap", "dusty"])
            .in_location(ids::LIVING_ROOM)
            .flags(&[ItemFlag::Openable, ItemFlag::Invisible, ItemFlag::OmitDescription])
            .description("The trap door is closed.")
            .build(),
        ItemSeed::new(ids::SWORD, "elvish sword")
            .synonyms(&["blade", "orcrist", "glamdring"])
            .adjectives(&["elvish", "old"])
            .in_location(ids::LIVING_ROOM)
            .flags(&[ItemFlag::Takable, ItemFlag::Weapon])
            .first_description("Above the trophy case hangs an elvish sword of great antiquity.")
            .size(30)
            .damage(8)
            .build(),
        ItemSeed::new(ids::LANTERN, "brass lantern")
            .synonyms(&["lamp", "light"])
            .adjectives(&["brass", "battery-powered"])
            .in_location(ids::LIVING_ROOM)
            .flags(&[ItemFlag::Takable, ItemFlag::LightSource, ItemFlag::Device])
            .first_description("A battery-powered brass lantern is on the trophy case.")
            .short_description("There is a brass lantern (battery-powered) here.")
            .size(15)
            .build(),
        ItemSeed::new(ids::TROPHY_CASE, "trophy case")
            .synonyms(&["case"])
            .adjectives(&["trophy"])
            .in_location(ids::LIVING_ROOM)
            .flags(&[
                ItemFlag::Container,
                ItemFlag::Openable,
                ItemFlag::Transparent,
                ItemFlag::OmitDescription,
            ])
            .description("The trophy case is securely fastened to the wall.")
            .build(),
        // --- attic -----------------------------------------------------------
        ItemSeed::new(ids::ROPE, "large coil of rope")
            .synonyms(&["rope", "coil", "hemp"])
            .adjectives(&["large"])
            .in_location(ids::ATTIC)
            .flags(&[ItemFlag::Takable, ItemFlag::Tool])
            .first_description("A large coil of rope is lying in the corner.")
            .size(10)
            .build(),
        ItemSeed::new(ids::KNIFE, "nasty knife")
            .synonyms(&["blade"])
            .adjectives(&["nasty", "unrusty"])
            .in_location(ids::ATTIC)
            .flags(&[ItemFlag::Takable, ItemFlag::Weapon])
            .first_description("On a table is a nasty-looking knife.")
            .size(5)
            .damage(4)
            .build(),
        // --- underground -----------------------------------------------------
        ItemSeed::new(ids::TROLL, "troll")
            .synonyms(&["monster"])
            .adjectives(&["nasty", "pathetic"])
            .in_location(ids::TROLL_ROOM)
            .sheet(CharacterSheet {
                health: 12,
                max_health: 12,
                strength: 14,
                dexterity: 8,
                accuracy: 1,
                armor_class: 9,
                fighting: true,
                ..CharacterSheet::default()
            })
            .size(50)
            .build(),
        ItemSeed::new(ids::AXE, "bloody axe")
            .synonyms(&["ax"])
            .adjectives(&["bloody"])
            .in_item(ids::TROLL)
            .flags(&[ItemFlag::Weapon, ItemFlag::Takable, ItemFlag::OmitDescription])
            .size(25)
            .damage(6)
            .build(),
        ItemSeed::new(ids::THIEF, "thief")
            .synonyms(&["robber", "bandit", "crook", "individual"])
            .adjectives(&["shady", "suspicious", "seedy-looking"])
            .in_location(ids::EAST_WEST_PASSAGE)
            .sheet(CharacterSheet {
                health: 10,
                max_health: 10,
                strength: 10,
                dexterity: 16,
                accuracy: 2,
                armor_class: 11,
                ..CharacterSheet::default()
            })
            .valid_locations(&[
                ids::CELLAR,
                ids::TROLL_ROOM,
                ids::EAST_WEST_PASSAGE,
                ids::GRATING_ROOM,
            ])
            .size(50)
            .build(),
        ItemSeed::new(ids::STILETTO, "stiletto")
            .synonyms(&["knife"])
            .adjectives(&["vicious"])
            .in_item(ids::THIEF)
            .flags(&[ItemFlag::Weapon, ItemFlag::Takable, ItemFlag::OmitDescription])
            .size(4)
            .damage(4)
            .build(),
        ItemSeed::new(ids::LARGE_BAG, "large bag")
            .synonyms(&["sack"])
            .adjectives(&["large", "black"])
            .in_item(ids::THIEF)
            .flags(&[ItemFlag::Container, ItemFlag::OmitDescription])
            .description("The bag is made of heavy black cloth and bulges with pilfered goods.")
            .size(20)
            .build(),
        // --- the forest and clearing ----------------------------------------
        ItemSeed::new(ids::NEST, "bird's nest")
            .synonyms(&["nest"])
            .adjectives(&["birds", "small"])
            .in_location(ids::UP_A_TREE)
            .flags(&[ItemFlag::Container, ItemFlag::Open, ItemFlag::Takable])
            .first_description("Beside you on the branch is a small bird's nest.")
            .capacity(6)
            .size(8)
            .build(),
        ItemSeed::new(ids::EGG, "jewel-encrusted egg")
            .synonyms(&["egg", "treasure"])
            .adjectives(&["jeweled", "jewel-encrusted", "golden"])
            .in_item(ids::NEST)
            .flags(&[ItemFlag::Takable])
            .first_description(
                "In the bird's nest is a large egg encrusted with precious jewels, apparently scavenged by a childless songbird.",
            )
            .description(
                "The egg is covered with fine gold inlay, and ornamented in lapis lazuli and mother-of-pearl.",
            )
            .size(5)
            .value(5)
            .build(),
        ItemSeed::new(ids::LEAVES, "pile of leaves")
            .synonyms(&["leaves", "leaf", "pile"])
            .in_location(ids::GRATING_CLEARING)
            .flags(&[ItemFlag::Takable, ItemFlag::Flammable])
            .short_description("On the ground is a pile of leaves.")
            .size(25)
            .build(),
        ItemSeed::new(ids::GRATING, "grating")
            .synonyms(&["grate"])
            .in_location(ids::GRATING_CLEARING)
            .flags(&[
                ItemFlag::Openable,
                ItemFlag::Lockable,
                ItemFlag::Locked,
                ItemFlag::Invisible,
            ])
            .first_description("There is a grating securely fastened into the ground.")
            .build(),
    ]
}

/// The adventurer at the start of the game.
pub fn player() -> Player {
    Player {
        location: LocationId::new(ids::WEST_OF_HOUSE),
        sheet: CharacterSheet {
            health: 20,
            max_health: 20,
            strength: 12,
            dexterity: 12,
            accuracy: 2,
            armor_class: 10,
            ..CharacterSheet::default()
        },
        carrying_capacity: 100,
        ..Player::default()
    }
}

/// World-level toggles at boot.
pub fn globals() -> Vec<(GlobalId, StateValue)> {
    vec![
        (GlobalId::new(ids::RUG_MOVED), StateValue::Bool(false)),
        (GlobalId::new(ids::GRATING_REVEALED), StateValue::Bool(false)),
        (GlobalId::new(ids::SWORD_GLOW_LEVEL), StateValue::Int(0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treasures_carry_value() {
        let egg = all().into_iter().find(|i| i.id.as_str() == ids::EGG).unwrap();
        assert!(egg.value > 0);
    }

    #[test]
    fn the_troll_is_armed_and_hostile() {
        let items = all();
        let troll = items.iter().find(|i| i.id.as_str() == ids::TROLL).unwrap();
        let sheet = troll.sheet.as_ref().unwrap();
        assert!(sheet.fighting);
        let axe = items.iter().find(|i| i.id.as_str() == ids::AXE).unwrap();
        assert_eq!(
            axe.parent,
            grue_engine::ParentEntity::Item(grue_engine::ItemId::new(ids::TROLL))
        );
        assert!(axe.has(ItemFlag::OmitDescription));
    }

    #[test]
    fn the_grating_starts_hidden_and_locked() {
        let grating = all().into_iter().find(|i| i.id.as_str() == ids::GRATING).unwrap();
        assert!(grating.has(ItemFlag::Invisible));
        assert!(grating.has(ItemFlag::Locked));
    }
}
