//! The canonical end-to-end transcripts, replayed against the real world
//! with a fixed RNG seed.

use grue_engine::sheet::Consciousness;
use grue_engine::{
    Engine, ItemFlag, ItemId, LocationId, ParentEntity, PlayerProp, StateChange, StateValue,
};
use grue_world::ids;

const SEED: u64 = 20_260_801;

fn boot() -> Engine {
    Engine::boot(grue_world::world(), SEED).expect("the world should boot")
}

fn teleport(engine: &mut Engine, location: &str) {
    engine
        .commit_batch(&[StateChange::SetPlayerProperty {
            prop: PlayerProp::Location,
            value: StateValue::Location(LocationId::new(location)),
        }])
        .expect("teleport should commit");
}

fn grab(engine: &mut Engine, item: &str) {
    engine
        .commit_batch(&[StateChange::MoveItem {
            item: ItemId::new(item),
            to: ParentEntity::Player,
        }])
        .expect("grab should commit");
}

fn item_parent(engine: &Engine, item: &str) -> ParentEntity {
    engine.state().item(&ItemId::new(item)).unwrap().parent.clone()
}

#[test]
fn take_and_examine_the_leaflet() {
    let mut engine = boot();
    assert_eq!(engine.state().player.location, LocationId::new(ids::WEST_OF_HOUSE));

    let report = engine.perform("open mailbox");
    assert!(report.output().contains("reveals a leaflet"));

    let report = engine.perform("take leaflet");
    assert_eq!(report.output(), "Taken.");

    let report = engine.perform("read leaflet");
    assert!(report.output().contains("WELCOME TO ZORK!"));

    let leaflet = engine.state().item(&ItemId::new(ids::LEAFLET)).unwrap();
    assert_eq!(leaflet.parent, ParentEntity::Player);
    assert!(leaflet.has(ItemFlag::Touched));
}

#[test]
fn open_kitchen_window_and_enter() {
    let mut engine = boot();
    teleport(&mut engine, ids::EAST_OF_HOUSE);

    let report = engine.perform("open window");
    assert_eq!(
        report.output(),
        "With great effort, you open the window far enough to allow entry."
    );

    let report = engine.perform("west");
    assert!(report.output().contains("Kitchen"));
    assert_eq!(engine.state().player.location, LocationId::new(ids::KITCHEN));
}

#[test]
fn closed_window_blocks_entry() {
    let mut engine = boot();
    teleport(&mut engine, ids::EAST_OF_HOUSE);
    let report = engine.perform("west");
    assert_eq!(report.output(), "The kitchen window is closed.");
    assert_eq!(engine.state().player.location, LocationId::new(ids::EAST_OF_HOUSE));
}

#[test]
fn moving_the_leaves_reveals_the_grating() {
    let mut engine = boot();
    teleport(&mut engine, ids::GRATING_CLEARING);
    assert!(
        engine
            .state()
            .item(&ItemId::new(ids::GRATING))
            .unwrap()
            .has(ItemFlag::Invisible)
    );

    let report = engine.perform("move leaves");
    assert_eq!(
        report.output(),
        "In disturbing the pile of leaves, a grating is revealed."
    );
    assert!(
        !engine
            .state()
            .item(&ItemId::new(ids::GRATING))
            .unwrap()
            .has(ItemFlag::Invisible)
    );

    // the grating now shows up in the clearing
    let report = engine.perform("look");
    assert!(report.output().contains("There is a grating securely fastened into the ground."));

    // and disturbing them again reveals nothing new
    let report = engine.perform("move leaves");
    assert!(report.output().contains("reveals nothing"));
}

#[test]
fn grue_safe_lighting_in_the_cellar() {
    let mut engine = boot();
    grab(&mut engine, ids::LANTERN);
    // drop something findable in the cellar
    engine
        .commit_batch(&[StateChange::MoveItem {
            item: ItemId::new(ids::MAT),
            to: ParentEntity::Location(LocationId::new(ids::CELLAR)),
        }])
        .unwrap();
    teleport(&mut engine, ids::CELLAR);

    engine.perform("turn on lantern");
    let report = engine.perform("look");
    assert!(report.output().contains("Cellar"));
    assert!(report.output().contains("dark and damp"));
    assert!(report.output().contains("welcome mat") || report.output().contains("Welcome to Zork"));

    engine.perform("turn off lantern");
    let report = engine.perform("look");
    assert!(
        report
            .output()
            .contains("It is pitch black. You are likely to be eaten by a grue.")
    );
    assert!(!report.output().contains("mat"));
}

#[test]
fn the_thief_steals_the_egg() {
    let mut engine = boot();
    grab(&mut engine, ids::EGG);
    teleport(&mut engine, ids::EAST_WEST_PASSAGE);
    // light matters not to the thief, but keep the player oriented
    grab(&mut engine, ids::LANTERN);
    engine.perform("turn on lantern");

    let mut robbed_message = false;
    for _ in 0..60 {
        let report = engine.perform("wait");
        if report.output().contains("robbed you blind") {
            robbed_message = true;
        }
        if item_parent(&engine, ids::EGG) == ParentEntity::Item(ItemId::new(ids::LARGE_BAG)) {
            break;
        }
    }
    assert!(robbed_message, "the thief never rolled a theft in 60 turns");
    assert_eq!(
        item_parent(&engine, ids::EGG),
        ParentEntity::Item(ItemId::new(ids::LARGE_BAG))
    );
}

#[test]
fn the_troll_goes_down_and_drops_the_axe() {
    let mut engine = boot();
    grab(&mut engine, ids::SWORD);
    grab(&mut engine, ids::LANTERN);
    // an unkillable test subject keeps the transcript deterministic in length
    engine
        .commit_batch(&[
            StateChange::SetPlayerProperty {
                prop: PlayerProp::MaxHealth,
                value: StateValue::Int(100_000),
            },
            StateChange::SetPlayerProperty {
                prop: PlayerProp::Health,
                value: StateValue::Int(100_000),
            },
        ])
        .unwrap();
    teleport(&mut engine, ids::TROLL_ROOM);
    engine.perform("turn on lantern");

    // the troll blocks every exit while he stands (and swings back)
    let report = engine.perform("east");
    assert!(
        report
            .output()
            .contains("The troll fends you off with a menacing gesture.")
    );
    assert_eq!(engine.state().player.location, LocationId::new(ids::TROLL_ROOM));

    let mut unconscious = false;
    for _ in 0..100 {
        engine.perform("attack troll with sword");
        // a lucky troll may knock the sword loose; pick it back up
        if engine.state().item(&ItemId::new(ids::SWORD)).unwrap().parent != ParentEntity::Player {
            engine.perform("take sword");
        }
        let troll = engine.state().item(&ItemId::new(ids::TROLL)).unwrap();
        if troll.sheet.as_ref().unwrap().consciousness == Consciousness::Unconscious {
            unconscious = true;
            break;
        }
    }
    assert!(unconscious, "the troll never went down in 100 rounds");

    let troll = engine.state().item(&ItemId::new(ids::TROLL)).unwrap();
    assert!(!troll.sheet.as_ref().unwrap().fighting);
    let axe = engine.state().item(&ItemId::new(ids::AXE)).unwrap();
    assert_eq!(axe.parent, ParentEntity::Location(LocationId::new(ids::TROLL_ROOM)));
    assert!(!axe.has(ItemFlag::OmitDescription));
    assert!(axe.has(ItemFlag::Weapon));

    let report = engine.perform("look");
    assert!(
        report
            .output()
            .contains("An unconscious troll is sprawled on the floor.")
    );

    // the way east is open now
    let report = engine.perform("east");
    assert!(report.output().contains("East-West Passage") || report.output().contains("pitch black"));
    assert_eq!(
        engine.state().player.location,
        LocationId::new(ids::EAST_WEST_PASSAGE)
    );

    // a further blow finishes him: corpse gone, loot rules applied
    teleport(&mut engine, ids::TROLL_ROOM);
    engine.perform("attack troll with sword");
    let troll = engine.state().item(&ItemId::new(ids::TROLL)).unwrap();
    assert_eq!(troll.sheet.as_ref().unwrap().consciousness, Consciousness::Dead);
    assert_eq!(troll.parent, ParentEntity::Nowhere);
}

#[test]
fn rug_then_trap_door_opens_the_cellar() {
    let mut engine = boot();
    teleport(&mut engine, ids::LIVING_ROOM);

    let report = engine.perform("move rug");
    assert!(report.output().contains("revealing the dusty cover of a closed trap door"));

    let report = engine.perform("open trap door");
    assert!(report.output().contains("rickety staircase"));

    let report = engine.perform("down");
    assert!(report.output().contains("pitch black"));
    assert_eq!(engine.state().player.location, LocationId::new(ids::CELLAR));

    // moving the rug twice is futile
    let report = engine.perform("up");
    assert_eq!(engine.state().player.location, LocationId::new(ids::LIVING_ROOM));
    assert!(!report.output().is_empty());
    let report = engine.perform("move rug");
    assert!(report.output().contains("impossible to move it again"));
}

#[test]
fn the_grating_stays_locked_from_above() {
    let mut engine = boot();
    teleport(&mut engine, ids::GRATING_CLEARING);
    engine.perform("move leaves");
    let report = engine.perform("down");
    assert_eq!(report.output(), "The grating is locked.");
    assert_eq!(
        engine.state().player.location,
        LocationId::new(ids::GRATING_CLEARING)
    );
}

#[test]
fn status_line_data_tracks_moves_and_score() {
    let mut engine = boot();
    assert_eq!(engine.state().player.moves, 0);
    engine.perform("look");
    engine.perform("open mailbox");
    assert_eq!(engine.state().player.moves, 2);
    // a parse error costs nothing
    engine.perform("plugh");
    assert_eq!(engine.state().player.moves, 2);
}
