//! End-to-end pipeline tests over a small fixture world.

use grue_engine::change::ActionResult;
use grue_engine::hooks::HookPoint;
use grue_engine::seed::{ItemSeed, LocationSeed, WorldDef, WorldSeed};
use grue_engine::{
    DaemonId, Direction, Engine, Exit, GlobalId, Intent, ItemFlag, ItemId, LocationId,
    ParentEntity, StateChange, StateValue,
};

const SEED: u64 = 0x5eed;

fn fixture() -> WorldDef {
    let mut def = WorldDef::default();
    def.seed = WorldSeed {
        locations: vec![
            LocationSeed::new("meadow", "Meadow")
                .description("A sunlit meadow. A shed stands to the east.")
                .exit(Direction::East, Exit::to("shed"))
                .build(),
            LocationSeed::new("shed", "Tool Shed")
                .description("A cramped shed smelling of oil.")
                .dark()
                .exit(Direction::West, Exit::to("meadow"))
                .build(),
        ],
        items: vec![
            ItemSeed::new("rock", "gray rock")
                .adjectives(&["gray"])
                .in_location("meadow")
                .flags(&[ItemFlag::Takable])
                .size(3)
                .build(),
            ItemSeed::new("chest", "wooden chest")
                .adjectives(&["wooden"])
                .in_location("meadow")
                .flags(&[ItemFlag::Container, ItemFlag::Openable])
                .capacity(10)
                .build(),
            ItemSeed::new("pebble", "smooth pebble")
                .adjectives(&["smooth"])
                .in_item("chest")
                .flags(&[ItemFlag::Takable])
                .size(1)
                .build(),
            ItemSeed::new("lantern", "brass lantern")
                .synonyms(&["lamp"])
                .adjectives(&["brass"])
                .held_by_player()
                .flags(&[ItemFlag::Takable, ItemFlag::LightSource, ItemFlag::Device])
                .size(4)
                .build(),
        ],
        ..WorldSeed::default()
    };
    def.seed.player.location = LocationId::new("meadow");
    def
}

fn boot(def: WorldDef) -> Engine {
    Engine::boot(def, SEED).expect("fixture should boot")
}

#[test]
fn take_moves_the_item_and_charges_the_turn() {
    let mut engine = boot(fixture());
    let report = engine.perform("take rock");
    assert_eq!(report.output(), "Taken.");
    assert!(report.charged);
    assert_eq!(
        engine.state().item(&ItemId::new("rock")).unwrap().parent,
        ParentEntity::Player
    );
    assert_eq!(engine.state().player.moves, 1);
    assert!(
        engine
            .state()
            .change_history
            .iter()
            .any(|c| matches!(c, StateChange::MoveItem { item, .. } if *item == ItemId::new("rock")))
    );
}

#[test]
fn parse_errors_charge_nothing() {
    let mut engine = boot(fixture());
    let report = engine.perform("frobnicate rock");
    assert!(!report.charged);
    assert_eq!(engine.state().player.moves, 0);
    assert!(engine.state().change_history.is_empty());
}

#[test]
fn movement_marks_the_destination_visited() {
    let mut engine = boot(fixture());
    // the shed is dark, so arrival reports the grue
    let report = engine.perform("east");
    assert!(report.output().contains("pitch black"));
    assert_eq!(engine.state().player.location, LocationId::new("shed"));
    assert!(engine.state().location(&LocationId::new("shed")).unwrap().visited);
}

#[test]
fn no_exit_is_a_charged_refusal() {
    let mut engine = boot(fixture());
    let report = engine.perform("north");
    assert_eq!(report.output(), "You can't go that way.");
    assert!(report.charged);
    assert_eq!(engine.state().player.location, LocationId::new("meadow"));
}

#[test]
fn opening_the_chest_reveals_its_contents() {
    let mut engine = boot(fixture());
    let report = engine.perform("open chest");
    assert!(report.output().contains("reveals a smooth pebble"));
    assert!(
        engine
            .state()
            .item(&ItemId::new("chest"))
            .unwrap()
            .has(ItemFlag::Open)
    );
    // now reachable
    let report = engine.perform("take pebble");
    assert_eq!(report.output(), "Taken.");
}

#[test]
fn closed_containers_hide_their_contents_from_the_parser() {
    let mut engine = boot(fixture());
    let report = engine.perform("take pebble");
    assert!(report.output().contains("can't see any pebble"));
    assert!(!report.charged);
}

#[test]
fn darkness_hides_the_room_until_the_lantern_comes_on() {
    let mut engine = boot(fixture());
    engine.perform("east");
    let report = engine.perform("look");
    assert_eq!(
        report.output(),
        "It is pitch black. You are likely to be eaten by a grue."
    );

    let report = engine.perform("turn on lantern");
    assert!(report.output().contains("The brass lantern is now on."));
    assert!(report.output().contains("Tool Shed"));
    assert!(report.output().contains("cramped shed"));

    let report = engine.perform("turn off lamp");
    assert!(report.output().contains("now off"));
    assert!(report.output().contains("pitch black"));
}

#[test]
fn before_hook_override_preempts_the_default() {
    let mut def = fixture();
    def.hook(
        HookPoint::ItemBefore(ItemId::new("rock"), Intent::Take),
        Box::new(|_, _| {
            Ok(Some(
                ActionResult::message("The rock is white-hot and cannot be held.").overriding(),
            ))
        }),
    );
    let mut engine = boot(def);
    let report = engine.perform("take rock");
    assert_eq!(report.output(), "The rock is white-hot and cannot be held.");
    assert_eq!(
        engine.state().item(&ItemId::new("rock")).unwrap().parent,
        ParentEntity::Location(LocationId::new("meadow"))
    );
}

#[test]
fn continue_hooks_emit_and_fall_through() {
    let mut def = fixture();
    def.hook(
        HookPoint::BeforeTurn(LocationId::new("meadow")),
        Box::new(|_, command| {
            if command.has_intent(Intent::Take) {
                Ok(Some(ActionResult::message("A crow watches you closely.")))
            } else {
                Ok(None)
            }
        }),
    );
    let mut engine = boot(def);
    let report = engine.perform("take rock");
    assert_eq!(report.lines, vec!["A crow watches you closely.", "Taken."]);
    assert_eq!(
        engine.state().item(&ItemId::new("rock")).unwrap().parent,
        ParentEntity::Player
    );
}

#[test]
fn on_enter_hooks_fire_after_arrival() {
    let mut def = fixture();
    def.hook(
        HookPoint::OnEnter(LocationId::new("shed")),
        Box::new(|_, _| Ok(Some(ActionResult::message("Something skitters in the dark.")))),
    );
    let mut engine = boot(def);
    let report = engine.perform("east");
    assert!(report.lines.iter().any(|l| l.contains("pitch black")));
    assert_eq!(report.lines.last().unwrap(), "Something skitters in the dark.");
}

#[test]
fn active_daemons_run_each_charged_turn_only() {
    let mut def = fixture();
    def.daemon(
        "clock",
        1,
        true,
        Box::new(|_, state| Ok((Some(ActionResult::message("The clock ticks.")), state))),
    );
    let mut engine = boot(def);

    let report = engine.perform("wait");
    assert!(report.lines.iter().any(|l| l == "The clock ticks."));

    // an unparseable line must not tick the scheduler
    let report = engine.perform("frobnicate");
    assert!(!report.lines.iter().any(|l| l == "The clock ticks."));
}

#[test]
fn daemon_frequency_skips_off_turns() {
    let mut def = fixture();
    def.daemon(
        "slow_drip",
        2,
        true,
        Box::new(|_, state| Ok((Some(ActionResult::message("Drip.")), state))),
    );
    let mut engine = boot(def);

    let mut dripped = Vec::new();
    for _ in 0..4 {
        let report = engine.perform("wait");
        dripped.push(report.lines.iter().any(|l| l == "Drip."));
    }
    // turns are numbered from 1; frequency 2 fires on even turns
    assert_eq!(dripped, vec![false, true, false, true]);
}

#[test]
fn fuses_fire_once_after_their_countdown() {
    let mut def = fixture();
    def.daemon(
        "bomb",
        1,
        false,
        Box::new(|_, state| Ok((Some(ActionResult::message("BOOM!")), state))),
    );
    let mut engine = boot(def);
    engine
        .commit_batch(&[StateChange::ScheduleFuse {
            fuse: DaemonId::new("bomb"),
            turns: 3,
        }])
        .unwrap();

    let mut explosions = Vec::new();
    for _ in 0..5 {
        let report = engine.perform("wait");
        explosions.push(report.lines.iter().any(|l| l == "BOOM!"));
    }
    assert_eq!(explosions, vec![false, false, true, false, false]);
}

#[test]
fn run_daemon_change_activates_from_a_hook() {
    let mut def = fixture();
    def.daemon(
        "whisper",
        1,
        false,
        Box::new(|_, state| Ok((Some(ActionResult::message("You hear whispering.")), state))),
    );
    def.hook(
        HookPoint::ItemBefore(ItemId::new("rock"), Intent::Take),
        Box::new(|_, _| {
            Ok(Some(ActionResult::silent(vec![StateChange::RunDaemon(
                DaemonId::new("whisper"),
            )])))
        }),
    );
    let mut engine = boot(def);

    let report = engine.perform("wait");
    assert!(!report.lines.iter().any(|l| l == "You hear whispering."));

    let report = engine.perform("take rock");
    assert!(report.lines.iter().any(|l| l == "You hear whispering."));
}

#[test]
fn change_builders_are_noops_the_second_time() {
    let mut engine = boot(fixture());
    let open = {
        let chest = engine.item(&ItemId::new("chest")).unwrap();
        chest.set_flag(ItemFlag::Open).expect("first set yields a change")
    };
    engine.commit_batch(&[open.clone()]).unwrap();
    {
        let chest = engine.item(&ItemId::new("chest")).unwrap();
        assert_eq!(chest.set_flag(ItemFlag::Open), None);
    }
    // applying the same change again is also silent
    let history_len = engine.state().change_history.len();
    engine.commit_batch(&[open]).unwrap();
    assert_eq!(engine.state().change_history.len(), history_len);
}

#[test]
fn globals_travel_through_changes() {
    let mut def = fixture();
    def.seed
        .globals
        .push((GlobalId::new("shed_inspected"), StateValue::Bool(false)));
    def.hook(
        HookPoint::OnEnter(LocationId::new("shed")),
        Box::new(|_, _| {
            Ok(Some(ActionResult::silent(vec![StateChange::SetGlobal {
                global: GlobalId::new("shed_inspected"),
                value: StateValue::Bool(true),
            }])))
        }),
    );
    let mut engine = boot(def);
    assert!(!engine.state().global_bool(&GlobalId::new("shed_inspected")));
    engine.perform("east");
    assert!(engine.state().global_bool(&GlobalId::new("shed_inspected")));
}

#[test]
fn inventory_lists_carried_items() {
    let mut engine = boot(fixture());
    let report = engine.perform("inventory");
    assert!(report.output().contains("You are carrying:"));
    assert!(report.output().contains("A brass lantern"));

    engine.perform("drop lantern");
    let report = engine.perform("i");
    assert_eq!(report.output(), "You are empty-handed.");
}

#[test]
fn quit_save_restore_surface_as_meta() {
    let mut engine = boot(fixture());
    let report = engine.perform("quit");
    assert_eq!(report.meta, Some(grue_engine::MetaCommand::Quit));
    assert!(!report.charged);
    let report = engine.perform("save");
    assert_eq!(report.meta, Some(grue_engine::MetaCommand::Save));
}
