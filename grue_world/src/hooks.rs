//! Hooks and property computers for the house and the caves beneath it.

use grue_engine::change::ActionResult;
use grue_engine::hooks::ComputedProp;
use grue_engine::sheet::Consciousness;
use grue_engine::{
    GlobalId, HookPoint, Intent, ItemFlag, ItemId, ItemProp, LocationId, StateChange, StateValue,
    WorldDef,
};

use crate::ids;

pub fn register(def: &mut WorldDef) {
    register_window(def);
    register_rug_and_trap_door(def);
    register_leaves(def);
    register_troll(def);
    register_thief_descriptions(def);
}

fn set_global(name: &str, value: StateValue) -> StateChange {
    StateChange::SetGlobal {
        global: GlobalId::new(name),
        value,
    }
}

/// The kitchen window needs a shove, and says so.
fn register_window(def: &mut WorldDef) {
    def.hook(
        HookPoint::ItemBefore(ItemId::new(ids::KITCHEN_WINDOW), Intent::Open),
        Box::new(|engine, _| {
            let window = engine.item(&ItemId::new(ids::KITCHEN_WINDOW))?;
            if window.is_open() {
                return Ok(None);
            }
            Ok(Some(
                ActionResult::message(
                    "With great effort, you open the window far enough to allow entry.",
                )
                .then_maybe([window.set_flag(ItemFlag::Open)])
                .overriding(),
            ))
        }),
    );
}

/// Moving the rug uncovers the trap door; the trap door opens with
/// appropriate reluctance and describes itself by state.
fn register_rug_and_trap_door(def: &mut WorldDef) {
    def.hook(
        HookPoint::ItemBefore(ItemId::new(ids::RUG), Intent::MoveObject),
        Box::new(|engine, _| {
            if engine.state().global_bool(&GlobalId::new(ids::RUG_MOVED)) {
                return Ok(Some(
                    ActionResult::message(
                        "Having moved the rug previously, you find it impossible to move it again.",
                    )
                    .overriding(),
                ));
            }
            let trap_door = engine.item(&ItemId::new(ids::TRAP_DOOR))?;
            Ok(Some(
                ActionResult::message(
                    "With a great effort, the rug is moved to one side of the room, revealing the dusty cover of a closed trap door.",
                )
                .then_maybe([
                    trap_door.clear_flag(ItemFlag::Invisible),
                    trap_door.clear_flag(ItemFlag::OmitDescription),
                    Some(set_global(ids::RUG_MOVED, StateValue::Bool(true))),
                ])
                .overriding(),
            ))
        }),
    );

    def.hook(
        HookPoint::ItemBefore(ItemId::new(ids::TRAP_DOOR), Intent::Open),
        Box::new(|engine, _| {
            let trap_door = engine.item(&ItemId::new(ids::TRAP_DOOR))?;
            if trap_door.is_open() {
                return Ok(None);
            }
            Ok(Some(
                ActionResult::message(
                    "The door reluctantly opens to reveal a rickety staircase descending into darkness.",
                )
                .then_maybe([trap_door.set_flag(ItemFlag::Open)])
                .overriding(),
            ))
        }),
    );

    def.computer(
        ComputedProp::Item(ItemId::new(ids::TRAP_DOOR), ItemProp::ShortDescription),
        Box::new(|engine| {
            let state = engine.state();
            let trap_door = state.item(&ItemId::new(ids::TRAP_DOOR)).ok()?;
            let text = if trap_door.has(ItemFlag::Open) {
                "A trap door stands open in the middle of the room, a rickety staircase descending into darkness below."
            } else {
                "The dusty cover of a closed trap door lies in the middle of the room."
            };
            Some(StateValue::Text(text.to_string()))
        }),
    );
}

/// Disturbing the leaves reveals the grating, exactly once. The reveal
/// rides along with TAKE as well, without blocking the take itself.
fn register_leaves(def: &mut WorldDef) {
    let reveal = |engine: &grue_engine::Engine| -> anyhow::Result<Option<ActionResult>> {
        if engine
            .state()
            .global_bool(&GlobalId::new(ids::GRATING_REVEALED))
        {
            return Ok(None);
        }
        let grating = engine.item(&ItemId::new(ids::GRATING))?;
        Ok(Some(
            ActionResult::message("In disturbing the pile of leaves, a grating is revealed.")
                .then_maybe([
                    grating.clear_flag(ItemFlag::Invisible),
                    Some(set_global(ids::GRATING_REVEALED, StateValue::Bool(true))),
                ]),
        ))
    };

    def.hook(
        HookPoint::ItemBefore(ItemId::new(ids::LEAVES), Intent::MoveObject),
        Box::new(move |engine, _| {
            // the reveal is the whole outcome of a MOVE
            Ok(reveal(engine)?.map(ActionResult::overriding))
        }),
    );
    def.hook(
        HookPoint::ItemBefore(ItemId::new(ids::LEAVES), Intent::Take),
        Box::new(move |engine, _| reveal(engine)),
    );
}

/// The troll blocks every passage while he is up, and his one-line
/// portrait tracks his condition.
fn register_troll(def: &mut WorldDef) {
    def.hook(
        HookPoint::BeforeTurn(LocationId::new(ids::TROLL_ROOM)),
        Box::new(|engine, command| {
            if !command.has_intent(Intent::Move) && !command.has_intent(Intent::Climb) {
                return Ok(None);
            }
            let troll = engine.item(&ItemId::new(ids::TROLL))?;
            let blocking = troll
                .sheet()
                .is_some_and(|s| s.consciousness == Consciousness::Alert)
                && engine.state().nearest_location(&ItemId::new(ids::TROLL))
                    == Some(LocationId::new(ids::TROLL_ROOM));
            if blocking {
                return Ok(Some(
                    ActionResult::message("The troll fends you off with a menacing gesture.").overriding(),
                ));
            }
            Ok(None)
        }),
    );

    def.computer(
        ComputedProp::Item(ItemId::new(ids::TROLL), ItemProp::ShortDescription),
        Box::new(|engine| {
            let troll = engine.state().item(&ItemId::new(ids::TROLL)).ok()?;
            let sheet = troll.sheet.as_ref()?;
            let text = match sheet.consciousness {
                Consciousness::Alert => {
                    "A nasty-looking troll, brandishing a bloody axe, blocks all passages out of the room."
                },
                Consciousness::Unconscious => {
                    "An unconscious troll is sprawled on the floor. All passages out of the room are open."
                },
                Consciousness::Dead => return None,
            };
            Some(StateValue::Text(text.to_string()))
        }),
    );
}

fn register_thief_descriptions(def: &mut WorldDef) {
    def.computer(
        ComputedProp::Item(ItemId::new(ids::THIEF), ItemProp::ShortDescription),
        Box::new(|engine| {
            let thief = engine.state().item(&ItemId::new(ids::THIEF)).ok()?;
            let sheet = thief.sheet.as_ref()?;
            let text = match sheet.consciousness {
                Consciousness::Alert => {
                    "There is a suspicious-looking individual, holding a large bag, leaning against one wall. He is armed with a vicious stiletto."
                },
                Consciousness::Unconscious => "The thief is briefly out cold on the floor.",
                Consciousness::Dead => return None,
            };
            Some(StateValue::Text(text.to_string()))
        }),
    );
}
