//! Hook and property-computer registries.
//!
//! Worlds attach behavior to entities by registering closures against
//! (entity, intent) keys; the dispatcher consults the registry at each
//! pipeline stage and short-circuits on an overriding result. Property
//! computers intercept proxy reads the same way: a registered computer for
//! (entity, property) wins over the stored value.

use std::collections::HashMap;

use anyhow::Result;

use crate::change::{ActionResult, ControlFlow};
use crate::command::Command;
use crate::engine::Engine;
use crate::ids::{ItemId, LocationId, StateValue};
use crate::item::ItemProp;
use crate::location::LocationProp;
use crate::player::PlayerProp;
use crate::vocab::Intent;

/// A pipeline stage a hook can attach to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Runs before anything else, on the player's current location.
    BeforeTurn(LocationId),
    /// Runs after the default handler, on the player's current location.
    AfterTurn(LocationId),
    /// Runs when the player arrives in the location.
    OnEnter(LocationId),
    /// Runs on the direct or indirect object before the default handler.
    ItemBefore(ItemId, Intent),
    /// Runs on the direct object after the default handler.
    ItemAfter(ItemId, Intent),
}

/// Hook signature: read the world through the engine handle, return `None`
/// to fall through or a result to emit.
pub type HookFn = Box<dyn Fn(&Engine, &Command) -> Result<Option<ActionResult>>>;

/// What running one hook point produced.
#[derive(Debug, Default)]
pub struct HookOutcome {
    /// Results to emit, in hook registration order.
    pub results: Vec<ActionResult>,
    /// True when a hook overrode the rest of the pipeline.
    pub overridden: bool,
}

/// All hooks registered for a world, keyed by pipeline stage.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookPoint, Vec<HookFn>>,
}

impl HookRegistry {
    pub fn register(&mut self, point: HookPoint, hook: HookFn) {
        self.hooks.entry(point).or_default().push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook at a point, in registration order.
    ///
    /// A `Continue` result is collected and the walk goes on; an `Override`
    /// result is collected and stops both this point and (via the flag) the
    /// rest of the pipeline. `Yield` results are dropped.
    pub fn run(&self, point: &HookPoint, engine: &Engine, command: &Command) -> Result<HookOutcome> {
        let mut outcome = HookOutcome::default();
        let Some(hooks) = self.hooks.get(point) else {
            return Ok(outcome);
        };
        for hook in hooks {
            if let Some(result) = hook(engine, command)? {
                match result.control {
                    ControlFlow::Yield => {},
                    ControlFlow::Continue => outcome.results.push(result),
                    ControlFlow::Override => {
                        outcome.results.push(result);
                        outcome.overridden = true;
                        break;
                    },
                }
            }
        }
        Ok(outcome)
    }
}

/// A property a computer may be registered against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComputedProp {
    Item(ItemId, ItemProp),
    Location(LocationId, LocationProp),
    Player(PlayerProp),
}

/// Computer signature: produce the property's current value, or `None` to
/// fall through to the stored value.
pub type ComputeFn = Box<dyn Fn(&Engine) -> Option<StateValue>>;

/// Registered property computers.
#[derive(Default)]
pub struct ComputerRegistry {
    computers: HashMap<ComputedProp, ComputeFn>,
}

impl ComputerRegistry {
    pub fn register(&mut self, prop: ComputedProp, compute: ComputeFn) {
        self.computers.insert(prop, compute);
    }

    /// Resolve a computed property, if one is registered.
    pub fn resolve(&self, prop: &ComputedProp, engine: &Engine) -> Option<StateValue> {
        self.computers.get(prop).and_then(|compute| compute(engine))
    }
}
