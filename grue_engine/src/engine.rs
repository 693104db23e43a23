//! The engine: boot, the turn pipeline, and the commit step.
//!
//! One [`Engine`] owns the world store and every registry. A turn runs:
//! parse → hook pipeline → default handler → commit each result as a
//! transactional batch → scheduler tick → move accounting. Handlers and
//! daemons see the engine only through a shared reference; the commit step
//! is the sole mutator, so no handler ever observes a half-applied batch.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;
use gametools::Spinner;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::change::{ActionResult, ControlFlow, StateChange};
use crate::combat::{CombatNarration, CombatSystem, DefaultCombatSystem, CombatEvent};
use crate::command::Command;
use crate::hooks::{ComputedProp, ComputerRegistry, HookPoint, HookRegistry};
use crate::ids::{ItemId, LocationId, StateValue};
use crate::item::ItemFlag;
use crate::parser::{self, ParseError, Pronouns};
use crate::player::PlayerProp;
use crate::proxy::{ItemProxy, LocationProxy, PlayerProxy};
use crate::scheduler::{DaemonRegistry, tick_decision};
use crate::seed::{SeedError, WorldDef, validate};
use crate::spinners::{SpinnerKind, default_spinners, spin};
use crate::vocab::Intent;
use crate::world::{GameState, WorldError};

/// Session-level requests surfaced to the turn loop rather than the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Save,
    Restore,
    Quit,
}

/// Everything one call to [`Engine::perform`] produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReport {
    /// Player-visible paragraphs, in emission order.
    pub lines: Vec<String>,
    /// Whether the turn counted (parse failures and meta commands do not).
    pub charged: bool,
    pub meta: Option<MetaCommand>,
    /// Set when an internal error halted the turn; the world was rolled
    /// back to the last consistent point.
    pub fatal: Option<String>,
}

impl TurnReport {
    pub fn output(&self) -> String {
        self.lines.join("\n\n")
    }

    fn fatal(message: impl Into<String>) -> Self {
        Self {
            lines: vec!["Something went wrong.".to_string()],
            fatal: Some(message.into()),
            ..Self::default()
        }
    }
}

/// The runtime: world store plus registered behavior plus named resources.
pub struct Engine {
    state: GameState,
    hooks: HookRegistry,
    computers: ComputerRegistry,
    daemons: DaemonRegistry,
    combat: HashMap<ItemId, Box<dyn CombatSystem>>,
    spinners: HashMap<SpinnerKind, Spinner<String>>,
    rng: RefCell<StdRng>,
    rng_seed: u64,
    pronouns: Pronouns,
}

impl Engine {
    /// Boot a world declaration into a playable engine.
    ///
    /// # Errors
    /// Returns the first structural mistake found in the declaration.
    pub fn boot(def: WorldDef, rng_seed: u64) -> Result<Engine, SeedError> {
        validate(&def.seed)?;

        let mut state = GameState::default();
        for location in def.seed.locations {
            state.locations.insert(location.id.clone(), location);
        }
        for item in def.seed.items {
            state.items.insert(item.id.clone(), item);
        }
        state.player = def.seed.player;
        for (global, value) in def.seed.globals {
            state.globals.insert(global, value);
        }

        let mut hooks = HookRegistry::default();
        for (point, hook) in def.hooks {
            hooks.register(point, hook);
        }
        let mut computers = ComputerRegistry::default();
        for (prop, compute) in def.computers {
            computers.register(prop, compute);
        }
        let mut daemons = DaemonRegistry::default();
        for daemon in def.daemons {
            if daemon.active_at_boot {
                state
                    .daemons
                    .insert(daemon.id.clone(), crate::world::DaemonState::Active);
            }
            daemons.register(daemon.id, daemon.frequency, daemon.callback);
        }
        let combat = def.combat.into_iter().collect();
        let mut spinners = default_spinners();
        for (kind, spinner) in def.spinners {
            spinners.insert(kind, spinner);
        }

        info!("engine booted (rng seed {rng_seed})");
        Ok(Engine {
            state,
            hooks,
            computers,
            daemons,
            combat,
            spinners,
            rng: RefCell::new(StdRng::seed_from_u64(rng_seed)),
            rng_seed,
            pronouns: Pronouns::default(),
        })
    }

    // ---- read access ---------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Replace the world with a saved snapshot and reseed the PRNG.
    pub fn restore(&mut self, save: crate::save::SaveGame) {
        info!("restoring save (turn {}, seed {})", save.state.turn, save.rng_seed);
        self.state = save.state;
        self.rng_seed = save.rng_seed;
        self.rng = RefCell::new(StdRng::seed_from_u64(save.rng_seed));
        self.pronouns = Pronouns::default();
    }

    pub fn item(&self, id: &ItemId) -> Result<ItemProxy<'_>, WorldError> {
        self.state.item(id).map(|item| ItemProxy::new(self, item))
    }

    pub fn location(&self, id: &LocationId) -> Result<LocationProxy<'_>, WorldError> {
        self.state.location(id).map(|loc| LocationProxy::new(self, loc))
    }

    /// The player's current location.
    pub fn here(&self) -> Result<LocationProxy<'_>, WorldError> {
        self.location(&self.state.player.location)
    }

    pub fn player(&self) -> PlayerProxy<'_> {
        PlayerProxy::new(self, &self.state.player)
    }

    pub fn compute(&self, prop: &ComputedProp) -> Option<StateValue> {
        self.computers.resolve(prop, self)
    }

    pub fn narrate_combat(&self, enemy: &ItemId, event: &CombatEvent) -> CombatNarration {
        match self.combat.get(enemy) {
            Some(system) => system.narrate(self, event),
            None => DefaultCombatSystem.narrate(self, event),
        }
    }

    // ---- named resources -----------------------------------------------------

    pub fn roll_d20(&self) -> i64 {
        self.rng.borrow_mut().random_range(1..=20)
    }

    /// Uniform roll in `1..=sides` (minimum one).
    pub fn roll(&self, sides: i64) -> i64 {
        self.rng.borrow_mut().random_range(1..=sides.max(1))
    }

    /// True `percent` times out of 100.
    pub fn random_percentage(&self, percent: i64) -> bool {
        self.rng.borrow_mut().random_range(0..100) < percent
    }

    /// Deterministic random pick from a fixed list.
    pub fn pick(&self, options: &[&str]) -> String {
        if options.is_empty() {
            return String::new();
        }
        let idx = self.rng.borrow_mut().random_range(0..options.len());
        options[idx].to_string()
    }

    pub fn spin(&self, kind: SpinnerKind, default: &'static str) -> String {
        spin(&self.spinners, kind, default)
    }

    // ---- the turn pipeline ---------------------------------------------------

    /// Run one line of player input through the full pipeline.
    pub fn perform(&mut self, line: &str) -> TurnReport {
        let mut report = TurnReport::default();

        let command = match parser::parse(line, &self.state, &self.pronouns) {
            Ok(command) => command,
            Err(err) => {
                report.lines.push(self.render_parse_error(&err));
                return report;
            },
        };
        self.note_pronouns(&command);

        if command.intents.iter().all(|i| i.is_meta()) && command.primary_intent().is_some() {
            report.meta = match command.primary_intent() {
                Some(Intent::Save) => Some(MetaCommand::Save),
                Some(Intent::Restore) => Some(MetaCommand::Restore),
                _ => Some(MetaCommand::Quit),
            };
            return report;
        }

        let results = match self.dispatch(&command) {
            Ok(results) => results,
            Err(err) => {
                error!("handler failure for '{line}': {err:#}");
                return TurnReport::fatal(format!("{err:#}"));
            },
        };

        for result in results {
            if let Some(message) = &result.message
                && !message.is_empty()
            {
                report.lines.push(message.clone());
            }
            if let Err(err) = self.commit_batch(&result.changes) {
                report.lines.push("Something went wrong.".to_string());
                report.fatal = Some(err);
                return report;
            }
        }

        // the action pipeline succeeded: this turn counts
        report.charged = true;
        self.state.turn += 1;
        self.tick_daemons(&mut report);
        self.state.player.moves += 1;
        report
    }

    /// Run the hook pipeline and default handler, collecting results in
    /// emission order. Does not mutate the world.
    fn dispatch(&self, command: &Command) -> Result<Vec<ActionResult>> {
        let mut results: Vec<ActionResult> = Vec::new();
        let here = self.state.player.location.clone();

        // 1. location before-turn
        let outcome = self
            .hooks
            .run(&HookPoint::BeforeTurn(here.clone()), self, command)?;
        results.extend(outcome.results);
        if outcome.overridden {
            return Ok(results);
        }

        // 2. direct-object before hooks
        if let Some(id) = command.direct_item().cloned() {
            for intent in &command.intents {
                let outcome = self
                    .hooks
                    .run(&HookPoint::ItemBefore(id.clone(), *intent), self, command)?;
                results.extend(outcome.results);
                if outcome.overridden {
                    return Ok(results);
                }
            }
        }

        // 3. indirect-object before hooks
        if let Some(id) = command.indirect_item().cloned() {
            for intent in &command.intents {
                let outcome = self
                    .hooks
                    .run(&HookPoint::ItemBefore(id.clone(), *intent), self, command)?;
                results.extend(outcome.results);
                if outcome.overridden {
                    return Ok(results);
                }
            }
        }

        // 4. default verb handler
        let default = crate::actions::perform_default(self, command)?;
        let moved_to = destination_of(&default);
        results.push(default);

        // arrival hooks for a successful movement
        if let Some(destination) = moved_to {
            let outcome = self
                .hooks
                .run(&HookPoint::OnEnter(destination), self, command)?;
            results.extend(outcome.results);
        }

        // 5. after phase: location, then direct object
        let outcome = self.hooks.run(&HookPoint::AfterTurn(here), self, command)?;
        results.extend(outcome.results);
        if outcome.overridden {
            return Ok(results);
        }
        if let Some(id) = command.direct_item().cloned() {
            for intent in &command.intents {
                let outcome = self
                    .hooks
                    .run(&HookPoint::ItemAfter(id.clone(), *intent), self, command)?;
                results.extend(outcome.results);
                if outcome.overridden {
                    break;
                }
            }
        }
        Ok(results)
    }

    /// Apply a change batch in order; roll the whole batch back on the
    /// first validation failure. Hosts and tests may use this to adjust
    /// the world between turns; during a turn the pipeline is the only
    /// caller.
    pub fn commit_batch(&mut self, changes: &[StateChange]) -> Result<(), String> {
        if changes.is_empty() {
            return Ok(());
        }
        let checkpoint = self.state.snapshot();
        for change in changes {
            if let Err(err) = self.state.apply(change) {
                error!("commit failed, rolling back batch: {err}");
                self.state = checkpoint;
                return Err(err.to_string());
            }
        }
        Ok(())
    }

    /// One scheduler pass: every registered daemon, in registration order.
    fn tick_daemons(&mut self, report: &mut TurnReport) {
        for idx in 0..self.daemons.len() {
            let (id, frequency) = {
                let entry = self.daemons.entry(idx);
                (entry.id.clone(), entry.frequency)
            };
            let current = self.state.daemon_state(&id);
            let (fires, interim) = tick_decision(current, self.state.turn, frequency);
            if interim != current {
                // fuse countdown; bookkeeping, not a logged change
                self.state.daemons.insert(id.clone(), interim);
            }
            if !fires {
                continue;
            }

            let call = {
                let callback = &self.daemons.entry(idx).callback;
                callback(self, interim)
            };
            let (result, next) = match call {
                Ok(out) => out,
                Err(err) => {
                    error!("daemon '{id}' failed: {err:#}");
                    report.lines.push("Something went wrong.".to_string());
                    report.fatal = Some(format!("daemon '{id}': {err:#}"));
                    return;
                },
            };
            if next != interim {
                self.state.daemons.insert(id.clone(), next);
            }
            let Some(result) = result else { continue };
            if result.control == ControlFlow::Yield {
                continue;
            }
            if let Some(message) = &result.message
                && !message.is_empty()
            {
                report.lines.push(message.clone());
            }
            if let Err(err) = self.commit_batch(&result.changes) {
                report.lines.push("Something went wrong.".to_string());
                report.fatal = Some(format!("daemon '{id}': {err}"));
                return;
            }
        }
    }

    fn note_pronouns(&mut self, command: &Command) {
        if let Some(direct) = &command.direct {
            let plural = command
                .direct_item()
                .and_then(|id| self.state.items.get(id))
                .is_some_and(|item| item.has(ItemFlag::Plural));
            self.pronouns.note(direct, plural);
        }
    }

    fn render_parse_error(&self, err: &ParseError) -> String {
        match err {
            ParseError::UnknownVerb(_) => {
                self.spin(SpinnerKind::UnknownVerb, "That's not a verb I recognize.")
            },
            ParseError::NotUnderstood(phrase) => {
                if phrase.is_empty() {
                    self.spin(SpinnerKind::NothingHere, "You can't see any such thing.")
                } else {
                    format!("You can't see any {phrase} here!")
                }
            },
            ParseError::Disambiguate { candidates, .. } => {
                let names: Vec<String> = candidates.iter().map(|c| format!("the {}", c.name)).collect();
                format!("Which do you mean, {}?", names.join(" or "))
            },
        }
    }
}

/// The destination of a successful movement result, if any.
fn destination_of(result: &ActionResult) -> Option<LocationId> {
    result.changes.iter().find_map(|change| match change {
        StateChange::SetPlayerProperty {
            prop: PlayerProp::Location,
            value: StateValue::Location(dest),
        } => Some(dest.clone()),
        _ => None,
    })
}
