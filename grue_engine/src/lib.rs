#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]

//! ** grue_engine **
//!
//! A turn-based interactive-fiction runtime in the tradition of Zork:
//! a command parser, a transactional world store, an ordered hook
//! pipeline, a cooperative daemon scheduler, and a pluggable combat
//! system. Worlds are declared as plain seed data plus registered hooks
//! and consumed at boot; see the `grue_world` crate for a complete one.

// Core modules
pub mod actions;
pub mod change;
pub mod combat;
pub mod command;
pub mod engine;
pub mod hooks;
pub mod ids;
pub mod io;
pub mod item;
pub mod location;
pub mod parser;
pub mod player;
pub mod proxy;
pub mod repl;
pub mod save;
pub mod scheduler;
pub mod seed;
pub mod sheet;
pub mod spinners;
pub mod style;
pub mod vis;
pub mod vocab;
pub mod world;

// Re-exports for convenience
pub use change::{ActionResult, ControlFlow, StateChange};
pub use command::{Command, EntityRef, Universal};
pub use engine::{Engine, MetaCommand, TurnReport};
pub use hooks::{ComputedProp, HookPoint};
pub use ids::{DaemonId, Direction, GlobalId, ItemId, LocationId, StateValue};
pub use item::{Item, ItemFlag, ItemProp, ParentEntity};
pub use location::{Exit, ExitTarget, Location, LocationProp};
pub use player::{Player, PlayerProp};
pub use repl::run_repl;
pub use seed::{ItemSeed, LocationSeed, WorldDef, WorldSeed};
pub use sheet::{CharacterSheet, CharacterUpdate, Consciousness};
pub use vocab::Intent;
pub use world::{DaemonState, GameState};

/// The engine version baked into saves.
pub const GRUE_VERSION: &str = env!("CARGO_PKG_VERSION");
