#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! ** grue **
//! Playable entry point for the Great Underground Empire world.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;

use grue_engine::io::{ConsoleIo, IoHandler};
use grue_engine::{Engine, GRUE_VERSION, run_repl};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    info!("starting grue (engine version {GRUE_VERSION})");

    let rng_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed);
    let mut engine = Engine::boot(grue_world::world(), rng_seed).context("while booting the world")?;
    info!("world booted with rng seed {rng_seed}");

    let mut io = ConsoleIo::new();
    io.print(concat!(
        "THE GREAT UNDERGROUND EMPIRE\n",
        "A tale of adventure, danger, and low cunning.\n",
    ));

    // opening view of West of House, shown without charging a move
    let here = engine.state().player.location.clone();
    let (opening, changes) = grue_engine::actions::look::describe_location(&engine, &here, false)?;
    engine
        .commit_batch(&changes)
        .map_err(|err| anyhow::anyhow!(err))
        .context("while applying the opening view")?;
    io.print(&opening);

    run_repl(&mut engine, &mut io)
}
