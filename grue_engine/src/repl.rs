//! The turn loop.
//!
//! Drives an [`IoHandler`]: status line, read, perform, print, repeat.
//! EOF and QUIT end the loop cleanly; a fatal engine diagnostic halts it
//! with an error after showing the player a generic apology.

use anyhow::{Result, bail};
use log::{error, info};

use crate::engine::{Engine, MetaCommand};
use crate::io::{InputEvent, IoHandler};
use crate::save::{DEFAULT_SLOT, SaveGame, read_save, slot_path, write_save};

/// Run until quit, EOF, or a fatal engine error.
///
/// # Errors
/// Returns an error only for the fatal case; quitting is `Ok`.
pub fn run_repl(engine: &mut Engine, io: &mut dyn IoHandler) -> Result<()> {
    loop {
        let state = engine.state();
        let room_name = state
            .location(&state.player.location)
            .map(|loc| loc.name.clone())
            .unwrap_or_else(|_| "Nowhere".to_string());
        io.status_line(&room_name, state.player.score, state.player.moves);

        let line = match io.read_line("> ")? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("EOF on input; ending session");
                break;
            },
            InputEvent::Interrupted => continue,
        };
        if line.trim().is_empty() {
            continue;
        }

        let report = engine.perform(&line);

        if let Some(meta) = report.meta {
            match meta {
                MetaCommand::Quit => {
                    io.print("Thanks for playing!");
                    break;
                },
                MetaCommand::Save => {
                    let save = SaveGame::new(engine.state().snapshot(), engine.rng_seed());
                    match write_save(&slot_path(DEFAULT_SLOT), &save) {
                        Ok(()) => io.print("Saved."),
                        Err(err) => io.print(&format!("Save failed: {err}")),
                    }
                },
                MetaCommand::Restore => match read_save(&slot_path(DEFAULT_SLOT)) {
                    Ok(save) => {
                        engine.restore(save);
                        io.print("Restored.");
                    },
                    Err(err) => io.print(&format!("Restore failed: {err}")),
                },
            }
            continue;
        }

        let output = report.output();
        if !output.is_empty() {
            io.print(&output);
        }
        if let Some(diagnostic) = report.fatal {
            error!("halting turn loop: {diagnostic}");
            bail!("fatal engine error: {diagnostic}");
        }
    }
    Ok(())
}
