//! Save files.
//!
//! A save is the full [`GameState`] snapshot plus the PRNG seed and the
//! engine version, written as RON under the platform data directory.
//! Restoring replaces the state wholesale and reseeds the PRNG, so a
//! restored game replays deterministically from its own seed.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::GRUE_VERSION;
use crate::world::GameState;

pub const SAVE_DIR: &str = "grue";
pub const DEFAULT_SLOT: &str = "game";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save encoding failed: {0}")]
    Encode(String),
    #[error("save decoding failed: {0}")]
    Decode(String),
}

/// One complete saved game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: String,
    /// RFC 3339 timestamp; `None` when local time was unavailable.
    pub saved_at: Option<String>,
    pub rng_seed: u64,
    pub state: GameState,
}

impl SaveGame {
    pub fn new(state: GameState, rng_seed: u64) -> Self {
        let saved_at = OffsetDateTime::now_local()
            .ok()
            .and_then(|now| now.format(&Rfc3339).ok());
        Self {
            version: GRUE_VERSION.to_string(),
            saved_at,
            rng_seed,
            state,
        }
    }
}

/// The per-user save directory, created on demand.
pub fn save_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SAVE_DIR)
        .join("saved_games")
}

/// Path for a named slot.
pub fn slot_path(slot: &str) -> PathBuf {
    save_dir().join(format!("{slot}.ron"))
}

/// Serialize a save to disk.
///
/// # Errors
/// Fails on unwritable directories or encoding problems.
pub fn write_save(path: &Path, save: &SaveGame) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let encoded = ron::ser::to_string_pretty(save, ron::ser::PrettyConfig::default())
        .map_err(|err| SaveError::Encode(err.to_string()))?;
    fs::write(path, encoded)?;
    info!("wrote save to {}", path.display());
    Ok(())
}

/// Read a save back.
///
/// # Errors
/// Fails on missing files or undecodable content.
pub fn read_save(path: &Path) -> Result<SaveGame, SaveError> {
    let raw = fs::read_to_string(path)?;
    let save: SaveGame = ron::from_str(&raw).map_err(|err| SaveError::Decode(err.to_string()))?;
    info!(
        "read save from {} (version {}, turn {})",
        path.display(),
        save.version,
        save.state.turn
    );
    Ok(save)
}
