//! Progress and settings persistence (~/.kanji-battle/*.json).
//!
//! Missing or unreadable files load as defaults so a corrupt save never
//! blocks the game from starting.

use super::types::Collection;
use crate::core::config::Settings;
use crate::core::constants::SAVE_DIR_NAME;
use crate::core::context::GameContext;
use crate::core::progression::PlayerStats;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const PROGRESS_FILE: &str = "progress.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const STAGES_FILE: &str = "stages.json";
pub const LOG_FILE: &str = "kanji-battle.log";

const PROGRESS_VERSION: u32 = 1;

/// Everything about the player that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSave {
    pub version: u32,
    pub player_name: String,
    pub player: PlayerStats,
    #[serde(default)]
    pub collection: Collection,
}

impl ProgressSave {
    pub fn from_context(ctx: &GameContext) -> Self {
        Self {
            version: PROGRESS_VERSION,
            player_name: ctx.player_name.clone(),
            player: ctx.player.clone(),
            collection: ctx.collection.clone(),
        }
    }

    pub fn apply_to(self, ctx: &mut GameContext) {
        ctx.player_name = self.player_name;
        ctx.player = self.player;
        ctx.collection = self.collection;
    }
}

/// Get the save directory (~/.kanji-battle), creating it if needed.
pub fn save_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(SAVE_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, falling back to `T::default()` when it is missing or
/// malformed.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "corrupt save file, using defaults");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Write a value as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)
}

pub fn load_settings(dir: &Path) -> Settings {
    load_json_or_default(&dir.join(SETTINGS_FILE))
}

pub fn save_settings(dir: &Path, settings: &Settings) -> io::Result<()> {
    save_json(&dir.join(SETTINGS_FILE), settings)
}

/// Load saved progress into the context. Returns false if there was none.
pub fn load_progress(dir: &Path, ctx: &mut GameContext) -> bool {
    let path = dir.join(PROGRESS_FILE);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(_) => return false,
    };

    match serde_json::from_str::<ProgressSave>(&json) {
        Ok(save) => {
            save.apply_to(ctx);
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt progress file ignored");
            false
        }
    }
}

pub fn save_progress(dir: &Path, ctx: &GameContext) -> io::Result<()> {
    save_json(&dir.join(PROGRESS_FILE), &ProgressSave::from_context(ctx))
}
