//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope (`SaveState`)
//! - Validation and clamping when a save is applied to a fresh level
//! - Fallback to the key used by earlier web builds
//! - LocalStorage backend on web, no-op on native

pub mod envelope;
pub mod storage;
pub mod validation;

use thiserror::Error;

pub use envelope::{PlayerSnapshot, SAVE_VERSION, SaveState};

/// LocalStorage key for the in-progress run
pub const SAVE_KEY: &str = "ridge_runner_state_v1";

/// Key earlier web builds saved under. Read only, and only when `SAVE_KEY` is empty.
pub const LEGACY_SAVE_KEY: &str = "platformer_state_v1";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid level index {0}")]
    InvalidLevel(u32),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// Read the saved run, if any
pub fn load_save() -> Result<Option<SaveState>> {
    let current = storage::read(SAVE_KEY)?;
    let legacy = match current {
        Some(_) => None,
        None => storage::read(LEGACY_SAVE_KEY)?,
    };
    parse_stored(current.as_deref(), legacy.as_deref())
}

/// Parse whichever stored save wins: the current key, else the legacy one
fn parse_stored(current: Option<&str>, legacy: Option<&str>) -> Result<Option<SaveState>> {
    if let Some(json) = current {
        return SaveState::from_json(json).map(Some);
    }
    let Some(json) = legacy else {
        return Ok(None);
    };
    log::info!("Migrating save from {}", LEGACY_SAVE_KEY);
    SaveState::from_json(json).map(Some)
}

/// Write the run to storage
pub fn write_save(save: &SaveState) -> Result<()> {
    storage::write(SAVE_KEY, &save.to_json()?)?;
    log::info!("Saved progress at level {}", save.level_index);
    Ok(())
}

/// Drop the saved run under both keys
pub fn clear_save() -> Result<()> {
    storage::remove(SAVE_KEY)?;
    storage::remove(LEGACY_SAVE_KEY)
}
