//! Versioned save envelope
//!
//! JSON layout (camelCase, matches saves written by earlier web builds that
//! had no `version` field):
//!
//! ```json
//! { "version": 1, "levelIndex": 7,
//!   "player": { "x": 812.5, "y": 260.0, "vx": 40.0, "vy": 0.0 },
//!   "timestamp": 1760000000000 }
//! ```

use serde::{Deserialize, Serialize};

use super::validation::{apply_player, validate_header};
use super::{PersistError, Result};
use crate::sim::GameState;

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SAVE_VERSION
}

/// Player position and velocity at save time.
///
/// Every field is optional; absent or non-finite values fall back to the
/// level start position and zero velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub vx: Option<f32>,
    #[serde(default)]
    pub vy: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub level_index: u32,
    #[serde(default)]
    pub player: Option<PlayerSnapshot>,
    /// Wall-clock time of the save in ms since the Unix epoch
    #[serde(default)]
    pub timestamp: f64,
}

impl SaveState {
    /// Snapshot the level and player of a running game
    pub fn capture(state: &GameState, timestamp: f64) -> Self {
        let player = &state.player;
        Self {
            version: SAVE_VERSION,
            level_index: state.level_index,
            player: Some(PlayerSnapshot {
                x: Some(player.pos.x),
                y: Some(player.pos.y),
                vx: Some(player.vel.x),
                vy: Some(player.vel.y),
            }),
            timestamp,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the saved level into `state` and place the player.
    ///
    /// `state` is left untouched when the save is rejected.
    pub fn restore(&self, state: &mut GameState) -> Result<()> {
        let index = validate_header(self)?;
        state.load_level(index);
        if let Some(snapshot) = &self.player {
            apply_player(snapshot, &mut state.player, &state.level.world);
        }
        log::info!("Restored save at level {}", index);
        Ok(())
    }
}

impl TryFrom<&str> for SaveState {
    type Error = PersistError;

    fn try_from(json: &str) -> Result<Self> {
        Self::from_json(json)
    }
}
