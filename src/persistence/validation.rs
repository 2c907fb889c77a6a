//! Save validation
//!
//! Saves come from storage the game does not control, so every value is
//! checked before it reaches the simulation.

use glam::Vec2;

use super::envelope::{PlayerSnapshot, SAVE_VERSION, SaveState};
use super::{PersistError, Result};
use crate::consts::VOID_MARGIN;
use crate::sim::{Player, World};

/// Check version and level index; returns the level to load
pub fn validate_header(save: &SaveState) -> Result<u32> {
    if save.version == 0 || save.version > SAVE_VERSION {
        return Err(PersistError::UnsupportedVersion(save.version));
    }
    if save.level_index == 0 {
        return Err(PersistError::InvalidLevel(save.level_index));
    }
    Ok(save.level_index)
}

fn finite(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite())
}

/// Write the snapshot into a freshly reset player.
///
/// Missing or non-finite components keep the reset values. Position is
/// clamped to the horizontal world span and the vertical band the tick
/// itself allows.
pub fn apply_player(snapshot: &PlayerSnapshot, player: &mut Player, world: &World) {
    let max_x = (world.width - player.size.x).max(0.0);
    let max_y = world.height - player.size.y;

    let x = finite(snapshot.x).unwrap_or(player.pos.x);
    let y = finite(snapshot.y).unwrap_or(player.pos.y);
    player.pos = Vec2::new(x.clamp(0.0, max_x), y.clamp(-VOID_MARGIN, max_y));

    player.vel = Vec2::new(
        finite(snapshot.vx).unwrap_or(0.0),
        finite(snapshot.vy).unwrap_or(0.0),
    );
}
