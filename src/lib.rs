//! Ridge Runner - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, game state)
//! - `platform`: Frame timing and input mapping for the browser host
//! - `persistence`: Save/restore of progress with validation
//! - `settings`: Player preferences

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use persistence::{PersistError, SaveState};
pub use platform::{Action, FpsMeter, FrameClock, InputState};
pub use settings::Settings;
pub use sim::{GameEvent, GameState, Level, Mode, TickInput, generate, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to the accumulator (stall protection)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Player box
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 40.0;

    /// Horizontal acceleration while a direction is held (px/s²)
    pub const MOVE_ACCEL: f32 = 1200.0;
    /// Acceleration multiplier while airborne
    pub const AIR_CONTROL: f32 = 0.6;
    /// Per-tick horizontal velocity multipliers
    pub const GROUND_FRICTION: f32 = 0.85;
    pub const AIR_FRICTION: f32 = 0.98;
    /// Upward speed applied on jump (px/s, applied as negative vy)
    pub const JUMP_VELOCITY: f32 = 480.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1200.0;

    /// Transition animation lengths (seconds)
    pub const DEATH_DURATION: f32 = 1.2;
    pub const COMPLETE_DURATION: f32 = 1.6;

    /// Distance below the world floor that counts as falling into the void
    pub const VOID_MARGIN: f32 = 200.0;

    /// Camera follow
    pub const CAMERA_MARGIN_X: f32 = 140.0;
    pub const CAMERA_EASE: f32 = 0.12;
    pub const DEFAULT_VIEWPORT_W: f32 = 960.0;

    /// Footstep cadence
    pub const STEP_SPEED_THRESHOLD: f32 = 60.0;
    pub const STEP_INTERVAL: f32 = 0.24;

    /// World height shared by every level
    pub const WORLD_HEIGHT: f32 = 900.0;
    /// Levels at which difficulty saturates
    pub const DIFFICULTY_SPAN: f32 = 5000.0;
    /// Every Nth level carries a boss
    pub const BOSS_INTERVAL: u32 = 20;
}

/// Highest rise (px) a grounded jump can clear onto a platform, with a small
/// safety allowance. Clamped to [40, 120].
#[inline]
pub fn max_jump_rise(jump_velocity: f32, gravity: f32) -> f32 {
    let apex = jump_velocity * jump_velocity / (2.0 * gravity);
    (apex - 8.0).clamp(40.0, 120.0)
}
