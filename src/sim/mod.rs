//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, one private stream per level
//! - Stable iteration order (platforms in generation order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod reach;
pub mod rect;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Contact, aabb_collision};
pub use level::{
    Boss, Level, LevelParams, Platform, PlatformKind, World, difficulty, generate, hop_reach,
};
pub use reach::jump_reach;
pub use rect::Rect;
pub use rng::LevelRng;
pub use state::{Camera, GameEvent, GameState, Mode, Player};
pub use tick::{TickInput, tick};
