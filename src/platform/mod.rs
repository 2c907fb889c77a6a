//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator, FPS display)
//! - Keyboard input mapping
//!
//! Storage lives in `persistence` and `settings`.

pub mod input;
pub mod time;

pub use input::{Action, InputState};
pub use time::{FpsMeter, FrameClock};
