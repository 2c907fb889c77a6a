//! Game state and core simulation types
//!
//! `GameState` is owned by the host and mutated only by `tick` and the
//! transition helpers below. Level geometry is read-only once generated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, aabb_collision};
use super::level::{Level, World, generate};
use super::rect::Rect;
use crate::consts::*;

/// Current gameplay mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Normal physics
    Playing,
    /// Death animation; the level restarts when it ends
    Dying { elapsed: f32 },
    /// Level-complete animation; the next level loads when it ends
    Completing { elapsed: f32 },
}

impl Mode {
    pub fn is_playing(&self) -> bool {
        matches!(self, Mode::Playing)
    }

    /// Length of the active transition (0 while playing)
    pub fn duration(&self) -> f32 {
        match self {
            Mode::Playing => 0.0,
            Mode::Dying { .. } => DEATH_DURATION,
            Mode::Completing { .. } => COMPLETE_DURATION,
        }
    }

    /// Transition progress in [0, 1] for overlay animation
    pub fn progress(&self) -> f32 {
        match *self {
            Mode::Playing => 0.0,
            Mode::Dying { elapsed } | Mode::Completing { elapsed } => {
                (elapsed / self.duration()).clamp(0.0, 1.0)
            }
        }
    }
}

/// Notifications produced during a tick, drained by the host afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was (re)loaded
    LevelChanged(u32),
    Jump,
    Footstep,
    DeathStarted,
    LevelCompleteStarted,
}

/// The player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: i8,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_W, PLAYER_H),
            on_ground: false,
            facing: 1,
        }
    }

    /// Back to the level start, at rest
    pub fn reset(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Push out of `solid` if overlapping, zeroing velocity on the resolved axis.
    /// Landing on top marks the player grounded.
    pub fn resolve_against(&mut self, solid: &Rect) -> Option<Contact> {
        let hit = aabb_collision(&self.rect(), solid)?;
        self.pos = hit.position;
        if hit.contact.is_horizontal() {
            self.vel.x = 0.0;
        } else {
            self.vel.y = 0.0;
            self.on_ground |= hit.contact == Contact::Top;
        }
        Some(hit.contact)
    }

    /// Keep the player inside the world horizontally
    pub fn clamp_x(&mut self, world: &World) {
        self.pos.x = self.pos.x.clamp(0.0, (world.width - self.size.x).max(0.0));
    }
}

/// Scrolling camera (top-left of the view in world space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Where the camera wants to be for a player at `player_x`
    pub fn target_x(player_x: f32, world_width: f32, viewport_width: f32) -> f32 {
        let max_x = (world_width - viewport_width).max(0.0);
        (player_x - CAMERA_MARGIN_X).clamp(0.0, max_x)
    }

    /// Ease toward the target by a fixed fraction per tick
    pub fn follow(&mut self, player_x: f32, world_width: f32, viewport_width: f32) {
        let target = Self::target_x(player_x, world_width, viewport_width);
        self.x += (target - self.x) * CAMERA_EASE;
        self.y = 0.0;
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current level index (1-based)
    pub level_index: u32,
    pub level: Level,
    pub player: Player,
    pub camera: Camera,
    pub mode: Mode,
    /// Host viewport width in world pixels (for camera clamping)
    pub viewport_width: f32,
    /// Countdown to the next footstep
    pub step_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start at `level_index` (clamped to at least 1)
    pub fn new(level_index: u32) -> Self {
        let level_index = level_index.max(1);
        let level = generate(level_index);
        let player = Player::new(level.player_start);
        Self {
            level_index,
            level,
            player,
            camera: Camera::default(),
            mode: Mode::Playing,
            viewport_width: DEFAULT_VIEWPORT_W,
            step_timer: 0.0,
            time_ticks: 0,
            events: vec![GameEvent::LevelChanged(level_index)],
        }
    }

    pub fn world(&self) -> World {
        self.level.world
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        }
    }

    /// Every 10th level gets an extra celebration in the UI
    pub fn is_milestone_level(&self) -> bool {
        self.level_index % 10 == 0
    }

    /// Load `index` and put the player at its start
    pub fn load_level(&mut self, index: u32) {
        self.level_index = index.max(1);
        self.reset_level();
    }

    /// Regenerate the current level and reset player, camera and mode
    pub fn reset_level(&mut self) {
        self.level = generate(self.level_index);
        self.player.reset(self.level.player_start);
        self.camera = Camera::default();
        self.mode = Mode::Playing;
        self.step_timer = 0.0;
        log::info!("Level {} started", self.level_index);
        self.emit(GameEvent::LevelChanged(self.level_index));
    }

    pub fn next_level(&mut self) {
        self.load_level(self.level_index.saturating_add(1));
    }

    /// Enter Dying. No-op while any transition is already running.
    /// Returns whether the transition started.
    pub fn begin_death(&mut self) -> bool {
        if !self.mode.is_playing() {
            return false;
        }
        self.mode = Mode::Dying { elapsed: 0.0 };
        self.player.vel = Vec2::ZERO;
        log::info!("Died on level {}", self.level_index);
        self.emit(GameEvent::DeathStarted);
        true
    }

    /// Enter Completing. No-op while any transition is already running.
    pub fn begin_complete(&mut self) -> bool {
        if !self.mode.is_playing() {
            return false;
        }
        self.mode = Mode::Completing { elapsed: 0.0 };
        self.player.vel = Vec2::ZERO;
        log::info!("Level {} complete", self.level_index);
        self.emit(GameEvent::LevelCompleteStarted);
        true
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_announces_level() {
        let mut state = GameState::new(1);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelChanged(1)]);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.player.pos, state.level.player_start);
        assert!(state.mode.is_playing());
    }

    #[test]
    fn test_pending_events_peek_without_draining() {
        let mut state = GameState::new(4);
        assert_eq!(state.pending_events(), [GameEvent::LevelChanged(4)]);
        state.begin_death();
        assert_eq!(state.pending_events().len(), 2);
        state.drain_events();
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_level_index_floor() {
        let state = GameState::new(0);
        assert_eq!(state.level_index, 1);
    }

    #[test]
    fn test_death_blocked_while_completing() {
        let mut state = GameState::new(1);
        assert!(state.begin_complete());
        assert!(!state.begin_death());
        assert!(matches!(state.mode, Mode::Completing { .. }));
    }

    #[test]
    fn test_complete_blocked_while_dying() {
        let mut state = GameState::new(1);
        assert!(state.begin_death());
        assert!(!state.begin_complete());
        assert!(matches!(state.mode, Mode::Dying { .. }));
    }

    #[test]
    fn test_transition_entry_is_idempotent() {
        let mut state = GameState::new(1);
        state.drain_events();
        state.player.vel = Vec2::new(50.0, -20.0);
        assert!(state.begin_death());
        assert_eq!(state.player.vel, Vec2::ZERO);
        state.mode = Mode::Dying { elapsed: 0.5 };
        assert!(!state.begin_death());
        // Timer not restarted
        assert_eq!(state.mode, Mode::Dying { elapsed: 0.5 });
        assert_eq!(state.drain_events(), vec![GameEvent::DeathStarted]);
    }

    #[test]
    fn test_next_level_resets_everything() {
        let mut state = GameState::new(4);
        state.player.pos = Vec2::new(900.0, 100.0);
        state.camera.x = 500.0;
        state.mode = Mode::Completing { elapsed: 2.0 };
        state.drain_events();

        state.next_level();
        assert_eq!(state.level_index, 5);
        assert_eq!(state.level.index, 5);
        assert_eq!(state.player.pos, state.level.player_start);
        assert_eq!(state.camera, Camera::default());
        assert!(state.mode.is_playing());
        assert_eq!(state.drain_events(), vec![GameEvent::LevelChanged(5)]);
    }

    #[test]
    fn test_milestone_levels() {
        assert!(GameState::new(10).is_milestone_level());
        assert!(GameState::new(30).is_milestone_level());
        assert!(!GameState::new(11).is_milestone_level());
    }

    #[test]
    fn test_viewport_rejects_bad_width() {
        let mut state = GameState::new(1);
        state.set_viewport_width(f32::NAN);
        state.set_viewport_width(-5.0);
        assert_eq!(state.viewport_width, DEFAULT_VIEWPORT_W);
        state.set_viewport_width(1280.0);
        assert_eq!(state.viewport_width, 1280.0);
    }

    #[test]
    fn test_mode_progress() {
        assert_eq!(Mode::Playing.progress(), 0.0);
        let half = Mode::Dying {
            elapsed: DEATH_DURATION / 2.0,
        };
        assert!((half.progress() - 0.5).abs() < 1e-6);
        let over = Mode::Completing { elapsed: 10.0 };
        assert_eq!(over.progress(), 1.0);
    }

    #[test]
    fn test_player_resolve_sets_ground() {
        let mut player = Player::new(Vec2::new(30.0, 262.0));
        player.vel = Vec2::new(10.0, 200.0);
        let contact = player.resolve_against(&Rect::new(0.0, 300.0, 180.0, 20.0));
        assert_eq!(contact, Some(Contact::Top));
        assert!(player.on_ground);
        assert_eq!(player.vel, Vec2::new(10.0, 0.0));
        assert_eq!(player.pos.y, 260.0);
    }

    #[test]
    fn test_player_resolve_head_bump() {
        let mut player = Player::new(Vec2::new(50.0, 115.0));
        player.vel = Vec2::new(40.0, -300.0);
        let contact = player.resolve_against(&Rect::new(0.0, 100.0, 200.0, 20.0));
        assert_eq!(contact, Some(Contact::Bottom));
        assert_eq!(player.pos.y, 120.0);
        assert_eq!(player.vel, Vec2::new(40.0, 0.0));
        assert!(!player.on_ground);
    }

    #[test]
    fn test_player_resolve_side_push_zeroes_vx() {
        let platform = Rect::new(100.0, 100.0, 200.0, 50.0);
        let mut player = Player::new(Vec2::new(77.0, 70.0));
        player.vel = Vec2::new(120.0, 30.0);
        let contact = player.resolve_against(&platform);
        assert_eq!(contact, Some(Contact::Left));
        assert_eq!(player.pos.x, platform.x - player.size.x);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.vel.y, 30.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_camera_target_clamped() {
        // Small world: never scrolls
        assert_eq!(Camera::target_x(500.0, 800.0, 960.0), 0.0);
        assert_eq!(Camera::target_x(100.0, 3000.0, 960.0), 0.0);
        assert_eq!(Camera::target_x(1140.0, 3000.0, 960.0), 1000.0);
        assert_eq!(Camera::target_x(2990.0, 3000.0, 960.0), 2040.0);
    }

    #[test]
    fn test_camera_eases() {
        let mut cam = Camera::default();
        cam.follow(1140.0, 3000.0, 960.0);
        assert!((cam.x - 120.0).abs() < 1e-4);
        cam.follow(1140.0, 3000.0, 960.0);
        assert!(cam.x > 120.0 && cam.x < 1000.0);
    }
}
