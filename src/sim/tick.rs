//! Fixed timestep simulation tick
//!
//! Advances the player one step against the active level and drives the
//! Playing / Dying / Completing state machine.

use super::collision::first_overlap;
use super::state::{GameEvent, GameState, Mode};
use crate::consts::*;

/// Held input directions sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    /// -1, 0 or +1
    pub fn direction(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Transitions freeze the player and only run their timer
    match state.mode {
        Mode::Dying { elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= DEATH_DURATION {
                state.reset_level();
            } else {
                state.mode = Mode::Dying { elapsed };
            }
            return;
        }
        Mode::Completing { elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= COMPLETE_DURATION {
                state.next_level();
            } else {
                state.mode = Mode::Completing { elapsed };
            }
            return;
        }
        Mode::Playing => {}
    }

    apply_input(state, input, dt);
    integrate(state, dt);
    resolve_platforms(state);
    check_triggers(state);

    let world = state.world();
    state.player.clamp_x(&world);
    if state.player.pos.y > world.height + VOID_MARGIN {
        state.begin_death();
        return;
    }
    // Band reaches past the floor so the void check above can still fire
    state.player.pos.y = state
        .player
        .pos
        .y
        .clamp(-VOID_MARGIN, world.height + VOID_MARGIN);

    state
        .camera
        .follow(state.player.pos.x, world.width, state.viewport_width);

    update_footsteps(state, dt);
}

/// Horizontal acceleration with friction, then jump
fn apply_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    let (accel, friction) = if player.on_ground {
        (MOVE_ACCEL, GROUND_FRICTION)
    } else {
        (MOVE_ACCEL * AIR_CONTROL, AIR_FRICTION)
    };

    let dir = input.direction();
    player.vel.x += dir * accel * dt;
    player.vel.x *= friction;
    if dir != 0.0 {
        player.facing = dir as i8;
    }

    if input.jump && player.on_ground {
        player.vel.y = -JUMP_VELOCITY;
        player.on_ground = false;
        state.emit(GameEvent::Jump);
    }
}

/// Semi-implicit Euler: gravity into velocity, then velocity into position
fn integrate(state: &mut GameState, dt: f32) {
    let gravity = state.level.gravity;
    let player = &mut state.player;
    player.vel.y += gravity * dt;
    player.pos += player.vel * dt;
}

fn resolve_platforms(state: &mut GameState) {
    state.player.on_ground = false;
    for platform in &state.level.platforms {
        state.player.resolve_against(&platform.rect);
    }
}

/// Goal wins over hazards touched in the same tick
fn check_triggers(state: &mut GameState) {
    let body = state.player.rect();
    let level = &state.level;
    let hit_hazard = first_overlap(&body, &level.hazards).is_some()
        || level
            .boss
            .as_ref()
            .is_some_and(|boss| body.overlaps(&boss.rect));
    let hit_goal = body.overlaps(&level.goal);

    if hit_goal {
        state.begin_complete();
    } else if hit_hazard {
        state.begin_death();
    }
}

/// Footstep cadence only accrues while running on the ground
fn update_footsteps(state: &mut GameState, dt: f32) {
    let player = &state.player;
    if player.on_ground && player.vel.x.abs() > STEP_SPEED_THRESHOLD {
        state.step_timer -= dt;
        if state.step_timer <= 0.0 {
            state.step_timer = STEP_INTERVAL;
            state.emit(GameEvent::Footstep);
        }
    } else {
        state.step_timer = 0.0;
    }
}
