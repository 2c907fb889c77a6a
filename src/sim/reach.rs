//! Horizontal jump reach
//!
//! Steps the same integrator `tick` uses (input, friction, gravity, then
//! position) to find how far a running jump carries before the player's
//! feet drop back to a given height.

use crate::consts::*;

/// Iteration guard for both the run-up and the flight
const MAX_STEPS: usize = 2048;

/// Distance past the take-off edge at which the player's left edge sits when
/// the feet come down to `rise` above the take-off surface.
///
/// The run-up starts at rest `run_up` px before the edge, and the jump is
/// taken on the last tick the player is still grounded. A platform whose left
/// edge is at most this far from the edge is landed on with the whole body.
/// Returns 0 when `rise` is above the jump apex.
pub fn jump_reach(rise: f32, run_up: f32) -> f32 {
    let dt = SIM_DT;

    let mut x = 0.0_f32;
    let mut vx = 0.0_f32;
    for _ in 0..MAX_STEPS {
        let next_vx = (vx + MOVE_ACCEL * dt) * GROUND_FRICTION;
        let next_x = x + next_vx * dt;
        if next_x >= run_up {
            break;
        }
        x = next_x;
        vx = next_vx;
    }

    // Take-off tick: ground input, impulse, then integrate
    vx = (vx + MOVE_ACCEL * dt) * GROUND_FRICTION;
    let mut vy = -JUMP_VELOCITY + GRAVITY * dt;
    x += vx * dt;
    let mut height = -vy * dt;
    let mut apex = height;

    for _ in 0..MAX_STEPS {
        vx = (vx + MOVE_ACCEL * AIR_CONTROL * dt) * AIR_FRICTION;
        vy += GRAVITY * dt;
        x += vx * dt;
        height -= vy * dt;
        apex = apex.max(height);
        if vy > 0.0 && height <= rise {
            // Never got above the target
            if apex <= rise {
                return 0.0;
            }
            return x - run_up;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::max_jump_rise;

    #[test]
    fn test_reach_shrinks_with_rise() {
        let max_rise = max_jump_rise(JUMP_VELOCITY, GRAVITY);
        let mut last = f32::INFINITY;
        for rise in [-200.0, -60.0, 0.0, 40.0, 60.0, 80.0, max_rise] {
            let reach = jump_reach(rise, 80.0);
            assert!(reach < last, "reach {reach} at rise {rise}");
            last = reach;
        }
    }

    #[test]
    fn test_reach_reference_values() {
        // Flat hop from a standing start on an 80 px platform
        let flat = jump_reach(0.0, 80.0);
        assert!(flat > 200.0 && flat < 225.0, "flat {flat}");
        // Barely clearing the highest allowed step still covers the minimum gap
        let top = jump_reach(max_jump_rise(JUMP_VELOCITY, GRAVITY), 80.0);
        assert!(top > 90.0 && top < 130.0, "top {top}");
    }

    #[test]
    fn test_unreachable_height_has_no_reach() {
        assert_eq!(jump_reach(500.0, 80.0), 0.0);
    }
}
