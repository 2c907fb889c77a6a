//! Procedural level generation
//!
//! A level is a pure function of its index: the index picks a difficulty and
//! seeds a private random stream, and the generator consumes that stream in a
//! fixed order. Changing the order of draws changes every level after the
//! change, so new draws must only ever be appended.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::reach::jump_reach;
use super::rect::Rect;
use super::rng::LevelRng;
use crate::consts::*;
use crate::max_jump_rise;

/// Start platform (left edge at the world origin)
pub const START_PLATFORM_W: f32 = 180.0;
pub const PLATFORM_H: f32 = 20.0;
/// Minimum baseline height (px from world top)
pub const BASE_Y: f32 = 300.0;
/// Space kept above the highest layer
pub const LAYER_HEADROOM: f32 = 120.0;
/// Vertical jitter applied to each main platform
pub const LAYER_JITTER: f32 = 10.0;

pub const GAP_MIN: f32 = 60.0;
pub const WIDTH_MIN: f32 = 80.0;
/// Slack kept between a gap and the jump reach across it
pub const REACH_MARGIN: f32 = 12.0;

/// Bonus platforms
pub const BONUS_CHANCE: f32 = 0.25;
pub const BONUS_MIN_RISE: f32 = 40.0;
pub const BONUS_H: f32 = 18.0;

/// Hazards
pub const HAZARD_H: f32 = 10.0;
pub const HAZARD_MARGIN: f32 = 10.0;
pub const HAZARD_MIN_W: f32 = 40.0;

/// End platform and goal flag
pub const END_GAP: f32 = 60.0;
pub const END_PLATFORM_W: f32 = 180.0;
pub const END_PLATFORM_H: f32 = 22.0;
pub const GOAL_W: f32 = 28.0;
pub const GOAL_H: f32 = 44.0;

/// Boss
pub const BOSS_SIZE: f32 = 96.0;
pub const BOSS_OFFSET_X: f32 = 60.0;
pub const BOSS_LIFT: f32 = 60.0;
pub const BOSS_WORLD_EXTRA: f32 = 200.0;

/// Free space kept past the last piece of content
pub const WORLD_PAD: f32 = 300.0;

/// Role of a platform on the level's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Start,
    Main,
    /// Optional elevated platform above a main platform
    Bonus,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    fn new(kind: PlatformKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }

    /// Start, main and end platforms form the walkable path; bonus ones don't
    pub fn on_path(&self) -> bool {
        self.kind != PlatformKind::Bonus
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub rect: Rect,
    pub hp: u32,
}

/// World bounds (origin at top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    /// Bounds at least `min_width` wide that also cover `content_right + pad`
    pub fn enclosing(content_right: f32, pad: f32, min_width: f32, height: f32) -> Self {
        Self {
            width: (content_right + pad).max(min_width),
            height,
        }
    }
}

/// Generation parameters derived from the level index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub difficulty: f32,
    /// Minimum world width
    pub world_length: f32,
    pub layers: u32,
    pub platform_count: u32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub width_min: f32,
    pub width_max: f32,
    /// Height between consecutive layers
    pub layer_step: f32,
    /// y of the lowest layer
    pub baseline: f32,
}

/// Difficulty in [0, 1], linear over the first `DIFFICULTY_SPAN` levels
pub fn difficulty(index: u32) -> f32 {
    let index = index.max(1);
    ((index - 1) as f32 / DIFFICULTY_SPAN).min(1.0)
}

impl LevelParams {
    pub fn for_index(index: u32) -> Self {
        let d = difficulty(index);
        let layers = 3 + (d * 3.0) as u32;
        let layer_step = 60.0 + d * 20.0;
        // Keep the top layer inside the world
        let top_clearance = (layers - 1) as f32 * layer_step + LAYER_JITTER + LAYER_HEADROOM;

        Self {
            difficulty: d,
            world_length: 2400.0 + (d * 2600.0).floor(),
            layers,
            platform_count: 14 + (d * 20.0) as u32,
            gap_min: GAP_MIN,
            gap_max: 120.0 + (d * 80.0).floor(),
            width_min: WIDTH_MIN,
            width_max: 160.0 - d * 40.0,
            layer_step,
            baseline: BASE_Y.max(top_clearance),
        }
    }

    /// Nominal y of a layer (0 = baseline)
    pub fn layer_y(&self, layer: u32) -> f32 {
        self.baseline - layer as f32 * self.layer_step
    }
}

/// A fully generated level. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub difficulty: f32,
    /// Path and bonus platforms, left to right in generation order
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Rect>,
    pub boss: Option<Boss>,
    pub goal: Rect,
    pub world: World,
    pub gravity: f32,
    pub player_start: Vec2,
}

impl Level {
    /// Whether this index carries a boss
    pub fn has_boss_at(index: u32) -> bool {
        index % BOSS_INTERVAL == 0
    }

    /// Platforms the player walks along, in order
    pub fn path(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.on_path())
    }

    /// Optional platforms floating above the path
    pub fn bonus_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Bonus)
    }

    /// Rightmost edge of any generated content
    pub fn content_right(&self) -> f32 {
        let platforms = self.platforms.iter().map(|p| p.rect.right());
        let hazards = self.hazards.iter().map(Rect::right);
        let boss = self.boss.iter().map(|b| b.rect.right());
        platforms
            .chain(hazards)
            .chain(boss)
            .fold(self.goal.right(), f32::max)
    }
}

/// Generate the level for `index` (indices below 1 are treated as 1)
pub fn generate(index: u32) -> Level {
    let index = index.max(1);
    let params = LevelParams::for_index(index);
    let mut rng = LevelRng::for_level(index);
    let max_rise = max_jump_rise(JUMP_VELOCITY, GRAVITY);

    let mut platforms = Vec::with_capacity(params.platform_count as usize * 2 + 2);
    let mut hazards = Vec::with_capacity(params.platform_count as usize + 1);

    let start = Platform::new(
        PlatformKind::Start,
        0.0,
        params.baseline,
        START_PLATFORM_W,
        PLATFORM_H,
    );
    let mut cursor = start.rect.right();
    let mut prev_y = start.rect.y;
    platforms.push(start);

    for i in 0..params.platform_count {
        let gap = rng.range(params.gap_min, params.gap_max);
        let w = rng.range(params.width_min, params.width_max);
        let layer = i % params.layers;
        let jitter = rng.range(-LAYER_JITTER, LAYER_JITTER);
        // Never climb more than one jump above the previous path platform
        let y = (params.layer_y(layer) + jitter).max(prev_y - max_rise);
        // Never wider than a running jump at this rise carries
        let gap = gap.min(hop_reach(prev_y - y));

        let gap_start = cursor;
        let x = cursor + gap;
        platforms.push(Platform::new(PlatformKind::Main, x, y, w, PLATFORM_H));

        if rng.chance(BONUS_CHANCE) {
            let bx = x + rng.range(20.0, w - 30.0);
            let rise = rng.range(BONUS_MIN_RISE, max_rise);
            let bw = rng.range(40.0, 70.0);
            platforms.push(Platform::new(PlatformKind::Bonus, bx, y - rise, bw, BONUS_H));
        }

        let hazard_y = params.baseline + rng.range(18.0, 30.0);
        hazards.push(gap_hazard(gap_start, gap, hazard_y));

        cursor = x + w;
        prev_y = y;
    }

    let end_jitter = rng.range(-LAYER_JITTER, LAYER_JITTER);
    let end_y = (params.layer_y(params.layers - 1) + end_jitter).max(prev_y - max_rise);
    let end_gap = END_GAP.min(hop_reach(prev_y - end_y));
    // Run-up gap is fixed, so its hazard consumes no draws
    hazards.push(gap_hazard(cursor, end_gap, params.baseline + 24.0));
    let end = Platform::new(
        PlatformKind::End,
        cursor + end_gap,
        end_y,
        END_PLATFORM_W,
        END_PLATFORM_H,
    );
    let end_rect = end.rect;
    platforms.push(end);

    let goal = Rect::new(
        end_rect.center().x - GOAL_W * 0.5,
        end_rect.y - GOAL_H,
        GOAL_W,
        GOAL_H,
    );

    let (boss, pad) = if Level::has_boss_at(index) {
        let boss = Boss {
            rect: Rect::new(
                end_rect.right() + BOSS_OFFSET_X,
                end_rect.y - BOSS_LIFT,
                BOSS_SIZE,
                BOSS_SIZE,
            ),
            hp: 1,
        };
        (Some(boss), WORLD_PAD + BOSS_WORLD_EXTRA)
    } else {
        (None, WORLD_PAD)
    };

    let world = World::enclosing(end_rect.right(), pad, params.world_length, WORLD_HEIGHT);
    let player_start = Vec2::new(30.0, platforms[0].rect.y - PLAYER_H);

    log::info!(
        "Level {}: difficulty={:.3} platforms={} hazards={} boss={} world={}x{} draws={}",
        index,
        params.difficulty,
        platforms.len(),
        hazards.len(),
        boss.is_some(),
        world.width,
        world.height,
        rng.draws()
    );

    Level {
        index,
        difficulty: params.difficulty,
        platforms,
        hazards,
        boss,
        goal,
        world,
        gravity: GRAVITY,
        player_start,
    }
}

/// Widest gap a hop rising `rise` px may have, from a standing start on the
/// narrowest platform
pub fn hop_reach(rise: f32) -> f32 {
    jump_reach(rise, WIDTH_MIN) - REACH_MARGIN
}

/// Hazard strip filling the gap `[gap_start, gap_start + gap]`, just below the baseline
fn gap_hazard(gap_start: f32, gap: f32, y: f32) -> Rect {
    let w = (gap - HAZARD_MARGIN).max(HAZARD_MIN_W);
    Rect::new(gap_start + (gap - w) * 0.5, y, w, HAZARD_H)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn check_gap_coverage(level: &Level) {
        let path: Vec<_> = level.path().collect();
        for pair in path.windows(2) {
            let (a, b) = (pair[0].rect, pair[1].rect);
            let gap = b.left() - a.right();
            assert!(gap > 0.0, "path platforms must not touch");
            let covered = level.hazards.iter().any(|h| {
                h.left() >= a.right() - EPS
                    && h.right() <= a.right() + gap + EPS
                    && h.w >= gap - HAZARD_MARGIN - EPS
            });
            assert!(covered, "gap at x={} (len {}) has no hazard", a.right(), gap);
        }
    }

    fn check_bonus_reachability(level: &Level) {
        let max_rise = max_jump_rise(JUMP_VELOCITY, GRAVITY);
        let mut anchor_y = None;
        for p in &level.platforms {
            match p.kind {
                PlatformKind::Main => anchor_y = Some(p.rect.y),
                PlatformKind::Bonus => {
                    let anchor = anchor_y.expect("bonus platform must follow a main platform");
                    let rise = anchor - p.rect.y;
                    assert!(rise <= max_rise + EPS, "bonus rise {rise} above {max_rise}");
                    assert!(rise >= BONUS_MIN_RISE - EPS, "bonus rise {rise} below minimum");
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        for index in [1, 2, 20, 777] {
            let a = serde_json::to_string(&generate(index)).unwrap();
            let b = serde_json::to_string(&generate(index)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_neighbouring_levels_differ() {
        assert_ne!(generate(5).platforms, generate(6).platforms);
    }

    #[test]
    fn test_boss_placement() {
        assert!(generate(20).boss.is_some());
        assert!(generate(40).boss.is_some());
        assert!(generate(21).boss.is_none());
        assert!(generate(1).boss.is_none());
    }

    #[test]
    fn test_boss_widens_world() {
        let level = generate(20);
        let boss = level.boss.as_ref().unwrap();
        assert!(boss.rect.right() <= level.world.width);
        assert_eq!(boss.hp, 1);
    }

    #[test]
    fn test_index_zero_treated_as_one() {
        assert_eq!(generate(0), generate(1));
        assert_eq!(difficulty(0), 0.0);
    }

    #[test]
    fn test_difficulty_saturates() {
        assert_eq!(difficulty(1), 0.0);
        assert!((difficulty(2501) - 0.5).abs() < 1e-6);
        assert_eq!(difficulty(5001), 1.0);
        assert_eq!(difficulty(u32::MAX), 1.0);
    }

    #[test]
    fn test_first_level_shape() {
        let level = generate(1);
        let params = LevelParams::for_index(1);
        assert_eq!(params.platform_count, 14);
        assert_eq!(params.layers, 3);
        assert_eq!(level.path().count(), 14 + 2);
        // One hazard per main gap plus the run-up to the end platform
        assert_eq!(level.hazards.len(), 15);
        assert_eq!(level.platforms[0].kind, PlatformKind::Start);
        assert_eq!(level.platforms.last().unwrap().kind, PlatformKind::End);
    }

    #[test]
    fn test_player_starts_on_first_platform() {
        let level = generate(3);
        let start = level.platforms[0].rect;
        assert_eq!(level.player_start.y + PLAYER_H, start.top());
        assert!(level.player_start.x >= start.left());
        assert!(level.player_start.x + PLAYER_W <= start.right());
    }

    #[test]
    fn test_goal_sits_on_end_platform() {
        let level = generate(12);
        let end = level.path().last().unwrap().rect;
        assert!((level.goal.bottom() - end.top()).abs() < EPS);
        assert!((level.goal.center().x - end.center().x).abs() < EPS);
    }

    #[test]
    fn test_high_difficulty_stays_in_world() {
        let level = generate(9000);
        for p in &level.platforms {
            assert!(p.rect.top() >= 0.0, "platform above world top: {:?}", p.rect);
        }
        for h in &level.hazards {
            assert!(h.bottom() <= level.world.height);
        }
    }

    #[test]
    fn test_params_ranges_move_with_difficulty() {
        let easy = LevelParams::for_index(1);
        let hard = LevelParams::for_index(5001);
        assert!(hard.gap_max > easy.gap_max);
        assert!(hard.width_max < easy.width_max);
        assert!(hard.layers > easy.layers);
        assert_eq!(hard.gap_min, GAP_MIN);
        assert_eq!(hard.width_min, WIDTH_MIN);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_bonus_platforms_reachable(index in 1u32..6000) {
            check_bonus_reachability(&generate(index));
        }

        #[test]
        fn prop_bonus_platforms_start_over_path(index in 1u32..6000) {
            let level = generate(index);
            for bonus in level.bonus_platforms() {
                let left = bonus.rect.left();
                prop_assert!(level.path().any(|p| p.rect.left() < left && left < p.rect.right()));
            }
        }

        #[test]
        fn prop_every_gap_has_hazard(index in 1u32..6000) {
            check_gap_coverage(&generate(index));
        }

        #[test]
        fn prop_world_contains_content(index in 1u32..6000) {
            let level = generate(index);
            prop_assert!(level.content_right() <= level.world.width);
            prop_assert!(level.world.width >= LevelParams::for_index(index).world_length);
        }

        #[test]
        fn prop_path_hops_within_reach(index in 1u32..6000) {
            let level = generate(index);
            let max_rise = max_jump_rise(JUMP_VELOCITY, GRAVITY);
            let path: Vec<_> = level.path().collect();
            for pair in path.windows(2) {
                let (a, b) = (pair[0].rect, pair[1].rect);
                let rise = a.y - b.y;
                let gap = b.left() - a.right();
                prop_assert!(rise <= max_rise + EPS, "rise {} above {}", rise, max_rise);
                prop_assert!(
                    gap <= hop_reach(rise) + 0.01,
                    "gap {} beyond reach {} at rise {}",
                    gap,
                    hop_reach(rise),
                    rise
                );
            }
        }

        #[test]
        fn prop_difficulty_monotonic(a in 1u32..5002, b in 1u32..5002) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = LevelParams::for_index(lo);
            let p_hi = LevelParams::for_index(hi);
            prop_assert!(p_lo.world_length <= p_hi.world_length);
            prop_assert!(p_lo.platform_count <= p_hi.platform_count);
            prop_assert!(p_lo.difficulty <= p_hi.difficulty);
        }
    }
}
