//! Axis-aligned rectangles for level geometry and the player box
//!
//! Screen convention: x grows right, y grows down, (x, y) is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with top-left at `pos` and extent `size`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test (touching edges do not overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Length of the shared horizontal span (0 if disjoint)
    pub fn overlap_x(&self, other: &Rect) -> f32 {
        span_overlap(self.x, self.w, other.x, other.w)
    }

    /// Length of the shared vertical span (0 if disjoint)
    pub fn overlap_y(&self, other: &Rect) -> f32 {
        span_overlap(self.y, self.h, other.y, other.h)
    }
}

/// Overlap of two 1D spans `[a, a + a_len)` and `[b, b + b_len)`
#[inline]
pub fn span_overlap(a: f32, a_len: f32, b: f32, b_len: f32) -> f32 {
    let lo = a.max(b);
    let hi = (a + a_len).min(b + b_len);
    (hi - lo).max(0.0)
}
