//! Collision detection and response for axis-aligned boxes
//!
//! Overlaps are resolved one solid at a time along the axis of least
//! penetration (the minimum translation). There is no combined solve: a body
//! wedged between two solids is pushed by each in turn.

use glam::Vec2;

use super::rect::Rect;

/// Side of the solid the body ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pushed out to the left (body center was left of solid center)
    Left,
    Right,
    /// Pushed up onto the solid's top face
    Top,
    /// Pushed down below the solid
    Bottom,
}

impl Contact {
    /// True when the push was horizontal
    pub fn is_horizontal(self) -> bool {
        matches!(self, Contact::Left | Contact::Right)
    }
}

/// Result of resolving one overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub contact: Contact,
    /// Corrected top-left position of the body
    pub position: Vec2,
    /// Penetration depth along the resolved axis
    pub penetration: f32,
}

/// Resolve `body` out of `solid` along the axis with the smaller overlap.
///
/// Returns `None` when the boxes do not overlap. Equal overlaps resolve
/// vertically so a body landing exactly on a corner stands on it.
pub fn aabb_collision(body: &Rect, solid: &Rect) -> Option<CollisionResult> {
    if !body.overlaps(solid) {
        return None;
    }

    let overlap_x = body.overlap_x(solid);
    let overlap_y = body.overlap_y(solid);
    let body_center = body.center();
    let solid_center = solid.center();

    let (contact, position, penetration) = if overlap_x < overlap_y {
        if body_center.x < solid_center.x {
            (Contact::Left, Vec2::new(solid.x - body.w, body.y), overlap_x)
        } else {
            (Contact::Right, Vec2::new(solid.right(), body.y), overlap_x)
        }
    } else if body_center.y < solid_center.y {
        (Contact::Top, Vec2::new(body.x, solid.y - body.h), overlap_y)
    } else {
        (Contact::Bottom, Vec2::new(body.x, solid.bottom()), overlap_y)
    };

    Some(CollisionResult {
        contact,
        position,
        penetration,
    })
}

/// Index of the first rectangle overlapping `body`
pub fn first_overlap(body: &Rect, rects: &[Rect]) -> Option<usize> {
    rects.iter().position(|r| body.overlaps(r))
}
