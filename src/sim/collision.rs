//! Collision predicates
//!
//! Circle-vs-rectangle overlap, applied to both segments of every live
//! pillar, plus the field boundary rule. All functions are total over
//! well-formed numeric input.

use glam::Vec2;

use crate::Rect;
use crate::consts::FIELD_H;

use super::difficulty::Difficulty;
use super::state::{Avatar, Pillar};

/// Circle/rectangle overlap: clamp the center into the rectangle to find the
/// nearest point, then compare squared distance against squared radius.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: Rect) -> bool {
    let nearest = rect.clamp_point(center);
    center.distance_squared(nearest) < radius * radius
}

/// Collision rectangles of a pillar's top and bottom segments under the
/// current gap and width.
pub fn pillar_segments(pillar: &Pillar, gap: f32, width: f32) -> (Rect, Rect) {
    let top = Rect::new(pillar.x, 0.0, width, pillar.gate);
    let bottom = Rect::new(
        pillar.x,
        pillar.gate + gap,
        width,
        FIELD_H - pillar.gate - gap,
    );
    (top, bottom)
}

/// Whether the avatar overlaps either segment of the pillar
pub fn avatar_hits_pillar(avatar: &Avatar, pillar: &Pillar, diff: &Difficulty) -> bool {
    let center = Vec2::new(avatar.x, avatar.y);
    let (top, bottom) = pillar_segments(pillar, diff.gap, diff.pillar_width);
    circle_rect_overlap(center, avatar.radius, top)
        || circle_rect_overlap(center, avatar.radius, bottom)
}

/// Boundary rule: the avatar has crashed if its circle extends above the
/// ceiling or below the floor, independent of any pillar.
#[inline]
pub fn out_of_bounds(avatar: &Avatar) -> bool {
    avatar.y + avatar.radius > FIELD_H || avatar.y - avatar.radius < 0.0
}
