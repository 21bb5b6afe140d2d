//! Scene building
//!
//! A stateless function of simulation state: background, pillar segments,
//! avatar and score overlay become a flat list of primitives in paint order.
//! Absent art degrades to solid fills here, so the painter never deals with
//! missing assets.

use glam::Vec2;

use crate::Rect;
use crate::assets::{LevelArt, Sprite};
use crate::sim::{Difficulty, GameState, pillar_segments};

/// Background fill when no level art resolves
pub const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];

/// Avatar fill
pub const AVATAR_COLOR: [u8; 3] = [250, 210, 60];

/// How a primitive is filled
#[derive(Debug, Clone, Copy)]
pub enum Paint<'a> {
    Solid([u8; 3]),
    Sprite(&'a Sprite),
}

/// A filled rectangle in field coordinates
#[derive(Debug, Clone, Copy)]
pub struct RectShape<'a> {
    pub rect: Rect,
    pub paint: Paint<'a>,
}

/// The avatar disc
#[derive(Debug, Clone, Copy)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

/// One frame's draw list
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub background: Paint<'a>,
    /// Pillar segments, two per live pillar
    pub rects: Vec<RectShape<'a>>,
    pub avatar: CircleShape,
    /// Score overlay value
    pub score: u32,
}

/// Build the frame's scene from simulation state
pub fn build_scene<'a>(
    state: &GameState,
    diff: &Difficulty,
    art: &'a LevelArt,
    pillar_color: [u8; 3],
) -> Scene<'a> {
    let top_paint = art
        .top_sprite()
        .map_or(Paint::Solid(pillar_color), Paint::Sprite);
    let bottom_paint = art
        .bottom_sprite()
        .map_or(Paint::Solid(pillar_color), Paint::Sprite);

    let mut rects = Vec::with_capacity(state.pillars.len() * 2);
    for pillar in &state.pillars {
        let (top, bottom) = pillar_segments(pillar, diff.gap, diff.pillar_width);
        rects.push(RectShape {
            rect: top,
            paint: top_paint,
        });
        rects.push(RectShape {
            rect: bottom,
            paint: bottom_paint,
        });
    }

    Scene {
        background: art
            .background
            .as_ref()
            .map_or(Paint::Solid(BACKGROUND_COLOR), Paint::Sprite),
        rects,
        avatar: CircleShape {
            center: Vec2::new(state.avatar.x, state.avatar.y),
            radius: state.avatar.radius,
            color: AVATAR_COLOR,
        },
        score: state.score,
    }
}
