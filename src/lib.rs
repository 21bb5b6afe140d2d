//! Colonnade - a side-scrolling reflex flight through an exhibition
//!
//! Core modules:
//! - `sim`: deterministic simulation (physics, pillar stream, collisions, session state)
//! - `render`: scene building and the terminal painter
//! - `catalog`: level descriptors for the exhibition rooms
//! - `assets`: level art resolution with silent solid-color fallback
//! - `leaderboard`: score submission and ranking

pub mod assets;
pub mod catalog;
pub mod leaderboard;
pub mod render;
pub mod sim;

pub use catalog::{LevelCatalog, LevelSpec};
pub use leaderboard::{Leaderboard, ScoreEntry, ScoreService};

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Logical play field; every constant below is tuned against this size
    pub const FIELD_W: f32 = 360.0;
    pub const FIELD_H: f32 = 640.0;

    /// Nominal frame period in milliseconds (~60 Hz); wall-clock deltas are
    /// normalized against this so physics is framerate-independent
    pub const NOMINAL_FRAME_MS: f64 = 16.67;

    /// Gravity per nominal frame
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulse (upward); overwrites any accumulated velocity
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 100.0;
    pub const AVATAR_RADIUS: f32 = 15.0;

    /// Pillar stream defaults
    pub const BASE_PILLAR_WIDTH: f32 = 60.0;
    pub const BASE_GAP: f32 = 200.0;
    pub const BASE_SPEED: f32 = 3.0;
    /// The gap never shrinks below this
    pub const MIN_GAP: f32 = 120.0;
    /// A new pillar spawns once the newest one has scrolled this far in
    pub const SPAWN_THRESHOLD: f32 = 220.0;
    /// Spawn offset past the right field edge
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Smallest allowed gate offset
    pub const GATE_MIN: f32 = 40.0;
    /// Vertical space kept out of the random gate range
    pub const GATE_RESERVE: f32 = 120.0;

    /// Score that completes a timed level
    pub const LEVEL_TARGET: u32 = 4;
}

/// Axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Closest point of the rectangle to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.x + self.w),
            p.y.clamp(self.y, self.y + self.h),
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}
