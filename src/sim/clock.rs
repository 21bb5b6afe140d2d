//! Frame timing
//!
//! The driver runs one simulation step per display refresh and normalizes
//! real elapsed wall time by the nominal frame period, so physics advances
//! at the same rate regardless of the actual refresh rate.

use crate::consts::NOMINAL_FRAME_MS;

/// Turns wall-clock milliseconds into normalized frame deltas (1.0 == one
/// nominal frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the clock at `now`. Called on (re)start so time spent suspended
    /// never turns into one giant delta.
    pub fn anchor(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Normalized delta since the previous frame. An unanchored clock (or a
    /// backwards wall clock) yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last) / NOMINAL_FRAME_MS).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }
}
