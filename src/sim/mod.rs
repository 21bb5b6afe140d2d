//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Normalized frame deltas only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod state;
pub mod step;

pub use clock::FrameClock;
pub use collision::{circle_rect_overlap, out_of_bounds, pillar_segments};
pub use difficulty::Difficulty;
pub use state::{Avatar, GameMode, GamePhase, GameState, Pillar};
pub use step::{FrameInput, step};
