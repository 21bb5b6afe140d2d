//! Rendering
//!
//! `scene` maps simulation state to draw primitives; `term` rasterizes a
//! scene into a terminal pixel grid. The simulation never sees either side,
//! and swapping the painter cannot change a game's outcome.

pub mod scene;
pub mod term;

pub use scene::{Paint, Scene, build_scene};
pub use term::{PixelBuf, Viewport};
