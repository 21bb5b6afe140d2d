//! Level art resolution
//!
//! An image reference resolves to a drawable sprite, or silently to nothing.
//! A miss is recorded as absent and never retried; the renderer falls back
//! to solid colors wherever art is absent.

use crate::catalog::LevelSpec;

/// Decoded RGB sprite
#[derive(Debug, Clone)]
pub struct Sprite {
    w: u32,
    h: u32,
    px: Vec<[u8; 3]>,
}

impl Sprite {
    fn from_rgb(img: image::RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let px = img.pixels().map(|p| p.0).collect();
        Self { w, h, px }
    }

    /// Nearest-neighbor sample at normalized coordinates, clamped to the
    /// sprite bounds. A degenerate sprite samples black.
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        if self.px.is_empty() {
            return [0, 0, 0];
        }
        let x = ((u * self.w as f32) as u32).min(self.w - 1);
        let y = ((v * self.h as f32) as u32).min(self.h - 1);
        self.px[(y * self.w + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    #[cfg(test)]
    pub(crate) fn solid(w: u32, h: u32, color: [u8; 3]) -> Self {
        Self {
            w,
            h,
            px: vec![color; (w * h) as usize],
        }
    }
}

/// Resolve one image reference. Failure is not an error: the sprite is
/// simply absent.
pub fn load_sprite(path: &str) -> Option<Sprite> {
    match image::open(path) {
        Ok(img) => Some(Sprite::from_rgb(img.to_rgb8())),
        Err(err) => {
            log::debug!("level art {path} unavailable: {err}");
            None
        }
    }
}

/// Art bundle for one level, every reference resolved up front
#[derive(Debug, Clone, Default)]
pub struct LevelArt {
    pub background: Option<Sprite>,
    pub pillar: Option<Sprite>,
    pub pillar_top: Option<Sprite>,
    pub pillar_bottom: Option<Sprite>,
    pub milestone: Option<Sprite>,
}

impl LevelArt {
    /// No art at all: arcade mode, solid-color rendering throughout
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve every reference of a level descriptor
    pub fn resolve(spec: &LevelSpec) -> Self {
        let load = |r: &Option<String>| r.as_deref().and_then(load_sprite);
        Self {
            background: load(&spec.background),
            pillar: load(&spec.pillar),
            pillar_top: load(&spec.pillar_top),
            pillar_bottom: load(&spec.pillar_bottom),
            milestone: load(&spec.milestone_image),
        }
    }

    /// Art for the top pillar segment: dedicated image first, then the
    /// shared one
    pub fn top_sprite(&self) -> Option<&Sprite> {
        self.pillar_top.as_ref().or(self.pillar.as_ref())
    }

    /// Art for the bottom pillar segment
    pub fn bottom_sprite(&self) -> Option<&Sprite> {
        self.pillar_bottom.as_ref().or(self.pillar.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_is_absent() {
        assert!(load_sprite("/nonexistent/art.png").is_none());
    }

    #[test]
    fn test_unresolved_spec_yields_empty_bundle() {
        let spec = LevelSpec {
            name: "Room".into(),
            background: Some("/nonexistent/bg.jpg".into()),
            pillar: Some("/nonexistent/pillar.png".into()),
            pillar_top: None,
            pillar_bottom: None,
            milestone_image: None,
            milestone_text: "text".into(),
        };
        let art = LevelArt::resolve(&spec);
        assert!(art.background.is_none());
        assert!(art.top_sprite().is_none());
        assert!(art.bottom_sprite().is_none());
    }

    #[test]
    fn test_segment_sprite_priority() {
        let shared = Sprite::solid(2, 2, [1, 1, 1]);
        let dedicated = Sprite::solid(2, 2, [2, 2, 2]);

        let art = LevelArt {
            pillar: Some(shared.clone()),
            pillar_top: Some(dedicated),
            ..LevelArt::none()
        };
        assert_eq!(art.top_sprite().unwrap().sample(0.0, 0.0), [2, 2, 2]);
        // No dedicated bottom: the shared image covers it
        assert_eq!(art.bottom_sprite().unwrap().sample(0.0, 0.0), [1, 1, 1]);
    }

    #[test]
    fn test_sample_clamps_to_bounds() {
        let sprite = Sprite::solid(4, 4, [9, 9, 9]);
        assert_eq!(sprite.sample(1.0, 1.0), [9, 9, 9]);
        assert_eq!(sprite.sample(0.999, 0.0), [9, 9, 9]);
    }
}
