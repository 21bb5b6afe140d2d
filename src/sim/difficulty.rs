//! Difficulty scaling
//!
//! Pure function of mode and progress, re-evaluated every frame so endless
//! play tightens continuously as the score rises.

use crate::consts::*;

use super::state::GameMode;

/// Per-frame derived tuning values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Scalar multiplier, >= 1
    pub factor: f32,
    /// Vertical gate size
    pub gap: f32,
    /// Leftward pillar speed per nominal frame
    pub speed: f32,
    /// Pillar width
    pub pillar_width: f32,
}

impl Difficulty {
    /// Difficulty at the given progress point
    pub fn at(mode: GameMode, score: u32) -> Self {
        let factor = match mode {
            GameMode::Levels { index } => 1.0 + index as f32 * 0.05,
            GameMode::Arcade => 1.0 + score as f32 * 0.02,
        };
        // The opening room uses narrower pillars to ease players in
        let pillar_width = match mode {
            GameMode::Levels { index: 0 } => (BASE_PILLAR_WIDTH * 0.75).round(),
            _ => BASE_PILLAR_WIDTH,
        };
        Self {
            factor,
            gap: (BASE_GAP / factor).max(MIN_GAP),
            speed: BASE_SPEED * factor,
            pillar_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcade_scales_with_score() {
        let easy = Difficulty::at(GameMode::Arcade, 0);
        let hard = Difficulty::at(GameMode::Arcade, 10);
        assert!(hard.speed > easy.speed);
        assert!(hard.gap <= easy.gap);
    }

    #[test]
    fn test_levels_scale_with_index() {
        let first = Difficulty::at(GameMode::Levels { index: 0 }, 0);
        let fifth = Difficulty::at(GameMode::Levels { index: 4 }, 0);
        assert!((first.factor - 1.0).abs() < 1e-6);
        assert!((fifth.factor - 1.2).abs() < 1e-6);
        assert!(fifth.speed > first.speed);
    }

    #[test]
    fn test_levels_ignore_score() {
        let a = Difficulty::at(GameMode::Levels { index: 2 }, 0);
        let b = Difficulty::at(GameMode::Levels { index: 2 }, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gap_floor() {
        // Far into an arcade run the gap bottoms out at the minimum
        let diff = Difficulty::at(GameMode::Arcade, 1000);
        assert_eq!(diff.gap, MIN_GAP);
    }

    #[test]
    fn test_first_room_narrow_pillars() {
        assert_eq!(
            Difficulty::at(GameMode::Levels { index: 0 }, 0).pillar_width,
            45.0
        );
        assert_eq!(
            Difficulty::at(GameMode::Levels { index: 1 }, 0).pillar_width,
            BASE_PILLAR_WIDTH
        );
        assert_eq!(Difficulty::at(GameMode::Arcade, 0).pillar_width, BASE_PILLAR_WIDTH);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arcade_speed_monotonic(score in 0u32..500) {
                let here = Difficulty::at(GameMode::Arcade, score);
                let next = Difficulty::at(GameMode::Arcade, score + 1);
                prop_assert!(next.speed > here.speed);
                prop_assert!(next.gap <= here.gap);
            }

            #[test]
            fn gap_stays_in_bounds(score in 0u32..10_000) {
                let diff = Difficulty::at(GameMode::Arcade, score);
                prop_assert!(diff.gap >= MIN_GAP);
                prop_assert!(diff.gap <= BASE_GAP);
            }
        }
    }
}
