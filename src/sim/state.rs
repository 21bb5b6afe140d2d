//! Session state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Crashed; terminal until an explicit reset
    GameOver,
    /// Milestone target reached (timed levels only); terminal until reset
    LevelComplete,
}

impl GamePhase {
    /// Terminal phases gate input, physics and rescheduling
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Play mode, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Timed exhibition rooms with a milestone target; `index` is 0-based
    Levels { index: u32 },
    /// Endless play; difficulty follows the score
    Arcade,
}

impl GameMode {
    /// Room index when in timed-level mode
    pub fn level_index(self) -> Option<u32> {
        match self {
            GameMode::Levels { index } => Some(index),
            GameMode::Arcade => None,
        }
    }
}

/// The player-controlled entity
///
/// `x` and `radius` are constant for a session; `y` and `vy` change only
/// through integration and the jump impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Vertical velocity, positive downward
    pub vy: f32,
}

impl Avatar {
    /// Session start position: vertically centered, at rest
    pub fn at_start() -> Self {
        Self {
            x: AVATAR_X,
            y: FIELD_H / 2.0,
            radius: AVATAR_RADIUS,
            vy: 0.0,
        }
    }
}

/// A gated pillar the avatar must pass through
///
/// Gate size and pillar width are derived from the difficulty model each
/// frame, never stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    /// Left edge; decreases as the stream scrolls
    pub x: f32,
    /// Height of the top segment; the gate opens directly below it
    pub gate: f32,
    /// Set once the avatar has passed, so each pillar scores exactly once
    pub scored: bool,
}

impl Pillar {
    pub fn new(x: f32, gate: f32) -> Self {
        Self {
            x,
            gate,
            scored: false,
        }
    }
}

/// The two pillars every session starts with, as `(x, gate)` pairs
pub const STARTER_PILLARS: [(f32, f32); 2] =
    [(FIELD_W + SPAWN_MARGIN, 180.0), (FIELD_W + 260.0, 140.0)];

/// Complete session state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    /// Session seed, kept for reproducing a run from logs
    pub seed: u64,
    pub avatar: Avatar,
    /// Live pillars in spawn order, oldest first
    pub pillars: Vec<Pillar>,
    pub score: u32,
    pub phase: GamePhase,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session in the given mode
    pub fn new(mode: GameMode, seed: u64) -> Self {
        let mut state = Self {
            mode,
            seed,
            avatar: Avatar::at_start(),
            pillars: Vec::new(),
            score: 0,
            phase: GamePhase::Running,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Return to the start of the session: avatar re-centered at rest, the
    /// deterministic starter pillars, score zeroed, phase `Running`. Valid
    /// from any phase. The RNG stream is not rewound.
    pub fn reset(&mut self) {
        self.avatar = Avatar::at_start();
        self.pillars.clear();
        self.pillars
            .extend(STARTER_PILLARS.iter().map(|&(x, gate)| Pillar::new(x, gate)));
        self.score = 0;
        self.phase = GamePhase::Running;
    }
}
