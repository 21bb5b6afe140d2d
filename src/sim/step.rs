//! Per-frame simulation step
//!
//! Advances one frame in a fixed order: jump impulse, physics integration,
//! stream advance/spawn, collision, scoring, retirement, boundary, milestone.
//! The step cuts off the moment the session leaves `Running`; a terminal
//! phase only changes again through an explicit reset.

use rand::Rng;

use crate::consts::*;

use super::collision::{avatar_hits_pillar, out_of_bounds};
use super::difficulty::Difficulty;
use super::state::{GameMode, GamePhase, GameState, Pillar};

/// Input gathered for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Discrete jump event (key press / tap). Overwrites pending velocity;
    /// a rapid double press is indistinguishable from a single one.
    pub jump: bool,
}

/// Advance the session by one frame with normalized delta `d`
pub fn step(state: &mut GameState, input: &FrameInput, d: f32) {
    if state.phase.is_terminal() {
        return;
    }

    if input.jump {
        state.avatar.vy = JUMP_IMPULSE;
    }

    // Integrate under gravity; velocity is never clamped
    state.avatar.vy += GRAVITY * d;
    state.avatar.y += state.avatar.vy * d;

    let diff = Difficulty::at(state.mode, state.score);

    // Advance the stream and spawn once the newest pillar clears the threshold
    for pillar in &mut state.pillars {
        pillar.x -= diff.speed * d;
    }
    let needs_spawn = state
        .pillars
        .last()
        .is_none_or(|last| last.x < FIELD_W - SPAWN_THRESHOLD);
    if needs_spawn {
        let gate = draw_gate(state, diff.gap);
        state.pillars.push(Pillar::new(FIELD_W + SPAWN_MARGIN, gate));
    }

    // Any overlap ends the session on the spot
    for pillar in &state.pillars {
        if avatar_hits_pillar(&state.avatar, pillar, &diff) {
            state.phase = GamePhase::GameOver;
            return;
        }
    }

    // Each pillar scores exactly once, the first time its right edge falls
    // behind the avatar
    for pillar in &mut state.pillars {
        if !pillar.scored && pillar.x + diff.pillar_width < state.avatar.x {
            pillar.scored = true;
            state.score += 1;
        }
    }

    // Retire pillars that have fully left the field
    let width = diff.pillar_width;
    state.pillars.retain(|p| p.x + width > 0.0);

    if out_of_bounds(&state.avatar) {
        state.phase = GamePhase::GameOver;
        return;
    }

    if matches!(state.mode, GameMode::Levels { .. }) && state.score >= LEVEL_TARGET {
        state.phase = GamePhase::LevelComplete;
    }
}

/// Uniform gate offset for a fresh pillar. The range collapses to the
/// minimum when the gap leaves no room for it.
fn draw_gate(state: &mut GameState, gap: f32) -> f32 {
    let span = FIELD_H - gap - GATE_RESERVE;
    if span <= 0.0 {
        GATE_MIN
    } else {
        GATE_MIN + state.rng.random_range(0.0..span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::STARTER_PILLARS;

    fn arcade() -> GameState {
        GameState::new(GameMode::Arcade, 42)
    }

    #[test]
    fn test_gravity_integration() {
        let mut state = arcade();
        state.pillars = vec![Pillar::new(300.0, 180.0)];
        let y0 = state.avatar.y;

        step(&mut state, &FrameInput::default(), 1.0);

        assert_eq!(state.avatar.vy, GRAVITY);
        assert_eq!(state.avatar.y, y0 + GRAVITY);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut state = arcade();
        state.pillars = vec![Pillar::new(300.0, 180.0)];
        state.avatar.vy = 6.5;

        step(&mut state, &FrameInput { jump: true }, 0.0);

        assert_eq!(state.avatar.vy, JUMP_IMPULSE);
    }

    #[test]
    fn test_jump_suppressed_in_terminal_phase() {
        let mut state = arcade();
        state.phase = GamePhase::GameOver;
        state.avatar.vy = 3.0;

        step(&mut state, &FrameInput { jump: true }, 1.0);

        assert_eq!(state.avatar.vy, 3.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_spawn_when_empty() {
        let mut state = arcade();
        state.pillars.clear();

        step(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.pillars.len(), 1);
        let spawned = state.pillars[0];
        assert_eq!(spawned.x, FIELD_W + SPAWN_MARGIN);
        assert!(spawned.gate >= GATE_MIN);
        assert!(spawned.gate <= FIELD_H - GATE_RESERVE - MIN_GAP + GATE_MIN);
    }

    #[test]
    fn test_spawn_threshold() {
        let mut state = arcade();
        // Newest pillar not yet past the threshold: nothing spawns
        state.pillars = vec![Pillar::new(FIELD_W - SPAWN_THRESHOLD + 1.0, 180.0)];
        step(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.pillars.len(), 1);

        // Just past it: one spawns at the right edge
        state.pillars = vec![Pillar::new(FIELD_W - SPAWN_THRESHOLD - 1.0, 180.0)];
        step(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.pillars.len(), 2);
        assert_eq!(state.pillars[1].x, FIELD_W + SPAWN_MARGIN);
    }

    #[test]
    fn test_score_increments_once_per_pillar() {
        let mut state = arcade();
        // Right edge (30 + 60) already behind the avatar at x=100
        state.pillars = vec![Pillar::new(30.0, 180.0)];

        step(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.score, 1);
        assert!(state.pillars[0].scored);

        step(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_retirement() {
        let mut state = arcade();
        state.pillars = vec![
            Pillar::new(-BASE_PILLAR_WIDTH, 180.0),       // right edge at 0: retired
            Pillar::new(-BASE_PILLAR_WIDTH + 0.5, 140.0), // right edge at 0.5: kept
            Pillar::new(300.0, 180.0),
        ];

        step(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.pillars.len(), 2);
        assert!(state.pillars.iter().all(|p| p.x + BASE_PILLAR_WIDTH > 0.0));
    }

    #[test]
    fn test_collision_ends_session_before_scoring() {
        let mut state = arcade();
        let gate_around_avatar = state.avatar.y + 10.0;
        state.pillars = vec![
            // Pass-ready but unscored
            Pillar::new(30.0, 180.0),
            // Top segment reaches below the avatar's center
            Pillar::new(state.avatar.x, gate_around_avatar),
        ];

        step(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert!(!state.pillars[0].scored);
    }

    #[test]
    fn test_boundary_crash_without_pillars() {
        let mut state = arcade();
        state.pillars.clear();
        // Integration drives the avatar past the floor in one step
        state.avatar.vy = FIELD_H;

        step(&mut state, &FrameInput::default(), 1.0);

        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_ceiling_crash() {
        let mut state = arcade();
        state.pillars = vec![Pillar::new(300.0, 180.0)];
        state.avatar.y = AVATAR_RADIUS + 0.5;
        state.avatar.vy = -2.0;

        step(&mut state, &FrameInput::default(), 1.0);

        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_level_completes_in_scoring_step() {
        let mut state = GameState::new(GameMode::Levels { index: 0 }, 42);
        state.score = LEVEL_TARGET - 1;
        // Width is 45 in the first room; right edge 36+45=81 is behind x=100
        state.pillars = vec![Pillar::new(36.0, 180.0)];

        step(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.score, LEVEL_TARGET);
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_arcade_never_completes() {
        let mut state = arcade();
        state.score = LEVEL_TARGET - 1;
        state.pillars = vec![Pillar::new(30.0, 180.0)];

        step(&mut state, &FrameInput::default(), 0.0);

        assert_eq!(state.score, LEVEL_TARGET);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_terminal_step_is_inert() {
        let mut state = arcade();
        state.phase = GamePhase::GameOver;
        let before = (state.avatar, state.pillars.clone(), state.score);

        step(&mut state, &FrameInput { jump: true }, 2.0);

        assert_eq!(before.0, state.avatar);
        assert_eq!(before.1, state.pillars);
        assert_eq!(before.2, state.score);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = arcade();
        state.avatar.vy = FIELD_H;
        step(&mut state, &FrameInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.pillars.len(), STARTER_PILLARS.len());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_monotonic_and_terminal_phases_stick(
                seed in any::<u64>(),
                frames in prop::collection::vec((0.0f32..3.0, any::<bool>()), 1..200),
            ) {
                let mut state = GameState::new(GameMode::Arcade, seed);
                let mut prev_score = 0;
                for (d, jump) in frames {
                    let phase_before = state.phase;
                    step(&mut state, &FrameInput { jump }, d);
                    prop_assert!(state.score >= prev_score);
                    prev_score = state.score;
                    if phase_before.is_terminal() {
                        prop_assert_eq!(phase_before, state.phase);
                    }
                }
            }

            #[test]
            fn no_expired_pillar_survives_a_step(
                seed in any::<u64>(),
                frames in prop::collection::vec(0.0f32..3.0, 1..100),
            ) {
                let mut state = GameState::new(GameMode::Arcade, seed);
                let width = Difficulty::at(state.mode, 0).pillar_width;
                for d in frames {
                    step(&mut state, &FrameInput { jump: d > 1.5 }, d);
                    if state.phase.is_terminal() {
                        break;
                    }
                    prop_assert!(state.pillars.iter().all(|p| p.x + width > 0.0));
                }
            }
        }
    }
}
