//! Per-frame simulation tick
//!
//! Order within a frame:
//! 1. Close request / steering input
//! 2. Gravity integration
//! 3. Contact test and bounce response (may relocate the platform)
//! 4. Loss check

use super::collision::ball_platform_contact;
use super::relocation::register_bounce;
use super::state::{Ball, GamePhase, GameState};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// W: toward -X
    pub forward: bool,
    /// S: toward +X
    pub back: bool,
    /// A: toward +Z
    pub left: bool,
    /// D: toward -Z
    pub right: bool,
    /// Escape
    pub quit: bool,
}

/// What the frame loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running
    Continue,
    /// Player asked to close the window
    CloseRequested,
    /// Ball fell through the floor
    GameOver { score: u32 },
}

/// Advance the ball under gravity: position first (old velocity), then velocity
///
/// Negative `dt` is treated as zero.
#[inline]
pub fn integrate(ball: &mut Ball, gravity: f32, dt: f32) {
    let dt = dt.max(0.0);
    ball.pos.y += ball.vel_y * dt;
    ball.vel_y += gravity * dt;
}

/// Steer the ball along the world X/Z axes while it is near platform height
pub fn apply_movement(ball: &mut Ball, input: &TickInput, dt: f32) {
    if ball.pos.y < MOVE_GATE_Y {
        return;
    }

    let step = BALL_MOVE_SPEED * dt;
    if input.forward {
        ball.pos.x -= step;
    }
    if input.back {
        ball.pos.x += step;
    }
    if input.left {
        ball.pos.z += step;
    }
    if input.right {
        ball.pos.z -= step;
    }
}

/// Snap the ball back to the contact height and reflect its velocity
fn bounce(state: &mut GameState, audio: &mut dyn AudioSink) {
    state.ball.pos.y = state.platform.contact_height() - state.ball.radius();
    state.ball.vel_y = -state.ball.vel_y * BOUNCE_RESTITUTION;
    audio.play(SoundEffect::Bounce);
    log::debug!("Bounce, outgoing velocity {:.3}", state.ball.vel_y);

    if register_bounce(state).is_some() {
        audio.play(SoundEffect::Relocate);
    }
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    audio: &mut dyn AudioSink,
) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::GameOver { score: state.score };
    }
    if input.quit {
        return TickOutcome::CloseRequested;
    }

    let dt = crate::clamp_frame_dt(dt);
    state.time_ticks += 1;

    // Nothing moves in an empty frame; the ball may still sit at the contact height
    if dt == 0.0 {
        return TickOutcome::Continue;
    }

    apply_movement(&mut state.ball, input, dt);
    integrate(&mut state.ball, state.gravity, dt);

    if ball_platform_contact(&state.ball, &state.platform) {
        bounce(state, audio);
    }

    if state.ball.pos.y < LOSS_FLOOR_Y {
        state.phase = GamePhase::GameOver;
        audio.play(SoundEffect::GameOver);
        log::info!(
            "Game over after {} ticks, points: {}",
            state.time_ticks,
            state.score
        );
        return TickOutcome::GameOver { score: state.score };
    }

    TickOutcome::Continue
}

/// Console line reported when a run ends
pub fn final_score_message(score: u32) -> String {
    format!("You died\nPoints: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    /// Records every cue instead of playing it
    #[derive(Default)]
    struct RecordingSink {
        played: Vec<SoundEffect>,
    }

    impl RecordingSink {
        fn count(&self, effect: SoundEffect) -> usize {
            self.played.iter().filter(|e| **e == effect).count()
        }
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_integrate_single_step() {
        let mut ball = Ball::new(Vec3::new(0.0, 0.5, 0.0), 5.0, 0.5);
        integrate(&mut ball, -12.8, 0.1);
        assert_eq!(ball.pos.y, 0.5 + 5.0 * 0.1);
        assert_eq!(ball.vel_y, 5.0 + -12.8 * 0.1);
    }

    #[test]
    fn test_integrate_negative_dt_is_noop() {
        let mut ball = Ball::new(Vec3::new(0.0, 0.5, 0.0), 5.0, 0.5);
        integrate(&mut ball, -12.8, -1.0);
        assert_eq!(ball.pos.y, 0.5);
        assert_eq!(ball.vel_y, 5.0);
    }

    #[test]
    fn test_bounce_reflects_and_damps() {
        let mut state = GameState::new(1);
        let mut sink = RecordingSink::default();
        state.ball.pos.y = -1.75;
        state.ball.vel_y = -8.0;

        let incoming = state.ball.vel_y;
        bounce(&mut state, &mut sink);

        assert_eq!(state.ball.vel_y, -0.95 * incoming);
        assert_eq!(
            state.ball.pos.y,
            state.platform.contact_height() - state.ball.radius()
        );
        assert_eq!(state.bounce_count, 1);
        assert_eq!(sink.count(SoundEffect::Bounce), 1);
    }

    #[test]
    fn test_loss_threshold_is_strict() {
        let mut sink = RecordingSink::default();

        // Far off the platform, no gravity, so only the threshold matters
        let mut state = GameState::new(1);
        state.gravity = 0.0;
        state.ball.vel_y = 0.0;
        state.ball.pos = Vec3::new(100.0, -30.0, 100.0);
        assert_eq!(tick(&mut state, &TickInput::default(), FRAME, &mut sink), TickOutcome::Continue);
        assert_eq!(state.phase, GamePhase::Playing);

        state.ball.pos.y = -30.01;
        assert_eq!(
            tick(&mut state, &TickInput::default(), FRAME, &mut sink),
            TickOutcome::GameOver { score: 0 }
        );
        assert!(state.is_over());
        assert_eq!(sink.count(SoundEffect::GameOver), 1);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(1);
        state.ball.pos = Vec3::new(100.0, -40.0, 0.0);
        tick(&mut state, &TickInput::default(), FRAME, &mut sink);
        assert!(state.is_over());

        let ticks = state.time_ticks;
        let pos = state.ball.pos;
        let outcome = tick(&mut state, &TickInput::default(), FRAME, &mut sink);
        assert_eq!(outcome, TickOutcome::GameOver { score: 0 });
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.ball.pos, pos);
        assert_eq!(sink.count(SoundEffect::GameOver), 1);
    }

    #[test]
    fn test_quit_requests_close() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(1);
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input, FRAME, &mut sink), TickOutcome::CloseRequested);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_movement_directions() {
        let dt = 0.1;
        let step = BALL_MOVE_SPEED * dt;
        let start = Vec3::new(0.0, 0.0, 0.0);

        let cases = [
            (TickInput { forward: true, ..Default::default() }, Vec3::new(-step, 0.0, 0.0)),
            (TickInput { back: true, ..Default::default() }, Vec3::new(step, 0.0, 0.0)),
            (TickInput { left: true, ..Default::default() }, Vec3::new(0.0, 0.0, step)),
            (TickInput { right: true, ..Default::default() }, Vec3::new(0.0, 0.0, -step)),
        ];

        for (input, expected) in cases {
            let mut ball = Ball::new(start, 0.0, 0.5);
            apply_movement(&mut ball, &input, dt);
            assert_eq!(ball.pos, start + expected);
        }
    }

    #[test]
    fn test_movement_gated_below_threshold() {
        let input = TickInput {
            forward: true,
            left: true,
            ..Default::default()
        };

        let mut ball = Ball::new(Vec3::new(0.0, -1.0, 0.0), 0.0, 0.5);
        apply_movement(&mut ball, &input, 0.1);
        assert!(ball.pos.x < 0.0);

        let mut falling = Ball::new(Vec3::new(0.0, -1.01, 0.0), 0.0, 0.5);
        apply_movement(&mut falling, &input, 0.1);
        assert_eq!(falling.pos, Vec3::new(0.0, -1.01, 0.0));
    }

    #[test]
    fn test_first_bounce_scenario() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(2024);
        assert_eq!(state.ball.vel_y, 5.0);
        assert_eq!(state.gravity, -12.8);
        assert_eq!(state.ball.pos.y, 0.5);
        assert_eq!(state.platform.pos.y, -1.0);
        assert_eq!(state.platform.size().y, 0.2);

        let mut frames = 0;
        while sink.count(SoundEffect::Bounce) == 0 {
            let vel_before = state.ball.vel_y;
            assert_eq!(
                tick(&mut state, &TickInput::default(), FRAME, &mut sink),
                TickOutcome::Continue
            );
            frames += 1;
            assert!(frames < 600, "ball never reached the platform");

            if sink.count(SoundEffect::Bounce) == 1 {
                // Falling into the bounce, rising out of it
                assert!(vel_before + state.gravity * FRAME < 0.0);
                assert!(state.ball.vel_y > 0.0);
            }
        }

        assert_eq!(sink.count(SoundEffect::Bounce), 1);
        assert_eq!(state.bounce_count, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_empty_frame_after_bounce_is_ignored() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(1);

        let mut frames = 0;
        while sink.count(SoundEffect::Bounce) == 0 {
            tick(&mut state, &TickInput::default(), FRAME, &mut sink);
            frames += 1;
            assert!(frames < 600);
        }
        assert!(state.ball.vel_y > 0.0);

        let ball_before = state.ball.clone();
        let platform_before = state.platform.pos;
        for dt in [-0.5, 0.0, f32::NAN] {
            assert_eq!(
                tick(&mut state, &TickInput::default(), dt, &mut sink),
                TickOutcome::Continue
            );
        }

        assert_eq!(state.bounce_count, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.pos, ball_before.pos);
        assert_eq!(state.ball.vel_y, ball_before.vel_y);
        assert_eq!(state.platform.pos, platform_before);
        assert_eq!(sink.count(SoundEffect::Bounce), 1);
    }

    #[test]
    fn test_oversized_frame_is_clamped() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), 5.0, &mut sink);

        assert_eq!(state.ball.pos.y, 0.5 + 5.0 * MAX_FRAME_DT);
        assert_eq!(state.ball.vel_y, 5.0 + GRAVITY * MAX_FRAME_DT);
    }

    #[test]
    fn test_two_bounces_score_a_point() {
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(77);
        let start = state.platform.pos;

        let mut frames = 0;
        while sink.count(SoundEffect::Bounce) < 2 {
            tick(&mut state, &TickInput::default(), FRAME, &mut sink);
            frames += 1;
            assert!(frames < 2000);
        }

        assert_eq!(state.score, 1);
        assert_eq!(state.bounce_count, 0);
        assert_ne!(state.platform.pos, start);
        assert_eq!(sink.count(SoundEffect::Relocate), 1);
    }

    #[test]
    fn test_unattended_ball_eventually_falls() {
        // Without steering the ball stays at x=z=0 and the platform walks away
        let mut sink = RecordingSink::default();
        let mut state = GameState::new(3);
        let mut outcome = TickOutcome::Continue;
        for _ in 0..10_000 {
            outcome = tick(&mut state, &TickInput::default(), FRAME, &mut sink);
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::GameOver { score: 1 });
    }

    #[test]
    fn test_final_score_message() {
        assert_eq!(final_score_message(3), "You died\nPoints: 3");
    }

    proptest! {
        #[test]
        fn prop_integrate_exact(
            y in -10.0f32..10.0,
            vel in -20.0f32..20.0,
            gravity in 0.1f32..50.0,
            dt in 0.0001f32..0.1,
        ) {
            let mut ball = Ball::new(Vec3::new(0.0, y, 0.0), vel, 0.5);
            integrate(&mut ball, -gravity, dt);
            prop_assert_eq!(ball.vel_y, vel + -gravity * dt);
            prop_assert_eq!(ball.pos.y, y + vel * dt);
        }
    }
}
