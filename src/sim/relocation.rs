//! Platform relocation policy
//!
//! Every [`BOUNCES_PER_RELOCATION`] bounces the platform jumps by an offset
//! whose X and Z components are each either 0 or `RELOCATION_STEP * difficulty`.
//! The all-zero offset is never produced, so the platform always moves.
//!
//! Offsets only ever point toward -X/-Z; the platform drifts one way for the
//! whole run.

use glam::Vec3;
use rand::Rng;

use super::state::GameState;
use crate::consts::*;

/// Non-zero (x, z) combinations, each axis either moves (1.0) or stays (0.0)
const MOVES: [(f32, f32); 3] = [(1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

/// Pick a relocation offset for the given difficulty
///
/// Uniform over the three non-zero combinations, which is the same
/// distribution as flipping a coin per axis and redrawing on (0, 0).
pub fn relocation_offset<R: Rng + ?Sized>(rng: &mut R, difficulty: f32) -> Vec3 {
    let step = RELOCATION_STEP * difficulty;
    let (x, z) = MOVES[rng.random_range(0..MOVES.len())];
    Vec3::new(x * step, 0.0, z * step)
}

/// Count a bounce and relocate the platform once enough have accumulated
///
/// Returns the applied offset when a relocation happened.
pub fn register_bounce(state: &mut GameState) -> Option<Vec3> {
    state.bounce_count += 1;
    if state.bounce_count < BOUNCES_PER_RELOCATION {
        return None;
    }

    state.difficulty += DIFFICULTY_STEP;
    let offset = relocation_offset(&mut state.rng, state.difficulty);
    state.platform.pos += offset;
    state.bounce_count = 0;
    state.score += 1;

    log::info!(
        "Platform relocated to ({:.1}, {:.1}), points: {}, difficulty: {:.1}",
        state.platform.pos.x,
        state.platform.pos.z,
        state.score,
        state.difficulty
    );

    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Worst-case biased source: every draw is zero
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_offset_never_zero_with_biased_rng() {
        for _ in 0..100 {
            let offset = relocation_offset(&mut ZeroRng, 1.1);
            assert!(offset.x != 0.0 || offset.z != 0.0);
        }
    }

    #[test]
    fn test_offset_values() {
        let mut rng = Pcg32::seed_from_u64(42);
        let step = RELOCATION_STEP * 1.5;
        for _ in 0..200 {
            let offset = relocation_offset(&mut rng, 1.5);
            assert_eq!(offset.y, 0.0);
            assert!(offset.x == 0.0 || offset.x == step);
            assert!(offset.z == 0.0 || offset.z == step);
        }
    }

    #[test]
    fn test_all_three_moves_occur() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let offset = relocation_offset(&mut rng, 1.0);
            let idx = match (offset.x != 0.0, offset.z != 0.0) {
                (true, false) => 0,
                (false, true) => 1,
                (true, true) => 2,
                (false, false) => panic!("zero offset"),
            };
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_register_bounce_relocates_every_second_bounce() {
        let mut state = GameState::new(123);
        let start = state.platform.pos;

        assert_eq!(register_bounce(&mut state), None);
        assert_eq!(state.bounce_count, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.platform.pos, start);

        let difficulty_before = state.difficulty;
        let offset = register_bounce(&mut state).expect("second bounce relocates");
        assert_eq!(state.bounce_count, 0);
        assert_eq!(state.score, 1);
        assert_eq!(state.difficulty, difficulty_before + DIFFICULTY_STEP);
        assert_eq!(state.platform.pos, start + offset);
        assert_ne!(state.platform.pos, start);
    }

    #[test]
    fn test_first_relocation_uses_raised_difficulty() {
        let mut state = GameState::new(5);
        register_bounce(&mut state);
        let offset = register_bounce(&mut state).expect("relocated");
        let step = RELOCATION_STEP * (DIFFICULTY_START + DIFFICULTY_STEP);
        assert!(offset.x == step || offset.z == step);
    }

    #[test]
    fn test_platform_size_unchanged_by_relocation() {
        let mut state = GameState::new(9);
        let size = state.platform.size();
        for _ in 0..20 {
            register_bounce(&mut state);
        }
        assert_eq!(state.platform.size(), size);
        assert_eq!(state.score, 10);
    }

    proptest! {
        #[test]
        fn prop_relocation_always_moves(seed in any::<u64>(), rounds in 1usize..20) {
            let mut state = GameState::new(seed);
            for _ in 0..rounds {
                let before = state.platform.pos;
                register_bounce(&mut state);
                let offset = register_bounce(&mut state);
                prop_assert!(offset.is_some());
                prop_assert_ne!(state.platform.pos, before);
            }
            prop_assert_eq!(state.score as usize, rounds);
        }
    }
}
