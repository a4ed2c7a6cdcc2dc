//! Deterministic random number generation.
//!
//! Every random decision in a battle (deck shuffles, mulligan reshuffles,
//! the first-player roll) goes through a `GameRng` seeded from
//! `BattleConfig::seed`, so the same seed replays the same match.
//!
//! ```
//! use card_battle::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut shuffles = rng.for_context("shuffle");
//! let mut deck = vec![1, 2, 3, 4, 5];
//! shuffles.shuffle(&mut deck);
//!
//! let mut again = GameRng::new(42).for_context("shuffle");
//! let mut other = vec![1, 2, 3, 4, 5];
//! again.shuffle(&mut other);
//! assert_eq!(deck, other);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;

/// Deterministic ChaCha8-backed RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// so shuffles do not perturb the first-player roll and vice versa.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        // FNV-1a over the context, so streams do not depend on the
        // toolchain's std hasher.
        let tag = context
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3));
        Self::new(self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ tag)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick one of the two seats uniformly.
    pub fn roll_player(&mut self) -> PlayerId {
        PlayerId::new(self.inner.gen_range(0..2u8))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("shuffle");
        let mut ctx2 = rng.for_context("first_player");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_stream_is_pinned() {
        let mut ctx = GameRng::new(42).for_context("shuffle");
        let mut same = GameRng::new(42).for_context("shuffle");
        let mut other_seed = GameRng::new(43).for_context("shuffle");

        let seq: Vec<_> = (0..10).map(|_| ctx.gen_range_usize(0..1000)).collect();
        let again: Vec<_> = (0..10).map(|_| same.gen_range_usize(0..1000)).collect();
        let shifted: Vec<_> = (0..10).map(|_| other_seed.gen_range_usize(0..1000)).collect();
        assert_eq!(seq, again);
        assert_ne!(seq, shifted);
        assert_eq!(ctx.seed(), 42u64.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ 0x477c_62bf_680b_f6ae);
    }

    #[test]
    fn test_roll_player_covers_both_seats() {
        let mut rng = GameRng::new(7);
        let rolls: Vec<_> = (0..64).map(|_| rng.roll_player()).collect();

        assert!(rolls.contains(&PlayerId::new(0)));
        assert!(rolls.contains(&PlayerId::new(1)));
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut data);

        let mut sorted = data.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert_ne!(data, sorted);
    }
}
