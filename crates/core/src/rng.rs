//! Seeded uniform integer helpers shared by generation and turn resolution.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform integer in `[min_value, max_value]`.
    pub fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        let offset = self.inner.next_u64() % span;
        (i64::from(min_value) + offset as i64) as i32
    }

    /// Uniform index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.inner.next_u64() % len as u64) as usize
    }

    pub fn pick<'a, T>(&mut self, choices: &'a [T]) -> &'a T {
        &choices[self.index(choices.len())]
    }

    /// True with probability `percent / 100` (a roll in `0..100` below `percent`).
    pub fn percent_roll(&mut self, percent: i32) -> bool {
        self.range_inclusive(0, 99) < percent
    }

    pub fn coin_flip(&mut self) -> bool {
        self.inner.next_u64() & 1 == 0
    }
}
