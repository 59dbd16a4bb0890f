//! Deterministic ChoiceSource backed by ChaCha8.

use crate::ChoiceSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded source for reproducible runs.
///
/// Same seed + same call sequence = same choices, on every platform.
#[derive(Debug, Clone)]
pub struct SeededSource {
    /// Master seed for this source
    seed: u64,

    /// Deterministic RNG
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a new SeededSource with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ChoiceSource for SeededSource {
    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
