//! Production implementation of ChoiceSource using the thread-local RNG.

use crate::ChoiceSource;
use rand::Rng;

/// Production source backed by OS-seeded thread entropy.
///
/// This is the "real" implementation used when no seed is requested.
/// Runs are not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl EntropySource {
    /// Creates a new EntropySource.
    pub fn new() -> Self {
        Self
    }
}

impl ChoiceSource for EntropySource {
    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }

    fn seed(&self) -> u64 {
        // Production is not seeded
        0
    }
}
