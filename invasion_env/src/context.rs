//! Core choice-source trait for invasion agents.

/// The central interface for random decisions.
///
/// This trait abstracts randomness so that the engine can run with real
/// entropy in production and with a fixed seed (or a fixed script) in
/// simulation and tests.
///
/// # Implementations
///
/// - **Production**: `EntropySource` - wraps `rand::thread_rng`
/// - **Simulation**: `SeededSource` - wraps `ChaCha8Rng(seed)`
/// - **Tests**: `ScriptedSource` - replays predetermined indices
pub trait ChoiceSource {
    /// Returns a uniformly distributed index in `0..len`.
    ///
    /// Callers never pass `len == 0`; implementations may return `0` in that case.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Returns the source's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    fn seed(&self) -> u64;

    /// Picks one element of `items`, or `None` when `items` is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.choose_index(items.len()))
    }
}

impl<S: ChoiceSource + ?Sized> ChoiceSource for Box<S> {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

impl<S: ChoiceSource + ?Sized> ChoiceSource for &mut S {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}
