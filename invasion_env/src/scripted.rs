//! Scripted ChoiceSource for forcing deterministic decisions in tests.

use crate::ChoiceSource;
use std::collections::VecDeque;

/// Replays a fixed list of indices.
///
/// Each call consumes the next scripted index, reduced modulo `len`.
/// Once the script is exhausted every call returns `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedSource {
    /// Creates a source that will answer with `script` in order.
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of choices answered so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of scripted answers not yet used.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ChoiceSource for ScriptedSource {
    fn choose_index(&mut self, len: usize) -> usize {
        self.consumed += 1;
        let next = self.script.pop_front().unwrap_or(0);
        if len == 0 {
            0
        } else {
            next % len
        }
    }

    fn seed(&self) -> u64 {
        0
    }
}
