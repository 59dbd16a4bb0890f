//! Common types for the invasion environment abstraction.

use serde::{Deserialize, Serialize};

/// Unique identifier for a deployed alien.
///
/// Assigned sequentially at deployment and stable for the alien's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
