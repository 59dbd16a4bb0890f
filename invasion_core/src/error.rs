//! Error types for the invasion world model and engine.

use invasion_env::AgentId;
use thiserror::Error;

/// Errors that can occur while building or simulating a world.
#[derive(Debug, Error)]
pub enum InvasionError {
    /// Lookup of a city that is not part of the graph
    #[error("cannot find requested city: {0}")]
    CityNotFound(String),

    /// Lookup of an alien that was never deployed or is already destroyed
    #[error("cannot find requested alien: {0}")]
    AgentNotFound(AgentId),

    /// A link token that is not of the form `direction=city`
    #[error("malformed input on line {line}: {token:?}")]
    MalformedInput {
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },

    /// A link token whose direction is not north/east/south/west
    #[error("invalid direction on line {line}: {token:?}")]
    InvalidDirection {
        /// 1-based line number
        line: usize,
        /// Offending direction token
        token: String,
    },

    /// Aliens requested for a world without any city to land on
    #[error("cannot deploy {requested} aliens: the world has no cities")]
    EmptyWorld {
        /// Number of aliens that were requested
        requested: usize,
    },

    /// Reading the world definition failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvasionError {
    /// Creates a city-not-found error.
    pub fn city(name: impl Into<String>) -> Self {
        Self::CityNotFound(name.into())
    }

    /// Returns true for lookup failures, which indicate an orchestration defect.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound(_) | Self::AgentNotFound(_))
    }
}

/// Result type used throughout the invasion core.
pub type InvasionResult<T> = Result<T, InvasionError>;
