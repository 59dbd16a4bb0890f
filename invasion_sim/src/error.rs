//! Error types for the simulator harness.

use invasion_core::InvasionError;
use thiserror::Error;

/// Errors surfaced by the runner and the CLI.
#[derive(Debug, Error)]
pub enum SimError {
    /// World construction or engine failure
    #[error(transparent)]
    Invasion(#[from] InvasionError),

    /// Reading the world file or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the simulator harness.
pub type SimResult<T> = Result<T, SimError>;
