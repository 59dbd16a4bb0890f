//! Invasion Environment Abstraction Layer
//!
//! This crate isolates the only source of non-determinism in the invasion
//! simulator: the random choice of which link an alien follows and which city
//! it is deployed on.
//!
//! # Core Concept
//!
//! Every random decision goes through [`ChoiceSource`]:
//! - **Production**: [`EntropySource`] - wraps the thread-local RNG
//! - **Simulation**: [`SeededSource`] - ChaCha8 seeded from a single `u64`
//! - **Tests**: [`ScriptedSource`] - replays a fixed list of indices
//!
//! By deriving all entropy from a single 64-bit seed, any run becomes
//! reproducible via its seed number.
//!
//! # Example
//!
//! ```
//! use invasion_env::{ChoiceSource, SeededSource};
//!
//! let mut source = SeededSource::new(42);
//! let targets = ["Foo", "Bar", "Baz"];
//! let picked = source.pick(&targets);
//! assert!(picked.is_some());
//! ```

mod context;
mod entropy_impl;
mod scripted;
mod seeded;
mod types;

pub use context::ChoiceSource;
pub use entropy_impl::EntropySource;
pub use scripted::ScriptedSource;
pub use seeded::SeededSource;
pub use types::AgentId;
