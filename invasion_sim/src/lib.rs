//! Invasion simulator harness
//!
//! Wires the invasion engine to the outside world: world files, seeds,
//! batch stress runs and JSON traces.
//!
//! # Determinism
//!
//! All sources of non-determinism are derived from one 64-bit master seed:
//! - **Deployment**: where each alien lands at start
//! - **Movement**: which live link each alien follows every round
//!
//! Re-running with the same seed and the same world reproduces the run
//! exactly; without a seed the thread RNG is used.
//!
//! # Usage
//!
//! ```
//! use invasion_core::EngineConfig;
//! use invasion_sim::InvasionRunner;
//!
//! let runner = InvasionRunner::new(EngineConfig::default().with_agents(2)).with_seed(42);
//! let outcome = runner.run("inline", "Foo north=Bar\nBar south=Foo".as_bytes()).unwrap();
//! assert!(outcome.status.is_terminal());
//! ```

mod context;
mod error;
mod exporter;
mod runner;
pub mod scenarios;

pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use exporter::SimExport;
pub use runner::{check_invariants, DynEngine, InvasionRunner, RunOutcome, StressResult};
