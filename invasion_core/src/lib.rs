//! Invasion Core - world model and round engine for the alien invasion simulator
//!
//! Aliens are dropped on a directed graph of cities. Every round each alive
//! alien follows a random live link; when two aliens land on the same city in
//! the same round they fight, destroying the city and everyone in it. The
//! run ends when no alien is left, every alien is stuck, or the round ceiling
//! is reached.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Engine (rounds)               │
//! ├─────────────────────┬────────────────────┤
//! │  movement           │  collision         │
//! ├─────────────────────┴────────────────────┤
//! │  World = CityGraph + AgentRegistry       │
//! ├──────────────────────────────────────────┤
//! │  parser / formatter (world text format)  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! All randomness comes from an injected [`invasion_env::ChoiceSource`].

pub mod collision;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod graph;
pub mod movement;
pub mod parser;
pub mod registry;
pub mod report;
pub mod world;

// Re-export key types for convenience
pub use collision::{CollisionResolver, Fight};
pub use engine::{Engine, EngineConfig, ExecutionStatus, RoundReport};
pub use error::{InvasionError, InvasionResult};
pub use formatter::{format_world, NO_ENTRY_POINTS};
pub use graph::{City, CityGraph, Direction};
pub use movement::{resolve_move, Move};
pub use parser::{parse_graph, parse_str};
pub use registry::{Alien, AgentRegistry};
pub use report::{AlienPosition, RunReport};
pub use world::World;
