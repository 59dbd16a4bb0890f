//! Serializable summary of a run.

use crate::engine::ExecutionStatus;
use crate::registry::Alien;
use invasion_env::AgentId;
use serde::{Deserialize, Serialize};

/// Where a surviving alien ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlienPosition {
    pub id: AgentId,
    pub city: String,
    pub stuck: bool,
}

impl From<&Alien> for AlienPosition {
    fn from(alien: &Alien) -> Self {
        Self {
            id: alien.id(),
            city: alien.city().to_string(),
            stuck: alien.is_stuck(),
        }
    }
}

/// Final (or intermediate) state of an engine, ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Engine status when the report was taken
    pub status: ExecutionStatus,

    /// `status` as display text
    pub status_text: String,

    /// Rounds executed
    pub rounds: u64,

    /// Configured round ceiling
    pub max_rounds: u64,

    /// Seed of the movement source (0 if unseeded)
    pub seed: u64,

    /// Aliens deployed at start
    pub deployed: usize,

    /// Aliens still alive
    pub active: usize,

    /// Alive aliens that are stuck
    pub stuck: usize,

    /// Aliens killed in fights
    pub destroyed: usize,

    /// Destroyed cities, in name order
    pub destroyed_cities: Vec<String>,

    /// Surviving aliens
    pub survivors: Vec<AlienPosition>,

    /// Surviving map in the input notation
    pub world: String,
}

impl RunReport {
    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = RunReport {
            status: ExecutionStatus::AllAgentsStuck,
            status_text: ExecutionStatus::AllAgentsStuck.description().to_string(),
            rounds: 3,
            max_rounds: 10,
            seed: 42,
            deployed: 2,
            active: 1,
            stuck: 1,
            destroyed: 1,
            destroyed_cities: vec!["Foo".into()],
            survivors: vec![AlienPosition {
                id: AgentId(1),
                city: "Bar".into(),
                stuck: true,
            }],
            world: "Bar north=Baz".into(),
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["status"], "all_agents_stuck");
        assert_eq!(json["survivors"][0]["id"], 1);
        assert_eq!(json["destroyed_cities"][0], "Foo");
    }
}
