//! JSON exporter for round-by-round traces.

use invasion_core::{RoundReport, RunReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Where the world came from (file path or generated seed)
    pub source: String,

    /// Master seed, if the run was seeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// One entry per executed round
    pub rounds: Vec<RoundReport>,

    /// Final state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunReport>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(source: &str, seed: Option<u64>) -> Self {
        Self {
            source: source.to_string(),
            seed,
            rounds: Vec::new(),
            summary: None,
        }
    }

    /// Adds a round.
    pub fn add_round(&mut self, round: &RoundReport) {
        self.rounds.push(round.clone());
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, summary: RunReport) {
        self.summary = Some(summary);
    }

    /// Total fights across all rounds.
    pub fn fight_count(&self) -> usize {
        self.rounds.iter().map(|round| round.fights.len()).sum()
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
