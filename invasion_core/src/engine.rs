//! Round scheduler: drives movement and collisions until a terminal status.

use crate::collision::{CollisionResolver, Fight};
use crate::error::InvasionResult;
use crate::movement::{resolve_move, Move};
use crate::parser::parse_graph;
use crate::report::{AlienPosition, RunReport};
use crate::world::World;
use invasion_env::{AgentId, ChoiceSource};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::{debug, info, warn};

/// Default round ceiling.
pub const DEFAULT_MAX_ROUNDS: u64 = 10_000;

/// Default number of aliens to deploy.
pub const DEFAULT_AGENT_COUNT: usize = 10;

/// Execution status of the engine.
///
/// Every variant except `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Still running
    Running,
    /// Completed because the round ceiling was reached
    MaxRoundsReached,
    /// Every alive alien is stuck, further rounds would not change anything
    AllAgentsStuck,
    /// Every alien died fighting
    NoAgentsLeft,
}

impl ExecutionStatus {
    /// Human-readable description used in reports.
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionStatus::Running => "(non-terminal)",
            ExecutionStatus::MaxRoundsReached => "Max execution round reached",
            ExecutionStatus::AllAgentsStuck => "All alive agents are stuck",
            ExecutionStatus::NoAgentsLeft => "No alive agents left",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionStatus::Running)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Configuration for building an engine from a world definition.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of aliens to deploy
    pub agent_count: usize,

    /// Round ceiling
    pub max_rounds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agent_count: DEFAULT_AGENT_COUNT,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Sets the number of aliens.
    pub fn with_agents(mut self, count: usize) -> Self {
        self.agent_count = count;
        self
    }

    /// Sets the round ceiling.
    pub fn with_max_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = rounds;
        self
    }
}

/// What happened during one call to [`Engine::step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round counter after the call
    pub round: u64,

    /// False if the engine was already terminal and nothing moved
    pub executed: bool,

    /// Status after the call
    pub status: ExecutionStatus,

    /// Aliens that followed a link
    pub moves: usize,

    /// Aliens flagged stuck for the first time
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub newly_stuck: Vec<AgentId>,

    /// Stuck aliens removed because their city had already been destroyed
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stragglers: Vec<AgentId>,

    /// Fights, in the order they happened
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fights: Vec<Fight>,

    /// Alive aliens after the call
    pub active: usize,

    /// Stuck aliens after the call
    pub stuck: usize,
}

/// The engine - owns the world and advances it round by round.
#[derive(Debug)]
pub struct Engine<R: ChoiceSource> {
    /// World being invaded
    world: World,

    /// Rounds completed so far
    round: u64,

    /// Round ceiling
    max_rounds: u64,

    /// Source of every movement decision
    source: R,

    /// Seed reported instead of the source's own, when the run was derived from one
    master_seed: Option<u64>,
}

impl<R: ChoiceSource> Engine<R> {
    /// Creates an engine over an already deployed world.
    pub fn new(world: World, max_rounds: u64, source: R) -> Self {
        Self {
            world,
            round: 0,
            max_rounds,
            source,
            master_seed: None,
        }
    }

    /// Records the seed every random stream of this run was derived from.
    ///
    /// Reports carry it so the whole run, deployment included, can be replayed.
    pub fn with_master_seed(mut self, seed: u64) -> Self {
        self.master_seed = Some(seed);
        self
    }

    /// Parses a world definition, deploys aliens with `source` and builds the engine.
    ///
    /// The same source then drives movement.
    pub fn from_reader<B: BufRead>(
        config: &EngineConfig,
        reader: B,
        mut source: R,
    ) -> InvasionResult<Self> {
        let graph = parse_graph(reader)?;
        let world = World::deploy(graph, config.agent_count, &mut source)?;
        info!(
            "World ready: {} cities, {} aliens, max {} rounds",
            world.graph().len(),
            world.active_agent_count(),
            config.max_rounds
        );
        Ok(Self::new(world, config.max_rounds, source))
    }

    /// Evaluates the termination conditions, first match wins.
    pub fn status(&self) -> ExecutionStatus {
        let active = self.world.active_agent_count();
        let stuck = self.world.stuck_agent_count();

        if active == 0 {
            ExecutionStatus::NoAgentsLeft
        } else if stuck >= active {
            ExecutionStatus::AllAgentsStuck
        } else if self.round >= self.max_rounds {
            ExecutionStatus::MaxRoundsReached
        } else {
            ExecutionStatus::Running
        }
    }

    /// Executes one round.
    ///
    /// A terminal engine is left untouched and reports `executed: false`.
    /// Otherwise every alien alive at the start of the round gets one move,
    /// in ascending id order; aliens destroyed earlier in the same round are
    /// skipped.
    pub fn step(&mut self) -> InvasionResult<RoundReport> {
        let status = self.status();
        if status.is_terminal() {
            return Ok(self.round_report(false, status));
        }

        let mut report = self.round_report(true, status);
        let mut collisions = CollisionResolver::new();

        for id in self.world.registry().active_ids() {
            if !self.world.registry().contains(id) {
                continue;
            }

            match resolve_move(&mut self.world, id, &mut self.source)? {
                Move::Moved { from, to, direction } => {
                    report.moves += 1;
                    debug!("Alien {} is in city {} and moving {} to {}", id, from, direction, to);
                }
                Move::Stuck { city, newly } => {
                    debug!("Alien {} is in a city {} with no available directions", id, city);
                    if self.world.graph().is_destroyed(&city)? {
                        warn!("Alien {} was left in destroyed city {} and is removed", id, city);
                        self.world.registry_mut().remove(&[id])?;
                        report.stragglers.push(id);
                        continue;
                    }
                    if newly {
                        report.newly_stuck.push(id);
                    }
                }
            }

            if let Some(fight) = collisions.record_landing(&mut self.world, id)? {
                info!(
                    "{} has been destroyed by alien {} and alien {}!",
                    fight.city, fight.attackers.0, fight.attackers.1
                );
                if fight.casualties.len() > 2 {
                    debug!("  casualties in {}: {:?}", fight.city, fight.casualties);
                }
                report.fights.push(fight);
            }
        }

        self.round += 1;
        report.round = self.round;
        report.status = self.status();
        report.active = self.world.active_agent_count();
        report.stuck = self.world.stuck_agent_count();
        Ok(report)
    }

    /// Runs rounds until a terminal status is reached.
    pub fn run(&mut self) -> InvasionResult<ExecutionStatus> {
        self.run_with(|_| {})
    }

    /// Runs rounds until a terminal status, passing each executed round to `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> InvasionResult<ExecutionStatus>
    where
        F: FnMut(&RoundReport),
    {
        loop {
            debug!("======= Round #{} =======", self.round);
            let report = self.step()?;
            if report.executed {
                observer(&report);
            }
            if report.status.is_terminal() {
                info!("Execution completed: {} after {} rounds", report.status, self.round);
                return Ok(report.status);
            }
        }
    }

    fn round_report(&self, executed: bool, status: ExecutionStatus) -> RoundReport {
        RoundReport {
            round: self.round,
            executed,
            status,
            moves: 0,
            newly_stuck: Vec::new(),
            stragglers: Vec::new(),
            fights: Vec::new(),
            active: self.world.active_agent_count(),
            stuck: self.world.stuck_agent_count(),
        }
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn max_rounds(&self) -> u64 {
        self.max_rounds
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn active_agent_count(&self) -> usize {
        self.world.active_agent_count()
    }

    pub fn stuck_agent_count(&self) -> usize {
        self.world.stuck_agent_count()
    }

    /// The surviving map in the input notation.
    pub fn formatted_world(&self) -> String {
        self.world.formatted()
    }

    /// Snapshot of the current state for reporting.
    pub fn report(&self) -> RunReport {
        let status = self.status();
        RunReport {
            status,
            status_text: status.description().to_string(),
            rounds: self.round,
            max_rounds: self.max_rounds,
            seed: self.master_seed.unwrap_or_else(|| self.source.seed()),
            deployed: self.world.registry().deployed_count(),
            active: self.world.active_agent_count(),
            stuck: self.world.stuck_agent_count(),
            destroyed: self.world.destroyed_agent_count(),
            destroyed_cities: self
                .world
                .graph()
                .destroyed_cities()
                .into_iter()
                .map(str::to_string)
                .collect(),
            survivors: self
                .world
                .registry()
                .aliens()
                .map(AlienPosition::from)
                .collect(),
            world: self.formatted_world(),
        }
    }
}
