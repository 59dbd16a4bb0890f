//! Invasion simulator CLI
//!
//! Drops aliens on a world map and runs the invasion until it ends.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use invasion_core::EngineConfig;
use invasion_sim::scenarios::RandomWorldConfig;
use invasion_sim::{InvasionRunner, SimContext};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Alien invasion simulator
#[derive(Parser, Debug)]
#[command(name = "invasion-sim")]
#[command(about = "Simulate an alien invasion over a map of cities", long_about = None)]
struct Args {
    /// Input file to read the world definition from
    #[arg(short, long, required_unless_present = "stress", conflicts_with = "stress")]
    input: Option<PathBuf>,

    /// Number of aliens to deploy
    #[arg(short = 'n', long, default_value = "10")]
    agents: usize,

    /// Maximum number of rounds to run
    #[arg(short = 'm', long, default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
    max_rounds: u64,

    /// Master seed for reproducible runs (default: unseeded)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output instead of the map
    #[arg(long)]
    json: bool,

    /// Export the round-by-round trace to a JSON file
    #[arg(long, conflicts_with = "stress")]
    export: Option<PathBuf>,

    /// Run N generated worlds and check invariants instead of reading a map
    #[arg(long)]
    stress: Option<usize>,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = EngineConfig::default()
        .with_agents(args.agents)
        .with_max_rounds(args.max_rounds);
    let mut runner = InvasionRunner::new(config);
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }

    if let Some(runs) = args.stress {
        run_stress(&runner, args.seed, runs, args.json);
        return;
    }

    let Some(input) = args.input else {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "--input is required without --stress")
            .exit();
    };

    let outcome = match runner.run_file(&input) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("An error occurred while running {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    if let Some(export_path) = &args.export {
        match outcome.export.write_to_file(export_path) {
            Ok(()) => info!(
                "Exported {} rounds to {}",
                outcome.export.rounds.len(),
                export_path.display()
            ),
            Err(e) => {
                error!("Failed to write export: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!("Execution completed: {}", outcome.status);

    if args.json {
        match outcome.report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", outcome.report.world);
    }
}

fn run_stress(runner: &InvasionRunner, seed: Option<u64>, runs: usize, json: bool) {
    let base_seed = seed.unwrap_or_else(|| SimContext::from_time().seed());
    info!("Stress testing {} generated worlds (base seed={})", runs, base_seed);

    let results = runner.run_stress(base_seed, runs, &RandomWorldConfig::default());
    let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();

    if json {
        let summary = serde_json::json!({
            "total": results.len(),
            "passed": results.len() - failed.len(),
            "failed": failed.len(),
            "results": results.iter().map(|r| {
                serde_json::json!({
                    "seed": r.seed,
                    "passed": r.passed,
                    "rounds": r.rounds,
                    "status": r.status,
                    "failure_reason": r.failure_reason,
                })
            }).collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to serialize summary: {}", e),
        }
    } else if failed.is_empty() {
        info!("All {} stress runs passed", results.len());
    } else {
        error!("{}/{} stress runs failed", failed.len(), results.len());
        for result in &failed {
            error!(
                "  - seed={}: {}",
                result.seed,
                result.failure_reason.as_deref().unwrap_or("unknown")
            );
        }
    }

    if !failed.is_empty() {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_input_required_without_stress() {
        let err = Args::try_parse_from(["invasion-sim", "-n", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_stress_needs_no_input() {
        let args = Args::try_parse_from(["invasion-sim", "--stress", "5", "-s", "7"]).unwrap();
        assert_eq!(args.stress, Some(5));
        assert!(args.input.is_none());
    }

    #[test]
    fn test_stress_conflicts_with_map_options() {
        let with_export =
            Args::try_parse_from(["invasion-sim", "--stress", "5", "--export", "out.json"]);
        assert_eq!(with_export.unwrap_err().kind(), ErrorKind::ArgumentConflict);

        let with_input = Args::try_parse_from(["invasion-sim", "--stress", "5", "-i", "map.txt"]);
        assert_eq!(with_input.unwrap_err().kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_map_run_parses() {
        let args = Args::try_parse_from(["invasion-sim", "-i", "map.txt", "--export", "out.json"])
            .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("map.txt")));
        assert_eq!(args.agents, 10);
        assert_eq!(args.max_rounds, 10_000);
    }
}
