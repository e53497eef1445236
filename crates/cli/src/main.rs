use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sched_core::run;
use solver_milp::MilpSolver;
use types::{CurriculaRecord, EngineConfig, RoomRecord, SolveStatus};

/// Solves a weekly class/room/teacher timetable from a rooms catalog and a
/// curricula catalog, printing the decoded timetable as JSON to stdout.
/// Rendering into any presentation format is the exporter's job, not this
/// binary's — see spec.md §1.
#[derive(Parser, Debug)]
#[command(name = "unischedule", version, about)]
struct Args {
    /// Path to a JSON array of rooms (the `Rooms` ingest contract).
    rooms_path: PathBuf,
    /// Path to the nested `level -> semester -> { subjects }` curricula JSON.
    courses_path: PathBuf,
    /// Wall-clock solver budget, in seconds.
    #[arg(long, default_value_t = 300)]
    time_budget_secs: u64,
    /// Deterministic solver seed. `good_lp`'s `coin_cbc` backend does not
    /// currently expose a seed knob; this is accepted and threaded through
    /// for forward compatibility with a future backend.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let args = Args::parse();
    std::process::exit(run_cli(args).await);
}

async fn run_cli(args: Args) -> i32 {
    let rooms = match read_json::<Vec<RoomRecord>>(&args.rooms_path) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, path = %args.rooms_path.display(), "failed to read rooms file");
            return 1;
        }
    };
    let curricula = match read_json::<CurriculaRecord>(&args.courses_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, path = %args.courses_path.display(), "failed to read courses file");
            return 1;
        }
    };

    // Validate inputs explicitly so ingest-level failures (duplicate class
    // ids) get their own exit code instead of being folded into whatever
    // `run` below surfaces.
    if let Err(e) = sched_core::build(rooms.clone(), curricula.clone()) {
        tracing::error!(error = %e, "input rejected");
        return 1;
    }

    let config = EngineConfig {
        time_budget: Duration::from_secs(args.time_budget_secs),
        seed: args.seed,
    };

    let solver = MilpSolver::new();
    let (result, timetable) = match run(&solver, rooms, curricula, config).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "engine run failed");
            return 1;
        }
    };

    match result.status {
        SolveStatus::Optimal | SolveStatus::Feasible => {
            let timetable = timetable.expect("decodable status always decodes");
            println!("{}", serde_json::to_string_pretty(&timetable).expect("timetable serializes"));
            0
        }
        SolveStatus::Infeasible => {
            tracing::warn!(stats = ?result.stats, "no assignment satisfies all hard constraints");
            2
        }
        SolveStatus::Unknown => {
            tracing::warn!(stats = ?result.stats, "solver exhausted its time budget");
            3
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
