//! Headless driver for the HELIOS simulation.
//!
//! Stands in for the excluded rendering/input collaborator: runs the
//! engine for a number of ticks, optionally replaying a command script,
//! and prints snapshots or a final summary as JSON.
//!
//! A script file is one command per line in the snapshot JSON grammar,
//! optionally prefixed with `tick:` for scheduling, e.g.:
//!
//! ```text
//! 10 {"type":"ToggleGravity"}
//! 12 {"type":"Fire"}
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use helios_core::commands::PlayerCommand;
use helios_core::enums::GameOutcome;
use helios_sim::{GalaxyEngine, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "helios", about = "Headless HELIOS simulation driver")]
struct Args {
    /// Number of ticks to run.
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Command script: lines of `<tick> <command-json>`.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the full snapshot JSON every N ticks (0 = only the last).
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let script = match &args.script {
        Some(path) => parse_script(path)?,
        None => Vec::new(),
    };

    let mut engine = GalaxyEngine::new(SimConfig { seed: args.seed });
    let mut last_snapshot = None;

    for tick in 0..args.ticks {
        for (at, command) in &script {
            if *at == tick {
                engine.queue_command(command.clone());
            }
        }

        let snapshot = engine.tick();
        for event in &snapshot.events {
            log::info!("tick {}: {:?}", snapshot.clock.tick, event);
        }
        if args.snapshot_every != 0 && tick % args.snapshot_every == 0 {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        let decided = snapshot.outcome != GameOutcome::Playing;
        last_snapshot = Some(snapshot);
        if decided {
            break;
        }
    }

    if let Some(snapshot) = last_snapshot {
        if args.snapshot_every == 0 {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        log::info!(
            "finished at tick {} with outcome {:?}",
            snapshot.clock.tick,
            snapshot.outcome
        );
    }
    Ok(())
}

fn parse_script(path: &PathBuf) -> Result<Vec<(u64, PlayerCommand)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let mut script = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (tick, json) = line
            .split_once(' ')
            .with_context(|| format!("script line {}: expected `<tick> <json>`", number + 1))?;
        let tick: u64 = tick
            .parse()
            .with_context(|| format!("script line {}: bad tick", number + 1))?;
        let command: PlayerCommand = serde_json::from_str(json)
            .with_context(|| format!("script line {}: bad command", number + 1))?;
        script.push((tick, command));
    }
    Ok(script)
}
