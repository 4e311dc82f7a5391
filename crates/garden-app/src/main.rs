//! garden - headless lane-defense driver
//!
//! Runs a session against the simulation engine, either as fast as possible
//! or in real time on the game loop thread, and persists progression to a
//! JSON save file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use garden_app::game_loop::spawn_game_loop;
use garden_app::script::CommandScript;
use garden_campaign::JsonFileStore;
use garden_core::commands::PlayerCommand;
use garden_core::enums::{GameMode, SessionState};
use garden_core::events::GameEvent;
use garden_core::state::GameStateSnapshot;
use garden_sim::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "garden")]
#[command(about = "Headless lane-defense simulation")]
#[command(version)]
struct Cli {
    /// Campaign level to start (defaults to the saved current level)
    #[arg(short, long)]
    level: Option<u32>,

    /// Play endless mode instead of the campaign
    #[arg(long)]
    endless: bool,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Speed multiplier, 0.25 to 4 (overrides the config file)
    #[arg(long)]
    speed: Option<f64>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Progression save file
    #[arg(long, default_value = "garden-save.json")]
    save: PathBuf,

    /// Engine configuration as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scheduled player commands as JSON
    #[arg(long)]
    script: Option<PathBuf>,

    /// Leave pickups on the field instead of collecting them automatically
    #[arg(long)]
    manual_collect: bool,

    /// Start the next level after each cleared one
    #[arg(long)]
    advance: bool,

    /// Pace ticks in wall-clock time on the game loop thread
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let script = match &cli.script {
        Some(path) => CommandScript::load(path)?,
        None => CommandScript::default(),
    };

    let engine = SimulationEngine::new(config, Box::new(JsonFileStore::new(&cli.save)));
    let mode = if cli.endless {
        GameMode::Endless
    } else {
        GameMode::Campaign
    };
    let level = cli
        .level
        .unwrap_or(engine.progression().current_level)
        .max(1);
    tracing::info!(?mode, level, save = %cli.save.display(), "starting session");

    let start = PlayerCommand::StartSession { level, mode };
    let last = if cli.realtime {
        run_realtime(engine, start, script, &cli)?
    } else {
        run_fast(engine, start, script, &cli)
    };

    tracing::info!(
        state = ?last.state,
        level = last.level,
        tick = last.time.tick,
        sun = last.sun,
        coins = last.coins,
        "session finished"
    );
    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&last)?);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => SimConfig::default(),
    };
    config.auto_collect = !cli.manual_collect;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(speed) = cli.speed {
        config.speed_multiplier = speed;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<SimConfig> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
}

/// What the driver should do after observing a snapshot.
enum Next {
    Continue,
    Advance,
    Stop,
}

fn observe(snapshot: &GameStateSnapshot, advance: bool) -> Next {
    for event in &snapshot.events {
        match event {
            GameEvent::WaveProgress { percent } => {
                tracing::debug!(percent, tick = snapshot.time.tick, "wave progress");
            }
            GameEvent::LevelComplete { level, unlocked } => {
                tracing::info!(level, ?unlocked, "level cleared");
            }
            GameEvent::Victory { level } => tracing::info!(level, "victory"),
            GameEvent::GameOver => tracing::info!(tick = snapshot.time.tick, "garden overrun"),
        }
    }
    match snapshot.state {
        SessionState::LevelTransition if advance => Next::Advance,
        SessionState::Playing | SessionState::Paused => Next::Continue,
        _ => Next::Stop,
    }
}

fn run_fast(
    mut engine: SimulationEngine,
    start: PlayerCommand,
    mut script: CommandScript,
    cli: &Cli,
) -> GameStateSnapshot {
    engine.queue_command(start);
    loop {
        engine.queue_commands(script.take_due(engine.time().tick));
        let snapshot = engine.tick();
        if snapshot.time.tick >= cli.ticks {
            return snapshot;
        }
        match observe(&snapshot, cli.advance) {
            Next::Continue => {}
            Next::Advance => engine.queue_command(PlayerCommand::NextLevel),
            Next::Stop => return snapshot,
        }
        // Nothing will change without input.
        if snapshot.state == SessionState::Paused && script.is_finished() {
            tracing::warn!(tick = snapshot.time.tick, "session paused with no input left");
            return snapshot;
        }
    }
}

fn run_realtime(
    engine: SimulationEngine,
    start: PlayerCommand,
    mut script: CommandScript,
    cli: &Cli,
) -> Result<GameStateSnapshot> {
    let handle = spawn_game_loop(engine).context("spawning game loop")?;
    handle.send(start);
    for command in script.take_due(0) {
        handle.send(command);
    }

    let last = loop {
        let snapshot = handle
            .snapshots
            .recv_timeout(Duration::from_secs(5))
            .context("game loop stopped responding")?;
        // The loop may tick before the start command arrives.
        if snapshot.state == SessionState::Idle && snapshot.time.tick == 0 {
            continue;
        }
        for command in script.take_due(snapshot.time.tick) {
            handle.send(command);
        }
        if snapshot.time.tick >= cli.ticks {
            break snapshot;
        }
        match observe(&snapshot, cli.advance) {
            Next::Continue => {}
            Next::Advance => {
                handle.send(PlayerCommand::NextLevel);
            }
            Next::Stop => break snapshot,
        }
    };
    handle.shutdown();
    Ok(last)
}
