//! Game loop thread. Runs the simulation engine at the fixed tick rate and
//! publishes snapshots.
//!
//! The engine moves into this thread and is owned by it. Commands arrive via
//! an `mpsc` channel; snapshots leave through another and are also stored in
//! shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use garden_core::constants::TICK_MS;
use garden_core::state::GameStateSnapshot;
use garden_sim::SimulationEngine;

use crate::state::{GameLoopCommand, LoopHandle};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_MS as u64);

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(engine: SimulationEngine) -> io::Result<LoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let (snapshot_tx, snapshots) = mpsc::channel::<GameStateSnapshot>();
    let latest_snapshot = Arc::new(Mutex::new(None));

    let shared = Arc::clone(&latest_snapshot);
    let thread = std::thread::Builder::new()
        .name("garden-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, snapshot_tx, &shared))?;

    Ok(LoopHandle {
        command_tx,
        snapshots,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown or until either channel disconnects.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    tracing::debug!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        let snapshot = engine.tick();

        // 3. Store the latest snapshot, then publish it
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        if snapshot_tx.send(snapshot).is_err() {
            return;
        }

        // 4. Sleep until the next tick, scaled by the speed multiplier
        let effective = effective_tick_duration(engine.speed_multiplier());
        next_tick_time += effective;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock interval between ticks at a speed multiplier.
pub fn effective_tick_duration(speed_multiplier: f64) -> Duration {
    if speed_multiplier > 0.001 {
        TICK_DURATION.div_f64(speed_multiplier)
    } else {
        TICK_DURATION
    }
}
