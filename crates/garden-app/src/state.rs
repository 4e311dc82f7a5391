//! State shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use garden_core::commands::PlayerCommand;
use garden_core::state::GameStateSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop.
///
/// Snapshots arrive on `snapshots` once per tick; the most recent one is also
/// kept in `latest_snapshot` for polling.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<GameStateSnapshot>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Forward a player command. Returns false if the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Stop the loop and wait for the thread to finish.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if self.thread.join().is_err() {
            tracing::error!("game loop thread panicked");
        }
    }
}
