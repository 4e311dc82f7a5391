//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::DefenderKind;

/// Session-level notifications, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An attacker got past a lane whose failsafe was already spent.
    GameOver,
    /// The campaign wave was cleared.
    LevelComplete {
        level: u32,
        /// Defender archetype newly unlocked by reaching the next level.
        unlocked: Option<DefenderKind>,
    },
    /// The final configured campaign level was cleared.
    Victory { level: u32 },
    /// Wave progress changed (whole percent).
    WaveProgress { percent: u32 },
}
