//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Invalid
//! commands are dropped without touching the world.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Session state a player may request directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestedState {
    Playing,
    Paused,
}

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Field ---
    /// Plant a defender in a cell.
    PlaceDefender {
        kind: DefenderKind,
        lane: i32,
        column: i32,
    },
    /// Apply a tool to a cell.
    UseTool { tool: Tool, lane: i32, column: i32 },
    /// Claim a pickup by its entity id.
    CollectPickup { id: u64 },
    /// Collect every pickup automatically as it appears.
    SetAutoCollect { enabled: bool },

    // --- Session ---
    /// Start a fresh session at a campaign level (ignored in endless mode).
    StartSession { level: u32, mode: GameMode },
    /// Pause or resume.
    SetSessionState { state: RequestedState },
    /// Start the next campaign level from the level transition screen.
    NextLevel,
    /// Leave a finished session for the menu.
    ReturnToMenu,
    /// Scale the scheduler interval (1.0 = normal, 2.0 = double speed).
    SetSpeedMultiplier { multiplier: f64 },

    // --- Progression ---
    /// Spend coins on the next upgrade level of an archetype.
    BuyUpgrade { kind: DefenderKind },
}
