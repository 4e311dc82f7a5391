//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::progression::ProgressionState;
use crate::types::{Cell, SimTime};

/// Complete, owned game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: SessionState,
    pub mode: GameMode,
    pub level: u32,
    pub speed_multiplier: f64,
    pub sun: u32,
    pub coins: u32,
    /// Wave progress in percent (0–100).
    pub wave_progress: f64,
    pub hammer_cooldown_ms: u32,
    pub auto_collect: bool,
    /// Defender lifted by the relocate tool, if any.
    pub held: Option<DefenderKind>,
    pub defenders: Vec<DefenderView>,
    pub attackers: Vec<AttackerView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub markers: Vec<MarkerView>,
    pub failsafes: Vec<FailsafeView>,
    pub progression: ProgressionState,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderView {
    pub id: u64,
    pub kind: DefenderKind,
    pub cell: Cell,
    pub health: f64,
    pub max_health: f64,
    pub armed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerView {
    pub id: u64,
    pub kind: AttackerKind,
    pub lane: i32,
    pub column: f64,
    pub health: f64,
    pub max_health: f64,
    pub eating: bool,
    pub frozen: bool,
    pub armored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub source: DefenderKind,
    pub position: DVec2,
    pub lobbed: bool,
    pub empowered: bool,
    pub effect: Option<StatusEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub currency: Currency,
    pub position: DVec2,
    pub value: u32,
    pub collecting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerView {
    pub kind: MarkerKind,
    pub lane: f64,
    pub column: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailsafeView {
    pub lane: i32,
    pub state: FailsafeState,
    pub column: f64,
}
