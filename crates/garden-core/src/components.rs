//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Current and maximum health. Shared by defenders and attackers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// A stationary defender. Its position is the separate `Cell` component,
/// which is absent while the defender is held by the relocate tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defender {
    pub kind: DefenderKind,
    /// Milliseconds accumulated since the last action.
    pub action_timer_ms: u32,
    /// Arming state, only meaningful for trap archetypes.
    pub trap: TrapState,
}

/// A moving attacker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attacker {
    pub kind: AttackerKind,
    pub lane: i32,
    /// Continuous column, decreasing toward the house.
    pub column: f64,
    /// Columns per second.
    pub speed: f64,
    /// Health eaten per second.
    pub damage: f64,
    /// Set while consuming a defender this tick.
    pub eating: bool,
    /// Remaining slow/stun duration (ms).
    pub freeze_ms: f64,
    pub armored: bool,
}

/// How a projectile travels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Flight {
    /// Moves by its velocity and hits the first attacker it touches.
    Straight,
    /// Arcs toward an aim point and bursts there.
    Lobbed {
        /// Aim point (x = column, y = lane).
        target: DVec2,
        /// 0.0 at launch, lands at 1.0.
        progress: f64,
        blast_radius: f64,
    },
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub source: DefenderKind,
    /// Lane the projectile was fired into. Lobbed shots burst here.
    pub lane: i32,
    /// x = column, y = lane.
    pub position: DVec2,
    /// Displacement per tick. Lobbed shots recompute it from the blend
    /// toward their aim point.
    pub velocity: DVec2,
    pub damage: f64,
    pub effect: Option<StatusEffect>,
    pub flight: Flight,
    /// Damage already doubled by a passive buff.
    pub empowered: bool,
}

/// A collectible currency token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub currency: Currency,
    /// Screen-relative position in percent of the field (x = left, y = top).
    pub position: DVec2,
    pub value: u32,
    /// Remaining lifetime while uncollected (ms).
    pub ttl_ms: i32,
    /// Claimed and animating toward its counter.
    pub collecting: bool,
}

/// Transient visual cue with no gameplay effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub lane: f64,
    pub column: f64,
    pub life_ms: i32,
}

/// Per-lane last-resort device. Not an ECS entity; the world owns one per lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Failsafe {
    pub lane: i32,
    pub state: FailsafeState,
    pub column: f64,
}
