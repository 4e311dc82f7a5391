//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Defender archetype identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefenderKind {
    Peashooter,
    Sunflower,
    CherryBomb,
    WallNut,
    PotatoMine,
    SnowPea,
    Repeater,
    Torchwood,
    Threepeater,
    Squash,
    Spikeweed,
    Jalapeno,
    TwinSunflower,
    MelonPult,
    Gatling,
    Magnet,
    Starfruit,
    IceShroom,
}

impl DefenderKind {
    /// Every defender archetype, in catalog order.
    pub const ALL: [DefenderKind; 18] = [
        DefenderKind::Peashooter,
        DefenderKind::Sunflower,
        DefenderKind::CherryBomb,
        DefenderKind::WallNut,
        DefenderKind::PotatoMine,
        DefenderKind::SnowPea,
        DefenderKind::Repeater,
        DefenderKind::Torchwood,
        DefenderKind::Threepeater,
        DefenderKind::Squash,
        DefenderKind::Spikeweed,
        DefenderKind::Jalapeno,
        DefenderKind::TwinSunflower,
        DefenderKind::MelonPult,
        DefenderKind::Gatling,
        DefenderKind::Magnet,
        DefenderKind::Starfruit,
        DefenderKind::IceShroom,
    ];
}

/// Attacker archetype identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    Normal,
    Cone,
    Bucket,
    Football,
    Flag,
    Gargantuar,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
    Victory,
    LevelTransition,
}

/// Session mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Finite waves from the level table, advancing through levels.
    #[default]
    Campaign,
    /// Unbounded spawning with a difficulty ramp.
    Endless,
}

/// Field editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    /// Shovel: remove a defender, refunding a little sun.
    Remove,
    /// Glove, first click: lift a defender off the field.
    RelocatePick,
    /// Glove, second click: put the lifted defender down.
    RelocatePlace,
    /// Hammer: kill attackers in the clicked cell.
    ForcedKill,
}

/// Status effect carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffect {
    Slow,
}

/// Currency carried by a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Ambient resource spent on placement.
    Sun,
    /// Kill-drop resource spent on upgrades.
    Coin,
}

/// Trap arming state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapState {
    #[default]
    Unarmed,
    Armed,
}

/// Lane failsafe state. Transitions are one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailsafeState {
    #[default]
    Ready,
    Running,
    Spent,
}

/// Transient visual cue kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Hit,
    EmpoweredHit,
    SlowHit,
    Explosion,
    Freeze,
    Planted,
    Disarm,
    Removed,
    Smash,
}

/// How a tick failure is handled by the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickErrorPolicy {
    /// Log and keep playing on the next tick.
    #[default]
    Contain,
    /// Log and pause the session.
    Halt,
}
